use crate::config::CwbSettings;
use crate::error::{ConfigError, Result, ResultExt};
use cwb_build::ProjectConfig;
use figment::{
    providers::{Env, Format as _, Json, Serialized},
    Figment,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "cwb.config.json";

/// The part of the settings file figment can't carry: an ordered map.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryDeclarations {
    #[serde(default)]
    webpack_configs: ProjectConfig,
}

/// `CWB_PACKAGENAME`, `CWB_OUTDIR` and `CWB_TEMPDIR`.
///
/// Figment lowercases environment keys, so they are extracted on their own
/// rather than merged over the camelCase file keys.
#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    packagename: Option<String>,
    outdir: Option<PathBuf>,
    tempdir: Option<PathBuf>,
}

impl EnvOverrides {
    fn load() -> Result<Self> {
        Figment::from(Env::prefixed("CWB_"))
            .extract()
            .map_err(|e| ConfigError::Invalid(e.to_string()).into())
    }

    fn apply(self, settings: &mut CwbSettings) {
        if let Some(package_name) = self.packagename {
            settings.package_name = package_name;
        }
        if let Some(out_dir) = self.outdir {
            settings.out_dir = out_dir;
        }
        if let Some(temp_dir) = self.tempdir {
            settings.temp_dir = Some(temp_dir);
        }
    }
}

impl CwbSettings {
    /// Load settings for the project at `cwd`.
    ///
    /// An explicit `config_path` must exist; without one, a missing
    /// `cwb.config.json` yields the defaults and no entries, which
    /// [`validate`](Self::validate) rejects later.
    pub fn load(cwd: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config_file = match config_path {
            Some(path) => {
                let path = cwd.join(path);
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path).into());
                }
                Some(path)
            }
            None => {
                let default_path = cwd.join(CONFIG_FILE_NAME);
                default_path.is_file().then_some(default_path)
            }
        };

        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = &config_file {
            figment = figment.merge(Json::file(path));
        }

        let mut settings: Self = figment
            .extract()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        EnvOverrides::load()?.apply(&mut settings);

        if let Some(path) = &config_file {
            settings.webpack_configs = load_entry_declarations(path)?;
        }

        tracing::debug!(
            file = ?config_file,
            entries = settings.webpack_configs.len(),
            "loaded settings"
        );
        Ok(settings)
    }

    /// Absolute temp entry directory, if one is configured.
    pub fn resolved_temp_dir(&self, cwd: &Path) -> Option<PathBuf> {
        self.temp_dir.as_ref().map(|dir| cwd.join(dir))
    }
}

fn load_entry_declarations(path: &Path) -> Result<ProjectConfig> {
    let content = std::fs::read_to_string(path).with_path(path)?;
    let declarations: EntryDeclarations = serde_json::from_str(&content).map_err(|e| {
        ConfigError::InvalidValue {
            field: "webpackConfigs".to_string(),
            value: e.to_string(),
            hint: "webpackConfigs must map entry names to bundler config objects".to_string(),
        }
    })?;
    Ok(declarations.webpack_configs)
}
