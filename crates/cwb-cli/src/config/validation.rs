use crate::config::{CommandSpec, CwbSettings};
use crate::error::{ConfigError, Result};
use cwb_build::normalize_path;
use serde_json::Value;
use std::path::{Component, Path, PathBuf};

/// Validate an entry name; it becomes an output subdirectory.
pub fn validate_entry_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "webpackConfigs".to_string(),
            value: "\"\"".to_string(),
            hint: "Entry names cannot be empty".to_string(),
        }
        .into());
    }

    if let Some(c) = name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '_' && *c != '-')
    {
        return Err(ConfigError::InvalidValue {
            field: "webpackConfigs".to_string(),
            value: name.to_string(),
            hint: format!("Invalid character '{}' in entry name (use letters, digits, '_' or '-')", c),
        }
        .into());
    }

    Ok(())
}

fn validate_command(field: &str, command: &CommandSpec) -> Result<()> {
    if command.program.trim().is_empty() {
        return Err(ConfigError::MissingField {
            field: format!("{}.program", field),
            hint: "Name the program to run".to_string(),
        }
        .into());
    }
    Ok(())
}

/// The output directory is wiped before every static build, so it has to be
/// a project subdirectory that holds none of the required paths.
fn validate_out_dir(out_dir: &Path, required: &[PathBuf]) -> Result<()> {
    let invalid = |hint: &str| -> Result<()> {
        Err(ConfigError::InvalidValue {
            field: "outDir".to_string(),
            value: format!("{:?}", out_dir.display().to_string()),
            hint: hint.to_string(),
        }
        .into())
    };

    if out_dir.is_absolute() || out_dir.has_root() {
        return invalid("outDir must be relative to the project, e.g. \"dist\"");
    }

    let normalized = normalize_path(out_dir);
    if normalized.as_os_str().is_empty()
        || matches!(normalized.components().next(), Some(Component::ParentDir))
    {
        return invalid("outDir must name a subdirectory of the project, e.g. \"dist\"");
    }

    if let Some(path) = required
        .iter()
        .find(|path| normalize_path(path).starts_with(&normalized))
    {
        return invalid(&format!(
            "outDir is cleared on every build and would delete required path '{}'",
            path.display()
        ));
    }

    Ok(())
}

fn validate_port(field: &str, port: u16) -> Result<()> {
    if port == 0 {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: "0".to_string(),
            hint: "Port must be between 1 and 65535".to_string(),
        }
        .into());
    }
    Ok(())
}

impl CwbSettings {
    /// Validate settings and the declared entries.
    pub fn validate(&self) -> Result<()> {
        if self.package_name.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "packageName".to_string(),
                hint: "Name the package that ships the loaders".to_string(),
            }
            .into());
        }

        if self.webpack_configs.is_empty() {
            return Err(ConfigError::MissingField {
                field: "webpackConfigs".to_string(),
                hint: "Declare at least one entry, e.g. { \"cwbStart\": { \"entry\": \"./src/index.jsx\" } }"
                    .to_string(),
            }
            .into());
        }

        for (name, raw) in self.webpack_configs.iter() {
            validate_entry_name(name)?;

            let Value::Object(config) = raw.as_value() else {
                return Err(ConfigError::InvalidValue {
                    field: format!("webpackConfigs.{}", name),
                    value: raw.as_value().to_string(),
                    hint: "Each entry must be a bundler config object".to_string(),
                }
                .into());
            };

            if !matches!(config.get("entry"), Some(Value::String(_))) {
                return Err(ConfigError::MissingField {
                    field: format!("webpackConfigs.{}.entry", name),
                    hint: "Point \"entry\" at the entry file, e.g. \"./src/index.jsx\"".to_string(),
                }
                .into());
            }
        }

        validate_out_dir(&self.out_dir, &self.required_paths)?;
        validate_command("compileCheck", &self.compile_check)?;
        validate_command("lint", &self.lint)?;
        validate_port("devServer.port", self.dev_server.port)?;
        validate_port("distServer.port", self.dist_server.port)?;

        Ok(())
    }
}
