//! Project settings for cwb, loaded from `cwb.config.json`.
//!
//! Priority: environment (`CWB_*`) > config file > defaults. The
//! `webpackConfigs` map is read straight from the file so entry
//! declaration order survives.

mod defaults;
mod loading;
mod tests;
mod validation;

use cwb_build::ProjectConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use defaults::*;
pub use loading::CONFIG_FILE_NAME;

/// cwb project settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwbSettings {
    /// Package that ships the loaders, polyfill and bundler binaries
    #[serde(default = "default_package_name")]
    pub package_name: String,

    /// Output directory, relative to the project root
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Directory for temporary entry files (system temp dir if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,

    /// Paths that must exist before anything runs
    #[serde(default = "default_required_paths")]
    pub required_paths: Vec<PathBuf>,

    /// Smoke-compile command
    #[serde(default = "default_compile_check")]
    pub compile_check: CommandSpec,

    /// Lint command, also run by the pre-commit hook
    #[serde(default = "default_lint")]
    pub lint: CommandSpec,

    #[serde(default)]
    pub dev_server: DevServerSettings,

    #[serde(default)]
    pub dist_server: DistServerSettings,

    /// Entry name to raw bundler config, in declaration order
    #[serde(skip)]
    pub webpack_configs: ProjectConfig,
}

/// An external program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Shell-style rendering, used in logs and the pre-commit hook.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// `cwb wds` settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevServerSettings {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for DevServerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// `cwb distserver` settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistServerSettings {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

impl Default for DistServerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Default for CwbSettings {
    fn default() -> Self {
        Self {
            package_name: default_package_name(),
            out_dir: default_out_dir(),
            temp_dir: None,
            required_paths: default_required_paths(),
            compile_check: default_compile_check(),
            lint: default_lint(),
            dev_server: DevServerSettings::default(),
            dist_server: DistServerSettings::default(),
            webpack_configs: ProjectConfig::default(),
        }
    }
}
