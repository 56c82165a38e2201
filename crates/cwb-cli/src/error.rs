//! Error handling for the cwb CLI.
//!
//! [`CliError`] is the top-level error returned by commands. Pipeline
//! failures arrive as [`BuildError`] and keep their originating step;
//! settings problems are [`ConfigError`]s with a hint attached.

use cwb_build::BuildError;
use miette::Report;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings file loading or validation errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A pipeline step failed
    #[error("{0}")]
    Build(#[from] BuildError),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file doesn't exist at the given location
    #[error("Config file not found: {}\n\nHint: Create cwb.config.json or pass --config <path>", .0.display())]
    NotFound(PathBuf),

    /// Config file could not be parsed or merged
    #[error("Invalid config: {0}\n\nHint: Check cwb.config.json syntax and field types")]
    Invalid(String),

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Helpful hint for providing the field
        hint: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }
}

/// Convert a CLI error into a miette report naming the failed step.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => miette::miette!("[{}] {}", e.stage(), e),
        CliError::Config(e) => miette::miette!("[config] {}", e),
        other => miette::miette!("{}", other),
    }
}
