//! Error taxonomy for the build pipeline.
//!
//! Every failure aborts the whole run. Nothing here is retried; each variant
//! records the step it came from so the caller can report it and exit
//! non-zero.

use std::path::PathBuf;
use thiserror::Error;

use crate::stage::Stage;

/// Errors produced by the build pipeline.
#[derive(Debug, Error)]
pub enum BuildError {
    /// One of the pre-flight checks failed.
    #[error("Pre-flight step '{stage}' failed: {message}")]
    Preflight {
        /// The stage that failed
        stage: Stage,
        /// Failure reported by the collaborator
        message: String,
    },

    /// The external config loader could not produce the project config.
    #[error("Failed to read project config: {0}")]
    ProjectConfig(String),

    /// A per-entry configuration is missing something augmentation needs.
    #[error("Invalid config for entry '{entry}': {reason}")]
    ConfigShape {
        /// Entry point name
        entry: String,
        /// What is wrong with it
        reason: String,
    },

    /// The entry file named by a configuration does not exist.
    #[error("Entry file not found: {}", .0.display())]
    EntryFileNotFound(PathBuf),

    /// Dev-server mode was requested but no start entry is declared.
    #[error("No '{0}' entry declared\n\nHint: dev-server mode bundles the entry named '{0}'")]
    MissingStartEntry(String),

    /// Bundling a single entry failed.
    #[error("Bundling entry '{entry}' failed: {message}")]
    Bundler {
        /// Entry point name
        entry: String,
        /// Failure reported by the bundler
        message: String,
    },

    /// The output directory is not a subdirectory of the project.
    #[error("Refusing to clear output directory {}\n\nHint: outDir must name a subdirectory of the project, e.g. \"dist\"", .0.display())]
    UnsafeOutputDir(PathBuf),

    /// The dev server or dist server failed.
    #[error("Server failed: {0}")]
    Server(String),

    /// Output directory or temp file I/O.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// Name of the pipeline step this error originated from.
    pub fn stage(&self) -> &'static str {
        match self {
            BuildError::Preflight { stage, .. } => stage.name(),
            BuildError::ProjectConfig(_) => "project-config",
            BuildError::ConfigShape { .. } => "augment",
            BuildError::EntryFileNotFound(_) => "temp-entry",
            BuildError::MissingStartEntry(_) => "dev-server",
            BuildError::UnsafeOutputDir(_) => "output-dir",
            BuildError::Bundler { .. } => "bundle",
            BuildError::Server(_) => "server",
            BuildError::Io(_) => "io",
        }
    }
}

/// Failure reported by an external collaborator.
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// The collaborator ran and reported failure.
    #[error("{0}")]
    Failed(String),

    /// I/O error while running the collaborator.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using `BuildError` as the default error type.
pub type Result<T, E = BuildError> = std::result::Result<T, E>;
