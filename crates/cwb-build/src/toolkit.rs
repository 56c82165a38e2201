//! Contracts for the external collaborators the pipeline drives.
//!
//! The orchestrator never touches linters, hooks or the bundler directly; it
//! calls a [`Toolkit`]. Each call is awaited to completion before the next
//! one starts, and any error aborts the run.

use async_trait::async_trait;
use std::path::Path;

use crate::config::{AugmentedEntryConfig, ProjectConfig, RawEntryConfig};
use crate::error::ToolkitError;
use crate::loaders::ServerDependencyPaths;

/// Result type for collaborator calls.
pub type ToolkitResult<T> = std::result::Result<T, ToolkitError>;

/// External collaborators consumed by [`BuildOrchestrator`](crate::BuildOrchestrator).
#[async_trait]
pub trait Toolkit: Send + Sync {
    /// Verify required project paths exist.
    async fn check_paths_exist(&self) -> ToolkitResult<()>;

    /// Structurally validate the declared build configuration.
    async fn validate_config(&self) -> ToolkitResult<()>;

    /// Install the git pre-commit hook if it is absent.
    async fn install_precommit_hook(&self) -> ToolkitResult<()>;

    /// Smoke-compile a defined subset of sources.
    async fn run_compile_check(&self) -> ToolkitResult<()>;

    /// Lint a defined subset of sources.
    async fn run_lint_check(&self) -> ToolkitResult<()>;

    /// Load the entry name to raw config mapping.
    async fn project_config(&self) -> ToolkitResult<ProjectConfig>;

    /// Toolkit-side preparation of one raw config, given the script loaders.
    ///
    /// Runs before augmentation. The default returns the config unchanged.
    async fn create_single_entry_config(
        &self,
        raw: &RawEntryConfig,
        _extra_loaders: &[(&'static str, &Path)],
    ) -> ToolkitResult<RawEntryConfig> {
        Ok(raw.clone())
    }

    /// Start the dev server. Returns once the server stops.
    ///
    /// The config's entry already points at the composed temp entry.
    async fn run_dev_server(
        &self,
        config: &AugmentedEntryConfig,
        deps: &ServerDependencyPaths,
    ) -> ToolkitResult<()>;

    /// Bundle a single entry to disk.
    ///
    /// The config's entry already points at the composed temp entry.
    async fn run_bundler(&self, config: &AugmentedEntryConfig) -> ToolkitResult<()>;

    /// Serve previously bundled output.
    async fn run_dist_server(&self) -> ToolkitResult<()>;
}
