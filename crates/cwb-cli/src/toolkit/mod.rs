//! The Node-backed [`Toolkit`] used by the `cwb` binary.
//!
//! Paths, hooks and settings are checked in-process; compiling, linting,
//! bundling and the dev server shell out to the project's Node tooling.

pub mod hook;
mod process;
mod webpack;

use async_trait::async_trait;
use cwb_build::{
    AugmentedEntryConfig, ProjectConfig, RawEntryConfig, ServerDependencyPaths, Toolkit,
    ToolkitError, ToolkitResult,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::config::CwbSettings;
use crate::dist_server;
use hook::HookStatus;

/// Runs every pipeline collaborator against a Node project.
#[derive(Debug, Clone)]
pub struct NodeToolkit {
    cwd: PathBuf,
    settings: CwbSettings,
}

impl NodeToolkit {
    pub fn new(cwd: impl Into<PathBuf>, settings: CwbSettings) -> Self {
        Self {
            cwd: cwd.into(),
            settings,
        }
    }

    fn server_deps(&self) -> ServerDependencyPaths {
        ServerDependencyPaths::resolve(&self.cwd, &self.settings.package_name)
    }
}

#[async_trait]
impl Toolkit for NodeToolkit {
    async fn check_paths_exist(&self) -> ToolkitResult<()> {
        for path in &self.settings.required_paths {
            let full = self.cwd.join(path);
            if !tokio::fs::try_exists(&full).await? {
                return Err(ToolkitError::Failed(format!(
                    "required path does not exist: {}",
                    full.display()
                )));
            }
        }
        Ok(())
    }

    async fn validate_config(&self) -> ToolkitResult<()> {
        self.settings
            .validate()
            .map_err(|e| ToolkitError::Failed(e.to_string()))
    }

    async fn install_precommit_hook(&self) -> ToolkitResult<()> {
        match hook::install(&self.cwd, &self.settings.lint).await? {
            HookStatus::Installed(path) => {
                tracing::info!(path = %path.display(), "installed pre-commit hook")
            }
            HookStatus::AlreadyPresent(path) => {
                tracing::debug!(path = %path.display(), "pre-commit hook already present")
            }
            HookStatus::NoRepository => {
                tracing::debug!("not a git repository, skipping pre-commit hook")
            }
        }
        Ok(())
    }

    async fn run_compile_check(&self) -> ToolkitResult<()> {
        process::run_captured(&self.cwd, "compile check", &self.settings.compile_check).await
    }

    async fn run_lint_check(&self) -> ToolkitResult<()> {
        process::run_captured(&self.cwd, "lint", &self.settings.lint).await
    }

    async fn project_config(&self) -> ToolkitResult<ProjectConfig> {
        Ok(self.settings.webpack_configs.clone())
    }

    async fn create_single_entry_config(
        &self,
        raw: &RawEntryConfig,
        extra_loaders: &[(&'static str, &Path)],
    ) -> ToolkitResult<RawEntryConfig> {
        webpack::with_script_rules(raw, extra_loaders)
    }

    async fn run_dev_server(
        &self,
        config: &AugmentedEntryConfig,
        deps: &ServerDependencyPaths,
    ) -> ToolkitResult<()> {
        let module = webpack::write_config_module(config)?;
        let script = deps.webpack_dev_server.join("bin").join("webpack-dev-server.js");
        let port = self.settings.dev_server.port.to_string();

        tracing::info!(port = %port, "webpack-dev-server starting");
        process::run_node_until_interrupted(
            &self.cwd,
            "webpack-dev-server",
            [
                script.as_os_str(),
                OsStr::new("--config"),
                module.path().as_os_str(),
                OsStr::new("--port"),
                OsStr::new(&port),
            ],
        )
        .await
    }

    async fn run_bundler(&self, config: &AugmentedEntryConfig) -> ToolkitResult<()> {
        let module = webpack::write_config_module(config)?;
        let script = self.server_deps().webpack.join("bin").join("webpack.js");

        process::run_node(
            &self.cwd,
            "webpack",
            [
                script.as_os_str(),
                OsStr::new("--config"),
                module.path().as_os_str(),
            ],
        )
        .await
    }

    async fn run_dist_server(&self) -> ToolkitResult<()> {
        let root = self.cwd.join(&self.settings.out_dir);
        let server = &self.settings.dist_server;
        dist_server::serve(&server.host, server.port, root).await?;
        Ok(())
    }
}
