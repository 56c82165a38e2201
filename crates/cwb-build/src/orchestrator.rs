//! Top-level build controller.
//!
//! # Process Flow
//!
//! 1. Run the pre-flight stages in order (see [`crate::stage`])
//! 2. Branch on [`RunMode`]:
//!    - `DistServer`: hand off to the dist-server launcher, nothing else
//!    - `Interactive`: augment every entry, compose a temp entry for
//!      `cwbStart` and run the dev server until it stops
//!    - `Static`: augment every entry, recreate the output directory, then
//!      bundle each entry one at a time in declaration order
//!
//! Augmentation completes for every entry before any bundling starts, so a
//! malformed config anywhere means nothing is bundled. Entries are never
//! bundled concurrently; they share the output directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::augment::{BuildMode, EntryConfigAugmenter};
use crate::bootstrap::{bootstrap_text, OUTPUT_GITIGNORE};
use crate::config::{AugmentedEntryConfig, START_ENTRY};
use crate::error::{BuildError, Result};
use crate::loaders::{ResolvedLoaderPaths, ServerDependencyPaths};
use crate::paths::normalize_path;
use crate::stage::run_preflight;
use crate::temp_entry::TempEntryComposer;
use crate::toolkit::Toolkit;

/// What a single invocation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Dev server against the start entry
    Interactive,
    /// Serve previously built output
    DistServer,
    /// Bundle every entry to disk
    Static,
}

impl RunMode {
    /// Argument selecting [`RunMode::Interactive`].
    pub const DEV_SERVER_ARG: &'static str = "wds";
    /// Argument selecting [`RunMode::DistServer`].
    pub const DIST_SERVER_ARG: &'static str = "distserver";

    /// Pick the mode from the first positional argument.
    ///
    /// Anything other than the two server tokens, including no argument at
    /// all, selects a static build.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some(Self::DEV_SERVER_ARG) => RunMode::Interactive,
            Some(Self::DIST_SERVER_ARG) => RunMode::DistServer,
            _ => RunMode::Static,
        }
    }

    /// Augmentation mode, or `None` when the mode does no bundling.
    pub fn build_mode(self) -> Option<BuildMode> {
        match self {
            RunMode::Interactive => Some(BuildMode::Interactive),
            RunMode::Static => Some(BuildMode::Static),
            RunMode::DistServer => None,
        }
    }
}

/// Project-level inputs the orchestrator needs besides the toolkit.
#[derive(Debug, Clone)]
pub struct BuildSettings {
    /// Project root
    pub cwd: PathBuf,
    /// Package that ships the loaders and polyfill
    pub package_name: String,
    /// Output directory; must resolve to a subdirectory of `cwd`
    pub out_dir: PathBuf,
    /// Where temp entries go; next to each entry file if `None`
    pub temp_dir: Option<PathBuf>,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub mode: RunMode,
    /// Entries bundled, in order
    pub bundled: Vec<String>,
}

/// Drives the whole build for one invocation.
pub struct BuildOrchestrator<T> {
    toolkit: T,
    settings: BuildSettings,
}

impl<T: Toolkit> BuildOrchestrator<T> {
    pub fn new(toolkit: T, settings: BuildSettings) -> Self {
        Self { toolkit, settings }
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    /// Run the pipeline for `mode`.
    ///
    /// # Errors
    ///
    /// Any failing step aborts the run and is returned as-is. Static builds
    /// leave output of already-bundled entries in place.
    pub async fn run(&self, mode: RunMode) -> Result<RunReport> {
        tracing::info!(?mode, cwd = %self.settings.cwd.display(), "starting run");
        run_preflight(&self.toolkit).await?;

        let Some(build_mode) = mode.build_mode() else {
            tracing::info!("serving pre-built output");
            self.toolkit
                .run_dist_server()
                .await
                .map_err(|e| BuildError::Server(e.to_string()))?;
            return Ok(RunReport {
                mode,
                bundled: Vec::new(),
            });
        };

        let configs = self.augment_all(build_mode).await?;

        let bundled = match build_mode {
            BuildMode::Interactive => {
                self.serve_dev(&configs).await?;
                Vec::new()
            }
            BuildMode::Static => self.bundle_all(&configs).await?,
        };

        Ok(RunReport { mode, bundled })
    }

    /// Augment every declared entry, failing on the first malformed one.
    async fn augment_all(&self, mode: BuildMode) -> Result<Vec<AugmentedEntryConfig>> {
        let project = self
            .toolkit
            .project_config()
            .await
            .map_err(|e| BuildError::ProjectConfig(e.to_string()))?;

        let loaders = ResolvedLoaderPaths::resolve(&self.settings.cwd, &self.settings.package_name);
        let script_loaders = loaders.script_loaders();
        let augmenter =
            EntryConfigAugmenter::new(&loaders, &self.settings.cwd, &self.settings.out_dir);

        tracing::info!(entries = project.len(), ?mode, "augmenting entry configs");
        let mut configs = Vec::with_capacity(project.len());
        for (name, raw) in project.iter() {
            let prepared = self
                .toolkit
                .create_single_entry_config(raw, &script_loaders)
                .await
                .map_err(|e| BuildError::ConfigShape {
                    entry: name.to_string(),
                    reason: e.to_string(),
                })?;
            configs.push(augmenter.augment(name, &prepared, mode)?);
        }
        Ok(configs)
    }

    async fn serve_dev(&self, configs: &[AugmentedEntryConfig]) -> Result<()> {
        let start = configs
            .iter()
            .find(|c| c.name() == START_ENTRY)
            .ok_or_else(|| BuildError::MissingStartEntry(START_ENTRY.to_string()))?;

        let temp = self
            .composer()
            .compose(&start.entry_file(), &self.bootstrap())
            .await?;
        let config = start.with_entry(temp.path());
        let deps = ServerDependencyPaths::resolve(&self.settings.cwd, &self.settings.package_name);

        tracing::info!(entry = START_ENTRY, "starting dev server");
        let outcome = self.toolkit.run_dev_server(&config, &deps).await;
        temp.remove().await;

        outcome.map_err(|e| BuildError::Server(e.to_string()))
    }

    async fn bundle_all(&self, configs: &[AugmentedEntryConfig]) -> Result<Vec<String>> {
        recreate_output_dir(&self.settings.cwd, &self.settings.out_dir).await?;

        let composer = self.composer();
        let bootstrap = self.bootstrap();
        let mut bundled = Vec::with_capacity(configs.len());

        for config in configs {
            tracing::info!(entry = config.name(), "bundling");
            let temp = composer.compose(&config.entry_file(), &bootstrap).await?;
            let outcome = self.toolkit.run_bundler(&config.with_entry(temp.path())).await;
            temp.remove().await;

            outcome.map_err(|e| BuildError::Bundler {
                entry: config.name().to_string(),
                message: e.to_string(),
            })?;
            bundled.push(config.name().to_string());
        }

        Ok(bundled)
    }

    fn composer(&self) -> TempEntryComposer {
        match &self.settings.temp_dir {
            Some(dir) => TempEntryComposer::new(dir),
            None => TempEntryComposer::beside_entry(),
        }
    }

    fn bootstrap(&self) -> String {
        bootstrap_text(&self.settings.package_name)
    }
}

/// Resolve `out_dir` against `cwd`.
///
/// The result must be a strict subdirectory of `cwd`: the output directory
/// is deleted on every static build.
///
/// # Errors
///
/// [`BuildError::UnsafeOutputDir`] if `out_dir` resolves to `cwd`, one of
/// its ancestors, or anywhere outside it.
pub fn resolve_output_dir(cwd: &Path, out_dir: &Path) -> Result<PathBuf> {
    let root = normalize_path(cwd);
    let resolved = normalize_path(&cwd.join(out_dir));
    if resolved == root || !resolved.starts_with(&root) {
        return Err(BuildError::UnsafeOutputDir(resolved));
    }
    Ok(resolved)
}

/// Delete the output directory, recreate it empty and seed its `.gitignore`.
///
/// Returns the resolved directory. Nothing is deleted unless
/// [`resolve_output_dir`] accepts `out_dir`.
pub async fn recreate_output_dir(cwd: &Path, out_dir: &Path) -> Result<PathBuf> {
    let out_dir = resolve_output_dir(cwd, out_dir)?;
    tracing::info!(path = %out_dir.display(), "recreating output directory");
    match tokio::fs::remove_dir_all(&out_dir).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    tokio::fs::create_dir_all(&out_dir).await?;
    tokio::fs::write(out_dir.join(".gitignore"), OUTPUT_GITIGNORE).await?;
    Ok(out_dir)
}
