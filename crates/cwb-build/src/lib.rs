//! # cwb-build
//!
//! The multi-entry build pipeline behind the `cwb` CLI.
//!
//! Given a project's entry name → bundler config mapping, this crate:
//!
//! - resolves the loader paths shipped in the build package ([`loaders`])
//! - augments each entry's config for dev-server or static output ([`augment`])
//! - writes temporary entry files with bootstrap code prepended ([`temp_entry`])
//! - sequences pre-flight checks and bundling, failing fast ([`orchestrator`])
//!
//! Linting, hooks, the bundler itself and the servers are reached through the
//! [`Toolkit`] trait; `cwb-cli` provides the Node-backed implementation.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cwb_build::{BuildOrchestrator, BuildSettings, RunMode, Toolkit};
//!
//! # async fn run(toolkit: impl Toolkit) -> cwb_build::Result<()> {
//! let settings = BuildSettings {
//!     cwd: std::env::current_dir()?,
//!     package_name: "chcokr-webapp-build".to_string(),
//!     out_dir: "dist".into(),
//!     temp_dir: None,
//! };
//! let report = BuildOrchestrator::new(toolkit, settings)
//!     .run(RunMode::from_arg(std::env::args().nth(1).as_deref()))
//!     .await?;
//! println!("bundled {:?}", report.bundled);
//! # Ok(()) }
//! ```

pub mod augment;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod loaders;
pub mod orchestrator;
pub mod paths;
pub mod stage;
pub mod temp_entry;
pub mod toolkit;

pub use augment::{BuildMode, EntryConfigAugmenter};
pub use bootstrap::{bootstrap_text, OUTPUT_GITIGNORE};
pub use config::{AugmentedEntryConfig, ProjectConfig, RawEntryConfig, START_ENTRY};
pub use error::{BuildError, Result, ToolkitError};
pub use loaders::{ResolvedLoaderPaths, ServerDependencyPaths};
pub use orchestrator::{
    recreate_output_dir, resolve_output_dir, BuildOrchestrator, BuildSettings, RunMode, RunReport,
};
pub use paths::normalize_path;
pub use stage::{Stage, PREFLIGHT};
pub use temp_entry::{TempEntry, TempEntryComposer};
pub use toolkit::{Toolkit, ToolkitResult};
