//! cwb CLI - validate, lint and bundle every entry point of a front-end project.
//!
//! The pipeline itself lives in `cwb-build`; this crate supplies everything
//! around it:
//!
//! - [`cli`] - argument parsing
//! - [`config`] - `cwb.config.json` loading and validation
//! - [`toolkit`] - [`NodeToolkit`](toolkit::NodeToolkit), which runs the
//!   project's Node tooling for each pipeline step
//! - [`dist_server`] - static file server for `cwb distserver`
//! - [`error`], [`logger`], [`ui`] - errors, logging and terminal output
//!
//! # Example
//!
//! ```rust,no_run
//! use cwb_cli::{config::CwbSettings, error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     let settings = CwbSettings::load(&std::env::current_dir()?, None)?;
//!     settings.validate()?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod dist_server;
pub mod error;
pub mod logger;
pub mod toolkit;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};
