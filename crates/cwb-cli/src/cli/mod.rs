//! Command-line interface definition for cwb.
//!
//! cwb takes a single optional positional argument selecting the run mode:
//!
//! - `cwb wds` - dev server against the `cwbStart` entry
//! - `cwb distserver` - serve the previously built output directory
//! - `cwb` (or any other value) - bundle every entry to the output directory


use clap::Parser;
use cwb_build::RunMode;
use std::path::PathBuf;

/// cwb - build orchestrator for front-end projects
#[derive(Parser, Debug)]
#[command(
    name = "cwb",
    version,
    about = "Validate, lint and bundle every entry point of a front-end project",
    long_about = "cwb checks required paths, validates cwb.config.json, installs the git\n\
                  pre-commit hook, smoke-compiles and lints sources, then bundles every\n\
                  declared entry point. Pass `wds` for the dev server or `distserver` to\n\
                  serve an existing build."
)]
pub struct Cli {
    /// Run mode: `wds`, `distserver`, or anything else for a static build
    #[arg(value_name = "MODE")]
    pub mode: Option<String>,

    /// Path to the config file
    ///
    /// Defaults to cwb.config.json in the project directory.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Project directory
    ///
    /// Defaults to the current working directory.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl Cli {
    /// The run mode selected by the positional argument.
    pub fn run_mode(&self) -> RunMode {
        RunMode::from_arg(self.mode.as_deref())
    }
}
