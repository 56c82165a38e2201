//! cwb - build orchestrator for multi-entry front-end projects.
//!
//! Parses arguments, sets up logging and colors, then runs the pipeline.

use clap::Parser;
use cwb_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    if args.no_color {
        ui::set_colors(false);
    } else {
        ui::init_colors();
    }

    commands::run_execute(args)
        .await
        .map(|_| ())
        .map_err(error::cli_error_to_miette)
}
