//! The single `cwb [MODE]` command.

use cwb_build::{BuildOrchestrator, BuildSettings, RunMode, RunReport};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::cli::Cli;
use crate::config::CwbSettings;
use crate::error::{CliError, Result};
use crate::toolkit::NodeToolkit;
use crate::ui;

/// Load settings, then run the pipeline for the selected mode.
pub async fn execute(args: Cli) -> Result<RunReport> {
    let cwd = resolve_cwd(args.cwd.as_deref())?;
    let mode = args.run_mode();
    let started = Instant::now();

    let settings = CwbSettings::load(&cwd, args.config.as_deref())?;
    let build_settings = BuildSettings {
        cwd: cwd.clone(),
        package_name: settings.package_name.clone(),
        out_dir: settings.out_dir.clone(),
        temp_dir: settings.resolved_temp_dir(&cwd),
    };

    if !args.quiet {
        ui::info(&start_message(mode, &cwd));
    }

    let orchestrator = BuildOrchestrator::new(NodeToolkit::new(&cwd, settings), build_settings);
    let report = match orchestrator.run(mode).await {
        Ok(report) => report,
        Err(err) => {
            if !args.quiet {
                ui::error(&failure_message(mode, started.elapsed()));
            }
            return Err(err.into());
        }
    };

    if !args.quiet {
        match report.mode {
            RunMode::Static => {
                ui::print_run_summary(&report, started.elapsed());
                ui::success(&format!(
                    "Build complete in {}",
                    ui::format_duration(started.elapsed())
                ));
            }
            RunMode::Interactive => ui::success("Dev server stopped"),
            RunMode::DistServer => ui::success("Dist server stopped"),
        }
    }

    Ok(report)
}

fn resolve_cwd(cwd: Option<&Path>) -> Result<PathBuf> {
    let current = std::env::current_dir()?;
    let Some(cwd) = cwd else {
        return Ok(current);
    };

    let resolved = current.join(cwd);
    if !resolved.is_dir() {
        return Err(CliError::FileNotFound(resolved));
    }
    Ok(resolved)
}

fn start_message(mode: RunMode, cwd: &Path) -> String {
    match mode {
        RunMode::Interactive => format!("Starting dev server for {}", cwd.display()),
        RunMode::DistServer => format!("Serving build output of {}", cwd.display()),
        RunMode::Static => format!("Building {}", cwd.display()),
    }
}

fn failure_message(mode: RunMode, elapsed: Duration) -> String {
    let what = match mode {
        RunMode::Interactive => "Dev server",
        RunMode::DistServer => "Dist server",
        RunMode::Static => "Build",
    };
    format!("{} failed after {}", what, ui::format_duration(elapsed))
}
