//! Formatting for durations and the end-of-run summary.

use console::Term;
use cwb_build::{RunMode, RunReport};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Format a duration as `50ms`, `1.50s` or `1m 30s`.
///
/// ```
/// use std::time::Duration;
/// use cwb_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print the summary of a finished run to stderr.
pub fn print_run_summary(report: &RunReport, elapsed: Duration) {
    if report.mode != RunMode::Static {
        return;
    }

    let width = (Term::stderr().size().1 as usize).min(60);

    eprintln!("\n{}", "Bundled entries".bold().underline());
    eprintln!("{}", "─".repeat(width));
    for name in &report.bundled {
        eprintln!("  {} {}", "•".cyan(), name);
    }
    eprintln!("{}", "─".repeat(width));
    eprintln!(
        "  {} entr{} in {}",
        report.bundled.len().to_string().bold(),
        if report.bundled.len() == 1 { "y" } else { "ies" },
        format_duration(elapsed).green()
    );
}
