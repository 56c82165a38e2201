//! Logging setup for the cwb CLI.
//!
//! Built on `tracing`. `--verbose` enables debug output for the cwb crates,
//! `--quiet` limits output to errors, and `RUST_LOG` overrides the default
//! info filter otherwise.
//!
//! ```rust,no_run
//! use cwb_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("Starting build");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "cwb=debug,cwb_build=debug,cwb_cli=debug";
const QUIET_FILTER: &str = "cwb=error,cwb_build=error,cwb_cli=error";
const DEFAULT_FILTER: &str = "cwb=info,cwb_build=info,cwb_cli=info";

/// Pick the log filter for the given flags.
///
/// Order of precedence: `--verbose`, `--quiet`, `RUST_LOG`, then the
/// info-level default.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the global tracing subscriber.
///
/// Call once, before any logging happens.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(use_ansi(no_color))
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .init();
}

/// Log lines share the terminal color decision of [`crate::ui`].
fn use_ansi(no_color: bool) -> bool {
    !no_color && crate::ui::should_use_color()
}
