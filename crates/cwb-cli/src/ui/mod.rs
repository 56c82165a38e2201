//! Terminal output helpers.
//!
//! Status messages go to stderr so stdout stays free for the tools cwb
//! launches.
//!
//! ```no_run
//! use cwb_cli::ui;
//!
//! ui::init_colors();
//! ui::success("Bundled 3 entries");
//! ui::error("Lint failed");
//! ```

mod format;
mod messages;

pub use format::{format_duration, print_run_summary};
pub use messages::{error, info, success, warning};

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
}

/// Check if color output should be enabled.
///
/// Respects `NO_COLOR` and `FORCE_COLOR`, falls back to whether stderr is
/// attended.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr() && !is_ci()
}

/// Apply the color decision to the `owo-colors` and `console` globals.
pub fn init_colors() {
    set_colors(should_use_color());
}

/// Force colors on or off, e.g. for `--no-color`.
pub fn set_colors(enabled: bool) {
    owo_colors::set_override(enabled);
    console::set_colors_enabled_stderr(enabled);
}
