//! Running the project's Node tooling as child processes.

use cwb_build::{ToolkitError, ToolkitResult};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

use crate::config::CommandSpec;

const MAX_OUTPUT_LINES: usize = 50;
const MAX_OUTPUT_CHARS: usize = 4096;

/// Programs given as relative paths (`node_modules/.bin/eslint`) are
/// resolved against the project root; bare names go through `PATH`.
pub(crate) fn resolve_program(cwd: &Path, program: &str) -> PathBuf {
    let path = Path::new(program);
    if path.is_relative() && path.components().count() > 1 {
        cwd.join(path)
    } else {
        path.to_path_buf()
    }
}

/// Run `command` in `cwd` with output captured.
///
/// Non-zero exit fails with the tail of the combined output.
pub(crate) async fn run_captured(cwd: &Path, label: &str, command: &CommandSpec) -> ToolkitResult<()> {
    let program = resolve_program(cwd, &command.program);
    tracing::debug!(%label, command = %command.display(), "running");

    let output = Command::new(&program)
        .args(&command.args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| spawn_error(label, &program, e))?;

    if output.status.success() {
        return Ok(());
    }

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        if !combined.is_empty() && !combined.ends_with('\n') {
            combined.push('\n');
        }
        combined.push_str(&stderr);
    }

    Err(ToolkitError::Failed(format!(
        "{} failed ({})\n{}",
        label,
        describe_status(output.status),
        truncate_output(&combined, MAX_OUTPUT_LINES, MAX_OUTPUT_CHARS)
    )))
}

/// Run `node <args>` in `cwd` with inherited stdio and wait for it.
pub(crate) async fn run_node<I, S>(cwd: &Path, label: &str, args: I) -> ToolkitResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let status = Command::new("node")
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .status()
        .await
        .map_err(|e| spawn_error(label, Path::new("node"), e))?;

    if status.success() {
        Ok(())
    } else {
        Err(ToolkitError::Failed(format!("{} failed ({})", label, describe_status(status))))
    }
}

/// Run `node <args>` until it exits or Ctrl+C is pressed.
pub(crate) async fn run_node_until_interrupted<I, S>(cwd: &Path, label: &str, args: I) -> ToolkitResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_until_interrupted(cwd, label, Path::new("node"), args).await
}

/// Run `program <args>` until it exits or Ctrl+C is pressed.
///
/// An interrupt counts as a clean stop, whether it reaches us first or the
/// child dies from the terminal's SIGINT before we notice.
pub(crate) async fn run_until_interrupted<I, S>(
    cwd: &Path,
    label: &str,
    program: &Path,
    args: I,
) -> ToolkitResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| spawn_error(label, program, e))?;

    tokio::select! {
        biased;

        _ = tokio::signal::ctrl_c() => {
            tracing::info!(%label, "interrupted, stopping");
            child.kill().await?;
            Ok(())
        }

        status = child.wait() => {
            let status = status?;
            if status.success() {
                Ok(())
            } else if stopped_by_interrupt(status) {
                tracing::info!(%label, "stopped by interrupt");
                Ok(())
            } else {
                Err(ToolkitError::Failed(format!("{} exited ({})", label, describe_status(status))))
            }
        }
    }
}

/// SIGINT, or the shell convention of exiting with 128 + SIGINT.
#[cfg(unix)]
fn stopped_by_interrupt(status: ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(2) || status.code() == Some(130)
}

/// `STATUS_CONTROL_C_EXIT` on Windows.
#[cfg(not(unix))]
fn stopped_by_interrupt(status: ExitStatus) -> bool {
    status.code() == Some(0xC000013Au32 as i32)
}

fn spawn_error(label: &str, program: &Path, e: std::io::Error) -> ToolkitError {
    ToolkitError::Failed(format!(
        "{}: could not start `{}`: {}",
        label,
        program.display(),
        e
    ))
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Keep the last `max_lines` lines, then the last `max_chars` bytes.
pub(crate) fn truncate_output(output: &str, max_lines: usize, max_chars: usize) -> String {
    let lines: Vec<&str> = output.lines().collect();

    let relevant_lines = if lines.len() > max_lines {
        &lines[lines.len() - max_lines..]
    } else {
        &lines[..]
    };

    let result = relevant_lines.join("\n");
    if result.len() <= max_chars {
        return result;
    }

    let mut start = result.len() - max_chars;
    while !result.is_char_boundary(start) {
        start += 1;
    }
    format!("...(truncated)...\n{}", &result[start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_output_keeps_tail_lines() {
        let output: String = (1..=60).map(|i| format!("line {}\n", i)).collect();
        let truncated = truncate_output(&output, 50, 4096);
        assert!(truncated.starts_with("line 11"));
        assert!(truncated.ends_with("line 60"));
    }

    #[test]
    fn test_truncate_output_limits_chars() {
        let output = "é".repeat(100);
        let truncated = truncate_output(&output, 50, 11);
        assert!(truncated.starts_with("...(truncated)..."));
        assert!(truncated.len() <= "...(truncated)...\n".len() + 11);
    }

    #[test]
    fn test_resolve_program() {
        let cwd = Path::new("/proj");
        assert_eq!(
            resolve_program(cwd, "node_modules/.bin/eslint"),
            PathBuf::from("/proj/node_modules/.bin/eslint")
        );
        assert_eq!(resolve_program(cwd, "eslint"), PathBuf::from("eslint"));
        assert_eq!(resolve_program(cwd, "/usr/bin/eslint"), PathBuf::from("/usr/bin/eslint"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_captured_success_and_failure() {
        let dir = tempfile::TempDir::new().unwrap();

        let ok = CommandSpec::new("sh", &["-c", "echo fine"]);
        run_captured(dir.path(), "lint", &ok).await.unwrap();

        let failing = CommandSpec::new("sh", &["-c", "echo 'src/app.js: Unexpected token' >&2; exit 3"]);
        let err = run_captured(dir.path(), "lint", &failing).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("lint failed (exit code 3)"));
        assert!(msg.contains("Unexpected token"));
    }

    #[cfg(unix)]
    #[test]
    fn test_stopped_by_interrupt() {
        use std::os::unix::process::ExitStatusExt;

        assert!(stopped_by_interrupt(ExitStatus::from_raw(2)));
        assert!(stopped_by_interrupt(ExitStatus::from_raw(130 << 8)));
        assert!(!stopped_by_interrupt(ExitStatus::from_raw(1 << 8)));
        assert!(!stopped_by_interrupt(ExitStatus::from_raw(9)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_server_killed_by_sigint_is_clean_stop() {
        let dir = tempfile::TempDir::new().unwrap();
        let sh = Path::new("sh");

        run_until_interrupted(dir.path(), "dev server", sh, ["-c", "kill -INT $$"])
            .await
            .unwrap();
        run_until_interrupted(dir.path(), "dev server", sh, ["-c", "exit 130"])
            .await
            .unwrap();

        let err = run_until_interrupted(dir.path(), "dev server", sh, ["-c", "exit 3"])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("dev server exited (exit code 3)"));
    }

    #[tokio::test]
    async fn test_run_captured_missing_program() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = CommandSpec::new("node_modules/.bin/does-not-exist", &[]);
        let err = run_captured(dir.path(), "compile check", &missing).await.unwrap_err();
        assert!(err.to_string().contains("could not start"));
    }
}
