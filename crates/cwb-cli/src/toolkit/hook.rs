//! Git pre-commit hook installation.

use cwb_build::ToolkitResult;
use std::path::{Path, PathBuf};

use crate::config::CommandSpec;

/// Outcome of [`install`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookStatus {
    Installed(PathBuf),
    /// A hook is already there; it is left untouched.
    AlreadyPresent(PathBuf),
    /// The project is not a git checkout.
    NoRepository,
}

/// Write `.git/hooks/pre-commit` running `lint`, unless one exists.
pub async fn install(cwd: &Path, lint: &CommandSpec) -> ToolkitResult<HookStatus> {
    let git_dir = cwd.join(".git");
    if !tokio::fs::metadata(&git_dir).await.is_ok_and(|m| m.is_dir()) {
        return Ok(HookStatus::NoRepository);
    }

    let hooks_dir = git_dir.join("hooks");
    let hook = hooks_dir.join("pre-commit");
    if tokio::fs::try_exists(&hook).await? {
        return Ok(HookStatus::AlreadyPresent(hook));
    }

    tokio::fs::create_dir_all(&hooks_dir).await?;
    tokio::fs::write(&hook, hook_script(lint)).await?;
    make_executable(&hook).await?;

    Ok(HookStatus::Installed(hook))
}

pub(crate) fn hook_script(lint: &CommandSpec) -> String {
    let command: Vec<String> = std::iter::once(&lint.program)
        .chain(&lint.args)
        .map(|part| shell_quote(part))
        .collect();
    format!(
        "#!/bin/sh\n# Installed by cwb\nexec {}\n",
        command.join(" ")
    )
}

fn shell_quote(part: &str) -> String {
    let safe = !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=,:@+".contains(c));
    if safe {
        part.to_string()
    } else {
        format!("'{}'", part.replace('\'', "'\\''"))
    }
}

#[cfg(unix)]
async fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).await
}

#[cfg(not(unix))]
async fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
