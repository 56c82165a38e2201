//! Temporary entry files with bootstrap text prepended.
//!
//! The composer only creates files. Deleting them is up to the caller, which
//! knows when the bundler is done with them.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};

/// Writes derived entry files, either next to the entry or into a fixed
/// directory.
#[derive(Debug, Clone)]
pub struct TempEntryComposer {
    dir: Option<PathBuf>,
}

impl TempEntryComposer {
    /// Composer writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Composer writing into each entry file's own directory.
    ///
    /// The composed file then resolves relative imports and `node_modules`
    /// exactly like the entry it was copied from.
    pub fn beside_entry() -> Self {
        Self { dir: None }
    }

    fn target_dir(&self, entry_file: &Path) -> PathBuf {
        match (&self.dir, entry_file.parent()) {
            (Some(dir), _) => dir.clone(),
            (None, Some(parent)) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            (None, _) => PathBuf::from("."),
        }
    }

    /// Write `bootstrap`, a newline, then the contents of `entry_file` to a new
    /// uniquely named file and return its path.
    ///
    /// The name keeps the original stem and extension, so loaders keyed on
    /// extension still apply. Two calls never return the same path.
    ///
    /// # Errors
    ///
    /// - [`BuildError::EntryFileNotFound`] if `entry_file` does not exist
    /// - [`BuildError::Io`] if reading or writing fails otherwise
    pub async fn compose(&self, entry_file: &Path, bootstrap: &str) -> Result<TempEntry> {
        let original = match tokio::fs::read_to_string(entry_file).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(BuildError::EntryFileNotFound(entry_file.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let stem = entry_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "entry".to_string());
        let suffix = entry_file
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let dir = self.target_dir(entry_file);
        tokio::fs::create_dir_all(&dir).await?;
        let path = tempfile::Builder::new()
            .prefix(&format!("cwb-{}-", stem))
            .suffix(&suffix)
            .tempfile_in(&dir)?
            .into_temp_path()
            .keep()
            .map_err(|e| e.error)?;

        let mut content = String::with_capacity(bootstrap.len() + 1 + original.len());
        content.push_str(bootstrap);
        content.push('\n');
        content.push_str(&original);
        tokio::fs::write(&path, content).await?;

        tracing::debug!(
            original = %entry_file.display(),
            temp = %path.display(),
            "composed temp entry"
        );
        Ok(TempEntry { path })
    }
}

/// A composed temporary entry file.
#[derive(Debug)]
pub struct TempEntry {
    path: PathBuf,
}

impl TempEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file. Failures are logged, not returned.
    pub async fn remove(self) {
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove temp entry");
        }
    }
}
