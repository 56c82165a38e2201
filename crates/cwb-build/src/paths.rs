//! Lexical path helpers.

use path_clean::PathClean;
use std::path::{Path, PathBuf};

/// Resolve `.` and `..` components without touching the filesystem.
///
/// `..` past the root of an absolute path is dropped; on a relative path it
/// is kept, so `../dist` stays `../dist`. An input that cancels out
/// entirely (`.`, `src/..`) becomes the empty path.
pub fn normalize_path(path: &Path) -> PathBuf {
    let cleaned = path.clean();
    if cleaned == Path::new(".") {
        PathBuf::new()
    } else {
        cleaned
    }
}
