//! Path helpers shared by the compiler kinds.

use std::path::{Path, PathBuf};

/// Replace the extension of `path` (adding one if it has none).
///
/// `extension` may be given with or without the leading dot.
pub fn replace_extension(path: &Path, extension: &str) -> PathBuf {
    path.with_extension(extension.trim_start_matches('.'))
}

/// Case-insensitive check of the final extension
pub fn has_extension(path: &Path, extension: &str) -> bool {
    let extension = extension.trim_start_matches('.');
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// Directory a compiler is run in for `document`.
///
/// `None` for bare file names, meaning the current directory.
pub fn working_dir(document: &Path) -> Option<&Path> {
    document.parent().filter(|parent| !parent.as_os_str().is_empty())
}

/// Anchor `path` at the current directory if it is relative
pub fn anchored(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
