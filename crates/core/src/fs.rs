//! Filesystem utilities

use std::fs;
use std::io;
use std::path::Path;

/// Create the parent directory of `path` (and its ancestors) if missing
///
/// Returns true when a directory had to be created.
pub fn ensure_parent_dir(path: &Path) -> io::Result<bool> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Write `contents` to `path`, replacing any previous file
pub fn write_text_file(path: &Path, contents: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, contents)
}
