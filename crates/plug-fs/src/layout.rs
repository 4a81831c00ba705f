//! Project-root discovery
//!
//! A directory is a project root when it contains a `.plug/` marker
//! directory. Discovery walks upward from a working directory, so commands
//! behave the same from anywhere inside a project.

use std::path::{Path, PathBuf};

/// Marker directory that identifies a project root.
pub const PROJECT_MARKER: &str = ".plug";

/// Find the nearest project root at or above `start`.
///
/// Returns `None` when no ancestor of `start` carries the marker; callers
/// treat that as "not inside a project" rather than an error.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(PROJECT_MARKER).is_dir() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}
