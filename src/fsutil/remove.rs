//! Predicate-filtered recursive removal.

// ============================================================================
// Imports
// ============================================================================

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::fsutil::glob::{GlobEntry, find_glob};

// ============================================================================
// Public Functions
// ============================================================================

/// Removes every entry under `root_dir` matching `pattern` and passing
/// `filter`.
///
/// Matches are collected up front so the traversal never races its own
/// deletions, then removed one by one: directories recursively, files
/// directly. There is no rollback. A failure at any entry propagates
/// immediately, leaving earlier matches deleted and later ones untouched.
/// Overlapping matches (a directory and something inside it) therefore
/// fail once the outer one has been removed first.
///
/// # Arguments
///
/// * `root_dir` - Directory the search starts from
/// * `pattern` - Glob pattern matched against root-relative paths
/// * `filter` - Predicate deciding whether a match is removed
///
/// # Errors
///
/// Returns [`Error::Pattern`](crate::Error::Pattern) for an invalid
/// pattern and [`Error::Io`](crate::Error::Io) for a failed removal.
pub fn recursive_remove<F>(root_dir: &Path, pattern: &str, filter: F) -> Result<()>
where
    F: FnMut(&GlobEntry) -> bool,
{
    let matches: Vec<String> = find_glob(root_dir, pattern, filter)?.collect();

    for rel in matches {
        let target = root_dir.join(&rel);
        debug!(path = %target.display(), "removing");
        if target.is_dir() {
            fs::remove_dir_all(&target)?;
        } else {
            fs::remove_file(&target)?;
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
