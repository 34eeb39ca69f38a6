//! Recursive glob matching rooted at an explicit directory.
//!
//! [`find_glob`] walks a directory tree and lazily yields every entry whose
//! root-relative path matches a glob pattern and passes a caller-supplied
//! predicate. Matching follows shell conventions: `*` and `?` never cross a
//! path separator, `**` matches any number of directories (including none),
//! and a leading dot is never matched implicitly.
//!
//! Results are relative path strings, produced in traversal order. Every
//! call re-walks the tree; nothing is cached. Entries that cannot be read
//! (permissions, races with concurrent deletion) are skipped silently.
//!
//! # Example
//!
//! ```no_run
//! use webdriver_provision::fsutil::find_glob;
//! use std::path::Path;
//!
//! # fn example() -> webdriver_provision::Result<()> {
//! let caches = find_glob(Path::new("/workspace"), "**/__pycache__", |entry| {
//!     entry.is_dir()
//! })?;
//! for path in caches {
//!     println!("{path}");
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

use crate::error::Result;

// ============================================================================
// Constants
// ============================================================================

/// Shell-style matching: separators are literal, dotfiles stay hidden.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

// ============================================================================
// GlobEntry
// ============================================================================

/// A matched filesystem entry handed to filter predicates.
///
/// Carries both path forms so predicates can compare against the relative
/// name or stat the full path, plus the directory flag from traversal so
/// the common "directories only" filter needs no extra syscall. Symbolic
/// links are not followed; a link counts as a non-directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobEntry {
    /// Full path of the entry.
    full: PathBuf,
    /// Path relative to the traversal root.
    rel: String,
    /// Whether the entry is a directory.
    is_dir: bool,
}

impl GlobEntry {
    /// Full path of the entry.
    #[inline]
    #[must_use]
    pub fn full(&self) -> &Path {
        &self.full
    }

    /// Path relative to the traversal root.
    #[inline]
    #[must_use]
    pub fn rel(&self) -> &str {
        &self.rel
    }

    /// Returns `true` if the entry is a directory.
    #[inline]
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }
}

// ============================================================================
// Public Functions
// ============================================================================

/// Lazily yields root-relative paths matching `pattern` under `root_dir`.
///
/// The traversal root itself is never a candidate. Yield order is the
/// walker's order and should not be relied upon.
///
/// # Arguments
///
/// * `root_dir` - Directory the walk starts from
/// * `pattern` - Glob pattern matched against root-relative paths
/// * `filter` - Predicate deciding whether a matching entry is yielded
///
/// # Errors
///
/// Returns [`Error::Pattern`](crate::Error::Pattern) if the pattern does
/// not compile. Traversal itself does not fail; unreadable entries are
/// skipped.
pub fn find_glob<F>(
    root_dir: &Path,
    pattern: &str,
    filter: F,
) -> Result<impl Iterator<Item = String> + use<F>>
where
    F: FnMut(&GlobEntry) -> bool,
{
    let pattern = Pattern::new(pattern)?;
    let root = root_dir.to_path_buf();
    let mut filter = filter;

    let matches = WalkDir::new(root_dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter_map(move |entry| {
            let rel = entry.path().strip_prefix(&root).ok()?;
            if !pattern.matches_path_with(rel, MATCH_OPTIONS) {
                return None;
            }
            let rel = rel.to_str()?.to_string();
            let is_dir = entry.file_type().is_dir();
            let candidate = GlobEntry {
                full: entry.into_path(),
                rel,
                is_dir,
            };
            filter(&candidate).then_some(candidate.rel)
        });

    Ok(matches)
}

// ============================================================================
// Tests
// ============================================================================
