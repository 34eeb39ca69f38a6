//! Repository root discovery.
//!
//! Build targets frequently need the repository root while running from an
//! arbitrary subdirectory. [`find_repo_root`] walks upward from a starting
//! directory until it meets a `.git` marker directory; [`RepoRootCache`]
//! memoizes successful lookups for callers that resolve the same start
//! path many times in one run.
//!
//! The cache is owned by the caller, not the process: two caches never
//! share state, and dropping one forgets everything it learned.
//!
//! # Example
//!
//! ```no_run
//! use webdriver_provision::fsutil::RepoRootCache;
//!
//! # fn example() -> webdriver_provision::Result<()> {
//! let cache = RepoRootCache::new();
//! let root = cache.resolve("crates/parser/src")?;
//! println!("repo root: {}", root.display());
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Directory name marking a repository root.
const REPO_MARKER: &str = ".git";

// ============================================================================
// Public Functions
// ============================================================================

/// Walks upward from `start_dir` to the nearest directory containing a
/// `.git` marker directory.
///
/// The start directory itself is checked first. A `.git` regular file
/// (as git worktrees create) is not a marker; only a directory counts.
///
/// # Arguments
///
/// * `start_dir` - Directory the upward walk starts from; made absolute
///   against the current working directory if relative
///
/// # Errors
///
/// Returns [`Error::RepoRootNotFound`] when the parent chain is exhausted
/// without meeting a marker.
pub fn find_repo_root(start_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let start = start_dir.as_ref();
    let absolute = std::path::absolute(start)?;
    let mut current = absolute.as_path();

    loop {
        if current.join(REPO_MARKER).is_dir() {
            debug!(root = %current.display(), "repo root found");
            return Ok(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return Err(Error::repo_root_not_found(start)),
        }
    }
}

/// [`find_repo_root`] rooted at the current working directory.
///
/// # Errors
///
/// Returns [`Error::Io`] if the working directory cannot be read, plus
/// everything [`find_repo_root`] returns.
pub fn find_repo_root_cwd() -> Result<PathBuf> {
    find_repo_root(std::env::current_dir()?)
}

// ============================================================================
// RepoRootCache
// ============================================================================

/// Memoization of successful repo root lookups, keyed by absolute start
/// path.
///
/// Only successes are cached; a failed lookup is re-attempted on the next
/// call. A cached root reflects the filesystem at first resolution, so a
/// marker created closer to the start path afterwards is not seen until
/// [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct RepoRootCache {
    roots: Mutex<FxHashMap<PathBuf, PathBuf>>,
}

impl RepoRootCache {
    /// Creates an empty cache.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the repo root for `start_dir`, consulting the cache first.
    ///
    /// # Errors
    ///
    /// Same as [`find_repo_root`]; errors are never cached.
    pub fn resolve(&self, start_dir: impl AsRef<Path>) -> Result<PathBuf> {
        let key = std::path::absolute(start_dir.as_ref())?;

        let cached = self.roots.lock().get(&key).cloned();
        if let Some(root) = cached {
            return Ok(root);
        }

        let root = find_repo_root(&key)?;
        self.roots.lock().insert(key, root.clone());
        Ok(root)
    }

    /// Forgets every cached resolution.
    pub fn clear(&self) {
        self.roots.lock().clear();
    }

    /// Number of cached resolutions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.lock().len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.lock().is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
