//! Recursive filesystem maintenance utilities.
//!
//! This module groups the workspace-hygiene half of the crate: glob-based
//! discovery of files and directories under a root, predicate-filtered
//! recursive removal, and locating the enclosing repository root. All
//! traversal is rooted at an explicit directory; nothing here touches the
//! process working directory.
//!
//! # Components
//!
//! | Item | Description |
//! |------|-------------|
//! | [`find_glob`] | Lazy recursive glob over a root directory |
//! | [`GlobEntry`] | Matched entry handed to filter predicates |
//! | [`recursive_remove`] | Delete every filtered glob match |
//! | [`find_repo_root`] | Walk upward to the nearest `.git` marker |
//! | [`RepoRootCache`] | Caller-owned memoization of repo root lookups |
//!
//! # Example
//!
//! ```no_run
//! use webdriver_provision::fsutil::{find_glob, recursive_remove};
//! use std::path::Path;
//!
//! # fn example() -> webdriver_provision::Result<()> {
//! let root = Path::new("/workspace");
//!
//! // List every __pycache__ directory under the workspace.
//! for path in find_glob(root, "**/__pycache__", |_| true)? {
//!     println!("{path}");
//! }
//!
//! // Remove every build directory; plain files named build are kept.
//! recursive_remove(root, "**/build", |entry| entry.is_dir())?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Recursive glob matching with filter predicates.
pub mod glob;

/// Predicate-filtered recursive removal.
pub mod remove;

/// Repository root discovery and memoization.
pub mod repo;

// ============================================================================
// Re-exports
// ============================================================================

pub use glob::{GlobEntry, find_glob};
pub use remove::recursive_remove;
pub use repo::{RepoRootCache, find_repo_root, find_repo_root_cwd};
