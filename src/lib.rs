//! WebDriver Provision - Browser driver installation for automation stacks.
//!
//! This library puts WebDriver binaries (geckodriver, chromedriver) onto a
//! developer or CI machine, plus the recursive filesystem helpers build
//! targets lean on: glob-based cleanup and repository root discovery.
//!
//! # Architecture
//!
//! Provisioning is a strictly sequential pipeline per driver:
//!
//! - **Resolve**: turn `"latest"` (or the local browser's version) into a
//!   concrete release
//! - **Fetch**: stream the platform artifact into the target directory
//! - **Unpack**: extract next to the archive, then delete the archive
//! - **Record**: persist a `version` marker (gecko) or log the release
//!   (chrome)
//!
//! Key design principles:
//!
//! - Each downloader owns its configuration; nothing is process-global
//! - Every failure is loud and final: no retries, no partial success
//! - Filesystem walks are rooted at explicit directories, never at the
//!   process working directory
//!
//! # Quick Start
//!
//! ```no_run
//! use webdriver_provision::{DownloaderConfig, DriverDownloader, GeckoDownloader, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Install the latest geckodriver into a tools directory
//!     let mut downloader = GeckoDownloader::new()?;
//!     downloader.configure(
//!         DownloaderConfig::new()
//!             .with_directory("./tools/drivers"),
//!     );
//!     downloader.install().await?;
//!
//!     println!("installed {}", downloader.config().version);
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`driver`] | [`DriverDownloader`] trait and the gecko/chrome variants |
//! | [`fetch`] | Streaming HTTP fetch primitives |
//! | [`archive`] | Suffix-dispatched archive extraction |
//! | [`fsutil`] | Glob discovery, recursive removal, repo root lookup |
//! | [`platform`] | Host `(system, machine)` identification |
//! | [`error`] | Error types and [`Result`] alias |
//!
//! # Features
//!
//! - **Version resolution**: `"latest"` redirect probing (gecko), local
//!   browser matching (chrome)
//! - **Bounded memory**: downloads stream through a fixed 8 KiB buffer
//! - **Mirror support**: every endpoint root can be swapped for an
//!   internal mirror
//! - **Explicit caching**: repo root memoization lives in a caller-owned
//!   [`RepoRootCache`], resettable at will

// ============================================================================
// Modules
// ============================================================================

/// Suffix-dispatched archive extraction.
///
/// Supports `.tar.gz`/`.tgz` and `.zip`; everything else is rejected
/// before any filesystem write.
pub mod archive;

/// Driver downloaders.
///
/// The [`DriverDownloader`] trait and its [`GeckoDownloader`] and
/// [`ChromeDownloader`] implementations.
pub mod driver;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Streaming HTTP fetch primitives.
///
/// Artifact downloads, redirect probing and plain-text lookups.
pub mod fetch;

/// Recursive filesystem maintenance.
///
/// Glob discovery, predicate-filtered removal and repo root lookup.
pub mod fsutil;

/// Host platform identification.
///
/// The `(system, machine)` pair artifact selection is keyed on.
pub mod platform;

// ============================================================================
// Re-exports
// ============================================================================

// Archive functions
pub use archive::unarchive;

// Driver types
pub use driver::{
    ChromeDownloader, DownloaderConfig, DriverDownloader, DriverFamily, GeckoDownloader,
    LATEST_VERSION, VERSION_MARKER_FILENAME,
};

// Error types
pub use error::{Error, Result};

// Fetch types
pub use fetch::{DEFAULT_BUFFER_SIZE, Fetcher};

// Filesystem types
pub use fsutil::{
    GlobEntry, RepoRootCache, find_glob, find_repo_root, find_repo_root_cwd, recursive_remove,
};

// Platform types
pub use platform::PlatformKey;
