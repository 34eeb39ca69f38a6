//! WebDriver binary provisioning.
//!
//! Each supported driver family implements [`DriverDownloader`]: resolve a
//! concrete version, compute the platform artifact name, fetch the archive,
//! unpack it into the configured directory, delete the archive, and record
//! what was installed. One downloader instance provisions one driver into
//! one directory.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DriverDownloader`] | Capability trait for driver provisioning |
//! | [`DownloaderConfig`] | Target directory and requested version |
//! | [`DriverFamily`] | Tag identifying the driver variant |
//! | [`GeckoDownloader`] | geckodriver (Firefox) from GitHub releases |
//! | [`ChromeDownloader`] | chromedriver matched to the local browser |
//!
//! # Example
//!
//! ```no_run
//! use webdriver_provision::{DownloaderConfig, DriverDownloader, GeckoDownloader};
//!
//! # async fn example() -> webdriver_provision::Result<()> {
//! let mut downloader = GeckoDownloader::new()?;
//! downloader.configure(DownloaderConfig::new().with_directory("/opt/drivers"));
//! downloader.install().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Failure Semantics
//!
//! Every step is fail-loud: a bad status, an unverifiable artifact, or an
//! unsupported platform aborts the install with no retry and no cleanup of
//! partial state beyond what the step itself guarantees.

// ============================================================================
// Submodules
// ============================================================================

/// chromedriver provisioning against the Chrome storage bucket.
pub mod chrome;

/// geckodriver provisioning from GitHub releases.
pub mod gecko;

// ============================================================================
// Re-exports
// ============================================================================

pub use chrome::ChromeDownloader;
pub use gecko::GeckoDownloader;

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::archive::unarchive;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;

// ============================================================================
// Constants
// ============================================================================

/// Version sentinel requesting resolution to the newest release.
pub const LATEST_VERSION: &str = "latest";

/// File name of the version marker written next to an installed driver.
pub const VERSION_MARKER_FILENAME: &str = "version";

// ============================================================================
// DriverFamily
// ============================================================================

/// Tag identifying a driver downloader variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverFamily {
    /// geckodriver, for Firefox.
    Gecko,
    /// chromedriver, for Chrome and Chromium.
    Chrome,
}

impl DriverFamily {
    /// Binary name of the driver this family provisions.
    #[inline]
    #[must_use]
    pub const fn driver_name(self) -> &'static str {
        match self {
            Self::Gecko => "geckodriver",
            Self::Chrome => "chromedriver",
        }
    }
}

impl fmt::Display for DriverFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.driver_name())
    }
}

// ============================================================================
// DownloaderConfig
// ============================================================================

/// Target directory and requested version for one downloader instance.
///
/// The version starts as the [`LATEST_VERSION`] sentinel and may be
/// rewritten in place once resolved to a concrete release; this is the
/// only mutable state a downloader carries, and the reason a second
/// [`install`](DriverDownloader::install) on the same instance skips
/// re-resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloaderConfig {
    /// Directory the driver is unpacked into.
    pub directory: PathBuf,

    /// Requested driver version, or [`LATEST_VERSION`].
    pub version: String,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            directory: std::env::temp_dir(),
            version: LATEST_VERSION.to_string(),
        }
    }
}

impl DownloaderConfig {
    /// Creates a config targeting the system temp directory at the latest
    /// version.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target directory.
    #[inline]
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Sets an explicit driver version.
    #[inline]
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Returns `true` if the version is the unresolved sentinel.
    #[inline]
    #[must_use]
    pub fn is_latest(&self) -> bool {
        self.version == LATEST_VERSION
    }
}

// ============================================================================
// DriverDownloader Trait
// ============================================================================

/// Capability trait implemented by every driver family.
#[async_trait]
pub trait DriverDownloader: Send + Sync {
    /// The family this downloader provisions.
    fn family(&self) -> DriverFamily;

    /// Current configuration.
    fn config(&self) -> &DownloaderConfig;

    /// Replaces the configuration.
    fn configure(&mut self, config: DownloaderConfig);

    /// Artifact file name for the running platform and configured version.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`] when the platform has no
    /// entry in the family's suffix table.
    fn basename(&self) -> Result<String>;

    /// Resolves, downloads, unpacks and records the driver.
    ///
    /// Runs strictly sequentially: resolve version, build the download
    /// URL, fetch the archive into the configured directory, verify it
    /// exists, unpack it in place, delete the archive, record the
    /// installed version.
    ///
    /// # Errors
    ///
    /// Any step failing aborts the install with the step's error.
    async fn install(&mut self) -> Result<()>;
}

// ============================================================================
// Shared Install Steps
// ============================================================================

/// Appends a path suffix to a base URL.
///
/// Plain string concatenation with a single separator, re-validated by the
/// [`url`] crate; mirrors are simply different bases.
pub(crate) fn join_url(base: &Url, suffix: &str) -> Result<Url> {
    let joined = format!("{}/{}", base.as_str().trim_end_matches('/'), suffix);
    Ok(Url::parse(&joined)?)
}

/// Confirms a completed download left a non-empty file behind.
async fn verify_artifact(url: &str, path: &Path) -> Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() && meta.len() > 0 => Ok(()),
        _ => Err(Error::download_verification_failed(url, path)),
    }
}

/// Fetches an archive into `directory/basename`, verifies it, unpacks it
/// next to itself and deletes it.
///
/// The target directory is created if missing. On failure the partial
/// artifact is left where it stopped; callers treat the whole install as
/// aborted.
pub(crate) async fn fetch_and_unpack(
    fetcher: &Fetcher,
    url: &str,
    directory: &Path,
    basename: &str,
) -> Result<()> {
    tokio::fs::create_dir_all(directory).await?;
    let fullpath = directory.join(basename);

    fetcher.download(url, &fullpath).await?;
    verify_artifact(url, &fullpath).await?;
    unarchive(&fullpath)?;
    tokio::fs::remove_file(&fullpath).await?;

    debug!(path = %fullpath.display(), "artifact unpacked and archive removed");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
