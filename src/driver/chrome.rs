//! chromedriver provisioning against the Chrome storage bucket.
//!
//! chromedriver releases must match the locally installed browser, so the
//! install starts by querying the browser itself (`chromium-browser
//! --version` on Linux, the `BLBeacon` registry key on Windows), then asks
//! the storage bucket for the newest release of that version line.
//!
//! Unlike the gecko family, this downloader ignores the configured version
//! (the installed release always tracks the local browser) and writes no
//! `version` marker file; the resolved release is only logged.
//!
//! # Example
//!
//! ```no_run
//! use webdriver_provision::{ChromeDownloader, DriverDownloader};
//!
//! # async fn example() -> webdriver_provision::Result<()> {
//! let mut downloader = ChromeDownloader::new()?;
//! downloader.install().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;
use tracing::{debug, info};
use url::Url;

use crate::driver::{
    DownloaderConfig, DriverDownloader, DriverFamily, fetch_and_unpack, join_url,
};
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::platform::PlatformKey;

// ============================================================================
// Constants
// ============================================================================

/// Storage bucket all chromedriver downloads are rooted at.
pub const CHROME_STORAGE_URL: &str = "https://chromedriver.storage.googleapis.com";

/// Windows registry key holding the installed Chrome version.
const CHROME_BEACON_KEY: &str = r"HKEY_CURRENT_USER\Software\Google\Chrome\BLBeacon";

/// Maps a platform to its release artifact suffix.
///
/// Both architectures receive the same artifact per system: the bucket
/// publishes one Linux build and one Windows build.
fn artifact_suffix(platform: &PlatformKey) -> Option<&'static str> {
    match (platform.system(), platform.machine()) {
        ("linux", "x86_64") | ("linux", "x86") => Some("linux64.zip"),
        ("windows", "x86_64") | ("windows", "x86") => Some("win32.zip"),
        _ => None,
    }
}

/// Extracts the `MAJOR.MINOR.PATCH` prefix from a version-query output.
fn extract_version(output: &str) -> Result<String> {
    let pattern = Regex::new(r"\d+\.\d+\.\d+")?;
    let found = pattern.find(output).ok_or_else(|| {
        Error::version_resolution(format!("no MAJOR.MINOR.PATCH version in {output:?}"))
    })?;
    Ok(found.as_str().to_string())
}

// ============================================================================
// ChromeDownloader
// ============================================================================

/// Downloader for chromedriver (Chrome and Chromium).
#[derive(Debug, Clone)]
pub struct ChromeDownloader {
    /// Target directory; the version field is not consulted.
    config: DownloaderConfig,
    /// Storage bucket root; points at Google unless overridden for a mirror.
    storage_root: Url,
    /// HTTP client pair.
    fetcher: Fetcher,
}

// ============================================================================
// Constructors
// ============================================================================

impl ChromeDownloader {
    /// Creates a downloader with the default config against the official
    /// storage bucket.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP clients cannot be built.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config: DownloaderConfig::default(),
            storage_root: Url::parse(CHROME_STORAGE_URL)?,
            fetcher: Fetcher::new()?,
        })
    }

    /// Replaces the configuration, builder style.
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: DownloaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Points the downloader at a storage mirror.
    #[inline]
    #[must_use]
    pub fn with_storage_root(mut self, root: Url) -> Self {
        self.storage_root = root;
        self
    }
}

// ============================================================================
// Version Resolution
// ============================================================================

impl ChromeDownloader {
    /// Queries the locally installed browser for its version.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`] on systems without a known
    /// query command, [`Error::Io`] if the command cannot be spawned, and
    /// [`Error::VersionResolution`] if its output has no version in it.
    async fn probe_browser_version() -> Result<String> {
        let platform = PlatformKey::current();
        let output = if platform.is_linux() {
            Command::new("chromium-browser")
                .arg("--version")
                .output()
                .await?
        } else if platform.is_windows() {
            Command::new("reg")
                .args(["query", CHROME_BEACON_KEY, "/v", "version"])
                .output()
                .await?
        } else {
            return Err(Error::unsupported_platform(&platform));
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        extract_version(&stdout)
    }

    /// Looks up the newest chromedriver release for a browser version.
    async fn latest_release(&self, browser_version: &str) -> Result<String> {
        let release_url = join_url(
            &self.storage_root,
            &format!("LATEST_RELEASE_{browser_version}"),
        )?;
        let release = self.fetcher.text(release_url.as_str()).await?;
        if release.is_empty() {
            return Err(Error::version_resolution(format!(
                "empty release body from {release_url}"
            )));
        }
        Ok(release)
    }

    /// Download URL for a concrete release on the current platform.
    fn download_url(&self, release: &str) -> Result<Url> {
        let basename = self.basename()?;
        join_url(&self.storage_root, &format!("{release}/{basename}"))
    }
}

// ============================================================================
// DriverDownloader Implementation
// ============================================================================

#[async_trait]
impl DriverDownloader for ChromeDownloader {
    fn family(&self) -> DriverFamily {
        DriverFamily::Chrome
    }

    fn config(&self) -> &DownloaderConfig {
        &self.config
    }

    fn configure(&mut self, config: DownloaderConfig) {
        self.config = config;
    }

    /// Artifact name, e.g. `chromedriver_linux64.zip`; never versioned.
    fn basename(&self) -> Result<String> {
        let platform = PlatformKey::current();
        let suffix =
            artifact_suffix(&platform).ok_or_else(|| Error::unsupported_platform(&platform))?;
        Ok(format!("chromedriver_{suffix}"))
    }

    async fn install(&mut self) -> Result<()> {
        let browser_version = Self::probe_browser_version().await?;
        debug!(version = %browser_version, "local browser version");

        let release = self.latest_release(&browser_version).await?;
        let basename = self.basename()?;
        let download_url = self.download_url(&release)?;

        fetch_and_unpack(
            &self.fetcher,
            download_url.as_str(),
            &self.config.directory,
            &basename,
        )
        .await?;

        info!(release = %release, "chromedriver version");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
