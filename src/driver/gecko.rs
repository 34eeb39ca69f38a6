//! geckodriver provisioning from GitHub releases.
//!
//! Artifacts are published per release under
//! `https://github.com/mozilla/geckodriver/releases`. The "latest" version
//! is resolved by probing the `releases/latest` endpoint without following
//! its redirect and reading the version out of the `Location` target.
//!
//! After a successful install a `version` marker file is written next to
//! the unpacked binary, holding a single `geckodriver <version>` line.
//!
//! # Example
//!
//! ```no_run
//! use webdriver_provision::{DriverDownloader, GeckoDownloader};
//!
//! # async fn example() -> webdriver_provision::Result<()> {
//! let mut downloader = GeckoDownloader::new()?;
//! downloader.install().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

use crate::driver::{
    DownloaderConfig, DriverDownloader, DriverFamily, VERSION_MARKER_FILENAME, fetch_and_unpack,
    join_url,
};
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::platform::PlatformKey;

// ============================================================================
// Constants
// ============================================================================

/// Release index all geckodriver downloads are rooted at.
pub const GECKO_RELEASES_URL: &str = "https://github.com/mozilla/geckodriver/releases";

/// Maps a platform to its release artifact suffix.
///
/// Linux artifacts ship as tarballs, Windows artifacts as zip archives.
fn artifact_suffix(platform: &PlatformKey) -> Option<&'static str> {
    match (platform.system(), platform.machine()) {
        ("linux", "x86_64") => Some("linux64.tar.gz"),
        ("linux", "x86") => Some("linux32.tar.gz"),
        ("windows", "x86_64") => Some("win64.zip"),
        ("windows", "x86") => Some("win32.zip"),
        _ => None,
    }
}

// ============================================================================
// GeckoDownloader
// ============================================================================

/// Downloader for geckodriver (Firefox).
#[derive(Debug, Clone)]
pub struct GeckoDownloader {
    /// Target directory and requested version.
    config: DownloaderConfig,
    /// Release index root; points at GitHub unless overridden for a mirror.
    releases_root: Url,
    /// HTTP client pair.
    fetcher: Fetcher,
}

// ============================================================================
// Constructors
// ============================================================================

impl GeckoDownloader {
    /// Creates a downloader with the default config against the official
    /// release index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP clients cannot be built.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config: DownloaderConfig::default(),
            releases_root: Url::parse(GECKO_RELEASES_URL)?,
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

    /// Points the downloader at a release mirror.
    #[inline]
    #[must_use]
    pub fn with_release_root(mut self, root: Url) -> Self {
        self.releases_root = root;
        self
    }
}

// ============================================================================
// Version Resolution
// ============================================================================

impl GeckoDownloader {
    /// Resolves the newest release version from the `latest` redirect.
    ///
    /// The redirect target ends in `.../tag/v<version>`; the final path
    /// segment minus its `v` prefix is the version.
    async fn resolve_latest(&self) -> Result<String> {
        let latest_url = join_url(&self.releases_root, "latest")?;
        let location = self.fetcher.redirect_location(latest_url.as_str()).await?;

        let segment = location.rsplit('/').next().unwrap_or(location.as_str());
        let version = segment.trim_start_matches('v');
        if version.is_empty() {
            return Err(Error::version_resolution(format!(
                "no version segment in redirect target {location:?}"
            )));
        }

        Ok(version.to_string())
    }

    /// Writes the `version` marker file into the configured directory.
    async fn write_version_marker(&self) -> Result<()> {
        let marker = self.config.directory.join(VERSION_MARKER_FILENAME);
        let line = format!(
            "{} {}\n",
            DriverFamily::Gecko.driver_name(),
            self.config.version
        );
        tokio::fs::write(&marker, line).await?;

        debug!(
            path = %marker.display(),
            version = %self.config.version,
            "version marker written"
        );
        Ok(())
    }
}

// ============================================================================
// DriverDownloader Implementation
// ============================================================================

#[async_trait]
impl DriverDownloader for GeckoDownloader {
    fn family(&self) -> DriverFamily {
        DriverFamily::Gecko
    }

    fn config(&self) -> &DownloaderConfig {
        &self.config
    }

    fn configure(&mut self, config: DownloaderConfig) {
        self.config = config;
    }

    /// Artifact name, e.g. `geckodriver-v0.36.0-linux64.tar.gz`.
    fn basename(&self) -> Result<String> {
        let platform = PlatformKey::current();
        let suffix =
            artifact_suffix(&platform).ok_or_else(|| Error::unsupported_platform(&platform))?;
        Ok(format!("geckodriver-v{}-{}", self.config.version, suffix))
    }

    async fn install(&mut self) -> Result<()> {
        if self.config.is_latest() {
            let version = self.resolve_latest().await?;
            info!(version = %version, "geckodriver latest version");
            self.config.version = version;
        }

        let basename = self.basename()?;
        let download_url = join_url(
            &self.releases_root,
            &format!("download/v{}/{}", self.config.version, basename),
        )?;

        fetch_and_unpack(
            &self.fetcher,
            download_url.as_str(),
            &self.config.directory,
            &basename,
        )
        .await?;

        self.write_version_marker().await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::io::{Cursor, Write};

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use tempfile::TempDir;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    const DRIVER_BYTES: &[u8] = b"#!/bin/sh\necho geckodriver\n";

    fn targz_bytes(entry_name: &str) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        let mut header = tar::Header::new_gnu();
        header.set_size(DRIVER_BYTES.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder
            .append_data(&mut header, entry_name, DRIVER_BYTES)
            .unwrap();
        builder.into_inner().unwrap().finish().unwrap()
    }

    fn zip_bytes(entry_name: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(entry_name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(DRIVER_BYTES).unwrap();
        writer.finish().unwrap().into_inner()
    }

    /// Archive bytes and unpacked binary name matching the host suffix.
    fn artifact_for(suffix: &str) -> (Vec<u8>, &'static str) {
        if suffix.ends_with(".zip") {
            (zip_bytes("geckodriver.exe"), "geckodriver.exe")
        } else {
            (targz_bytes("geckodriver"), "geckodriver")
        }
    }

    #[test]
    fn test_artifact_suffix_table() {
        let cases = [
            (("linux", "x86_64"), "linux64.tar.gz"),
            (("linux", "x86"), "linux32.tar.gz"),
            (("windows", "x86_64"), "win64.zip"),
            (("windows", "x86"), "win32.zip"),
        ];
        for ((system, machine), expected) in cases {
            let platform = PlatformKey::new(system, machine);
            assert_eq!(artifact_suffix(&platform), Some(expected));
        }
    }

    #[test]
    fn test_artifact_suffix_unsupported_platforms() {
        assert_eq!(artifact_suffix(&PlatformKey::new("macos", "aarch64")), None);
        assert_eq!(artifact_suffix(&PlatformKey::new("linux", "aarch64")), None);
        assert_eq!(artifact_suffix(&PlatformKey::new("freebsd", "x86_64")), None);
    }

    #[test]
    fn test_basename_includes_version_and_suffix() {
        let Some(suffix) = artifact_suffix(&PlatformKey::current()) else {
            return;
        };
        let downloader = GeckoDownloader::new()
            .unwrap()
            .with_config(DownloaderConfig::new().with_version("0.36.0"));
        assert_eq!(
            downloader.basename().unwrap(),
            format!("geckodriver-v0.36.0-{suffix}")
        );
    }

    #[tokio::test]
    async fn test_resolve_latest_from_redirect() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/latest")
            .with_status(302)
            .with_header(
                "location",
                "https://github.com/mozilla/geckodriver/releases/tag/v0.36.0",
            )
            .create_async()
            .await;

        let downloader = GeckoDownloader::new()
            .unwrap()
            .with_release_root(Url::parse(&server.url()).unwrap());
        let version = downloader.resolve_latest().await.unwrap();

        assert_eq!(version, "0.36.0");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_resolve_latest_rejects_non_redirect() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/latest")
            .with_status(200)
            .with_body("release index page")
            .create_async()
            .await;

        let downloader = GeckoDownloader::new()
            .unwrap()
            .with_release_root(Url::parse(&server.url()).unwrap());
        let err = downloader.resolve_latest().await.unwrap_err();

        assert!(matches!(err, Error::HttpStatus { status: 200, .. }));
    }

    #[tokio::test]
    async fn test_install_resolves_fetches_unpacks_and_records() {
        let Some(suffix) = artifact_suffix(&PlatformKey::current()) else {
            return;
        };
        let mut server = mockito::Server::new_async().await;
        let latest_mock = server
            .mock("GET", "/latest")
            .with_status(302)
            .with_header(
                "location",
                "https://github.com/mozilla/geckodriver/releases/tag/v0.36.0",
            )
            .create_async()
            .await;

        let basename = format!("geckodriver-v0.36.0-{suffix}");
        let (body, binary_name) = artifact_for(suffix);
        let artifact_mock = server
            .mock("GET", format!("/download/v0.36.0/{basename}").as_str())
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let mut downloader = GeckoDownloader::new()
            .unwrap()
            .with_release_root(Url::parse(&server.url()).unwrap())
            .with_config(DownloaderConfig::new().with_directory(dir.path()));

        downloader.install().await.unwrap();

        assert!(dir.path().join(binary_name).exists());
        assert!(!dir.path().join(&basename).exists());
        assert_eq!(downloader.config().version, "0.36.0");
        assert_eq!(
            fs::read_to_string(dir.path().join(VERSION_MARKER_FILENAME)).unwrap(),
            "geckodriver 0.36.0\n"
        );
        latest_mock.assert_async().await;
        artifact_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_install_pinned_version_skips_resolution() {
        let Some(suffix) = artifact_suffix(&PlatformKey::current()) else {
            return;
        };
        let mut server = mockito::Server::new_async().await;

        let basename = format!("geckodriver-v0.35.0-{suffix}");
        let (body, _binary_name) = artifact_for(suffix);
        // No `latest` mock: hitting it would fail the install.
        let artifact_mock = server
            .mock("GET", format!("/download/v0.35.0/{basename}").as_str())
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let mut downloader = GeckoDownloader::new()
            .unwrap()
            .with_release_root(Url::parse(&server.url()).unwrap())
            .with_config(
                DownloaderConfig::new()
                    .with_directory(dir.path())
                    .with_version("0.35.0"),
            );

        downloader.install().await.unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join(VERSION_MARKER_FILENAME)).unwrap(),
            "geckodriver 0.35.0\n"
        );
        artifact_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_install_missing_artifact_fails_without_marker() {
        if artifact_suffix(&PlatformKey::current()).is_none() {
            return;
        }
        let mut server = mockito::Server::new_async().await;
        let _latest_mock = server
            .mock("GET", "/latest")
            .with_status(302)
            .with_header("location", "/tag/v0.36.0")
            .create_async()
            .await;
        // Artifact endpoint left unmocked; the fetch gets an error status.

        let dir = TempDir::new().unwrap();
        let mut downloader = GeckoDownloader::new()
            .unwrap()
            .with_release_root(Url::parse(&server.url()).unwrap())
            .with_config(DownloaderConfig::new().with_directory(dir.path()));

        let err = downloader.install().await.unwrap_err();

        assert!(err.is_network_error());
        assert!(!dir.path().join(VERSION_MARKER_FILENAME).exists());
    }
}
