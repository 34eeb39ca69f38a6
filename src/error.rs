//! Error types for WebDriver provisioning.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use webdriver_provision::{DriverDownloader, GeckoDownloader, Result};
//!
//! async fn example() -> Result<()> {
//!     let mut downloader = GeckoDownloader::new()?;
//!     downloader.install().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Platform | [`Error::UnsupportedPlatform`] |
//! | Archive | [`Error::UnsupportedArchiveFormat`], [`Error::Zip`] |
//! | Network | [`Error::HttpStatus`], [`Error::DownloadVerificationFailed`], [`Error::Http`] |
//! | Resolution | [`Error::VersionResolution`], [`Error::InvalidUrl`], [`Error::Regex`] |
//! | Filesystem | [`Error::RepoRootNotFound`], [`Error::Pattern`], [`Error::Io`] |
//!
//! Every variant is a hard stop: nothing in this crate retries, recovers
//! locally, or signals partial success. Callers are expected to abort the
//! encompassing provisioning task.

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::path::{Path, PathBuf};
use std::result::Result as StdResult;

use thiserror::Error;

use crate::platform::PlatformKey;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Platform Errors
    // ========================================================================
    /// No artifact suffix is mapped for the current platform.
    ///
    /// Returned when the `(system, machine)` pair has no entry in the
    /// driver family's suffix table.
    #[error("Unsupported platform: {system}-{machine}")]
    UnsupportedPlatform {
        /// Operating system family (e.g. "linux", "windows").
        system: String,
        /// Machine architecture (e.g. "x86_64", "x86").
        machine: String,
    },

    // ========================================================================
    // Archive Errors
    // ========================================================================
    /// Archive suffix is not one of the supported formats.
    ///
    /// Only `.tar.gz`/`.tgz` and `.zip` archives can be unpacked.
    #[error("Cannot unarchive file {basename} of type {suffix}")]
    UnsupportedArchiveFormat {
        /// File name of the offending archive.
        basename: String,
        /// The unrecognized suffix (e.g. ".xyz").
        suffix: String,
    },

    // ========================================================================
    // Network Errors
    // ========================================================================
    /// HTTP response carried an unexpected status code.
    ///
    /// Returned for a non-success artifact fetch, a non-redirect from the
    /// latest-release probe, or a failed release lookup.
    #[error("HTTP status {status} from {url}")]
    HttpStatus {
        /// The requested URL.
        url: String,
        /// The status code received.
        status: u16,
    },

    /// Downloaded artifact is missing or empty after the fetch completed.
    ///
    /// Checked via file existence and size, not a checksum.
    #[error("Failed downloading {url} into {path}")]
    DownloadVerificationFailed {
        /// The download URL.
        url: String,
        /// Where the artifact should have been written.
        path: PathBuf,
    },

    // ========================================================================
    // Resolution Errors
    // ========================================================================
    /// Version resolution produced no usable version string.
    ///
    /// Returned when a redirect `Location`, a release lookup body, or a
    /// browser version-query output cannot be parsed.
    #[error("Version resolution failed: {message}")]
    VersionResolution {
        /// Description of what could not be parsed.
        message: String,
    },

    // ========================================================================
    // Filesystem Errors
    // ========================================================================
    /// Upward walk exhausted without finding a repository marker.
    #[error("Cannot find repo root within {start}")]
    RepoRootNotFound {
        /// The walk's starting directory.
        start: PathBuf,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Zip extraction error.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// URL construction error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Glob pattern compile error.
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Regex compile error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates an unsupported platform error from a platform key.
    #[inline]
    pub fn unsupported_platform(platform: &PlatformKey) -> Self {
        Self::UnsupportedPlatform {
            system: platform.system().to_string(),
            machine: platform.machine().to_string(),
        }
    }

    /// Creates an unsupported archive format error.
    #[inline]
    pub fn unsupported_archive(basename: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::UnsupportedArchiveFormat {
            basename: basename.into(),
            suffix: suffix.into(),
        }
    }

    /// Creates an HTTP status error.
    #[inline]
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a download verification error.
    #[inline]
    pub fn download_verification_failed(url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::DownloadVerificationFailed {
            url: url.into(),
            path: path.into(),
        }
    }

    /// Creates a version resolution error.
    #[inline]
    pub fn version_resolution(message: impl Into<String>) -> Self {
        Self::VersionResolution {
            message: message.into(),
        }
    }

    /// Creates a repo root not found error.
    #[inline]
    pub fn repo_root_not_found(start: impl AsRef<Path>) -> Self {
        Self::RepoRootNotFound {
            start: start.as_ref().to_path_buf(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a network-level error.
    #[inline]
    #[must_use]
    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            Self::HttpStatus { .. } | Self::DownloadVerificationFailed { .. } | Self::Http(_)
        )
    }

    /// Returns `true` if this error reports an unsupported platform or
    /// archive format.
    ///
    /// These indicate configuration gaps; retrying cannot succeed.
    #[inline]
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedPlatform { .. } | Self::UnsupportedArchiveFormat { .. }
        )
    }

    /// Returns `true` if this is a version resolution error.
    #[inline]
    #[must_use]
    pub fn is_resolution_error(&self) -> bool {
        matches!(self, Self::VersionResolution { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_unsupported_platform_display() {
        let platform = PlatformKey::new("darwin", "aarch64");
        let err = Error::unsupported_platform(&platform);
        assert_eq!(err.to_string(), "Unsupported platform: darwin-aarch64");
    }

    #[test]
    fn test_unsupported_archive_display() {
        let err = Error::unsupported_archive("driver.xyz", ".xyz");
        assert_eq!(
            err.to_string(),
            "Cannot unarchive file driver.xyz of type .xyz"
        );
    }

    #[test]
    fn test_http_status_display() {
        let err = Error::http_status("https://example.com/a.zip", 404);
        assert_eq!(
            err.to_string(),
            "HTTP status 404 from https://example.com/a.zip"
        );
    }

    #[test]
    fn test_download_verification_display() {
        let err = Error::download_verification_failed("https://example.com/a.zip", "/tmp/a.zip");
        assert_eq!(
            err.to_string(),
            "Failed downloading https://example.com/a.zip into /tmp/a.zip"
        );
    }

    #[test]
    fn test_repo_root_not_found_display() {
        let err = Error::repo_root_not_found("/rootdir/project");
        assert_eq!(
            err.to_string(),
            "Cannot find repo root within /rootdir/project"
        );
    }

    #[test]
    fn test_is_network_error() {
        let status_err = Error::http_status("https://example.com", 500);
        let verify_err = Error::download_verification_failed("https://example.com", "/tmp/x");
        let other_err = Error::version_resolution("test");

        assert!(status_err.is_network_error());
        assert!(verify_err.is_network_error());
        assert!(!other_err.is_network_error());
    }

    #[test]
    fn test_is_unsupported() {
        let platform_err = Error::unsupported_platform(&PlatformKey::new("plan9", "mips"));
        let archive_err = Error::unsupported_archive("a.rar", ".rar");
        let other_err = Error::repo_root_not_found("/tmp");

        assert!(platform_err.is_unsupported());
        assert!(archive_err.is_unsupported());
        assert!(!other_err.is_unsupported());
    }

    #[test]
    fn test_is_resolution_error() {
        let err = Error::version_resolution("no version in probe output");
        assert!(err.is_resolution_error());
        assert!(!err.is_network_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
