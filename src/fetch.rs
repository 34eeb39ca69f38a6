//! Streaming HTTP fetch primitives.
//!
//! [`Fetcher`] wraps two [`reqwest`] clients: the default one follows
//! redirects and serves artifact downloads and plain-text lookups, while a
//! second non-following client probes redirect targets so the `Location`
//! header stays observable. Downloads stream the body to disk through a
//! fixed [`DEFAULT_BUFFER_SIZE`] buffer, so peak memory stays constant no
//! matter how large the artifact is.
//!
//! There are no retries and no timeouts beyond the transport defaults; any
//! unexpected status is an immediate [`Error::HttpStatus`].
//!
//! # Example
//!
//! ```ignore
//! use webdriver_provision::Fetcher;
//!
//! # async fn example() -> webdriver_provision::Result<()> {
//! let fetcher = Fetcher::new()?;
//! fetcher
//!     .download("https://example.com/driver.zip", "/tmp/driver.zip".as_ref())
//!     .await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::Path;

use futures_util::StreamExt;
use reqwest::header::LOCATION;
use reqwest::{Client, StatusCode, redirect};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Write buffer size for streamed downloads, in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("webdriver-provision/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Fetcher
// ============================================================================

/// HTTP client pair for artifact downloads and version lookups.
#[derive(Debug, Clone)]
pub struct Fetcher {
    /// Follows redirects; used for downloads and text lookups.
    client: Client,
    /// Never follows redirects; used to read `Location` headers.
    probe_client: Client,
}

// ============================================================================
// Constructors
// ============================================================================

impl Fetcher {
    /// Creates a fetcher with default transport settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if a client cannot be constructed.
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        let probe_client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            probe_client,
        })
    }
}

// ============================================================================
// Fetch Operations
// ============================================================================

impl Fetcher {
    /// Downloads `url` into the file at `dest`, streaming the body.
    ///
    /// The destination file is only created once a success status has been
    /// received; a failed request leaves no file behind. An interrupted
    /// body stream leaves the partial file in place for the caller's
    /// verification step to reject.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to GET
    /// * `dest` - Filesystem path to write the body to
    ///
    /// # Errors
    ///
    /// Returns [`Error::HttpStatus`] on a non-success status and
    /// [`Error::Http`]/[`Error::Io`] on transport or write failures.
    pub async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        debug!(url = %url, path = %dest.display(), "starting download");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::http_status(url, status.as_u16()));
        }

        let file = File::create(dest).await?;
        let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if chunk.is_empty() {
                continue;
            }
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;

        debug!(url = %url, bytes = written, "download complete");
        Ok(())
    }

    /// GETs `url` without following redirects and returns the redirect
    /// target.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HttpStatus`] if the response is not a redirect and
    /// [`Error::VersionResolution`] if the `Location` header is missing or
    /// unreadable.
    pub async fn redirect_location(&self, url: &str) -> Result<String> {
        let response = self.probe_client.get(url).send().await?;
        let status = response.status();
        if !status.is_redirection() {
            return Err(Error::http_status(url, status.as_u16()));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                Error::version_resolution(format!("missing Location header from {url}"))
            })?;

        Ok(location.trim().to_string())
    }

    /// GETs `url` expecting a `200 OK` plain-text body, returned trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HttpStatus`] on any other status.
    pub async fn text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::http_status(url, status.as_u16()));
        }

        Ok(response.text().await?.trim().to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
