//! Archive extraction for downloaded driver artifacts.
//!
//! Driver releases ship as `.tar.gz`/`.tgz` (Linux) or `.zip` (Windows)
//! archives. [`unarchive`] dispatches on the file name suffix alone, never
//! on content sniffing, and always extracts into the archive's parent
//! directory. The archive file itself is left in place; deleting it is the
//! caller's decision.
//!
//! | Suffix | Format |
//! |--------|--------|
//! | `.tar.gz`, `.tgz` | gzip-compressed tar |
//! | `.zip` | zip |
//!
//! Anything else fails with
//! [`Error::UnsupportedArchiveFormat`](crate::Error::UnsupportedArchiveFormat)
//! before any filesystem write.

// ============================================================================
// Imports
// ============================================================================

use std::fs::File;
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::debug;
use zip::ZipArchive;

use crate::error::{Error, Result};

// ============================================================================
// Public Functions
// ============================================================================

/// Extracts an archive into its parent directory.
///
/// File and directory entries are written as stored in the archive; unix
/// permission bits (notably the executable bit on driver binaries) are
/// restored by both extractors.
///
/// # Arguments
///
/// * `fullpath` - Full path of the archive to extract
///
/// # Errors
///
/// Returns [`Error::UnsupportedArchiveFormat`] if the suffix is not
/// `.tar.gz`, `.tgz` or `.zip`, and IO/format errors from the extractors.
pub fn unarchive(fullpath: &Path) -> Result<()> {
    let basename = fullpath
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let target_dir = parent_dir(fullpath);

    if basename.ends_with(".tar.gz") || basename.ends_with(".tgz") {
        debug!(path = %fullpath.display(), "extracting tar.gz archive");
        return extract_tar_gz(fullpath, target_dir);
    }

    if basename.ends_with(".zip") {
        debug!(path = %fullpath.display(), "extracting zip archive");
        return extract_zip(fullpath, target_dir);
    }

    let suffix = last_suffix(&basename);
    Err(Error::unsupported_archive(basename, suffix))
}

// ============================================================================
// Internal Functions
// ============================================================================

/// Returns the directory the archive sits in, falling back to `.` for a
/// bare file name.
fn parent_dir(fullpath: &Path) -> &Path {
    match fullpath.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Returns the final dot-suffix of a file name, empty when there is none.
///
/// A leading dot does not start a suffix, so `.hidden` has no suffix.
fn last_suffix(basename: &str) -> String {
    match basename.rfind('.') {
        Some(index) if index > 0 => basename[index..].to_string(),
        _ => String::new(),
    }
}

/// Extracts a gzip-compressed tar archive.
fn extract_tar_gz(archive_path: &Path, target_dir: &Path) -> Result<()> {
    let file = File::open(archive_path)?;
    let decoder = GzDecoder::new(file);
    let mut archive = tar::Archive::new(decoder);
    archive.unpack(target_dir)?;
    Ok(())
}

/// Extracts a zip archive.
fn extract_zip(archive_path: &Path, target_dir: &Path) -> Result<()> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;
    archive.extract(target_dir)?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
