//! Platform identification for artifact selection.
//!
//! Driver release archives are published per platform, so every download
//! starts by deriving a `(system, machine)` pair for the running host. The
//! pair is computed fresh at call time and keyed into a per-driver suffix
//! table; pairs with no table entry fail with
//! [`Error::UnsupportedPlatform`](crate::Error::UnsupportedPlatform).
//!
//! # Example
//!
//! ```
//! use webdriver_provision::PlatformKey;
//!
//! let platform = PlatformKey::current();
//! println!("running on {platform}");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::env::consts;
use std::fmt;

// ============================================================================
// PlatformKey
// ============================================================================

/// Host platform identity as a `(system, machine)` pair.
///
/// Values follow [`std::env::consts::OS`] and [`std::env::consts::ARCH`]
/// (e.g. `"linux"`/`"x86_64"`, `"windows"`/`"x86"`). The key is never
/// stored by downloaders; it is derived again for each lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformKey {
    /// Operating system family.
    system: String,
    /// Machine architecture.
    machine: String,
}

// ============================================================================
// Constructors
// ============================================================================

impl PlatformKey {
    /// Creates a platform key from explicit parts.
    #[inline]
    #[must_use]
    pub fn new(system: impl Into<String>, machine: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            machine: machine.into(),
        }
    }

    /// Returns the key for the running host.
    #[inline]
    #[must_use]
    pub fn current() -> Self {
        Self::new(consts::OS, consts::ARCH)
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl PlatformKey {
    /// Operating system family (e.g. `"linux"`).
    #[inline]
    #[must_use]
    pub fn system(&self) -> &str {
        &self.system
    }

    /// Machine architecture (e.g. `"x86_64"`).
    #[inline]
    #[must_use]
    pub fn machine(&self) -> &str {
        &self.machine
    }

    /// Returns `true` if the system family is Linux.
    #[inline]
    #[must_use]
    pub fn is_linux(&self) -> bool {
        self.system == "linux"
    }

    /// Returns `true` if the system family is Windows.
    #[inline]
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.system == "windows"
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.system, self.machine)
    }
}

// ============================================================================
// Tests
// ============================================================================
