//! Host platform detection and environment lookups.
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux and other Unix-like systems.
    Linux,
    /// macOS.
    MacOs,
    /// Windows.
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

impl Os {
    /// Detect the current operating system.
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            // Default to Linux for other Unix-like systems
            Self::Linux
        }
    }
}

/// Return the user's home directory from `HOME`, falling back to `USERPROFILE`.
///
/// # Errors
///
/// Returns [`ConfigError::HomeNotFound`] if neither variable is set to a
/// non-empty value.
pub fn home_dir() -> Result<PathBuf, ConfigError> {
    std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .or_else(|| std::env::var_os("USERPROFILE").filter(|v| !v.is_empty()))
        .map(PathBuf::from)
        .ok_or(ConfigError::HomeNotFound)
}

/// Make `path` absolute against the current directory, without touching
/// the filesystem. Already absolute paths are only simplified.
///
/// # Errors
///
/// Returns [`ConfigError::AbsolutePath`] if `path` is empty or the current
/// directory cannot be read.
pub fn absolute(path: &Path) -> Result<PathBuf, ConfigError> {
    let absolute = std::path::absolute(path).map_err(|source| ConfigError::AbsolutePath {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(dunce::simplified(&absolute).to_path_buf())
}
