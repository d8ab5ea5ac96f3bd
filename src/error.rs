//! Domain-specific error types for storage configuration resolution.
//!
//! Library modules return typed errors ([`ConfigError`], [`LocatorError`])
//! built with [`thiserror`], while command handlers at the CLI boundary
//! convert them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ConfigError
//! ├── LegacyConfigDetected     retired [Allowed/Ignored Applications] schema
//! ├── UnknownEngine            storage.engine is not a known identifier
//! ├── MissingRequiredPath      file_system engine without storage.path
//! ├── Io / InvalidSyntax       config file exists but cannot be read or parsed
//! ├── HomeNotFound             no home directory in the environment
//! ├── AbsolutePath             a relative home or root could not be made absolute
//! └── Locator(LocatorError)    Dropbox / Google Drive folder discovery failed
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort resolution of the storage configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file still uses the retired per-application sections.
    #[error(
        "Old config file detected. Aborting.\n\n\
         An old section (e.g. [Allowed Applications] or [Ignored Applications]) \
         has been detected in your {} file.\n\
         I'd rather do nothing than do something you do not want me to do.\n\n\
         Please read the up to date documentation on <https://github.com/lra/mackup> \
         and migrate your configuration file.",
        .path.display()
    )]
    LegacyConfigDetected {
        /// Path of the offending config file.
        path: PathBuf,
    },

    /// `storage.engine` names an engine that does not exist.
    #[error("Unknown storage engine: {0}")]
    UnknownEngine(String),

    /// The `file_system` engine was selected without a `storage.path`.
    #[error("The required 'path' can't be found while the 'file_system' engine is used.")]
    MissingRequiredPath,

    /// The config file exists but could not be read.
    #[error("IO error reading config file {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file contains a syntax error that prevents parsing.
    #[error("Invalid INI syntax in {file} at line {line}: {message}")]
    InvalidSyntax {
        /// Display name of the file being parsed.
        file: String,
        /// 1-based line number of the offending line.
        line: usize,
        /// Human-readable description of the problem.
        message: String,
    },

    /// Neither `HOME` nor `USERPROFILE` is set.
    #[error("Unable to determine the home directory (HOME is not set)")]
    HomeNotFound,

    /// A relative home or storage root could not be made absolute.
    #[error("Unable to make {} an absolute path: {source}", .path.display())]
    AbsolutePath {
        /// The relative path.
        path: PathBuf,
        /// Underlying I/O error (usually a missing current directory).
        source: std::io::Error,
    },

    /// A cloud folder locator failed.
    #[error(transparent)]
    Locator(#[from] LocatorError),
}

/// Errors raised while discovering a cloud client's local sync folder.
#[derive(Error, Debug)]
pub enum LocatorError {
    /// None of the probed locations exist.
    #[error("Unable to find your {engine} install =( (looked in {})", format_probed(.probed))]
    NotInstalled {
        /// Human-readable client name (e.g. `"Dropbox"`).
        engine: &'static str,
        /// Every location that was checked.
        probed: Vec<PathBuf>,
    },

    /// A client state file exists but could not be read.
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        /// Path to the state file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A client state file was read but its content is not understood.
    #[error("Malformed {}: {message}", .path.display())]
    Malformed {
        /// Path to the state file.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// The discovered folder is not an absolute path.
    #[error("Discovered folder is not an absolute path: {}", .0.display())]
    NotAbsolute(PathBuf),
}

fn format_probed(probed: &[PathBuf]) -> String {
    probed
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
