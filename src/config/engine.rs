//! Storage engine selection.
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::STORAGE_SECTION;
use super::source::Source;
use crate::error::ConfigError;

/// Where the synchronized files physically reside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Engine {
    /// The local Dropbox folder.
    #[default]
    Dropbox,
    /// The local Google Drive folder.
    GoogleDrive,
    /// An explicit directory under the home directory.
    FileSystem,
}

impl Engine {
    /// Every engine, in declaration order.
    pub const ALL: [Self; 3] = [Self::Dropbox, Self::GoogleDrive, Self::FileSystem];

    /// Identifier used for this engine in the config file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dropbox => "dropbox",
            Self::GoogleDrive => "google_drive",
            Self::FileSystem => "file_system",
        }
    }

    /// Human-readable product name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dropbox => "Dropbox",
            Self::GoogleDrive => "Google Drive",
            Self::FileSystem => "file system",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = ConfigError;

    /// Identifiers are matched case-sensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownEngine(s.to_string()))
    }
}

/// Determine the active engine from `storage.engine`, defaulting to Dropbox.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownEngine`] if the key is set to anything other
/// than a known identifier, including a bare `engine` key with no value.
pub fn resolve(source: &Source) -> Result<Engine, ConfigError> {
    if !source.has_option(STORAGE_SECTION, "engine") {
        tracing::debug!("no storage engine configured, defaulting to {}", Engine::default());
        return Ok(Engine::default());
    }
    source
        .get(STORAGE_SECTION, "engine")
        .unwrap_or_default()
        .parse()
}
