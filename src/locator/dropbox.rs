//! Dropbox folder discovery from the client's state files.
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

use super::{FolderLocator, ensure_absolute, read_optional};
use crate::error::LocatorError;

/// Account entries written by the Dropbox client to `~/.dropbox/info.json`.
#[derive(Debug, Deserialize)]
struct InfoJson {
    personal: Option<Account>,
    business: Option<Account>,
}

#[derive(Debug, Deserialize)]
struct Account {
    path: PathBuf,
}

/// Locates the Dropbox folder by reading `~/.dropbox/info.json`, falling
/// back to the legacy `~/.dropbox/host.db`.
#[derive(Debug, Clone)]
pub struct DropboxLocator {
    state_dir: PathBuf,
}

impl DropboxLocator {
    /// Probe the Dropbox client state under `home`.
    #[must_use]
    pub fn new(home: &Path) -> Self {
        Self {
            state_dir: home.join(".dropbox"),
        }
    }

    fn info_json(&self) -> PathBuf {
        self.state_dir.join("info.json")
    }

    fn host_db(&self) -> PathBuf {
        self.state_dir.join("host.db")
    }
}

impl FolderLocator for DropboxLocator {
    fn locate(&self) -> Result<PathBuf, LocatorError> {
        let info = self.info_json();
        if let Some(content) = read_optional(&info)? {
            tracing::debug!("reading Dropbox folder from {}", info.display());
            return ensure_absolute(parse_info_json(&info, &content)?);
        }

        let host_db = self.host_db();
        if let Some(content) = read_optional(&host_db)? {
            tracing::debug!("reading Dropbox folder from {}", host_db.display());
            return ensure_absolute(parse_host_db(&host_db, &content)?);
        }

        Err(LocatorError::NotInstalled {
            engine: "Dropbox",
            probed: vec![info, host_db],
        })
    }
}

/// Extract the personal account folder, or the business one if there is
/// no personal account.
fn parse_info_json(path: &Path, content: &str) -> Result<PathBuf, LocatorError> {
    let info: InfoJson = serde_json::from_str(content).map_err(|e| LocatorError::Malformed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    info.personal
        .or(info.business)
        .map(|account| account.path)
        .ok_or_else(|| LocatorError::Malformed {
            path: path.to_path_buf(),
            message: "no personal or business account".to_string(),
        })
}

/// The second line of `host.db` is the base64-encoded folder path.
fn parse_host_db(path: &Path, content: &str) -> Result<PathBuf, LocatorError> {
    let malformed = |message: String| LocatorError::Malformed {
        path: path.to_path_buf(),
        message,
    };
    let encoded = content
        .lines()
        .nth(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .ok_or_else(|| malformed("missing folder line".to_string()))?;
    let decoded = STANDARD
        .decode(encoded)
        .map_err(|e| malformed(format!("invalid base64: {e}")))?;
    let folder = String::from_utf8(decoded).map_err(|e| malformed(e.to_string()))?;
    Ok(PathBuf::from(folder))
}
