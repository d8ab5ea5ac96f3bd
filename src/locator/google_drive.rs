//! Google Drive folder discovery from the client database or known sync roots.
use std::io;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, OptionalExtension as _};

use super::{FolderLocator, ensure_absolute};
use crate::error::LocatorError;
use crate::platform::Os;

/// Drive client databases holding `local_sync_root_path`, relative to home.
const SYNC_CONFIG_DBS: &[&str] = &[
    "Library/Application Support/Google/Drive/user_default/sync_config.db",
    "Library/Application Support/Google/Drive/sync_config.db",
];

const SYNC_ROOT_QUERY: &str =
    "SELECT data_value FROM data WHERE entry_key = 'local_sync_root_path'";

/// Folder names used by Backup and Sync and older Drive clients.
const CLASSIC_FOLDERS: &[&str] = &["Google Drive", "GoogleDrive"];

/// Locates the Google Drive folder.
///
/// The sync root recorded in the client's `sync_config.db` wins. Otherwise,
/// on macOS, Drive for desktop mounts each account under
/// `~/Library/CloudStorage/GoogleDrive-<account>/My Drive`; those are tried
/// first (in account name order), then the classic `~/Google Drive` folders.
#[derive(Debug, Clone)]
pub struct GoogleDriveLocator {
    home: PathBuf,
    os: Os,
}

impl GoogleDriveLocator {
    /// Probe the Google Drive sync roots under `home` for `os`.
    #[must_use]
    pub fn new(home: &Path, os: Os) -> Self {
        Self {
            home: home.to_path_buf(),
            os,
        }
    }

    fn sync_config_dbs(&self) -> Vec<PathBuf> {
        SYNC_CONFIG_DBS.iter().map(|rel| self.home.join(rel)).collect()
    }

    /// Every location that may hold the sync root, most specific first.
    fn candidates(&self) -> Result<Vec<PathBuf>, LocatorError> {
        let mut candidates = Vec::new();
        if self.os == Os::MacOs {
            candidates.extend(cloud_storage_roots(
                &self.home.join("Library").join("CloudStorage"),
            )?);
        }
        candidates.extend(CLASSIC_FOLDERS.iter().map(|name| self.home.join(name)));
        Ok(candidates)
    }
}

impl FolderLocator for GoogleDriveLocator {
    fn locate(&self) -> Result<PathBuf, LocatorError> {
        let dbs = self.sync_config_dbs();
        for db in &dbs {
            if let Some(root) = sync_root_from_db(db)? {
                tracing::debug!("reading Google Drive folder from {}", db.display());
                return ensure_absolute(root);
            }
        }

        let candidates = self.candidates()?;
        for candidate in &candidates {
            tracing::debug!("probing Google Drive folder {}", candidate.display());
            if candidate.is_dir() {
                return ensure_absolute(candidate.clone());
            }
        }
        Err(LocatorError::NotInstalled {
            engine: "Google Drive",
            probed: dbs.into_iter().chain(candidates).collect(),
        })
    }
}

/// Read `local_sync_root_path` from a Drive client database, if the database
/// exists and records a non-empty root.
fn sync_root_from_db(path: &Path) -> Result<Option<PathBuf>, LocatorError> {
    if !path.is_file() {
        return Ok(None);
    }
    let malformed = |e: rusqlite::Error| LocatorError::Malformed {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let conn =
        Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(malformed)?;
    let root: Option<String> = conn
        .query_row(SYNC_ROOT_QUERY, [], |row| row.get(0))
        .optional()
        .map_err(malformed)?;
    Ok(root.filter(|r| !r.is_empty()).map(PathBuf::from))
}

/// `My Drive` folders of every `GoogleDrive-*` mount, sorted by mount name.
fn cloud_storage_roots(dir: &Path) -> Result<Vec<PathBuf>, LocatorError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(LocatorError::Io {
                path: dir.to_path_buf(),
                source,
            });
        }
    };

    let mut mounts: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("GoogleDrive-"))
        .map(|entry| entry.path().join("My Drive"))
        .collect();
    mounts.sort();
    Ok(mounts)
}
