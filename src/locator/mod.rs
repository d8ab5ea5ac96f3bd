//! Discovery of cloud client sync folders.
//!
//! The resolver never probes the host directly: it asks a [`FolderLocator`]
//! for the folder. [`Locators::host`] wires up the real probing
//! implementations, while [`FixedLocator`] stands in for them in tests.
pub mod dropbox;
pub mod google_drive;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub use dropbox::DropboxLocator;
pub use google_drive::GoogleDriveLocator;

use crate::error::LocatorError;
use crate::platform::Os;

/// Finds the local folder of one cloud storage client.
///
/// Implementations may read the client's own state files but must never
/// modify anything.
#[cfg_attr(test, mockall::automock)]
pub trait FolderLocator: Send + Sync {
    /// Return the absolute path of the client's local sync folder.
    ///
    /// # Errors
    ///
    /// Returns a [`LocatorError`] if the client is not installed or its
    /// state cannot be read.
    fn locate(&self) -> Result<PathBuf, LocatorError>;
}

/// The locators consulted by the resolver, one per cloud engine.
pub struct Locators {
    /// Locator for the Dropbox folder.
    pub dropbox: Box<dyn FolderLocator>,
    /// Locator for the Google Drive folder.
    pub google_drive: Box<dyn FolderLocator>,
}

impl Locators {
    /// Bundle two locators.
    #[must_use]
    pub fn new(
        dropbox: impl FolderLocator + 'static,
        google_drive: impl FolderLocator + 'static,
    ) -> Self {
        Self {
            dropbox: Box::new(dropbox),
            google_drive: Box::new(google_drive),
        }
    }

    /// Locators that probe the real client state under `home`.
    #[must_use]
    pub fn host(home: &Path, os: Os) -> Self {
        Self::new(DropboxLocator::new(home), GoogleDriveLocator::new(home, os))
    }
}

impl fmt::Debug for Locators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locators").finish_non_exhaustive()
    }
}

/// A locator that returns a preconfigured answer and counts its calls.
///
/// Clones share the same call counter, so a test can keep a handle after
/// moving the locator into [`Locators`].
#[derive(Debug, Clone)]
pub struct FixedLocator {
    answer: Result<PathBuf, &'static str>,
    call_count: Arc<AtomicUsize>,
}

impl FixedLocator {
    /// A locator that always finds `path`.
    #[must_use]
    pub fn found(path: impl Into<PathBuf>) -> Self {
        Self {
            answer: Ok(path.into()),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A locator that always reports `engine` as not installed.
    #[must_use]
    pub fn missing(engine: &'static str) -> Self {
        Self {
            answer: Err(engine),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of [`FolderLocator::locate`] calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl FolderLocator for FixedLocator {
    fn locate(&self) -> Result<PathBuf, LocatorError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Ok(path) => Ok(path.clone()),
            Err(engine) => Err(LocatorError::NotInstalled {
                engine: *engine,
                probed: Vec::new(),
            }),
        }
    }
}

/// Read a client state file, treating a missing file as `None`.
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>, LocatorError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(LocatorError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Reject relative folders and normalise Windows verbatim prefixes.
pub(crate) fn ensure_absolute(path: PathBuf) -> Result<PathBuf, LocatorError> {
    if path.is_absolute() {
        Ok(dunce::simplified(&path).to_path_buf())
    } else {
        Err(LocatorError::NotAbsolute(path))
    }
}
