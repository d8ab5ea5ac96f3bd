//! Storage root path and backup directory name resolution.
use std::path::{Path, PathBuf};

use super::STORAGE_SECTION;
use super::engine::Engine;
use super::source::Source;
use crate::error::ConfigError;
use crate::locator::Locators;
use crate::platform;

/// Compute the absolute storage root for `engine`.
///
/// Cloud engines ask their locator and use the answer verbatim. The
/// `file_system` engine joins `storage.path` under `home`, so an absolute
/// `storage.path` is used as-is; a relative result is made absolute against
/// the current directory.
///
/// # Errors
///
/// Returns [`ConfigError::MissingRequiredPath`] if the `file_system` engine
/// has no `storage.path` value, [`ConfigError::AbsolutePath`] if the joined
/// path cannot be made absolute, or [`ConfigError::Locator`] if a cloud
/// locator fails.
pub fn resolve_root(
    engine: Engine,
    source: &Source,
    home: &Path,
    locators: &Locators,
) -> Result<PathBuf, ConfigError> {
    let root = match engine {
        Engine::Dropbox => locators.dropbox.locate()?,
        Engine::GoogleDrive => locators.google_drive.locate()?,
        Engine::FileSystem => {
            let path = source
                .get(STORAGE_SECTION, "path")
                .ok_or(ConfigError::MissingRequiredPath)?;
            platform::absolute(&home.join(path))?
        }
    };
    tracing::debug!("{} storage root: {}", engine.label(), root.display());
    Ok(root)
}

/// Name of the backup directory: `storage.directory`, or `default`.
#[must_use]
pub fn resolve_directory(source: &Source, default: &str) -> String {
    source
        .get(STORAGE_SECTION, "directory")
        .unwrap_or(default)
        .to_string()
}
