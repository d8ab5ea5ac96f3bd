//! Storage configuration: loading, validation and resolution.
pub mod engine;
pub mod legacy;
pub mod source;
pub mod storage;

use std::path::{Path, PathBuf};

pub use engine::Engine;
pub use source::Source;

use crate::error::ConfigError;
use crate::locator::Locators;

/// Section holding the storage settings.
pub const STORAGE_SECTION: &str = "storage";

/// Config file name, relative to the home directory.
pub const DEFAULT_CONFIG_FILE: &str = ".mackup.cfg";

/// Backup directory name created under the storage root.
pub const DEFAULT_DIRECTORY: &str = "Mackup";

/// Fallback values used when the user does not override them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    /// Config file name, relative to the home directory.
    pub config_file: String,
    /// Backup directory name when `storage.directory` is absent.
    pub directory: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            config_file: DEFAULT_CONFIG_FILE.to_string(),
            directory: DEFAULT_DIRECTORY.to_string(),
        }
    }
}

/// The validated storage configuration.
///
/// Only obtainable through a successful [`Resolver`] run and immutable
/// afterwards; [`full_path`](Self::full_path) is always derived from the
/// two stored parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    engine: Engine,
    path: PathBuf,
    directory: String,
}

impl ResolvedConfig {
    /// The active storage engine.
    #[must_use]
    pub const fn engine(&self) -> Engine {
        self.engine
    }

    /// Absolute storage root in which the backup directory lives.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the backup directory (`Mackup` by default).
    #[must_use]
    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// Full path of the backup directory: `path/directory`.
    #[must_use]
    pub fn full_path(&self) -> PathBuf {
        self.path.join(&self.directory)
    }
}

/// Runs the resolution pipeline: legacy check, engine, root path, directory.
#[derive(Debug)]
pub struct Resolver {
    home: PathBuf,
    defaults: Defaults,
    locators: Locators,
}

impl Resolver {
    /// Create a resolver for `home` with the standard defaults.
    #[must_use]
    pub fn new(home: impl Into<PathBuf>, locators: Locators) -> Self {
        Self {
            home: home.into(),
            defaults: Defaults::default(),
            locators,
        }
    }

    /// Replace the defaults.
    #[must_use]
    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Home directory used for the config file and `file_system` paths.
    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Location of the config file: `home/<filename>`, where an empty or
    /// absent `filename` means the default name.
    #[must_use]
    pub fn config_path(&self, filename: Option<&str>) -> PathBuf {
        let name = filename
            .filter(|f| !f.is_empty())
            .unwrap_or(&self.defaults.config_file);
        self.home.join(name)
    }

    /// Load the config file and resolve it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if
    /// [`resolve`](Self::resolve) fails.
    pub fn load(&self, filename: Option<&str>) -> Result<ResolvedConfig, ConfigError> {
        let path = self.config_path(filename);
        tracing::debug!("loading {}", path.display());
        let source = Source::load(&path)?;
        self.resolve(&source)
    }

    /// Resolve an already loaded source.
    ///
    /// Stages run in a fixed order and stop at the first failure, so a
    /// legacy file never reaches engine parsing and locators are only
    /// consulted once the engine is known.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LegacyConfigDetected`],
    /// [`ConfigError::UnknownEngine`], [`ConfigError::MissingRequiredPath`],
    /// [`ConfigError::AbsolutePath`],
    /// or [`ConfigError::Locator`].
    pub fn resolve(&self, source: &Source) -> Result<ResolvedConfig, ConfigError> {
        legacy::check(source)?;
        let engine = engine::resolve(source)?;
        let path = storage::resolve_root(engine, source, &self.home, &self.locators)?;
        let directory = storage::resolve_directory(source, &self.defaults.directory);
        tracing::debug!("engine {engine}, directory {directory}");
        Ok(ResolvedConfig {
            engine,
            path,
            directory,
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::locator::FixedLocator;

    fn resolver(home: &str) -> (Resolver, FixedLocator, FixedLocator) {
        let dropbox = FixedLocator::found("/cloud/Dropbox");
        let gdrive = FixedLocator::found("/cloud/Google Drive");
        let resolver = Resolver::new(home, Locators::new(dropbox.clone(), gdrive.clone()));
        (resolver, dropbox, gdrive)
    }

    fn parse(content: &str) -> Source {
        Source::parse(content, "test.cfg").expect("test data should parse")
    }

    #[test]
    fn empty_source_resolves_to_dropbox_defaults() {
        let (resolver, dropbox, gdrive) = resolver("/home/u");
        let config = resolver.resolve(&Source::default()).unwrap();
        assert_eq!(config.engine(), Engine::Dropbox);
        assert_eq!(config.path(), Path::new("/cloud/Dropbox"));
        assert_eq!(config.directory(), DEFAULT_DIRECTORY);
        assert_eq!(dropbox.call_count(), 1);
        assert_eq!(gdrive.call_count(), 0);
    }

    #[test]
    fn google_drive_engine() {
        let (resolver, dropbox, gdrive) = resolver("/home/u");
        let config = resolver
            .resolve(&parse("[storage]\nengine = google_drive\n"))
            .unwrap();
        assert_eq!(config.engine(), Engine::GoogleDrive);
        assert_eq!(config.path(), Path::new("/cloud/Google Drive"));
        assert_eq!(dropbox.call_count(), 0);
        assert_eq!(gdrive.call_count(), 1);
    }

    #[test]
    fn file_system_engine_never_consults_locators() {
        let (resolver, dropbox, gdrive) = resolver("/home/u");
        let config = resolver
            .resolve(&parse(
                "[storage]\nengine = file_system\npath = relative/dir\ndirectory = Dots\n",
            ))
            .unwrap();
        assert_eq!(config.path(), Path::new("/home/u/relative/dir"));
        assert_eq!(config.full_path(), PathBuf::from("/home/u/relative/dir/Dots"));
        assert_eq!(dropbox.call_count() + gdrive.call_count(), 0);
    }

    #[test]
    fn legacy_config_stops_before_locators() {
        let (resolver, dropbox, _) = resolver("/home/u");
        let err = resolver
            .resolve(&parse("[storage]\nengine = dropbox\n[Allowed Applications]\nvim\n"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::LegacyConfigDetected { .. }));
        assert_eq!(dropbox.call_count(), 0);
    }

    #[test]
    fn unknown_engine_stops_before_locators() {
        let (resolver, dropbox, gdrive) = resolver("/home/u");
        let err = resolver
            .resolve(&parse("[storage]\nengine = icloud\n"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEngine(_)));
        assert_eq!(dropbox.call_count() + gdrive.call_count(), 0);
    }

    #[test]
    fn missing_locator_fails_whole_resolution() {
        let resolver = Resolver::new(
            "/home/u",
            Locators::new(
                FixedLocator::missing("Dropbox"),
                FixedLocator::missing("Google Drive"),
            ),
        );
        let err = resolver.resolve(&Source::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Locator(_)));
    }

    #[test]
    fn custom_defaults_are_used() {
        let (resolver, _, _) = resolver("/home/u");
        let resolver = resolver.with_defaults(Defaults {
            config_file: "alt.cfg".to_string(),
            directory: "Backups".to_string(),
        });
        assert_eq!(resolver.config_path(None), PathBuf::from("/home/u/alt.cfg"));
        let config = resolver.resolve(&Source::default()).unwrap();
        assert_eq!(config.directory(), "Backups");
    }

    #[test]
    fn config_path_override_and_empty_override() {
        let (resolver, _, _) = resolver("/home/u");
        assert_eq!(
            resolver.config_path(Some("other.cfg")),
            PathBuf::from("/home/u/other.cfg")
        );
        assert_eq!(
            resolver.config_path(Some("")),
            PathBuf::from("/home/u/.mackup.cfg")
        );
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let home = tempfile::tempdir().expect("tempdir");
        let resolver = Resolver::new(
            home.path(),
            Locators::new(
                FixedLocator::found("/cloud/Dropbox"),
                FixedLocator::missing("Google Drive"),
            ),
        );
        let config = resolver.load(None).unwrap();
        assert_eq!(config.engine(), Engine::Dropbox);
        assert_eq!(config.full_path(), PathBuf::from("/cloud/Dropbox/Mackup"));
    }

    #[test]
    fn legacy_error_names_loaded_file() {
        let home = tempfile::tempdir().expect("tempdir");
        let cfg = home.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&cfg, "[Ignored Applications]\nssh\n").expect("write cfg");
        let (_, dropbox, gdrive) = resolver("/unused");
        let resolver = Resolver::new(home.path(), Locators::new(dropbox, gdrive));
        let err = resolver.load(None).unwrap_err();
        assert!(
            matches!(&err, ConfigError::LegacyConfigDetected { path } if *path == cfg),
            "got {err:?}"
        );
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn resolved_config_is_send_sync() {
        assert_send_sync::<ResolvedConfig>();
        assert_send_sync::<Resolver>();
    }
}
