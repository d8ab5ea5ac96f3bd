// Shared helpers for integration tests.
//
// Provides a temporary home directory and a fluent builder so each
// integration test can set up an isolated config file and cloud client
// state without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use mackup_cli::config::{DEFAULT_CONFIG_FILE, Resolver};
use mackup_cli::locator::{FixedLocator, Locators};
use mackup_cli::platform::Os;

/// Folder returned by the fixed Dropbox locator.
pub const FIXED_DROPBOX: &str = "/cloud/Dropbox";

/// Folder returned by the fixed Google Drive locator.
pub const FIXED_GOOGLE_DRIVE: &str = "/cloud/Google Drive";

/// An isolated home directory backed by a [`tempfile::TempDir`].
pub struct HomeFixture {
    /// Temporary directory acting as `$HOME`.
    pub home: tempfile::TempDir,
}

impl HomeFixture {
    /// Create an empty home directory (no config file).
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temp home"),
        }
    }

    /// Path to the home directory.
    pub fn path(&self) -> &Path {
        self.home.path()
    }

    /// Path of the default config file.
    pub fn config_path(&self) -> PathBuf {
        self.home.path().join(DEFAULT_CONFIG_FILE)
    }

    /// Resolver whose cloud locators return fixed folders.
    pub fn fixed_resolver(&self) -> (Resolver, FixedLocator, FixedLocator) {
        let dropbox = FixedLocator::found(FIXED_DROPBOX);
        let gdrive = FixedLocator::found(FIXED_GOOGLE_DRIVE);
        let resolver = Resolver::new(
            self.home.path(),
            Locators::new(dropbox.clone(), gdrive.clone()),
        );
        (resolver, dropbox, gdrive)
    }

    /// Resolver that probes the cloud client state inside this home.
    pub fn host_resolver(&self, os: Os) -> Resolver {
        Resolver::new(self.home.path(), Locators::host(self.home.path(), os))
    }
}

/// Fluent builder for [`HomeFixture`].
pub struct HomeBuilder {
    fixture: HomeFixture,
}

impl HomeBuilder {
    /// Begin building a new, empty home directory.
    pub fn new() -> Self {
        Self {
            fixture: HomeFixture::new(),
        }
    }

    /// Write `content` to `~/.mackup.cfg`.
    pub fn with_config(self, content: &str) -> Self {
        std::fs::write(self.fixture.config_path(), content).expect("write config file");
        self
    }

    /// Write `content` to `~/<name>`.
    pub fn with_file(self, name: &str, content: &str) -> Self {
        let path = self.fixture.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(path, content).expect("write file");
        self
    }

    /// Create the directory `~/<name>`.
    pub fn with_dir(self, name: &str) -> Self {
        std::fs::create_dir_all(self.fixture.path().join(name)).expect("create dir");
        self
    }

    /// Write a Dropbox `info.json` whose personal account lives at `folder`.
    pub fn with_dropbox_at(self, folder: &Path) -> Self {
        let json = serde_json::json!({ "personal": { "path": folder } });
        self.with_file(".dropbox/info.json", &json.to_string())
    }

    /// Write a Drive client `sync_config.db` whose sync root is `folder`.
    pub fn with_drive_db_at(self, folder: &Path) -> Self {
        let db = self
            .fixture
            .path()
            .join("Library/Application Support/Google/Drive/sync_config.db");
        std::fs::create_dir_all(db.parent().expect("db parent")).expect("create db dir");
        let conn = rusqlite::Connection::open(&db).expect("create db");
        conn.execute_batch("CREATE TABLE data (entry_key TEXT, data_value TEXT);")
            .expect("create table");
        conn.execute(
            "INSERT INTO data VALUES ('local_sync_root_path', ?1)",
            [folder.to_string_lossy()],
        )
        .expect("insert root");
        self
    }

    /// Finish building and return the fixture.
    pub fn build(self) -> HomeFixture {
        self.fixture
    }
}
