//! Command: print the resolved storage configuration.
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::{GlobalOpts, ShowOpts};
use crate::config::{Engine, ResolvedConfig};

/// Serializable snapshot of a [`ResolvedConfig`].
#[derive(Debug, Serialize)]
pub struct Report {
    /// Active engine identifier.
    pub engine: Engine,
    /// Storage root.
    pub path: PathBuf,
    /// Backup directory name.
    pub directory: String,
    /// `path/directory`.
    pub full_path: PathBuf,
}

impl From<&ResolvedConfig> for Report {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            engine: config.engine(),
            path: config.path().to_path_buf(),
            directory: config.directory().to_string(),
            full_path: config.full_path(),
        }
    }
}

/// Render `config` as aligned `key: value` lines.
#[must_use]
pub fn render_text(config: &ResolvedConfig) -> String {
    let mut out = String::new();
    let rows = [
        ("engine", config.engine().to_string()),
        ("path", config.path().display().to_string()),
        ("directory", config.directory().to_string()),
        ("full path", config.full_path().display().to_string()),
    ];
    for (key, value) in rows {
        let _ = writeln!(out, "{key:<10} {value}");
    }
    out
}

/// Render `config` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(config: &ResolvedConfig) -> Result<String> {
    serde_json::to_string_pretty(&Report::from(config)).context("serializing configuration")
}

/// Resolve the configuration and print it to stdout.
///
/// # Errors
///
/// Returns an error if resolution fails or stdout cannot be written.
pub fn run(global: &GlobalOpts, opts: &ShowOpts) -> Result<()> {
    let config = super::resolve(global)?;
    let rendered = if opts.json {
        let mut json = render_json(&config)?;
        json.push('\n');
        json
    } else {
        render_text(&config)
    };
    std::io::stdout()
        .write_all(rendered.as_bytes())
        .context("writing to stdout")
}
