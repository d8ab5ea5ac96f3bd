//! Command: validate the configuration without printing it.
use anyhow::Result;

use crate::cli::GlobalOpts;

/// Resolve the configuration and report success.
///
/// # Errors
///
/// Returns the resolution error, if any.
pub fn run(global: &GlobalOpts) -> Result<()> {
    let config = super::resolve(global)?;
    tracing::info!(
        "configuration OK ({} engine, backups in {})",
        config.engine(),
        config.full_path().display()
    );
    Ok(())
}
