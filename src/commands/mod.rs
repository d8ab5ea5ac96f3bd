//! Subcommand implementations and their shared setup.

pub mod check;
pub mod completions;
pub mod show;
pub mod version;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::{ResolvedConfig, Resolver};
use crate::locator::Locators;
use crate::logging::STAGE_TARGET;
use crate::platform::{self, Os};

/// Build a resolver for the host: home directory from `--home` or the
/// environment, real cloud locators.
///
/// # Errors
///
/// Returns an error if no home directory can be determined or it cannot be
/// made absolute.
pub fn host_resolver(global: &GlobalOpts) -> Result<Resolver> {
    let home = match &global.home {
        Some(home) => home.clone(),
        None => platform::home_dir()?,
    };
    let home = platform::absolute(&home)?;
    let os = Os::detect();
    tracing::debug!("home {} on {os}", home.display());
    let locators = Locators::host(&home, os);
    Ok(Resolver::new(home, locators))
}

/// Load and resolve the configuration selected by the global options.
///
/// # Errors
///
/// Returns an error if the home directory is unknown or resolution fails.
pub fn resolve(global: &GlobalOpts) -> Result<ResolvedConfig> {
    let resolver = host_resolver(global)?;
    let path = resolver.config_path(global.config.as_deref());
    tracing::info!(target: STAGE_TARGET, "Resolving storage configuration");
    let config = resolver
        .load(global.config.as_deref())
        .with_context(|| format!("resolving {}", path.display()))?;
    tracing::debug!("backup directory: {}", config.full_path().display());
    Ok(config)
}
