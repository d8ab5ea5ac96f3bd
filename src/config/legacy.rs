//! Detection of the retired per-application configuration schema.
use super::source::Source;
use crate::error::ConfigError;

/// Sections used by the old allow/ignore list format.
pub const LEGACY_SECTIONS: &[&str] = &["Allowed Applications", "Ignored Applications"];

/// Refuse to go any further if `source` still uses the old schema.
///
/// # Errors
///
/// Returns [`ConfigError::LegacyConfigDetected`] if any of
/// [`LEGACY_SECTIONS`] is present.
pub fn check(source: &Source) -> Result<(), ConfigError> {
    if let Some(section) = LEGACY_SECTIONS.iter().find(|s| source.has_section(s)) {
        tracing::debug!("found legacy section [{section}]");
        return Err(ConfigError::LegacyConfigDetected {
            path: source.origin().to_path_buf(),
        });
    }
    Ok(())
}
