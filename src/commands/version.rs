//! Command: print version information.

/// The build version: `MACKUP_VERSION` from the build script, or the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("MACKUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the mackup version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("mackup {}", version());
}
