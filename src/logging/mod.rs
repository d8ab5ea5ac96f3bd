//! Console logging built on [`tracing`].
//!
//! Library code emits plain `tracing` events; stage headers use the
//! [`STAGE_TARGET`] target so the console formatter can render them as
//! `==>` lines.

mod subscriber;

pub use subscriber::init_subscriber;

/// Event target for stage headers.
pub const STAGE_TARGET: &str = "mackup::stage";
