//! Storage configuration resolution for mackup.
//!
//! Reads `~/.mackup.cfg` and works out where backups live: which storage
//! engine is active, the absolute storage root, and the name of the backup
//! directory inside it. A missing file is fine and yields the defaults
//! (Dropbox, `Mackup`); files in the retired allow/ignore schema are refused.
//!
//! The public API is organised into these layers:
//!
//! - **[`config`]**: parse the INI source and run the resolution pipeline
//! - **[`locator`]**: find the Dropbox and Google Drive folders on the host
//! - **[`commands`]**: `show`, `check`, and friends for the binary
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod locator;
pub mod logging;
pub mod platform;
