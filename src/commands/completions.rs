//! Command: generate shell completions.
use clap::CommandFactory as _;

use crate::cli::{Cli, CompletionsOpts};

/// Write completions for the requested shell to stdout.
pub fn run(opts: &CompletionsOpts) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(opts.shell, &mut cmd, name, &mut std::io::stdout());
}
