//! `mackup` binary entry point.
use anyhow::Result;
use clap::Parser;

use mackup_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);

    match args.command {
        cli::Command::Show(opts) => commands::show::run(&args.global, &opts),
        cli::Command::Check => commands::check::run(&args.global),
        cli::Command::Completions(opts) => {
            commands::completions::run(&opts);
            Ok(())
        }
        cli::Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
