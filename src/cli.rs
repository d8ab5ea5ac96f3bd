//! Command-line interface definition.
use clap::{Parser, Subcommand};

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "mackup",
    about = "Resolve where mackup stores your application settings",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Config file name, relative to the home directory (default: .mackup.cfg)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<String>,

    /// Override the home directory (default: $HOME)
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved storage configuration
    Show(ShowOpts),
    /// Validate the configuration file
    Check,
    /// Generate shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

/// Options for the `show` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ShowOpts {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_show() {
        let cli = Cli::parse_from(["mackup", "show"]);
        assert!(matches!(cli.command, Command::Show(ShowOpts { json: false })));
    }

    #[test]
    fn parse_show_json() {
        let cli = Cli::parse_from(["mackup", "show", "--json"]);
        assert!(matches!(cli.command, Command::Show(ShowOpts { json: true })));
    }

    #[test]
    fn parse_check() {
        let cli = Cli::parse_from(["mackup", "check"]);
        assert!(matches!(cli.command, Command::Check));
    }

    #[test]
    fn parse_config_override() {
        let cli = Cli::parse_from(["mackup", "--config", "alt.cfg", "show"]);
        assert_eq!(cli.global.config, Some("alt.cfg".to_string()));
    }

    #[test]
    fn parse_config_override_short_after_subcommand() {
        let cli = Cli::parse_from(["mackup", "check", "-c", "alt.cfg"]);
        assert_eq!(cli.global.config, Some("alt.cfg".to_string()));
    }

    #[test]
    fn parse_home_override() {
        let cli = Cli::parse_from(["mackup", "--home", "/tmp/home", "show"]);
        assert_eq!(
            cli.global.home,
            Some(std::path::PathBuf::from("/tmp/home"))
        );
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["mackup", "-v", "check"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["mackup", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Command::Completions(CompletionsOpts {
                shell: clap_complete::Shell::Bash
            })
        ));
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["mackup", "version"]);
        assert!(matches!(cli.command, Command::Version));
    }
}
