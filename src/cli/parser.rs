use crate::core::session::SessionInput;
use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for billings
/// CLI application to log billable work sessions per client
#[derive(Parser)]
#[command(
    name = "billings",
    version = env!("CARGO_PKG_VERSION"),
    about = "Log billable work sessions per client in plain semicolon-separated ledgers",
    long_about = None
)]
pub struct Cli {
    /// Use another configuration file
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the directory holding the ledgers
    #[arg(global = true, long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Client to work on (defaults to the last used, then the configured default)
    #[arg(global = true, short = 'n', long = "client", value_name = "CLIENT")]
    pub client: Option<String>,

    /// Show debug diagnostics on stderr
    #[arg(global = true, short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Pin the current time (DD.MM.YYYY HH:MM), used by tests
    #[arg(global = true, long = "now", hide = true, value_name = "TIMESTAMP")]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Labels, projects and description of a session.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    #[arg(
        short = 'l',
        long = "labels",
        help = "Comma-separated labels (default: MISC)"
    )]
    pub labels: Option<String>,

    #[arg(
        short = 'p',
        long = "projects",
        help = "Comma-separated projects (default: MISC)"
    )]
    pub projects: Option<String>,

    #[arg(short = 'd', long = "description", help = "Free-text description")]
    pub description: Option<String>,
}

impl From<&SessionArgs> for SessionInput {
    fn from(args: &SessionArgs) -> Self {
        SessionInput {
            labels: args.labels.clone(),
            projects: args.projects.clone(),
            description: args.description.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and the ledger directory
    Init,

    /// Show, check or edit the configuration file
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Validate the configuration and list clients")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            requires = "edit_config",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Create an empty ledger for the client
    #[command(alias = "NEW")]
    New,

    /// Open a new billable session
    Start {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Close the open session, merging labels, projects and description
    End {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Pause the open session
    Pause,

    /// Resume a paused session; the paused time is not billed
    Unpause,

    /// Move the open session's start back, or the last session's end forward
    Reset {
        #[arg(
            short = 'm',
            long = "minutes",
            allow_negative_numbers = true,
            help = "Minutes to add (negative values shorten the session)"
        )]
        minutes: i64,
    },

    /// Verify stored minutes against start and end times
    Check,

    /// Print the client's ledger
    Print,

    /// Time distribution, billing and expected payout
    Report {
        #[arg(long = "all", help = "Report on every configured client")]
        all: bool,

        #[arg(long = "json", help = "Print the report as JSON")]
        json: bool,
    },

    /// Export the current and past ledgers of the client
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: PathBuf,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn new_accepts_upper_case_alias() {
        let cli = Cli::try_parse_from(["billings", "NEW"]).unwrap();
        assert!(matches!(cli.command, Commands::New));
    }

    #[test]
    fn reset_takes_negative_minutes() {
        let cli = Cli::try_parse_from(["billings", "reset", "-m", "-15"]).unwrap();
        assert!(matches!(cli.command, Commands::Reset { minutes: -15 }));
    }

    #[test]
    fn reset_requires_minutes() {
        assert!(Cli::try_parse_from(["billings", "reset"]).is_err());
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["billings", "end", "-d", "docs", "-n", "Acme"]).unwrap();
        assert_eq!(cli.client.as_deref(), Some("Acme"));
        match cli.command {
            Commands::End { session } => {
                assert_eq!(session.description.as_deref(), Some("docs"));
                assert!(session.labels.is_none());
            }
            _ => panic!("expected end"),
        }
    }
}
