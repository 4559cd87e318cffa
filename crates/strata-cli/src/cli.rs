use clap::{Args, Parser, Subcommand, ValueEnum};
use strata_core::{FailureKind, Layer, StatusKind};

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Raw,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Copy, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
}

/// Top-level CLI parser for the `strata` binary.
#[derive(Debug, Parser)]
#[command(
    name = "strata",
    version,
    about = "Inspect layered result statuses and their process exit codes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (trace promotions and merges)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every failure kind with its messages and mapped error.
    Kinds,

    /// List the layers of the promotion chain.
    Layers,

    /// Print the exit code a status maps to under the loaded config.
    ExitCode {
        /// `success` or a failure kind such as `not_found`
        status: StatusKind,
    },

    /// Show the effective configuration.
    Config,

    /// Build a failure, promote it to a boundary layer, and report it.
    ///
    /// The process exits with the code the failure maps to.
    Explain(ExplainArgs),
}

#[derive(Debug, Args)]
pub struct ExplainArgs {
    /// Failure kind, e.g. `not_found`
    pub kind: FailureKind,

    /// Layer the failure originates in
    #[arg(long, default_value = "repository")]
    pub from: Layer,

    /// Layer the failure is promoted to
    #[arg(long, default_value = "web")]
    pub to: Layer,

    /// Message recorded with the failure
    #[arg(short, long)]
    pub message: Option<String>,

    /// Additional failures recorded after the first, as `kind` or `kind=message`
    #[arg(long = "also", value_name = "KIND[=MESSAGE]")]
    pub also: Vec<String>,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["strata", "--format", "json", "--verbose", "kinds"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Kinds));
    }

    #[test]
    fn exit_code_parses_success_and_failure_kinds() {
        let cli = Cli::try_parse_from(["strata", "exit-code", "success"]).expect("should parse");
        assert!(matches!(
            cli.command,
            Commands::ExitCode {
                status: StatusKind::Success
            }
        ));

        let cli = Cli::try_parse_from(["strata", "exit-code", "timed_out"]).expect("should parse");
        assert!(matches!(
            cli.command,
            Commands::ExitCode {
                status: StatusKind::Failed(FailureKind::TimedOut)
            }
        ));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(Cli::try_parse_from(["strata", "exit-code", "exploded"]).is_err());
        assert!(Cli::try_parse_from(["strata", "explain", "success"]).is_err());
    }

    #[test]
    fn explain_defaults_to_repository_into_web() {
        let cli = Cli::try_parse_from(["strata", "explain", "not_found", "-m", "user 7"])
            .expect("should parse");
        let Commands::Explain(args) = cli.command else {
            panic!("expected explain");
        };
        assert_eq!(args.kind, FailureKind::NotFound);
        assert_eq!(args.from, Layer::Repository);
        assert_eq!(args.to, Layer::Web);
        assert_eq!(args.message.as_deref(), Some("user 7"));
        assert!(args.also.is_empty());
    }
}
