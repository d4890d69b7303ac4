//! Command-line interface definition.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Scan media files for manipulation indicators.
#[derive(Debug, Parser)]
#[command(name = "verificador", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze media files and report threat levels
    Scan(ScanArgs),
    /// Print a scoring policy's constants as JSON
    Policy(PolicyArgs),
}

/// Arguments for `verificador scan`.
#[derive(Debug, clap::Args)]
pub struct ScanArgs {
    /// Files to analyze (images or videos)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Scoring policy tuning
    #[arg(long, default_value = "balanced")]
    pub policy: String,

    /// Frames sampled per video
    #[arg(long, default_value_t = verdadero::DEFAULT_FRAME_COUNT)]
    pub frames: usize,

    /// Seed the score perturbation for reproducible runs
    #[arg(long, conflicts_with = "no_jitter")]
    pub seed: Option<u64>,

    /// Disable the score perturbation entirely
    #[arg(long)]
    pub no_jitter: bool,

    /// Emit results as a JSON list instead of the table
    #[arg(long)]
    pub json: bool,

    /// Also write the JSON result list to a file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for `verificador policy`.
#[derive(Debug, clap::Args)]
pub struct PolicyArgs {
    /// Policy name; omit to list all tunings
    pub name: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_defaults() {
        let cli = Cli::try_parse_from(["verificador", "scan", "a.jpg"]).unwrap();
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.policy, "balanced");
                assert_eq!(args.frames, verdadero::DEFAULT_FRAME_COUNT);
                assert!(!args.no_jitter);
                assert!(args.seed.is_none());
            }
            Commands::Policy(_) => panic!("expected scan"),
        }
    }

    #[test]
    fn test_scan_requires_paths() {
        assert!(Cli::try_parse_from(["verificador", "scan"]).is_err());
    }

    #[test]
    fn test_seed_conflicts_with_no_jitter() {
        let result =
            Cli::try_parse_from(["verificador", "scan", "a.jpg", "--seed", "1", "--no-jitter"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_policy_optional_name() {
        let cli = Cli::try_parse_from(["verificador", "policy"]).unwrap();
        match cli.command {
            Commands::Policy(args) => assert!(args.name.is_none()),
            Commands::Scan(_) => panic!("expected policy"),
        }
    }
}
