//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Dossier CLI - Turn identity documents into reviewed client records.
#[derive(Debug, Parser)]
#[command(name = "dossier")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DOSSIER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log pipeline progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (record ID only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read a document photo and reconcile it against a registry
    Reconcile(ReconcileArgs),

    /// Reconcile already extracted fields (JSON) against a registry
    Check(CheckArgs),

    /// Compare two strings the way the duplicate matcher does
    Similarity(SimilarityArgs),

    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

/// Arguments for the reconcile command.
#[derive(Debug, Parser)]
pub struct ReconcileArgs {
    /// Document image
    pub document: PathBuf,

    /// MIME type (guessed from the file extension if omitted)
    #[arg(short, long)]
    pub mime: Option<String>,

    /// Registry snapshot (JSON array of existing records)
    #[arg(short, long)]
    pub registry: Option<PathBuf>,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Extracted fields (JSON object)
    pub fields: PathBuf,

    /// Registry snapshot (JSON array of existing records)
    #[arg(short, long)]
    pub registry: Option<PathBuf>,

    /// Skip the category suggestion model
    #[arg(long)]
    pub offline: bool,
}

/// Arguments for the similarity command.
#[derive(Debug, Parser)]
pub struct SimilarityArgs {
    /// First string
    pub a: String,

    /// Second string
    pub b: String,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_command() {
        let cli = Cli::parse_from([
            "dossier",
            "reconcile",
            "id.jpg",
            "--registry",
            "clients.json",
        ]);
        match cli.command {
            Command::Reconcile(args) => {
                assert_eq!(args.document, PathBuf::from("id.jpg"));
                assert_eq!(args.registry, Some(PathBuf::from("clients.json")));
                assert!(args.mime.is_none());
            }
            _ => panic!("Expected Reconcile command"),
        }
    }

    #[test]
    fn test_check_command_with_global_flags() {
        let cli = Cli::parse_from(["dossier", "check", "fields.json", "--offline", "-f", "json"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Check(args) => assert!(args.offline),
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_similarity_command() {
        let cli = Cli::parse_from(["dossier", "similarity", "Ana", "Anna"]);
        assert!(matches!(cli.command, Command::Similarity(_)));
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["dossier"]).is_err());
    }

    #[test]
    fn test_format_conversion() {
        let format: crate::config::OutputFormat = CliFormat::Quiet.into();
        assert_eq!(format, crate::config::OutputFormat::Quiet);
    }
}
