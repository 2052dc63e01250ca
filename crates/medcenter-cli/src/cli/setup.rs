use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "medcenter", bin_name = "medcenter", version)]
#[command(about = "Clinic appointment records: list, look up and validate", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (TOML)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Load appointments from a JSON array instead of the sample data
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help_heading = "Options"
    )]
    pub output: OutputFormat,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List appointments, newest first
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Number of appointments to skip
        #[arg(long, default_value_t = 0)]
        skip: usize,

        /// Page length (defaults to the configured page size)
        #[arg(long)]
        top: Option<usize>,

        /// Author name fragment, case-insensitive
        #[arg(short, long)]
        author: Option<String>,

        /// Exact status
        #[arg(short, long)]
        status: Option<String>,

        /// Exact specialization
        #[arg(long)]
        specialization: Option<String>,

        /// Visit window start (RFC 3339); only applied together with --to
        #[arg(long, value_name = "DATETIME")]
        from: Option<DateTime<Utc>>,

        /// Visit window end (RFC 3339); only applied together with --from
        #[arg(long, value_name = "DATETIME")]
        to: Option<DateTime<Utc>>,
    },

    /// Show a single appointment
    #[command(display_order = 2)]
    Get {
        /// Appointment id
        id: String,
    },

    /// Check appointment records in a JSON file (object or array)
    #[command(display_order = 3)]
    Validate {
        /// File to check
        file: PathBuf,
    },

    /// Walk through every store operation on the sample data
    #[command(display_order = 4)]
    Demo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_list_filters() {
        let cli = Cli::try_parse_from([
            "medcenter",
            "list",
            "--top",
            "5",
            "--status",
            "Завершен",
            "--from",
            "2025-11-01T00:00:00Z",
            "--output",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Commands::List {
                top, status, from, to, ..
            } => {
                assert_eq!(top, Some(5));
                assert_eq!(status.as_deref(), Some("Завершен"));
                assert!(from.is_some());
                assert!(to.is_none());
            }
            other => panic!("Expected List, got {:?}", other),
        }
    }

    #[test]
    fn rejects_bad_datetime() {
        assert!(Cli::try_parse_from(["medcenter", "list", "--from", "yesterday"]).is_err());
    }
}
