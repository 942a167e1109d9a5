use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use archivum::config::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "archivum", version, about = "Validate archive record files")]
pub struct Cli {
    /// Config file (defaults to $ARCHIVUM_CONFIG, then the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormatArg>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate record files or directories of them ("-" reads stdin)
    Validate {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Treat undeclared fields as violations
        #[arg(long)]
        reject_unknown: bool,

        /// Check enrichment presence against the processing status
        #[arg(long)]
        status_coherence: bool,

        /// Number of worker threads (overrides config)
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Print the archive record JSON Schema
    Schema,
    /// Check whether a processing status transition is permitted
    Transition { from: String, to: String },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
