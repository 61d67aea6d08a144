//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use dedup_model::Field;

#[derive(Parser)]
#[command(
    name = "dedup",
    version,
    about = "Filter a contact batch against a blacklist and a contact history",
    long_about = "Filter a contact batch (reparto) against a blacklist (lista negra) \
                  and the history of already-contacted people (deduplicador).\n\n\
                  Sources may be CSV or spreadsheet files. Survivors are written in \
                  the dialer import layout, one sequence number per row."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow contact values (links, names, phones) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the dedup pipeline over three source files.
    Run(RunArgs),

    /// List canonical fields, accepted header aliases and output columns.
    Fields,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Contact batch to filter (reparto).
    #[arg(value_name = "BATCH")]
    pub batch: PathBuf,

    /// Contacts that must never be called (lista negra).
    #[arg(value_name = "BLACKLIST")]
    pub blacklist: PathBuf,

    /// Contacts already reached in earlier runs (deduplicador).
    #[arg(value_name = "HISTORY")]
    pub history: PathBuf,

    /// Output file, .xlsx or .csv (default: contactos_reparto_final.xlsx next to BATCH).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write the batch as it stands after the blacklist stage.
    #[arg(long = "intermediate", value_name = "PATH")]
    pub intermediate: Option<PathBuf>,

    /// TOML config file. Command-line flags take precedence over it.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only require the link column; pass unknown columns through.
    #[arg(long = "lenient", conflicts_with = "strict")]
    pub lenient: bool,

    /// Require all five canonical columns, even if the config file is lenient.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Field compared by the exclusion stages (repeatable).
    #[arg(long = "key-field", value_name = "FIELD")]
    pub key_fields: Vec<Field>,

    /// Date for sequence numbers and the batch label, YYYY-MM-DD (default: today).
    #[arg(long = "run-date", value_name = "DATE")]
    pub run_date: Option<String>,

    /// Rows shown per preview table; 0 disables previews.
    #[arg(long = "preview", value_name = "N", default_value_t = 10)]
    pub preview: usize,

    /// Write the run metrics as JSON.
    #[arg(long = "metrics-json", value_name = "PATH")]
    pub metrics_json: Option<PathBuf>,

    /// Run and report without writing any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
