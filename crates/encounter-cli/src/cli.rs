//! CLI argument definitions for the encounter processor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use encounter_cli::logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "encounter-cli",
    version,
    about = "Patient Encounter Data Processor - reshape form responses into encounter rows",
    long_about = "Convert raw form-response exports into one row per patient encounter.\n\n\
                  Assigns sequential patient numbers, derives gender, weight, BMI, height and\n\
                  medication-change flags, and computes days between encounters."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log verbosity: warn by default, -v info, -vv debug, -q errors only.
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Colored terminal output.
    #[command(flatten)]
    pub color: Color,

    /// Log level; takes precedence over -v/-q.
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log line format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Append logs to this file rather than stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient identifiers to appear in trace logs.
    ///
    /// Identifiers are redacted by default.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Process a form-response export (.csv or .xlsx) into encounter rows.
    Process(ProcessArgs),

    /// List the question texts used to derive each field.
    Questions(QuestionsArgs),
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Path to the raw form-response export (.csv or .xlsx).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV path (default: <INPUT dir>/filtered_encounter_data.csv).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// JSON file overriding the question texts per field.
    #[arg(long = "question-map", value_name = "PATH")]
    pub question_map: Option<PathBuf>,

    /// Number of encounter rows to print (0 disables the preview).
    #[arg(long = "preview", value_name = "ROWS", default_value_t = 20)]
    pub preview: usize,

    /// Process and report without writing the output CSV.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct QuestionsArgs {
    /// JSON file overriding the question texts per field.
    #[arg(long = "question-map", value_name = "PATH")]
    pub question_map: Option<PathBuf>,
}

/// Values accepted by `--log-level`.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Values accepted by `--log-format`.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
