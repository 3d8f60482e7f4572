//! CLI argument definitions for `hxmap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "hxmap",
    version,
    about = "Map heat exchanger CSV headers onto the canonical reading schema",
    long_about = "Map heat exchanger CSV headers onto the canonical reading schema.\n\n\
                  Suggests a column for each canonical field by fuzzy alias matching,\n\
                  reports missing required fields, projects rows into readings,\n\
                  and summarizes exchanger performance."
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

    /// Log output format (pretty for human, json for machine parsing).
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

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the emitting module in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Suggest a mapping for the header row of a CSV file.
    Map(MapArgs),

    /// Score the similarity of two header strings.
    Score(ScoreArgs),

    /// List canonical fields and their aliases.
    Fields(FieldsArgs),

    /// Map a CSV file and write its rows as readings (JSON or CSV).
    Project(ProjectArgs),

    /// Map a CSV file and report performance metrics, insights and a fouling forecast.
    Metrics(MetricsArgs),
}

#[derive(Parser)]
pub struct MappingArgs {
    /// JSON alias table replacing the built-in dictionary.
    #[arg(long = "aliases", value_name = "FILE")]
    pub aliases: Option<PathBuf>,

    /// Manual correction applied after auto-mapping, as COLUMN=FIELD.
    ///
    /// An empty FIELD clears every mapping of the column. May be repeated;
    /// corrections apply in order.
    #[arg(long = "assign", value_name = "COLUMN=FIELD")]
    pub assign: Vec<String>,
}

#[derive(Parser)]
pub struct MapArgs {
    /// CSV file whose first non-blank row holds the headers.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    #[command(flatten)]
    pub mapping: MappingArgs,

    /// Print the mapping report as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ScoreArgs {
    /// First header string.
    pub left: String,

    /// Second header string.
    pub right: String,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// JSON alias table replacing the built-in dictionary.
    #[arg(long = "aliases", value_name = "FILE")]
    pub aliases: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ProjectArgs {
    /// CSV file to project.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    #[command(flatten)]
    pub mapping: MappingArgs,

    /// Output file for the readings (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format for the readings.
    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: OutputFormatArg,

    /// Timestamp for rows without one (default: current UTC time).
    #[arg(long = "fallback-timestamp", value_name = "TIMESTAMP")]
    pub fallback_timestamp: Option<String>,
}

#[derive(Parser)]
pub struct MetricsArgs {
    /// CSV file to analyze.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    #[command(flatten)]
    pub mapping: MappingArgs,

    /// Print the analysis as JSON.
    #[arg(long = "json")]
    pub json: bool,

    /// Timestamp for rows without one (default: current UTC time).
    #[arg(long = "fallback-timestamp", value_name = "TIMESTAMP")]
    pub fallback_timestamp: Option<String>,
}

/// Output formats for projected readings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Pretty-printed JSON array of readings.
    #[default]
    Json,
    /// CSV with one column per canonical field.
    Csv,
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
