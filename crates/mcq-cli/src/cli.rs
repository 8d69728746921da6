//! CLI argument definitions for the question checker.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mcq",
    version,
    about = "Check multiple-choice question files before import",
    long_about = "Check a multiple-choice question CSV file before importing it into a quiz.\n\n\
                  By default the question must have four options, exactly one worth 100 points,\n\
                  at least two worth 0 points, and at most two worth more than 50 points.\n\
                  Use --strict to also check the layout of every row."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate one question file.
    Check(CheckArgs),

    /// List every rule with its code.
    Rules,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to the question CSV file ("-" reads from stdin).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Also run the formatting checks.
    #[arg(long = "strict")]
    pub strict: bool,

    /// TOML file overriding rule thresholds, tags and formatting settings.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Result format.
    #[arg(long = "output", value_enum, default_value = "text")]
    pub output: OutputFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Text,
    Json,
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
