//! CLI argument definitions for feedfix.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "feedfix",
    version,
    about = "Feed fixer - Normalize exported blog feeds and patch entry content",
    long_about = "Normalize an exported blog feed (Atom XML) into per-kind entry\n\
                  buckets and derive content patches for its published pages and\n\
                  posts. Normalization results are cached in a sidecar next to\n\
                  the export."
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
    /// Normalize a feed and build a content patch plan.
    Fix(FixArgs),

    /// Show the entry buckets of a normalized feed.
    Inspect(InspectArgs),

    /// Delete the cache sidecar for an export.
    ClearCache(ClearCacheArgs),
}

#[derive(Parser)]
pub struct FixArgs {
    /// Path to the exported XML file.
    #[arg(value_name = "XML")]
    pub xml: PathBuf,

    /// Substring to replace in entry bodies.
    #[arg(long = "from", value_name = "TEXT")]
    pub from: String,

    /// Replacement text.
    #[arg(long = "to", value_name = "TEXT")]
    pub to: String,

    /// Write the patch plan as JSON to this path.
    #[arg(long = "plan-out", value_name = "PATH")]
    pub plan_out: Option<PathBuf>,

    /// Ignore any cached feed and renormalize from the source file.
    #[arg(long = "refresh")]
    pub refresh: bool,

    /// Submit the plan through the dry-run client.
    ///
    /// No network client ships; submissions are logged and counted, not
    /// sent anywhere.
    #[arg(long = "apply")]
    pub apply: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Path to the exported XML file.
    #[arg(value_name = "XML")]
    pub xml: PathBuf,

    /// Ignore any cached feed and renormalize from the source file.
    #[arg(long = "refresh")]
    pub refresh: bool,
}

#[derive(Parser)]
pub struct ClearCacheArgs {
    /// Path to the exported XML file whose sidecar should be removed.
    #[arg(value_name = "XML")]
    pub xml: PathBuf,
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
