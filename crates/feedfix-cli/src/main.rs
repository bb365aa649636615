//! Feed fixer CLI.

use clap::{ColorChoice, Parser};
use feedfix_cache::CacheError;
use feedfix_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_clear_cache, run_fix, run_inspect};
use crate::summary::{print_clear_cache_summary, print_fix_summary, print_inspect_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Fix(args) => match run_fix(&args) {
            Ok(result) => {
                print_fix_summary(&result);
                0
            }
            Err(error) => {
                report_error(&error);
                1
            }
        },
        Command::Inspect(args) => match run_inspect(&args) {
            Ok(result) => {
                print_inspect_summary(&result);
                0
            }
            Err(error) => {
                report_error(&error);
                1
            }
        },
        Command::ClearCache(args) => match run_clear_cache(&args) {
            Ok(result) => {
                print_clear_cache_summary(&result);
                0
            }
            Err(error) => {
                report_error(&error);
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Print an error chain, with a remediation hint for cache failures.
fn report_error(error: &anyhow::Error) {
    match error.root_cause().downcast_ref::<CacheError>() {
        Some(cache_error) => {
            eprintln!("error: {}", cache_error.user_message());
            if let Some(hint) = cache_error.suggestion() {
                eprintln!("hint: {hint}");
            }
        }
        None => eprintln!("error: {error:#}"),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
