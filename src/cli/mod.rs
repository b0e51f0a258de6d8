//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xau-signal")]
#[command(author, version, about = "XAU/USD signal fusion monitor")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides logging.level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single refresh cycle and print the report
    Once(OnceArgs),
    /// Refresh periodically and print each report
    Run(RunArgs),
    /// Refresh periodically behind a terminal dashboard
    Watch(SourceArgs),
    /// Validate configuration
    ValidateConfig,
}

/// Offline replacements for the network feeds.
#[derive(clap::Args, Default)]
pub struct SourceArgs {
    /// Price bars from a CSV file instead of TwelveData
    #[arg(long)]
    pub prices: Option<PathBuf>,

    /// News from a JSON file instead of NewsAPI
    #[arg(long)]
    pub news: Option<PathBuf>,

    /// Channel messages from a text file (one per line, newest first)
    #[arg(long)]
    pub messages: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct OnceArgs {
    /// Output format (text, json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[command(flatten)]
    pub sources: SourceArgs,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Stop after this many cycles
    #[arg(long)]
    pub cycles: Option<usize>,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[command(flatten)]
    pub sources: SourceArgs,
}
