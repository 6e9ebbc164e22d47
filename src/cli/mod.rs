//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Investing.com portfolio tracker")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// Log level (overrides the configured default)
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

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and select a portfolio to track
    Login(LoginArgs),
    /// List the account's portfolios
    Portfolios(PortfoliosArgs),
    /// Fetch the current portfolio summary once
    Fetch,
    /// Poll on the configured schedule and print updates
    Watch,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted)
    #[arg(short, long)]
    pub email: Option<String>,

    /// Portfolio id to track (interactive selection when omitted)
    #[arg(short, long)]
    pub portfolio_id: Option<i64>,
}

#[derive(clap::Args)]
pub struct PortfoliosArgs {
    /// Include watchlists as well as position portfolios
    #[arg(long)]
    pub all: bool,
}
