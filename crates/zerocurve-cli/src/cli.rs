//! CLI argument definitions.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{AnalyzeArgs, BootstrapArgs, CompareArgs, YieldArgs};

/// Zerocurve - Zero-coupon curve bootstrapping and interpolation
#[derive(Parser)]
#[command(name = "zerocurve")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Bootstrap a zero curve from market instruments
    Bootstrap(BootstrapArgs),

    /// Zero rate, discount factor, forward, slope and convexity at tenors
    Analyze(AnalyzeArgs),

    /// Compare zero rates across all interpolation methods
    Compare(CompareArgs),

    /// Calculate a bond's yield to maturity from its price
    Yield(YieldArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the values)
    Minimal,
}
