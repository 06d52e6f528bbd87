//! Zerocurve CLI - Command-line interface for zero-coupon curve construction.
//!
//! # Usage
//!
//! ```bash
//! # Bootstrap a curve from an instrument file
//! zerocurve bootstrap --file instruments.csv --interpolation hagan-west
//!
//! # Zero, discount factor, forward, slope and convexity at chosen tenors
//! zerocurve analyze --file instruments.csv --tenors 1,2,5,10,30
//!
//! # All four interpolators side by side
//! zerocurve compare --file instruments.csv --ufr 4.2 --lambda 0.1
//!
//! # Yield of a bond from its price
//! zerocurve yield --coupon 4.0 --maturity 10 --price 99.25
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod input;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let format = cli.format;

    match cli.command {
        Commands::Bootstrap(args) => commands::bootstrap::execute(args, format)?,
        Commands::Analyze(args) => commands::analyze::execute(args, format)?,
        Commands::Compare(args) => commands::compare::execute(args, format)?,
        Commands::Yield(args) => commands::ytm::execute(&args, format)?,
    }

    Ok(())
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
