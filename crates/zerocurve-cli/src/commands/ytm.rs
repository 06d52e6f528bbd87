//! Yield command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use zerocurve_curves::yield_solver::{YieldSolver, DEFAULT_YIELD_BRACKET};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_header, print_json, print_rows, print_table, KeyValue};

/// Arguments for the yield command.
#[derive(Args, Debug)]
pub struct YieldArgs {
    /// Annual coupon rate in percent (0 for a zero-coupon bond)
    #[arg(short, long, default_value_t = 0.0)]
    pub coupon: f64,

    /// Time to maturity in years
    #[arg(short, long)]
    pub maturity: f64,

    /// Clean price in percent of face (e.g., 99.25)
    #[arg(short, long)]
    pub price: f64,

    /// Lower end of the yield search interval in percent
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_YIELD_BRACKET.0 * 100.0)]
    pub min_yield: f64,

    /// Upper end of the yield search interval in percent
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_YIELD_BRACKET.1 * 100.0)]
    pub max_yield: f64,
}

#[derive(Debug, Serialize, tabled::Tabled)]
struct YieldRow {
    coupon_pct: f64,
    maturity_years: f64,
    price_pct: f64,
    yield_rate: f64,
}

/// Execute the yield command.
pub fn execute(args: &YieldArgs, format: OutputFormat) -> Result<()> {
    if args.min_yield >= args.max_yield {
        return Err(CliError::InvalidArgument(format!(
            "--min-yield ({}) must be below --max-yield ({})",
            args.min_yield, args.max_yield
        ))
        .into());
    }

    let solver = YieldSolver::new().with_bracket(args.min_yield / 100.0, args.max_yield / 100.0);
    let y = solver.solve(args.coupon, args.maturity, args.price)?;

    tracing::info!(
        coupon = args.coupon,
        maturity = args.maturity,
        price = args.price,
        yield_rate = y,
        "solved yield"
    );

    let row = YieldRow {
        coupon_pct: args.coupon,
        maturity_years: args.maturity,
        price_pct: args.price,
        yield_rate: y,
    };

    match format {
        OutputFormat::Table => {
            print_header("Yield to Maturity");
            print_table(&[
                KeyValue::new("Coupon", format!("{:.3}%", args.coupon)),
                KeyValue::new("Maturity", format!("{:.2}Y", args.maturity)),
                KeyValue::new("Price", format!("{:.4}", args.price)),
                KeyValue::new("Yield", format!("{:.6}%", y * 100.0)),
            ])?;
        }
        OutputFormat::Json => print_json(&row)?,
        OutputFormat::Csv => print_rows(&[row], format)?,
        OutputFormat::Minimal => println!("{y:.10}"),
    }

    Ok(())
}
