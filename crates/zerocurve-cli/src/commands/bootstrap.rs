//! Bootstrap command implementation.
//!
//! Bootstraps a zero curve from an instrument file and samples it.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use zerocurve_curves::bootstrap::SequentialBootstrapper;
use zerocurve_curves::repricing::BootstrapResult;

use crate::cli::OutputFormat;
use crate::commands::{parse_tenors, resolve_method, InputArgs, MethodChoice, SmithWilsonArgs};
use crate::output::{
    bps, discount, percent, print_header, print_json, print_rows, print_status, print_table,
    tenor, KeyValue,
};

/// Arguments for the bootstrap command.
#[derive(Args, Debug)]
pub struct BootstrapArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Interpolation method (overrides the config file)
    #[arg(short = 'm', long, value_enum)]
    pub interpolation: Option<MethodChoice>,

    #[command(flatten)]
    pub smith_wilson: SmithWilsonArgs,

    /// Tenors to sample in years (comma-separated, e.g., "1,2,5,10")
    #[arg(short, long)]
    pub tenors: Option<String>,

    /// Show repricing of every input instrument
    #[arg(long)]
    pub show_residuals: bool,
}

/// A solved pillar.
#[derive(Debug, Serialize, Tabled)]
struct PillarRow {
    #[tabled(rename = "Maturity", display_with = "tenor")]
    maturity: f64,
    #[tabled(rename = "Zero Rate (%)", display_with = "percent")]
    zero_rate: f64,
    #[tabled(rename = "Discount Factor", display_with = "discount")]
    discount_factor: f64,
}

/// The curve at one sampled tenor.
#[derive(Debug, Serialize, Tabled)]
struct SampleRow {
    #[tabled(rename = "Tenor", display_with = "tenor")]
    tenor: f64,
    #[tabled(rename = "Zero Rate (%)", display_with = "percent")]
    zero_rate: f64,
    #[tabled(rename = "Discount Factor", display_with = "discount")]
    discount_factor: f64,
    #[tabled(rename = "Forward (%)", display_with = "percent")]
    forward_rate: f64,
}

/// One repriced instrument.
#[derive(Debug, Serialize, Tabled)]
struct ResidualRow {
    #[tabled(rename = "Instrument")]
    instrument: String,
    #[tabled(rename = "Quoted")]
    quoted: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Error (bp)", display_with = "bps")]
    error: f64,
    #[tabled(rename = "Passed")]
    passed: bool,
}

/// Execute the bootstrap command.
pub fn execute(args: BootstrapArgs, format: OutputFormat) -> Result<()> {
    let mut config = args.input.build_config()?;
    let method = resolve_method(&mut config, args.interpolation, &args.smith_wilson)?;
    let tenors = parse_tenors(args.tenors.as_deref())?;
    let instruments = args.input.instruments()?;

    let result = SequentialBootstrapper::new()
        .with_config(config.bootstrap)
        .bootstrap_validated(&instruments, &method)?;

    tracing::info!(
        pillars = result.curve.points().len(),
        elapsed_us = result.build_duration.as_micros() as u64,
        max_error = result.repricing_report.max_error(),
        "bootstrap complete"
    );

    output_result(&result, &tenors, args.show_residuals, format)
}

fn output_result(
    result: &BootstrapResult,
    tenors: &[f64],
    show_residuals: bool,
    format: OutputFormat,
) -> Result<()> {
    let curve = &result.curve;

    let pillars: Vec<PillarRow> = curve
        .points()
        .iter()
        .map(|p| PillarRow {
            maturity: p.maturity,
            zero_rate: p.zero_rate,
            discount_factor: p.discount_factor(),
        })
        .collect();

    let samples: Vec<SampleRow> = tenors
        .iter()
        .map(|&t| SampleRow {
            tenor: t,
            zero_rate: curve.zero(t),
            discount_factor: curve.df(t),
            forward_rate: curve.forward_instantaneous(t),
        })
        .collect();

    let residuals: Vec<ResidualRow> = result
        .repricing_report
        .checks()
        .iter()
        .map(|c| ResidualRow {
            instrument: c.instrument.clone(),
            quoted: format!("{:.6}", c.quoted),
            model: format!("{:.6}", c.model),
            error: c.error,
            passed: c.passed,
        })
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Bootstrapped Curve");
            print_table(&[
                KeyValue::new("Interpolation", curve.method().to_string()),
                KeyValue::new("Pillars", curve.points().len().to_string()),
                KeyValue::new(
                    "Build Time",
                    format!("{:.3} ms", result.build_duration.as_secs_f64() * 1e3),
                ),
            ])?;

            print_header("Pillars");
            print_table(&pillars)?;

            print_header("Curve");
            print_table(&samples)?;

            if show_residuals {
                print_header("Repricing");
                print_table(&residuals)?;
                print_status(
                    result.is_valid(),
                    &format!(
                        "{}/{} instruments within tolerance (max error {:.2e})",
                        result.repricing_report.passed_count(),
                        residuals.len(),
                        result.repricing_report.max_error()
                    ),
                );
            }
        }
        OutputFormat::Json => {
            let mut output = serde_json::json!({
                "interpolation": curve.method(),
                "pillars": pillars,
                "curve": samples,
            });
            if show_residuals {
                output["repricing"] = serde_json::to_value(&result.repricing_report)?;
            }
            print_json(&output)?;
        }
        OutputFormat::Csv | OutputFormat::Minimal => {
            if show_residuals {
                print_rows(&residuals, format)?;
            } else {
                print_rows(&samples, format)?;
            }
        }
    }

    Ok(())
}
