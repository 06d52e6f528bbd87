//! Analyze command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use zerocurve_curves::analysis::{analyze, CurveMetric};
use zerocurve_curves::bootstrap::SequentialBootstrapper;
use zerocurve_curves::curve::ZeroCurve;

use crate::cli::OutputFormat;
use crate::commands::{parse_tenors, resolve_method, InputArgs, MethodChoice, SmithWilsonArgs};
use crate::output::{bps, discount, percent, print_header, print_json, print_rows, tenor};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Interpolation method (overrides the config file)
    #[arg(short = 'm', long, value_enum)]
    pub interpolation: Option<MethodChoice>,

    #[command(flatten)]
    pub smith_wilson: SmithWilsonArgs,

    /// Tenors to analyze in years (comma-separated, e.g., "1,2,5,10")
    #[arg(short, long)]
    pub tenors: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct MetricRow {
    #[tabled(rename = "Tenor", display_with = "tenor")]
    maturity: f64,
    #[tabled(rename = "Zero (%)", display_with = "percent")]
    zero_rate: f64,
    #[tabled(rename = "DF", display_with = "discount")]
    discount_factor: f64,
    #[tabled(rename = "Forward (%)", display_with = "percent")]
    forward_rate: f64,
    #[tabled(rename = "Slope (bp/Y)", display_with = "bps")]
    slope: f64,
    #[tabled(rename = "Convexity (bp/Y²)", display_with = "bps")]
    convexity: f64,
}

impl From<&CurveMetric> for MetricRow {
    fn from(m: &CurveMetric) -> Self {
        Self {
            maturity: m.maturity,
            zero_rate: m.zero_rate,
            discount_factor: m.discount_factor,
            forward_rate: m.forward_rate,
            slope: m.slope,
            convexity: m.convexity,
        }
    }
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, format: OutputFormat) -> Result<()> {
    let mut config = args.input.build_config()?;
    let method = resolve_method(&mut config, args.interpolation, &args.smith_wilson)?;
    let tenors = parse_tenors(args.tenors.as_deref())?;
    let instruments = args.input.instruments()?;

    let pillars = SequentialBootstrapper::new()
        .with_config(config.bootstrap)
        .bootstrap(&instruments)?;
    let curve = ZeroCurve::new(pillars, &method)?;

    let metrics = analyze(&curve, &tenors);

    match format {
        OutputFormat::Json => print_json(&metrics)?,
        OutputFormat::Table => {
            print_header(&format!("Curve Analysis ({method})"));
            print_rows(&metrics.iter().map(MetricRow::from).collect::<Vec<_>>(), format)?;
        }
        OutputFormat::Csv | OutputFormat::Minimal => {
            print_rows(&metrics.iter().map(MetricRow::from).collect::<Vec<_>>(), format)?;
        }
    }

    Ok(())
}
