//! Compare command implementation.
//!
//! Builds one curve per interpolation method from the same pillars and
//! prints their zero rates side by side.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use zerocurve_curves::bootstrap::SequentialBootstrapper;
use zerocurve_curves::curve::ZeroCurve;
use zerocurve_curves::interpolation::InterpolationMethod;
use zerocurve_curves::parallel::build_curves;

use crate::cli::OutputFormat;
use crate::commands::{parse_tenors, InputArgs, SmithWilsonArgs};
use crate::output::{percent, print_header, print_rows, tenor};

/// Arguments for the compare command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub smith_wilson: SmithWilsonArgs,

    /// Tenors to compare in years (comma-separated, e.g., "1,2,5,10,40")
    #[arg(short, long)]
    pub tenors: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Tenor", display_with = "tenor")]
    tenor: f64,
    #[tabled(rename = "Linear (%)", display_with = "percent")]
    linear: f64,
    #[tabled(rename = "Cubic Spline (%)", display_with = "percent")]
    cubic_spline: f64,
    #[tabled(rename = "Hagan-West (%)", display_with = "percent")]
    hagan_west: f64,
    #[tabled(rename = "Smith-Wilson (%)", display_with = "percent")]
    smith_wilson: f64,
}

/// Execute the compare command.
pub fn execute(args: CompareArgs, format: OutputFormat) -> Result<()> {
    let config = args.input.build_config()?;
    config.validate()?;
    let (ufr, lambda) = args.smith_wilson.resolve(&config.interpolation);
    let tenors = parse_tenors(args.tenors.as_deref())?;
    let instruments = args.input.instruments()?;

    let pillars = SequentialBootstrapper::new()
        .with_config(config.bootstrap)
        .bootstrap(&instruments)?;

    let [linear, cubic_spline, hagan_west, smith_wilson]: [ZeroCurve; 4] =
        build_curves(&pillars, &InterpolationMethod::all(ufr, lambda))
            .into_iter()
            .map(|(_, curve)| curve)
            .collect::<Result<Vec<ZeroCurve>, _>>()?
            .try_into()
            .map_err(|_| anyhow::anyhow!("expected one curve per interpolation method"))?;

    let rows: Vec<ComparisonRow> = tenors
        .iter()
        .map(|&t| ComparisonRow {
            tenor: t,
            linear: linear.zero(t),
            cubic_spline: cubic_spline.zero(t),
            hagan_west: hagan_west.zero(t),
            smith_wilson: smith_wilson.zero(t),
        })
        .collect();

    if format == OutputFormat::Table {
        print_header(&format!(
            "Zero Rates by Method ({} pillars, UFR {:.2}%, λ {lambda})",
            pillars.len(),
            ufr * 100.0
        ));
    }
    print_rows(&rows, format)
}
