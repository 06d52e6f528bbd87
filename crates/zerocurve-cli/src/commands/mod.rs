//! CLI command implementations.

pub mod analyze;
pub mod bootstrap;
pub mod compare;
pub mod ytm;

pub use analyze::AnalyzeArgs;
pub use bootstrap::BootstrapArgs;
pub use compare::CompareArgs;
pub use ytm::YieldArgs;

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use zerocurve_curves::analysis::standard_tenors;
use zerocurve_curves::config::CurveBuildConfig;
use zerocurve_curves::instruments::MarketInstrument;
use zerocurve_curves::interpolation::{InterpolationMethod, DEFAULT_LAMBDA, DEFAULT_UFR};

use crate::error::{CliError, CliResult};
use crate::input::load_instruments;
use crate::output::print_warning;

/// Instrument file and build configuration.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Instrument CSV file (columns: kind,maturity,rate,coupon,frequency,price)
    #[arg(short = 'i', long = "file")]
    pub file: PathBuf,

    /// Build configuration file (TOML)
    #[arg(short, long, env = "ZEROCURVE_CONFIG")]
    pub config: Option<PathBuf>,
}

impl InputArgs {
    /// Loads the configuration file, or the defaults when none is given.
    pub fn build_config(&self) -> CliResult<CurveBuildConfig> {
        match &self.config {
            Some(path) => {
                let config = CurveBuildConfig::from_file(path)
                    .map_err(|e| CliError::Config(e.to_string()))?;
                tracing::info!(path = %path.display(), "loaded build configuration");
                Ok(config)
            }
            None => Ok(CurveBuildConfig::default()),
        }
    }

    /// Loads the instrument file.
    pub fn instruments(&self) -> CliResult<Vec<MarketInstrument>> {
        load_instruments(&self.file)
    }
}

/// Smith-Wilson parameters from the command line.
#[derive(Args, Debug, Clone, Copy)]
pub struct SmithWilsonArgs {
    /// Smith-Wilson ultimate forward rate in percent (e.g., 4.2)
    #[arg(long)]
    pub ufr: Option<f64>,

    /// Smith-Wilson convergence speed
    #[arg(long)]
    pub lambda: Option<f64>,
}

impl SmithWilsonArgs {
    /// Flag values first, then the configured method's, then the defaults.
    pub fn resolve(&self, configured: &InterpolationMethod) -> (f64, f64) {
        let (ufr, lambda) = match *configured {
            InterpolationMethod::SmithWilson {
                ultimate_forward_rate,
                lambda,
            } => (ultimate_forward_rate, lambda),
            _ => (DEFAULT_UFR, DEFAULT_LAMBDA),
        };
        (
            self.ufr.map_or(ufr, |pct| pct / 100.0),
            self.lambda.unwrap_or(lambda),
        )
    }

    fn is_set(&self) -> bool {
        self.ufr.is_some() || self.lambda.is_some()
    }
}

/// Interpolation method choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodChoice {
    /// Linear on zero rates
    Linear,
    /// Natural cubic spline on zero rates
    CubicSpline,
    /// Monotone Hermite (Fritsch-Carlson) on zero rates
    HaganWest,
    /// Smith-Wilson on discount factors
    SmithWilson,
}

/// Settles the interpolation method: `--interpolation` overrides the config
/// file, and `--ufr`/`--lambda` override Smith-Wilson parameters.
pub fn resolve_method(
    config: &mut CurveBuildConfig,
    choice: Option<MethodChoice>,
    sw: &SmithWilsonArgs,
) -> CliResult<InterpolationMethod> {
    let (ufr, lambda) = sw.resolve(&config.interpolation);

    let method = match choice {
        Some(MethodChoice::Linear) => InterpolationMethod::Linear,
        Some(MethodChoice::CubicSpline) => InterpolationMethod::CubicSpline,
        Some(MethodChoice::HaganWest) => InterpolationMethod::HaganWest,
        Some(MethodChoice::SmithWilson) => InterpolationMethod::smith_wilson(ufr, lambda),
        None => match config.interpolation {
            InterpolationMethod::SmithWilson { .. } => InterpolationMethod::smith_wilson(ufr, lambda),
            other => other,
        },
    };

    if sw.is_set() && method.is_flat_at_long_end() {
        print_warning(&format!("--ufr/--lambda have no effect with {method}"));
    }

    *config = config.with_interpolation(method);
    config.validate()?;
    tracing::info!(%method, "interpolation method");
    Ok(method)
}

/// Parses a comma-separated tenor list; `None` gives the standard grid.
pub fn parse_tenors(tenors: Option<&str>) -> CliResult<Vec<f64>> {
    let Some(list) = tenors else {
        return Ok(standard_tenors());
    };

    list.split(',')
        .map(|s| {
            let s = s.trim();
            match s.trim_end_matches(['y', 'Y']).parse::<f64>() {
                Ok(t) if t.is_finite() && t > 0.0 => Ok(t),
                _ => Err(CliError::InvalidArgument(format!("invalid tenor '{s}'"))),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tenors() {
        assert_eq!(parse_tenors(Some("1, 2.5,10Y")).unwrap(), vec![1.0, 2.5, 10.0]);
        assert_eq!(parse_tenors(None).unwrap(), standard_tenors());
        assert!(parse_tenors(Some("1,abc")).is_err());
        assert!(parse_tenors(Some("0")).is_err());
    }

    #[test]
    fn test_flag_overrides_config() {
        let mut config = CurveBuildConfig::default()
            .with_interpolation(InterpolationMethod::smith_wilson(0.03, 0.2));
        let sw = SmithWilsonArgs {
            ufr: Some(4.2),
            lambda: None,
        };

        let method = resolve_method(&mut config, None, &sw).unwrap();
        assert_eq!(method, InterpolationMethod::smith_wilson(0.042, 0.2));
        assert_eq!(config.interpolation, method);
    }

    #[test]
    fn test_choice_overrides_config() {
        let mut config = CurveBuildConfig::default();
        let sw = SmithWilsonArgs {
            ufr: None,
            lambda: None,
        };

        let method = resolve_method(&mut config, Some(MethodChoice::Linear), &sw).unwrap();
        assert_eq!(method, InterpolationMethod::Linear);

        let method = resolve_method(&mut config, Some(MethodChoice::SmithWilson), &sw).unwrap();
        assert_eq!(method, InterpolationMethod::smith_wilson(DEFAULT_UFR, DEFAULT_LAMBDA));
    }

    #[test]
    fn test_invalid_lambda_rejected() {
        let mut config = CurveBuildConfig::default();
        let sw = SmithWilsonArgs {
            ufr: None,
            lambda: Some(-0.1),
        };

        assert!(resolve_method(&mut config, Some(MethodChoice::SmithWilson), &sw).is_err());
    }
}
