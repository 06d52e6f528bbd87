//! Interpolation method selection.
//!
//! [`InterpolationMethod`] is the configuration-facing choice of
//! interpolator. [`InterpolationMethod::build`] is the only way to obtain a
//! calibrated [`Interpolator`], so an interpolator can never be evaluated
//! before it has been built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zerocurve_math::interpolation::{
    CubicSpline, HaganWest, Interpolator, LinearInterpolator, SmithWilson,
};
use zerocurve_math::MathResult;

use crate::error::{CurveError, CurveResult};

/// Default Smith-Wilson ultimate forward rate.
pub const DEFAULT_UFR: f64 = 0.025;

/// Default Smith-Wilson reversion speed.
pub const DEFAULT_LAMBDA: f64 = 0.1;

/// Interpolation methods for zero curves.
///
/// Serialized with a `method` tag:
///
/// ```toml
/// method = "smith-wilson"
/// ultimate_forward_rate = 0.042
/// lambda = 0.1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum InterpolationMethod {
    /// Linear interpolation on zero rates.
    Linear,

    /// Natural cubic spline on zero rates.
    CubicSpline,

    /// Monotone cubic Hermite on zero rates (Hagan-West).
    #[default]
    HaganWest,

    /// Smith-Wilson kernel fit with UFR reversion.
    SmithWilson {
        /// Ultimate forward rate the long end reverts to.
        ultimate_forward_rate: f64,
        /// Reversion speed, must be positive.
        lambda: f64,
    },
}

impl InterpolationMethod {
    /// Smith-Wilson with the given parameters.
    #[must_use]
    pub fn smith_wilson(ultimate_forward_rate: f64, lambda: f64) -> Self {
        Self::SmithWilson {
            ultimate_forward_rate,
            lambda,
        }
    }

    /// All four methods, Smith-Wilson with the given parameters.
    #[must_use]
    pub fn all(ultimate_forward_rate: f64, lambda: f64) -> [Self; 4] {
        [
            Self::Linear,
            Self::CubicSpline,
            Self::HaganWest,
            Self::smith_wilson(ultimate_forward_rate, lambda),
        ]
    }

    /// Short kebab-case identifier, matching the serialized tag.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::CubicSpline => "cubic-spline",
            Self::HaganWest => "hagan-west",
            Self::SmithWilson { .. } => "smith-wilson",
        }
    }

    /// Returns true if this method flat-extrapolates beyond the last pillar.
    #[must_use]
    pub fn is_flat_at_long_end(&self) -> bool {
        !matches!(self, Self::SmithWilson { .. })
    }

    /// Checks method parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when Smith-Wilson has `lambda <= 0` or a
    /// non-finite UFR.
    pub fn validate(&self) -> CurveResult<()> {
        if let Self::SmithWilson {
            ultimate_forward_rate,
            lambda,
        } = *self
        {
            if !(lambda.is_finite() && lambda > 0.0) {
                return Err(CurveError::invalid_config(format!(
                    "smith-wilson lambda must be positive, got {lambda}"
                )));
            }
            if !ultimate_forward_rate.is_finite() {
                return Err(CurveError::invalid_config(
                    "smith-wilson ultimate_forward_rate must be finite",
                ));
            }
        }
        Ok(())
    }

    /// Calibrates an interpolator over `(xs, ys)`.
    ///
    /// # Errors
    ///
    /// Propagates the interpolator's validation error.
    pub fn build(&self, xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Box<dyn Interpolator>> {
        Ok(match *self {
            Self::Linear => Box::new(LinearInterpolator::new(xs, ys)?),
            Self::CubicSpline => Box::new(CubicSpline::new(xs, ys)?),
            Self::HaganWest => Box::new(HaganWest::new(xs, ys)?),
            Self::SmithWilson {
                ultimate_forward_rate,
                lambda,
            } => Box::new(SmithWilson::new(xs, ys, ultimate_forward_rate, lambda)?),
        })
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::CubicSpline => write!(f, "Cubic Spline"),
            Self::HaganWest => write!(f, "Hagan-West"),
            Self::SmithWilson {
                ultimate_forward_rate,
                lambda,
            } => write!(
                f,
                "Smith-Wilson (UFR {:.2}%, λ {lambda})",
                ultimate_forward_rate * 100.0
            ),
        }
    }
}

impl FromStr for InterpolationMethod {
    type Err = CurveError;

    /// Parses a method id; Smith-Wilson gets the default parameters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "linear" => Ok(Self::Linear),
            "cubic-spline" | "cubic" | "spline" => Ok(Self::CubicSpline),
            "hagan-west" | "monotone" | "hermite" => Ok(Self::HaganWest),
            "smith-wilson" | "sw" => Ok(Self::smith_wilson(DEFAULT_UFR, DEFAULT_LAMBDA)),
            other => Err(CurveError::invalid_config(format!(
                "unknown interpolation method '{other}'"
            ))),
        }
    }
}
