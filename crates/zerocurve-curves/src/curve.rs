//! Zero curve built from bootstrapped pillars.

use std::fmt;
use std::sync::Arc;

use zerocurve_math::interpolation::Interpolator;
use zerocurve_math::tolerances::{LOG_DISCOUNT_FLOOR, MIN_TENOR};

use crate::error::{CurveError, CurveResult};
use crate::instruments::CurvePoint;
use crate::interpolation::InterpolationMethod;

/// Default bump for the instantaneous forward finite difference.
pub const FORWARD_BUMP: f64 = 1e-4;

/// A continuously compounded zero curve.
///
/// Owns its pillars and a single interpolator calibrated at construction.
/// The curve is immutable; every query re-evaluates the interpolator.
///
/// # Example
///
/// ```rust
/// use zerocurve_curves::curve::ZeroCurve;
/// use zerocurve_curves::instruments::CurvePoint;
/// use zerocurve_curves::interpolation::InterpolationMethod;
///
/// let curve = ZeroCurve::new(
///     vec![CurvePoint::new(1.0, 0.02), CurvePoint::new(5.0, 0.03)],
///     &InterpolationMethod::Linear,
/// )
/// .unwrap();
///
/// assert!((curve.zero(3.0) - 0.025).abs() < 1e-15);
/// assert!((curve.df(3.0) - (-0.075_f64).exp()).abs() < 1e-15);
/// ```
#[derive(Clone)]
pub struct ZeroCurve {
    points: Vec<CurvePoint>,
    method: InterpolationMethod,
    interpolator: Arc<dyn Interpolator>,
}

impl ZeroCurve {
    /// Builds a curve from pillars with the given interpolation method.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `points` is empty
    /// - A maturity is non-positive or a value is non-finite
    /// - Maturities are not strictly increasing
    /// - The method's parameters are invalid or calibration fails
    pub fn new(points: Vec<CurvePoint>, method: &InterpolationMethod) -> CurveResult<Self> {
        method.validate()?;

        if points.is_empty() {
            return Err(CurveError::insufficient_points(1, 0));
        }
        for p in &points {
            if !(p.maturity.is_finite() && p.maturity > 0.0) {
                return Err(CurveError::invalid_value(format!(
                    "pillar maturity must be positive, got {}",
                    p.maturity
                )));
            }
            if !p.zero_rate.is_finite() {
                return Err(CurveError::invalid_value(format!(
                    "pillar zero rate at {} is not finite",
                    p.maturity
                )));
            }
        }
        for (i, w) in points.windows(2).enumerate() {
            if w[1].maturity <= w[0].maturity {
                return Err(CurveError::non_monotonic_tenors(
                    i + 1,
                    w[0].maturity,
                    w[1].maturity,
                ));
            }
        }

        let xs = points.iter().map(|p| p.maturity).collect();
        let ys = points.iter().map(|p| p.zero_rate).collect();
        let interpolator = method.build(xs, ys)?;

        log::debug!("built {} curve over {} pillars", interpolator.name(), points.len());

        Ok(Self {
            points,
            method: *method,
            interpolator: Arc::from(interpolator),
        })
    }

    /// Continuously compounded zero rate at `t`.
    #[must_use]
    pub fn zero(&self, t: f64) -> f64 {
        self.interpolator.interpolate(t)
    }

    /// Discount factor `exp(-zero(t)·t)`.
    #[must_use]
    pub fn df(&self, t: f64) -> f64 {
        (-self.zero(t) * t).exp()
    }

    /// Instantaneous forward rate with the default bump.
    #[must_use]
    pub fn forward_instantaneous(&self, t: f64) -> f64 {
        self.forward_instantaneous_with_step(t, FORWARD_BUMP)
    }

    /// Instantaneous forward rate by central difference on `ln DF`.
    ///
    /// The lower point is clamped at [`MIN_TENOR`]; the denominator stays
    /// `2h`. Discount factors are floored at [`LOG_DISCOUNT_FLOOR`].
    #[must_use]
    pub fn forward_instantaneous_with_step(&self, t: f64, h: f64) -> f64 {
        let up = t + h;
        let down = (t - h).max(MIN_TENOR);

        let ln_up = self.df(up).max(LOG_DISCOUNT_FLOOR).ln();
        let ln_down = self.df(down).max(LOG_DISCOUNT_FLOOR).ln();

        -(ln_up - ln_down) / (2.0 * h)
    }

    /// Returns the pillars the curve was built from.
    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Returns the interpolation method.
    #[must_use]
    pub fn method(&self) -> &InterpolationMethod {
        &self.method
    }

    /// Shortest pillar maturity.
    #[must_use]
    pub fn min_tenor(&self) -> f64 {
        self.interpolator.min_x()
    }

    /// Longest pillar maturity.
    #[must_use]
    pub fn max_tenor(&self) -> f64 {
        self.interpolator.max_x()
    }
}

impl fmt::Debug for ZeroCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZeroCurve")
            .field("method", &self.method)
            .field("points", &self.points.len())
            .field("range", &(self.min_tenor(), self.max_tenor()))
            .finish()
    }
}
