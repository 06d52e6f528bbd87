//! Shape analysis of a zero curve.
//!
//! Slope and convexity of the zero rate are estimated by central finite
//! differences with a bump of [`DERIVATIVE_BUMP`]. The lower stencil point
//! is clamped at [`MIN_TENOR`] while the denominators keep the nominal
//! step, matching the forward-rate estimate on [`ZeroCurve`].

use serde::{Deserialize, Serialize};
use zerocurve_math::tolerances::MIN_TENOR;

use crate::curve::ZeroCurve;

/// Finite-difference bump for slope and convexity.
pub const DERIVATIVE_BUMP: f64 = 1e-3;

/// Tenors sampled by [`standard_tenors`].
const STANDARD_TENORS: [f64; 12] = [
    0.25, 0.5, 1.0, 2.0, 3.0, 5.0, 7.0, 10.0, 15.0, 20.0, 25.0, 30.0,
];

/// `dZ/dt` at `t`.
#[must_use]
pub fn slope(curve: &ZeroCurve, t: f64) -> f64 {
    let h = DERIVATIVE_BUMP;
    (curve.zero(t + h) - curve.zero((t - h).max(MIN_TENOR))) / (2.0 * h)
}

/// `d²Z/dt²` at `t`.
#[must_use]
pub fn convexity(curve: &ZeroCurve, t: f64) -> f64 {
    let h = DERIVATIVE_BUMP;
    (curve.zero(t + h) - 2.0 * curve.zero(t) + curve.zero((t - h).max(MIN_TENOR))) / (h * h)
}

/// Curve measures at one maturity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveMetric {
    /// Maturity in years.
    pub maturity: f64,
    /// Continuously compounded zero rate.
    pub zero_rate: f64,
    /// Discount factor.
    pub discount_factor: f64,
    /// Instantaneous forward rate.
    pub forward_rate: f64,
    /// First derivative of the zero rate.
    pub slope: f64,
    /// Second derivative of the zero rate.
    pub convexity: f64,
}

impl CurveMetric {
    /// Evaluates every measure at `t`.
    #[must_use]
    pub fn at(curve: &ZeroCurve, t: f64) -> Self {
        Self {
            maturity: t,
            zero_rate: curve.zero(t),
            discount_factor: curve.df(t),
            forward_rate: curve.forward_instantaneous(t),
            slope: slope(curve, t),
            convexity: convexity(curve, t),
        }
    }
}

/// Evaluates [`CurveMetric`] at each tenor, in order.
#[must_use]
pub fn analyze(curve: &ZeroCurve, tenors: &[f64]) -> Vec<CurveMetric> {
    tenors.iter().map(|&t| CurveMetric::at(curve, t)).collect()
}

/// Market-standard tenors from 3M to 30Y.
#[must_use]
pub fn standard_tenors() -> Vec<f64> {
    STANDARD_TENORS.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::CurvePoint;
    use crate::interpolation::InterpolationMethod;
    use approx::assert_relative_eq;

    fn linear_curve() -> ZeroCurve {
        ZeroCurve::new(
            vec![CurvePoint::new(1.0, 0.02), CurvePoint::new(6.0, 0.03)],
            &InterpolationMethod::Linear,
        )
        .unwrap()
    }

    #[test]
    fn test_slope_on_linear_segment() {
        let curve = linear_curve();
        assert_relative_eq!(slope(&curve, 3.0), 0.002, epsilon = 1e-10);
        assert_relative_eq!(convexity(&curve, 3.0), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_flat_region_has_zero_slope() {
        let curve = linear_curve();
        assert_relative_eq!(slope(&curve, 10.0), 0.0, epsilon = 1e-15);
        assert_relative_eq!(slope(&curve, 0.5), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_convexity_on_spline() {
        // Concave pillars give negative convexity in the middle
        let curve = ZeroCurve::new(
            vec![
                CurvePoint::new(1.0, 0.020),
                CurvePoint::new(3.0, 0.030),
                CurvePoint::new(5.0, 0.034),
                CurvePoint::new(7.0, 0.035),
            ],
            &InterpolationMethod::CubicSpline,
        )
        .unwrap();

        assert!(convexity(&curve, 3.0) < 0.0);
        assert!(slope(&curve, 3.0) > 0.0);
    }

    #[test]
    fn test_analyze_matches_curve() {
        let curve = linear_curve();
        let metrics = analyze(&curve, &[1.0, 2.5, 8.0]);

        assert_eq!(metrics.len(), 3);
        for m in &metrics {
            assert_eq!(m.zero_rate, curve.zero(m.maturity));
            assert_eq!(m.discount_factor, curve.df(m.maturity));
            assert_eq!(m.forward_rate, curve.forward_instantaneous(m.maturity));
        }
    }

    #[test]
    fn test_standard_tenors_sorted() {
        let tenors = standard_tenors();
        assert_eq!(tenors.first(), Some(&0.25));
        assert_eq!(tenors.last(), Some(&30.0));
        assert!(tenors.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_metric_serializes() {
        let m = CurveMetric::at(&linear_curve(), 2.0);
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"forward_rate\""));
        assert!(json.contains("\"convexity\""));
    }
}
