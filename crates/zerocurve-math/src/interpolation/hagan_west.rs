//! Monotone cubic Hermite interpolation (Hagan-West style).
//!
//! Node slopes are chosen so that the interpolant never leaves the envelope
//! of the two pillars bounding each segment:
//!
//! 1. Secants `δ[i] = (y[i+1] - y[i]) / h[i]`.
//! 2. End slopes take the adjacent secant.
//! 3. Interior slopes are the weighted harmonic mean of the two adjacent
//!    secants with weights `2h[i] + h[i-1]` and `h[i] + 2h[i-1]`, or zero when
//!    the secants disagree in sign (local extremum).
//! 4. Fritsch-Carlson limiter, per interior node: with `a = m[i]/δ[i-1]` and
//!    `b = m[i]/δ[i]`, if `a² + b² > 9` the node slope is scaled by
//!    `τ = 3/√(a² + b²)`.
//!
//! Reference: Hagan, P. & West, G. (2006) "Interpolation Methods for Curve Construction";
//! Fritsch, F. & Carlson, R. (1980) "Monotone Piecewise Cubic Interpolation".

use crate::error::MathResult;
use crate::interpolation::{find_segment, validate_points, Interpolator};

/// Monotone cubic Hermite interpolation on zero rates.
///
/// # Properties
///
/// - **No overshoot**: on every segment the curve stays within
///   `[min(y[i], y[i+1]), max(y[i], y[i+1])]`
/// - **C1 continuity**: the curve has a continuous first derivative
/// - **Local**: Changes to one pillar only affect nearby segments
///
/// # Example
///
/// ```rust
/// use zerocurve_math::interpolation::{HaganWest, Interpolator};
///
/// // Humped curve
/// let times = vec![1.0, 2.0, 3.0, 5.0];
/// let zero_rates = vec![0.02, 0.035, 0.03, 0.032];
///
/// let interp = HaganWest::new(times, zero_rates).unwrap();
///
/// // Never above the 2Y peak
/// for t in [1.5, 2.25, 2.5, 2.75] {
///     assert!(interp.interpolate(t) <= 0.035 + 1e-15);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HaganWest {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Limited Hermite slope at each pillar
    slopes: Vec<f64>,
}

impl HaganWest {
    /// Creates a new monotone Hermite interpolator.
    ///
    /// # Arguments
    ///
    /// * `xs` - Maturities (must be strictly increasing)
    /// * `ys` - Zero rates
    ///
    /// # Errors
    ///
    /// Returns an error if there are no points, lengths differ or `xs` is not
    /// strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_points(&xs, &ys)?;
        let slopes = compute_slopes(&xs, &ys);
        Ok(Self { xs, ys, slopes })
    }

    /// Returns the limited node slopes.
    #[must_use]
    pub fn slopes(&self) -> &[f64] {
        &self.slopes
    }
}

impl Interpolator for HaganWest {
    fn interpolate(&self, x: f64) -> f64 {
        let n = self.xs.len();
        if n == 1 || x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[n - 1] {
            return self.ys[n - 1];
        }

        let i = find_segment(&self.xs, x);
        let h = self.xs[i + 1] - self.xs[i];
        let s = (x - self.xs[i]) / h;
        let s2 = s * s;
        let s3 = s2 * s;

        // Hermite basis
        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        h00 * self.ys[i]
            + h10 * h * self.slopes[i]
            + h01 * self.ys[i + 1]
            + h11 * h * self.slopes[i + 1]
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    fn name(&self) -> &'static str {
        "Hagan-West"
    }
}

fn compute_slopes(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    if n < 2 {
        return vec![0.0; n];
    }

    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let delta: Vec<f64> = (0..n - 1).map(|i| (ys[i + 1] - ys[i]) / h[i]).collect();

    let mut m = vec![0.0; n];
    m[0] = delta[0];
    m[n - 1] = delta[n - 2];

    for i in 1..n - 1 {
        let (d_prev, d_next) = (delta[i - 1], delta[i]);
        if d_prev * d_next <= 0.0 {
            // Local extremum or flat neighbour
            m[i] = 0.0;
        } else {
            let w1 = 2.0 * h[i] + h[i - 1];
            let w2 = h[i] + 2.0 * h[i - 1];
            let harmonic = (w1 + w2) / (w1 / d_prev + w2 / d_next);
            m[i] = limit_node_slope(harmonic, d_prev, d_next);
        }
    }

    m
}

/// Fritsch-Carlson limiter for one interior node.
///
/// Both secants must be non-zero and share a sign.
fn limit_node_slope(m: f64, d_prev: f64, d_next: f64) -> f64 {
    let a = m / d_prev;
    let b = m / d_next;
    let r2 = a * a + b * b;
    if r2 > 9.0 {
        3.0 / r2.sqrt() * m
    } else {
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_exact_on_nodes() {
        let xs = vec![0.25, 1.0, 2.0, 5.0, 10.0];
        let ys = vec![0.010, 0.015, 0.025, 0.030, 0.031];
        let interp = HaganWest::new(xs.clone(), ys.clone()).unwrap();

        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(interp.interpolate(*x), *y, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_zero_slope_at_local_extremum() {
        let xs = vec![1.0, 2.0, 3.0, 4.0];
        let ys = vec![0.02, 0.04, 0.03, 0.05];
        let interp = HaganWest::new(xs, ys).unwrap();

        assert_eq!(interp.slopes()[1], 0.0);
        assert_eq!(interp.slopes()[2], 0.0);
    }

    #[test]
    fn test_end_slopes_take_adjacent_secant() {
        let xs = vec![1.0, 2.0, 4.0];
        let ys = vec![0.02, 0.03, 0.034];
        let interp = HaganWest::new(xs, ys).unwrap();

        assert_relative_eq!(interp.slopes()[0], 0.01, epsilon = 1e-15);
        assert_relative_eq!(interp.slopes()[2], 0.002, epsilon = 1e-15);
    }

    #[test]
    fn test_wide_gap_keeps_harmonic_slope() {
        // A 100Y gap between two steep unit segments. The node check over both
        // neighbouring secants leaves the harmonic mean untouched here.
        let interp =
            HaganWest::new(vec![0.0, 1.0, 101.0, 102.0], vec![0.0, 1.0, 1.1, 2.1]).unwrap();
        let expected = 303.0 / (201.0 + 102.0 / 0.001);

        let slopes = interp.slopes();
        assert_relative_eq!(slopes[0], 1.0, epsilon = 1e-15);
        assert_relative_eq!(slopes[1], expected, epsilon = 1e-12);
        assert_relative_eq!(slopes[2], expected, epsilon = 1e-12);
        assert_relative_eq!(slopes[3], 1.0, epsilon = 1e-15);
        assert_relative_eq!(slopes[1], 0.002_964_745_9, epsilon = 1e-10);
    }

    #[test]
    fn test_node_limiter_rescales_outside_circle() {
        // a = 3, b = 1.5: a² + b² = 11.25 > 9
        let limited = limit_node_slope(0.03, 0.01, 0.02);
        let tau = 3.0 / 11.25_f64.sqrt();
        assert_relative_eq!(limited, tau * 0.03, epsilon = 1e-15);

        let (a, b) = (limited / 0.01, limited / 0.02);
        assert_relative_eq!(a * a + b * b, 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_node_limiter_keeps_slope_inside_circle() {
        assert_eq!(limit_node_slope(0.015, 0.01, 0.02), 0.015);
        assert_eq!(limit_node_slope(-0.015, -0.01, -0.02), -0.015);
    }

    #[test]
    fn test_single_pillar_is_flat_for_any_query() {
        let interp = HaganWest::new(vec![2.0], vec![0.03]).unwrap();
        for x in [f64::NAN, 0.0, 2.0, 50.0] {
            assert_eq!(interp.interpolate(x), 0.03);
        }
    }

    #[test]
    fn test_preserves_monotonicity() {
        // Monotone increasing data: interpolant should not decrease
        let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = vec![0.0, 0.1, 0.5, 2.0, 4.0];
        let interp = HaganWest::new(xs, ys).unwrap();

        let mut prev = f64::NEG_INFINITY;
        for i in 0..=400 {
            let x = 4.0 * f64::from(i) / 400.0;
            let v = interp.interpolate(x);
            assert!(v >= prev - 1e-12, "not monotone at x={x}: {v} < {prev}");
            prev = v;
        }
    }

    #[test]
    fn test_step_stays_in_range() {
        let interp = HaganWest::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 0.0, 1.0, 1.0]).unwrap();

        for i in 0..=300 {
            let x = 3.0 * f64::from(i) / 300.0;
            let v = interp.interpolate(x);
            assert!((-1e-12..=1.0 + 1e-12).contains(&v), "out of range at x={x}: {v}");
        }
    }

    #[test]
    fn test_flat_extrapolation() {
        let interp = HaganWest::new(vec![1.0, 2.0], vec![0.02, 0.03]).unwrap();
        assert_eq!(interp.interpolate(0.5), 0.02);
        assert_eq!(interp.interpolate(9.0), 0.03);
    }

    fn humped_pillars() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        (3usize..10)
            .prop_flat_map(|n| {
                (
                    prop::collection::vec(0.1f64..5.0, n),
                    prop::collection::vec(0.001f64..0.02, n),
                    0.0f64..0.03,
                )
            })
            .prop_map(|(gaps, jumps, base)| {
                let mut xs = Vec::with_capacity(gaps.len());
                let mut t = 0.0;
                for g in gaps {
                    t += g;
                    xs.push(t);
                }
                // Alternate the sign of every secant
                let mut ys = Vec::with_capacity(jumps.len());
                let mut y = base;
                for (i, j) in jumps.iter().enumerate() {
                    y += if i % 2 == 0 { *j } else { -*j };
                    ys.push(y);
                }
                (xs, ys)
            })
    }

    proptest! {
        #[test]
        fn prop_no_overshoot_on_alternating_secants((xs, ys) in humped_pillars()) {
            let interp = HaganWest::new(xs.clone(), ys.clone()).unwrap();

            for i in 0..xs.len() - 1 {
                let lo = ys[i].min(ys[i + 1]);
                let hi = ys[i].max(ys[i + 1]);
                for k in 0..=20 {
                    let x = xs[i] + (xs[i + 1] - xs[i]) * f64::from(k) / 20.0;
                    let v = interp.interpolate(x);
                    prop_assert!(v >= lo - 1e-12 && v <= hi + 1e-12,
                        "segment {} at x={}: {} outside [{}, {}]", i, x, v, lo, hi);
                }
            }
        }

        #[test]
        fn prop_evaluation_is_idempotent((xs, ys) in humped_pillars(), t in 0.0f64..60.0) {
            let interp = HaganWest::new(xs, ys).unwrap();
            prop_assert_eq!(interp.interpolate(t).to_bits(), interp.interpolate(t).to_bits());
        }
    }
}
