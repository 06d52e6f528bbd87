//! Interpolation methods for zero-rate curves.
//!
//! Every interpolator maps pillar maturities to continuously compounded
//! zero rates and is calibrated exactly once, in its constructor. There is no
//! "unbuilt" interpolator: if you hold one, it can be evaluated.
//!
//! # Available Methods
//!
//! - [`LinearInterpolator`]: Piecewise linear on zero rates
//! - [`CubicSpline`]: Natural cubic spline (zero second derivative at both ends)
//! - [`HaganWest`]: Monotone cubic Hermite with the Fritsch-Carlson limiter
//! - [`SmithWilson`]: Wilson-kernel fit reverting to an ultimate forward rate
//!
//! # Extrapolation
//!
//! | Method | Below first pillar | Above last pillar |
//! |--------|--------------------|-------------------|
//! | Linear | Flat | Flat |
//! | Cubic Spline | Flat | Flat |
//! | Hagan-West | Flat | Flat |
//! | Smith-Wilson | Clamped to first pillar | Analytic reversion to UFR |
//!
//! # Choosing an Interpolation Method
//!
//! | Method | Smoothness | Overshoot-free | Use Case |
//! |--------|------------|----------------|----------|
//! | Linear | C0 | Yes | Quick prototyping, bootstrap intermediates |
//! | Cubic Spline | C2 | No | Smooth forwards on well-behaved data |
//! | Hagan-West | C1 | **Yes** | Production default |
//! | Smith-Wilson | C∞ | No | Regulatory long-end extrapolation |

mod cubic_spline;
mod hagan_west;
mod linear;
mod smith_wilson;

pub use cubic_spline::CubicSpline;
pub use hagan_west::HaganWest;
pub use linear::LinearInterpolator;
pub use smith_wilson::SmithWilson;

use std::fmt;

use crate::error::{MathError, MathResult};

/// Trait for interpolation methods.
///
/// All interpolation methods implement this trait, providing a unified
/// interface for curve construction.
pub trait Interpolator: Send + Sync + fmt::Debug {
    /// Returns the interpolated value at x.
    ///
    /// Evaluation is total: outside the pillar range each method applies its
    /// own extrapolation rule.
    fn interpolate(&self, x: f64) -> f64;

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Returns the name of the interpolation method.
    fn name(&self) -> &'static str;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

/// Validates pillar abscissae and ordinates shared by all interpolators.
///
/// Requires at least one point, equal lengths, finite values and strictly
/// increasing `xs`.
pub(crate) fn validate_points(xs: &[f64], ys: &[f64]) -> MathResult<()> {
    if xs.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if xs.len() != ys.len() {
        return Err(MathError::invalid_input(format!(
            "xs and ys must have same length: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    if let Some(i) = xs.iter().chain(ys).position(|v| !v.is_finite()) {
        return Err(MathError::invalid_input(format!(
            "non-finite input at position {}",
            i % xs.len()
        )));
    }
    for i in 1..xs.len() {
        if xs[i] <= xs[i - 1] {
            return Err(MathError::non_monotonic(i, xs[i - 1], xs[i]));
        }
    }
    Ok(())
}

/// Finds the index i such that xs[i] <= x < xs[i+1].
///
/// The result is clamped to the last segment; a single abscissa gives 0.
pub(crate) fn find_segment(xs: &[f64], x: f64) -> usize {
    let last = xs.len().saturating_sub(2);
    match xs.binary_search_by(|knot| knot.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal)) {
        Ok(i) => i.min(last),
        Err(i) => i.saturating_sub(1).min(last),
    }
}
