//! Smith-Wilson interpolation and extrapolation.
//!
//! The discount function is written as
//!
//! ```text
//! P(t) = exp(-UFR·t) + Σ_j ξ_j · W(t, T_j)
//! ```
//!
//! where `W` is the Wilson kernel. The weights `ξ` are chosen so that `P`
//! reproduces every pillar discount factor exactly; beyond the last pillar
//! the forward rate converges to the ultimate forward rate at speed `α`.

use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, MathResult};
use crate::interpolation::{validate_points, Interpolator};
use crate::linear_algebra::solve_linear_system;
use crate::tolerances::DISCOUNT_FACTOR_FLOOR;

/// Smith-Wilson interpolator over continuously compounded zero rates.
///
/// Queries below the first pillar return the first pillar's zero rate.
/// Above the last pillar there is no clamp: the curve follows the kernel's
/// analytic reversion toward the ultimate forward rate.
///
/// # Example
///
/// ```rust
/// use zerocurve_math::interpolation::{Interpolator, SmithWilson};
///
/// let xs = vec![1.0, 2.0, 5.0, 10.0];
/// let ys = vec![0.020, 0.025, 0.030, 0.032];
///
/// let sw = SmithWilson::new(xs, ys, 0.035, 0.1).unwrap();
/// assert!((sw.interpolate(5.0) - 0.030).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct SmithWilson {
    xs: Vec<f64>,
    ys: Vec<f64>,
    ufr: f64,
    alpha: f64,
    /// Kernel weights, one per pillar
    weights: Vec<f64>,
}

impl SmithWilson {
    /// Calibrates the kernel weights to the given pillars.
    ///
    /// # Arguments
    ///
    /// * `xs` - Pillar maturities (strictly increasing, all positive)
    /// * `ys` - Zero rates at those maturities
    /// * `ufr` - Ultimate forward rate (continuously compounded)
    /// * `lambda` - Reversion speed `α`, must be positive
    ///
    /// # Errors
    ///
    /// Returns an error for invalid pillars, a non-positive first maturity,
    /// `lambda <= 0` or a non-finite `ufr`.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, ufr: f64, lambda: f64) -> MathResult<Self> {
        validate_points(&xs, &ys)?;

        if !(lambda.is_finite() && lambda > 0.0) {
            return Err(MathError::invalid_input(format!(
                "Smith-Wilson lambda must be positive, got {lambda}"
            )));
        }
        if !ufr.is_finite() {
            return Err(MathError::invalid_input("ultimate forward rate must be finite"));
        }
        if xs[0] <= 0.0 {
            return Err(MathError::invalid_input(format!(
                "Smith-Wilson pillars must have positive maturities, first is {}",
                xs[0]
            )));
        }

        let n = xs.len();
        let kernel = DMatrix::from_fn(n, n, |i, j| wilson(xs[i], xs[j], ufr, lambda));
        let target = DVector::from_fn(n, |i, _| {
            let t = xs[i];
            (-ys[i] * t).exp() - (-ufr * t).exp()
        });

        let weights = solve_linear_system(&kernel, &target)?;
        log::trace!("Smith-Wilson calibrated {n} weights (ufr={ufr}, alpha={lambda})");

        Ok(Self {
            xs,
            ys,
            ufr,
            alpha: lambda,
            weights: weights.iter().copied().collect(),
        })
    }

    /// Returns the ultimate forward rate.
    #[must_use]
    pub fn ufr(&self) -> f64 {
        self.ufr
    }

    /// Returns the reversion speed `α`.
    #[must_use]
    pub fn lambda(&self) -> f64 {
        self.alpha
    }

    /// Returns the fitted discount factor at `t`, floored at
    /// [`DISCOUNT_FACTOR_FLOOR`].
    ///
    /// No short-end clamp is applied here.
    #[must_use]
    pub fn discount_factor(&self, t: f64) -> f64 {
        let kernel_sum: f64 = self
            .xs
            .iter()
            .zip(&self.weights)
            .map(|(&u, &xi)| xi * wilson(t, u, self.ufr, self.alpha))
            .sum();

        ((-self.ufr * t).exp() + kernel_sum).max(DISCOUNT_FACTOR_FLOOR)
    }
}

impl Interpolator for SmithWilson {
    fn interpolate(&self, x: f64) -> f64 {
        if x <= self.xs[0] {
            return self.ys[0];
        }
        -self.discount_factor(x).ln() / x
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    fn name(&self) -> &'static str {
        "Smith-Wilson"
    }
}

/// Wilson kernel `W(t, u)`.
fn wilson(t: f64, u: f64, ufr: f64, alpha: f64) -> f64 {
    let lo = t.min(u);
    let hi = t.max(u);
    let sinh_term = (alpha * lo).exp() - (-alpha * lo).exp();
    (-ufr * (t + u)).exp() * (alpha * lo - 0.5 * (-alpha * hi).exp() * sinh_term)
}
