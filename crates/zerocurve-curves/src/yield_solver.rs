//! Bond yield-to-maturity from a clean price.
//!
//! Yields are annually compounded over whole annual periods. Zero-coupon
//! bonds use the closed form; coupon bonds are solved by bisection on
//!
//! ```text
//! F(y) = Σ_{k=1..N} c/(1+y)^k + 1/(1+y)^N − P
//! ```
//!
//! with `N = max(1, round(maturity))`, `c = coupon_pct/100` and
//! `P = price_pct/100`.
//!
//! The bracket is never checked: when the price implies a yield outside it,
//! the solver returns a value next to the nearest bracket edge.

use serde::{Deserialize, Serialize};
use zerocurve_math::solvers::{bisection_unchecked, SolverConfig, DEFAULT_MAX_ITERATIONS};

use crate::error::{CurveError, CurveResult};

/// Default search interval for yields.
pub const DEFAULT_YIELD_BRACKET: (f64, f64) = (-0.05, 0.20);

/// Stops the search once `|F(y)|` drops below this.
pub const DEFAULT_YIELD_TOLERANCE: f64 = 1e-10;

/// Solves bond yields with a configurable bracket and iteration budget.
///
/// # Example
///
/// ```rust
/// use zerocurve_curves::yield_solver::YieldSolver;
///
/// let solver = YieldSolver::default();
/// let y = solver.solve(5.0, 10.0, 100.0).unwrap();
/// assert!((y - 0.05).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldSolver {
    /// Search interval `(lo, hi)` for the yield.
    pub bracket: (f64, f64),
    /// Maximum number of bisection halvings.
    pub max_iterations: u32,
    /// Early-exit tolerance on the pricing residual.
    pub tolerance: f64,
}

impl Default for YieldSolver {
    fn default() -> Self {
        Self {
            bracket: DEFAULT_YIELD_BRACKET,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_YIELD_TOLERANCE,
        }
    }
}

impl YieldSolver {
    /// Creates a solver with the default bracket and budget.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search interval.
    #[must_use]
    pub fn with_bracket(mut self, lo: f64, hi: f64) -> Self {
        self.bracket = (lo, hi);
        self
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Computes the yield to maturity.
    ///
    /// # Arguments
    ///
    /// * `coupon_pct` - Annual coupon in percent of face (0 for zero-coupon)
    /// * `maturity_years` - Time to maturity in years
    /// * `price_pct` - Clean price in percent of face
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` for a non-positive maturity or price, or a
    /// negative or non-finite coupon. Failing to converge is not an error.
    pub fn solve(&self, coupon_pct: f64, maturity_years: f64, price_pct: f64) -> CurveResult<f64> {
        if !(maturity_years.is_finite() && maturity_years > 0.0) {
            return Err(CurveError::invalid_value(format!(
                "maturity must be positive, got {maturity_years}"
            )));
        }
        if !(price_pct.is_finite() && price_pct > 0.0) {
            return Err(CurveError::invalid_value(format!(
                "price must be positive, got {price_pct}"
            )));
        }
        if !(coupon_pct.is_finite() && coupon_pct >= 0.0) {
            return Err(CurveError::invalid_value(format!(
                "coupon must be non-negative, got {coupon_pct}"
            )));
        }

        if coupon_pct == 0.0 {
            return Ok((100.0 / price_pct).powf(1.0 / maturity_years) - 1.0);
        }

        let periods = annual_periods(maturity_years);
        let c = coupon_pct / 100.0;
        let p = price_pct / 100.0;
        let pricing = |y: f64| {
            let v = 1.0 / (1.0 + y);
            let mut pv = 0.0;
            let mut df = 1.0;
            for _ in 0..periods {
                df *= v;
                pv += c * df;
            }
            pv + df - p
        };

        let config = SolverConfig::new(self.tolerance, self.max_iterations);
        let result = bisection_unchecked(pricing, self.bracket.0, self.bracket.1, &config);

        log::trace!(
            "yield for {coupon_pct}% {maturity_years}Y @ {price_pct}: {:.10} ({} iterations, residual {:.2e})",
            result.root,
            result.iterations,
            result.residual
        );

        Ok(result.root)
    }
}

/// Computes a bond's yield to maturity with the default solver.
///
/// # Example
///
/// ```rust
/// use zerocurve_curves::yield_solver::compute_yield;
///
/// let y = compute_yield(0.0, 5.0, 80.0).unwrap();
/// assert!((y - (1.25_f64.powf(0.2) - 1.0)).abs() < 1e-12);
/// ```
///
/// # Errors
///
/// See [`YieldSolver::solve`].
pub fn compute_yield(coupon_pct: f64, maturity_years: f64, price_pct: f64) -> CurveResult<f64> {
    YieldSolver::default().solve(coupon_pct, maturity_years, price_pct)
}

/// Whole annual periods, at least one.
fn annual_periods(maturity_years: f64) -> u32 {
    maturity_years.round().max(1.0) as u32
}
