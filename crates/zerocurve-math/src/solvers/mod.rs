//! Root-finding algorithms.
//!
//! Curve construction only ever needs a bracketed, derivative-free search, so
//! this module provides bisection in two flavours:
//!
//! - [`bisection`]: verifies that `[a, b]` brackets a root and fails with
//!   [`MathError::InvalidBracket`](crate::MathError::InvalidBracket) otherwise
//! - [`bisection_unchecked`]: runs the same loop without the bracket check and
//!   always returns the last midpoint
//!
//! Both stop after `max_iterations` halvings or as soon as `|f(mid)|` drops
//! below `tolerance`. Running out of iterations is not an error: with the
//! narrow rate brackets used for curves, 100 halvings leave a bracket far
//! below any quoted precision.
//!
//! # Example: zero-coupon yield
//!
//! ```rust
//! use zerocurve_math::solvers::{bisection, SolverConfig};
//!
//! // Price 80 for 100 in five years
//! let f = |y: f64| 100.0 / (1.0 + y).powi(5) - 80.0;
//!
//! let result = bisection(f, -0.05, 0.20, &SolverConfig::default()).unwrap();
//! assert!((result.root - (1.25_f64.powf(0.2) - 1.0)).abs() < 1e-9);
//! ```

mod bisection;

pub use bisection::{bisection, bisection_unchecked};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance on `|f(x)|` for early exit.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

impl SolverResult {
    /// Returns true if the residual is within the given tolerance.
    #[must_use]
    pub fn converged(&self, tolerance: f64) -> bool {
        self.residual.abs() < tolerance
    }
}
