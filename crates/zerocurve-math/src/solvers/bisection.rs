//! Bisection root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// Repeatedly halves `[a, b]`, keeping the half on which `f` changes sign.
///
/// Requires: `f(a) * f(b) <= 0` (opposite signs at endpoints).
///
/// The loop runs for at most `config.max_iterations` halvings and exits early
/// once `|f(mid)| < config.tolerance`. Exhausting the iterations is not an
/// error; the last midpoint is returned together with its residual.
///
/// # Example
///
/// ```rust
/// use zerocurve_math::solvers::{bisection, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let lo = a.min(b);
    let hi = a.max(b);

    let f_lo = f(lo);
    let f_hi = f(hi);

    // Check that root is bracketed
    if f_lo * f_hi > 0.0 || f_lo.is_nan() || f_hi.is_nan() {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    Ok(bisect(&f, lo, hi, f_lo, config))
}

/// Bisection without a bracket check.
///
/// Same loop as [`bisection`], but never fails: when `[a, b]` does not bracket
/// a root the search drifts towards one endpoint and the midpoint closest to
/// it is returned.
///
/// # Example
///
/// ```rust
/// use zerocurve_math::solvers::{bisection_unchecked, SolverConfig};
///
/// // No root in [0, 1]: the result sits at the upper edge
/// let result = bisection_unchecked(|x: f64| x + 5.0, 0.0, 1.0, &SolverConfig::default());
/// assert!(result.root > 0.99);
/// ```
pub fn bisection_unchecked<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> SolverResult
where
    F: Fn(f64) -> f64,
{
    let lo = a.min(b);
    let hi = a.max(b);
    let f_lo = f(lo);

    bisect(&f, lo, hi, f_lo, config)
}

fn bisect<F>(f: &F, mut lo: f64, mut hi: f64, mut f_lo: f64, config: &SolverConfig) -> SolverResult
where
    F: Fn(f64) -> f64,
{
    let mut mid = 0.5 * (lo + hi);
    let mut f_mid = f(mid);
    let mut iterations = 0;

    while iterations < config.max_iterations {
        mid = 0.5 * (lo + hi);
        f_mid = f(mid);
        iterations += 1;

        if f_mid.abs() < config.tolerance {
            break;
        }

        // Root lies in [mid, hi] when f(mid) has the sign of f(lo)
        if (f_mid > 0.0) == (f_lo > 0.0) {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }

    log::trace!(
        "bisection finished: root={:.12}, residual={:.3e}, iterations={}",
        mid,
        f_mid,
        iterations
    );

    SolverResult {
        root: mid,
        iterations,
        residual: f_mid,
    }
}
