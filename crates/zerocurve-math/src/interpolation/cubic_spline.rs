//! Natural cubic spline interpolation.

use crate::error::MathResult;
use crate::interpolation::{find_segment, validate_points, Interpolator};
use crate::linear_algebra::solve_tridiagonal;

/// Polynomial on one spline segment, evaluated in `dx = x - x_i`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SplineSegment {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl SplineSegment {
    #[inline]
    fn eval(&self, dx: f64) -> f64 {
        self.a + dx * (self.b + dx * (self.c + dx * self.d))
    }
}

/// Natural cubic spline interpolation.
///
/// Constructs a smooth curve through data points using piecewise cubic
/// polynomials with continuous first and second derivatives.
///
/// "Natural" means the second derivative is zero at the endpoints. With two
/// pillars the spline degenerates to the straight line between them; with a
/// single pillar it is constant. Outside the pillar range values are held flat.
///
/// # Example
///
/// ```rust
/// use zerocurve_math::interpolation::{CubicSpline, Interpolator};
///
/// let xs = vec![0.5, 1.0, 2.0, 5.0];
/// let ys = vec![0.020, 0.024, 0.029, 0.035];
///
/// let spline = CubicSpline::new(xs, ys).unwrap();
/// let z = spline.interpolate(3.0);
/// assert!(z > 0.029 && z < 0.035);
/// ```
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    segments: Vec<SplineSegment>,
}

impl CubicSpline {
    /// Creates a natural cubic spline interpolator.
    ///
    /// # Arguments
    ///
    /// * `xs` - X coordinates (must be strictly increasing)
    /// * `ys` - Y coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if there are no points, lengths differ or `xs` is not
    /// strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_points(&xs, &ys)?;

        let segments = if xs.len() < 2 {
            Vec::new()
        } else {
            let y2s = compute_second_derivatives(&xs, &ys)?;
            build_segments(&xs, &ys, &y2s)
        };

        Ok(Self { xs, ys, segments })
    }
}

impl Interpolator for CubicSpline {
    fn interpolate(&self, x: f64) -> f64 {
        let n = self.xs.len();
        if n == 1 || x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[n - 1] {
            return self.ys[n - 1];
        }

        let i = find_segment(&self.xs, x);
        self.segments[i].eval(x - self.xs[i])
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    fn name(&self) -> &'static str {
        "Cubic Spline"
    }
}

/// Computes the second derivatives for natural cubic spline.
///
/// Interior knots satisfy
/// `h[i-1]·M[i-1] + 2(h[i-1]+h[i])·M[i] + h[i]·M[i+1] = 6(δ[i] - δ[i-1])`
/// with `M[0] = M[n-1] = 0`.
fn compute_second_derivatives(xs: &[f64], ys: &[f64]) -> MathResult<Vec<f64>> {
    let n = xs.len();
    let mut y2s = vec![0.0; n];
    if n < 3 {
        return Ok(y2s);
    }

    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let delta: Vec<f64> = (0..n - 1).map(|i| (ys[i + 1] - ys[i]) / h[i]).collect();

    let m = n - 2;
    let lower: Vec<f64> = (1..m).map(|k| h[k]).collect();
    let diag: Vec<f64> = (1..=m).map(|i| 2.0 * (h[i - 1] + h[i])).collect();
    let upper: Vec<f64> = (1..m).map(|k| h[k]).collect();
    let rhs: Vec<f64> = (1..=m).map(|i| 6.0 * (delta[i] - delta[i - 1])).collect();

    let interior = solve_tridiagonal(&lower, &diag, &upper, &rhs)?;
    y2s[1..=m].copy_from_slice(&interior);

    Ok(y2s)
}

fn build_segments(xs: &[f64], ys: &[f64], y2s: &[f64]) -> Vec<SplineSegment> {
    (0..xs.len() - 1)
        .map(|i| {
            let h = xs[i + 1] - xs[i];
            SplineSegment {
                a: ys[i],
                b: (ys[i + 1] - ys[i]) / h - h * (2.0 * y2s[i] + y2s[i + 1]) / 6.0,
                c: y2s[i] / 2.0,
                d: (y2s[i + 1] - y2s[i]) / (6.0 * h),
            }
        })
        .collect()
}
