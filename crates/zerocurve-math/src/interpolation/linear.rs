//! Linear interpolation.

use crate::error::MathResult;
use crate::interpolation::{find_segment, validate_points, Interpolator};

/// Linear interpolation between pillars.
///
/// The simplest form of interpolation, connecting consecutive points
/// with straight lines. Values outside the pillar range are held flat at
/// the boundary pillar.
///
/// # Example
///
/// ```rust
/// use zerocurve_math::interpolation::{LinearInterpolator, Interpolator};
///
/// let xs = vec![0.0, 2.0];
/// let ys = vec![0.01, 0.03];
///
/// let interp = LinearInterpolator::new(xs, ys).unwrap();
/// assert!((interp.interpolate(1.0) - 0.02).abs() < 1e-15);
/// assert_eq!(interp.interpolate(5.0), 0.03);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
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
        Ok(Self { xs, ys })
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> f64 {
        let n = self.xs.len();
        if n == 1 || x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[n - 1] {
            return self.ys[n - 1];
        }

        let i = find_segment(&self.xs, x);

        let x0 = self.xs[i];
        let x1 = self.xs[i + 1];
        let w = (x - x0) / (x1 - x0);

        (1.0 - w) * self.ys[i] + w * self.ys[i + 1]
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    fn name(&self) -> &'static str {
        "Linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_interpolation() {
        let interp = LinearInterpolator::new(vec![0.0, 2.0], vec![0.01, 0.03]).unwrap();

        // Test at exact points
        assert_relative_eq!(interp.interpolate(0.0), 0.01, epsilon = 1e-15);
        assert_relative_eq!(interp.interpolate(2.0), 0.03, epsilon = 1e-15);

        // Test interpolation
        assert_relative_eq!(interp.interpolate(1.0), 0.02, epsilon = 1e-15);
        assert_relative_eq!(interp.interpolate(0.5), 0.015, epsilon = 1e-15);
    }

    #[test]
    fn test_flat_extrapolation() {
        let interp =
            LinearInterpolator::new(vec![1.0, 2.0, 5.0], vec![0.02, 0.025, 0.03]).unwrap();

        assert_eq!(interp.interpolate(0.25), 0.02);
        assert_eq!(interp.interpolate(-1.0), 0.02);
        assert_eq!(interp.interpolate(7.0), 0.03);
        assert_eq!(interp.interpolate(100.0), 0.03);
    }

    #[test]
    fn test_single_point_is_constant() {
        let interp = LinearInterpolator::new(vec![1.0], vec![0.0198]).unwrap();

        for t in [0.1, 1.0, 10.0] {
            assert_eq!(interp.interpolate(t), 0.0198);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(LinearInterpolator::new(vec![], vec![]).is_err());
    }

    #[test]
    fn test_unsorted_error() {
        let xs = vec![1.0, 0.0, 2.0]; // Not sorted
        let ys = vec![1.0, 0.0, 2.0];

        assert!(LinearInterpolator::new(xs, ys).is_err());
    }
}
