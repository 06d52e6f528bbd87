//! Independent curve builds over one pillar set.
//!
//! Bootstrapping is inherently sequential, but once pillars exist each
//! interpolation method calibrates independently. With the `parallel`
//! feature (default) the builds run on the rayon pool.

use crate::curve::ZeroCurve;
use crate::error::CurveResult;
use crate::instruments::CurvePoint;
use crate::interpolation::InterpolationMethod;

/// Builds one curve per method from the same pillars.
///
/// Results are returned in the order of `methods`; a failing method does not
/// affect the others.
///
/// # Example
///
/// ```rust
/// use zerocurve_curves::instruments::CurvePoint;
/// use zerocurve_curves::interpolation::InterpolationMethod;
/// use zerocurve_curves::parallel::build_curves;
///
/// let points = vec![CurvePoint::new(1.0, 0.02), CurvePoint::new(5.0, 0.03)];
/// let curves = build_curves(&points, &InterpolationMethod::all(0.035, 0.1));
///
/// assert_eq!(curves.len(), 4);
/// assert!(curves.iter().all(|(_, c)| c.is_ok()));
/// ```
#[cfg(feature = "parallel")]
#[must_use]
pub fn build_curves(
    points: &[CurvePoint],
    methods: &[InterpolationMethod],
) -> Vec<(InterpolationMethod, CurveResult<ZeroCurve>)> {
    use rayon::prelude::*;

    methods
        .par_iter()
        .map(|method| (*method, ZeroCurve::new(points.to_vec(), method)))
        .collect()
}

/// Builds one curve per method from the same pillars (sequential fallback).
#[cfg(not(feature = "parallel"))]
#[must_use]
pub fn build_curves(
    points: &[CurvePoint],
    methods: &[InterpolationMethod],
) -> Vec<(InterpolationMethod, CurveResult<ZeroCurve>)> {
    methods
        .iter()
        .map(|method| (*method, ZeroCurve::new(points.to_vec(), method)))
        .collect()
}
