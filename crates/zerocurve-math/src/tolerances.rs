//! Named numeric floors.
//!
//! Every silent clamp in the workspace goes through one of these constants.
//! None of them is reported as an error: a value this small means the curve
//! is far outside any economically meaningful region.

/// Lower bound applied to a Smith-Wilson discount factor before taking its log.
pub const DISCOUNT_FACTOR_FLOOR: f64 = 1e-10;

/// Lower bound applied to a curve discount factor when differentiating its log.
pub const LOG_DISCOUNT_FLOOR: f64 = 1e-12;

/// Smallest pivot magnitude used by Gaussian elimination.
pub const PIVOT_FLOOR: f64 = 1e-14;

/// Smallest tenor used by finite-difference stencils near `t = 0`.
pub const MIN_TENOR: f64 = 1e-6;

/// Two abscissae closer than this are treated as the same maturity.
pub const TENOR_EPSILON: f64 = 1e-12;

/// Smallest diagonal magnitude accepted by the tridiagonal sweep.
pub const TRIDIAGONAL_PIVOT_FLOOR: f64 = 1e-15;
