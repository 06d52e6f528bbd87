//! # Zerocurve Math
//!
//! Numerical kernels for the Zerocurve term structure library.
//!
//! This crate provides:
//!
//! - **Solvers**: Bracketed bisection with a fixed iteration budget
//! - **Linear Algebra**: Tridiagonal sweep and pivoted Gaussian elimination
//! - **Interpolation**: Linear, natural cubic spline, monotone Hermite
//!   (Hagan-West) and Smith-Wilson interpolators over zero rates
//! - **Tolerances**: The named numeric floors shared by every kernel
//!
//! ## Design Philosophy
//!
//! - **Build once, evaluate many**: interpolators calibrate in their
//!   constructor and are immutable afterwards
//! - **Total evaluation**: every interpolator extrapolates, so evaluation
//!   never fails
//! - **Numerical Stability**: tiny pivots and discount factors are floored,
//!   never reported

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod interpolation;
pub mod linear_algebra;
pub mod solvers;
pub mod tolerances;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{
        CubicSpline, HaganWest, Interpolator, LinearInterpolator, SmithWilson,
    };
    pub use crate::solvers::{bisection, bisection_unchecked, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
