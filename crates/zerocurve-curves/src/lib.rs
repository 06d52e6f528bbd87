//! # Zerocurve Curves
//!
//! Zero-coupon term structure construction for the Zerocurve library.
//!
//! This crate provides:
//!
//! - **Instruments**: Deposits, par swaps and coupon/zero-coupon bonds
//! - **Yield Solver**: Bond yield-to-maturity from a clean price
//! - **Bootstrap**: Sequential pillar-by-pillar zero-rate resolution
//! - **Curve**: [`ZeroCurve`] with zero rate, discount factor and
//!   instantaneous forward queries
//! - **Analysis**: Finite-difference slope and convexity
//! - **Repricing**: Re-quoting inputs off the final curve
//!
//! ## Quick Start
//!
//! ```rust
//! use zerocurve_curves::prelude::*;
//!
//! let instruments = [
//!     MarketInstrument::deposit(0.25, 0.0300),
//!     MarketInstrument::deposit(1.0, 0.0320),
//!     MarketInstrument::swap(2.0, 0.0335, 1),
//!     MarketInstrument::swap(5.0, 0.0350, 1),
//!     MarketInstrument::swap(10.0, 0.0370, 1),
//! ];
//!
//! let pillars = build_zero_curve(&instruments).unwrap();
//! let curve = ZeroCurve::new(pillars, &InterpolationMethod::HaganWest).unwrap();
//!
//! let z = curve.zero(7.0);
//! let df = curve.df(7.0);
//! let fwd = curve.forward_instantaneous(7.0);
//! assert!(z > 0.0 && df < 1.0 && fwd > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod analysis;
pub mod bootstrap;
pub mod config;
pub mod curve;
pub mod error;
pub mod instruments;
pub mod interpolation;
pub mod parallel;
pub mod repricing;
pub mod yield_solver;

pub use curve::ZeroCurve;
pub use error::{CurveError, CurveResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analysis::{analyze, convexity, slope, standard_tenors, CurveMetric};
    pub use crate::bootstrap::{
        build_zero_curve, interpolated_discount_factor, SequentialBootstrapConfig,
        SequentialBootstrapper,
    };
    pub use crate::config::CurveBuildConfig;
    pub use crate::curve::ZeroCurve;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::instruments::{
        prepare_instruments, CurvePoint, InstrumentKind, MarketInstrument,
    };
    pub use crate::interpolation::InterpolationMethod;
    pub use crate::parallel::build_curves;
    pub use crate::repricing::{BootstrapResult, RepricingCheck, RepricingReport};
    pub use crate::yield_solver::{compute_yield, YieldSolver};
}
