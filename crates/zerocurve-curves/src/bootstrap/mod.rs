//! Curve bootstrap.
//!
//! Instruments are resolved one at a time in ascending maturity. Each
//! resolved pillar is appended to an immutable snapshot that prices every
//! later instrument, so short-end quotes shape the discounting used for the
//! long end.
//!
//! # Example
//!
//! ```rust
//! use zerocurve_curves::bootstrap::SequentialBootstrapper;
//! use zerocurve_curves::instruments::MarketInstrument;
//!
//! let pillars = SequentialBootstrapper::new()
//!     .bootstrap(&[
//!         MarketInstrument::deposit(0.5, 0.030),
//!         MarketInstrument::deposit(1.0, 0.032),
//!         MarketInstrument::swap(2.0, 0.034, 1),
//!         MarketInstrument::swap(5.0, 0.036, 1),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(pillars.len(), 4);
//! assert!(pillars.windows(2).all(|w| w[0].maturity < w[1].maturity));
//! ```

mod sequential;

pub(crate) use sequential::payment_count;
pub use sequential::{
    build_zero_curve, interpolated_discount_factor, SequentialBootstrapConfig,
    SequentialBootstrapper,
};

/// Default numerical settings for the sequential bootstrap.
pub mod defaults {
    /// Search interval for a swap's zero rate.
    pub const RATE_BRACKET: (f64, f64) = (-0.05, 0.20);

    /// Early-exit tolerance on the swap pricing residual.
    pub const SWAP_TOLERANCE: f64 = 1e-12;

    /// Bond-implied discount factors must lie in `(0, MAX_DISCOUNT_FACTOR)`.
    pub const MAX_DISCOUNT_FACTOR: f64 = 1.5;
}
