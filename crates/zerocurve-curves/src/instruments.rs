//! Market instruments and curve pillars.
//!
//! Maturities are plain year fractions. Rates are decimals, coupons are
//! percentages of face and prices are fractions of face:
//!
//! | Kind | `rate` | `coupon_pct` | `fixed_freq` | `price_fraction` |
//! |------|--------|--------------|--------------|------------------|
//! | Deposit | Simple money-market rate | - | - | - |
//! | Swap | Par fixed rate | - | Fixed-leg payments per year | - |
//! | Bond | Yield (discounting proxy) | Annual coupon, 0 = zero-coupon | Coupons per year | Clean price |

use std::fmt;

use serde::{Deserialize, Serialize};
use zerocurve_math::tolerances::TENOR_EPSILON;

use crate::error::{CurveError, CurveResult};
use crate::yield_solver::compute_yield;

/// Type of market instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    /// Money-market deposit.
    Deposit,
    /// Fixed-for-floating par swap.
    Swap,
    /// Coupon or zero-coupon bond.
    Bond,
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Deposit => "Deposit",
            Self::Swap => "Swap",
            Self::Bond => "Bond",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for InstrumentKind {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deposit" | "depo" | "cash" => Ok(Self::Deposit),
            "swap" | "irs" => Ok(Self::Swap),
            "bond" | "zero" | "bill" => Ok(Self::Bond),
            other => Err(CurveError::invalid_instrument(format!(
                "unknown instrument kind '{other}'"
            ))),
        }
    }
}

/// One quoted market instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketInstrument {
    /// Instrument type.
    pub kind: InstrumentKind,
    /// Time to maturity in years.
    pub maturity_years: f64,
    /// Quoted rate; meaning depends on `kind`.
    pub rate: f64,
    /// Annual coupon in percent of face (bonds only).
    #[serde(default)]
    pub coupon_pct: f64,
    /// Payments per year (0 for deposits and zero-coupon bonds).
    #[serde(default)]
    pub fixed_freq: u32,
    /// Clean price as a fraction of face (bonds only).
    #[serde(default = "par_price")]
    pub price_fraction: f64,
}

fn par_price() -> f64 {
    1.0
}

impl MarketInstrument {
    /// Creates a deposit.
    #[must_use]
    pub fn deposit(maturity_years: f64, rate: f64) -> Self {
        Self {
            kind: InstrumentKind::Deposit,
            maturity_years,
            rate,
            coupon_pct: 0.0,
            fixed_freq: 0,
            price_fraction: 1.0,
        }
    }

    /// Creates a par swap paying `fixed_freq` fixed coupons per year.
    #[must_use]
    pub fn swap(maturity_years: f64, rate: f64, fixed_freq: u32) -> Self {
        Self {
            kind: InstrumentKind::Swap,
            maturity_years,
            rate,
            coupon_pct: 0.0,
            fixed_freq,
            price_fraction: 1.0,
        }
    }

    /// Creates a bond with a known yield.
    #[must_use]
    pub fn bond(
        maturity_years: f64,
        coupon_pct: f64,
        fixed_freq: u32,
        price_fraction: f64,
        yield_rate: f64,
    ) -> Self {
        Self {
            kind: InstrumentKind::Bond,
            maturity_years,
            rate: yield_rate,
            coupon_pct,
            fixed_freq,
            price_fraction,
        }
    }

    /// Creates a bond and derives its yield from the price.
    ///
    /// # Errors
    ///
    /// Returns an error if the yield cannot be computed (non-positive
    /// maturity or price).
    pub fn bond_from_price(
        maturity_years: f64,
        coupon_pct: f64,
        fixed_freq: u32,
        price_fraction: f64,
    ) -> CurveResult<Self> {
        let y = compute_yield(coupon_pct, maturity_years, price_fraction * 100.0)?;
        Ok(Self::bond(maturity_years, coupon_pct, fixed_freq, price_fraction, y))
    }

    /// Creates a zero-coupon bond.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive maturity or price.
    pub fn zero_coupon_bond(maturity_years: f64, price_fraction: f64) -> CurveResult<Self> {
        Self::bond_from_price(maturity_years, 0.0, 0, price_fraction)
    }

    /// Returns true for a bond without coupons.
    #[must_use]
    pub fn is_zero_coupon(&self) -> bool {
        self.kind == InstrumentKind::Bond && self.coupon_pct == 0.0
    }

    /// Checks the instrument's fields for its kind.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInstrument` describing the first problem found.
    pub fn validate(&self) -> CurveResult<()> {
        let fail = |reason: String| {
            Err(CurveError::invalid_instrument(format!(
                "{}: {reason}",
                self.description()
            )))
        };

        if !(self.maturity_years.is_finite() && self.maturity_years > 0.0) {
            return fail(format!("maturity must be positive, got {}", self.maturity_years));
        }
        if !self.rate.is_finite() {
            return fail("rate must be finite".to_string());
        }

        match self.kind {
            InstrumentKind::Deposit => {}
            InstrumentKind::Swap => {
                if self.fixed_freq == 0 {
                    return fail("swap fixed frequency must be positive".to_string());
                }
            }
            InstrumentKind::Bond => {
                if !(self.price_fraction.is_finite() && self.price_fraction > 0.0) {
                    return fail(format!("price must be positive, got {}", self.price_fraction));
                }
                if !(self.coupon_pct.is_finite() && self.coupon_pct >= 0.0) {
                    return fail(format!("coupon must be non-negative, got {}", self.coupon_pct));
                }
                if self.coupon_pct > 0.0 && self.fixed_freq == 0 {
                    return fail("coupon bond frequency must be positive".to_string());
                }
            }
        }

        Ok(())
    }

    /// Returns a short human-readable description.
    #[must_use]
    pub fn description(&self) -> String {
        match self.kind {
            InstrumentKind::Deposit | InstrumentKind::Swap => format!(
                "{} {:.2}Y @ {:.4}%",
                self.kind,
                self.maturity_years,
                self.rate * 100.0
            ),
            InstrumentKind::Bond => format!(
                "Bond {:.2}Y {:.3}% @ {:.4}",
                self.maturity_years,
                self.coupon_pct,
                self.price_fraction * 100.0
            ),
        }
    }

    fn same_pillar(&self, other: &Self) -> bool {
        self.kind == other.kind && (self.maturity_years - other.maturity_years).abs() < TENOR_EPSILON
    }
}

impl fmt::Display for MarketInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A solved curve pillar: continuously compounded zero rate at a maturity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Maturity in years.
    pub maturity: f64,
    /// Continuously compounded zero rate.
    pub zero_rate: f64,
}

impl CurvePoint {
    /// Creates a new pillar.
    #[must_use]
    pub fn new(maturity: f64, zero_rate: f64) -> Self {
        Self {
            maturity,
            zero_rate,
        }
    }

    /// Discount factor implied by the pillar.
    #[must_use]
    pub fn discount_factor(&self) -> f64 {
        (-self.zero_rate * self.maturity).exp()
    }
}

/// Deduplicates and orders instruments for a bootstrap run.
///
/// Instruments sharing `(kind, maturity)` collapse to the last one seen; the
/// survivors are then stably sorted by maturity.
#[must_use]
pub fn prepare_instruments(instruments: &[MarketInstrument]) -> Vec<MarketInstrument> {
    let mut kept: Vec<MarketInstrument> = Vec::with_capacity(instruments.len());

    for inst in instruments {
        if let Some(pos) = kept.iter().position(|k| k.same_pillar(inst)) {
            let dropped = kept.remove(pos);
            log::warn!("duplicate instrument {dropped} replaced by {inst}");
        }
        kept.push(*inst);
    }

    kept.sort_by(|a, b| a.maturity_years.total_cmp(&b.maturity_years));
    kept
}
