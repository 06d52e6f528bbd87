//! Repricing diagnostics for bootstrapped curves.
//!
//! Each input instrument is re-quoted off the final curve: deposits by their
//! simple rate, swaps by their par rate and bonds by their clean price. The
//! difference to the market quote shows how far interpolation between
//! pillars moved the curve away from the discounting used while
//! bootstrapping.
//!
//! Reports are informational. A failing check never changes a pillar or
//! fails a build.
//!
//! # Usage
//!
//! ```rust
//! use zerocurve_curves::bootstrap::SequentialBootstrapper;
//! use zerocurve_curves::instruments::MarketInstrument;
//! use zerocurve_curves::interpolation::InterpolationMethod;
//!
//! let result = SequentialBootstrapper::new()
//!     .bootstrap_validated(
//!         &[MarketInstrument::deposit(0.5, 0.03), MarketInstrument::deposit(1.0, 0.032)],
//!         &InterpolationMethod::Linear,
//!     )
//!     .unwrap();
//!
//! assert!(result.is_valid());
//! assert!(result.repricing_report.max_error() < 1e-12);
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::bootstrap::payment_count;
use crate::curve::ZeroCurve;
use crate::instruments::{InstrumentKind, MarketInstrument};

/// Repricing tolerances by instrument kind.
///
/// | Kind | Quote | Tolerance |
/// |------|-------|-----------|
/// | Deposit | Simple rate | 1e-9 |
/// | Swap | Par rate | 1e-4 (1bp) |
/// | Bond | Price per unit face | 1e-4 |
pub mod tolerances {
    use crate::instruments::InstrumentKind;

    /// Deposit rate tolerance - near machine precision
    pub const DEPOSIT: f64 = 1e-9;

    /// Swap par rate tolerance
    pub const SWAP: f64 = 1e-4;

    /// Bond price tolerance per unit face
    pub const BOND: f64 = 1e-4;

    /// Get tolerance for an instrument kind
    #[must_use]
    pub fn for_kind(kind: InstrumentKind) -> f64 {
        match kind {
            InstrumentKind::Deposit => DEPOSIT,
            InstrumentKind::Swap => SWAP,
            InstrumentKind::Bond => BOND,
        }
    }
}

/// Result of re-quoting a single instrument off the curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepricingCheck {
    /// Description of the instrument (e.g., "Swap 5.00Y @ 3.2500%")
    pub instrument: String,

    /// Type of instrument
    pub kind: InstrumentKind,

    /// Market quote
    pub quoted: f64,

    /// Curve-implied quote
    pub model: f64,

    /// Signed error `model - quoted`
    pub error: f64,

    /// Tolerance for this instrument kind
    pub tolerance: f64,

    /// Whether `|error| <= tolerance`
    pub passed: bool,
}

impl RepricingCheck {
    /// Creates a new repricing check result.
    #[must_use]
    pub fn new(
        instrument: String,
        kind: InstrumentKind,
        quoted: f64,
        model: f64,
        tolerance: f64,
    ) -> Self {
        let error = model - quoted;

        Self {
            instrument,
            kind,
            quoted,
            model,
            error,
            tolerance,
            passed: error.abs() <= tolerance,
        }
    }

    /// Re-quotes `instrument` off `curve` with the kind's default tolerance.
    #[must_use]
    pub fn from_instrument(instrument: &MarketInstrument, curve: &ZeroCurve) -> Self {
        let (quoted, model) = match instrument.kind {
            InstrumentKind::Deposit => (instrument.rate, model_deposit_rate(instrument, curve)),
            InstrumentKind::Swap => (instrument.rate, model_par_rate(instrument, curve)),
            InstrumentKind::Bond => (instrument.price_fraction, model_bond_price(instrument, curve)),
        };

        Self::new(
            instrument.description(),
            instrument.kind,
            quoted,
            model,
            tolerances::for_kind(instrument.kind),
        )
    }
}

impl fmt::Display for RepricingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "✓" } else { "✗" };
        write!(
            f,
            "{} {} | Model: {:.8} | Error: {:+.2e} (tol: {:.0e})",
            status, self.instrument, self.model, self.error, self.tolerance
        )
    }
}

/// Repricing results for a full instrument set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepricingReport {
    checks: Vec<RepricingCheck>,
}

impl RepricingReport {
    /// Creates a report from individual checks.
    #[must_use]
    pub fn new(checks: Vec<RepricingCheck>) -> Self {
        Self { checks }
    }

    /// Re-quotes every instrument off `curve`.
    #[must_use]
    pub fn from_curve(curve: &ZeroCurve, instruments: &[MarketInstrument]) -> Self {
        Self::new(
            instruments
                .iter()
                .map(|inst| RepricingCheck::from_instrument(inst, curve))
                .collect(),
        )
    }

    /// Returns the individual checks.
    #[must_use]
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Largest absolute error.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.checks.iter().map(|c| c.error.abs()).fold(0.0_f64, f64::max)
    }

    /// Root mean square of all errors.
    #[must_use]
    pub fn rms_error(&self) -> f64 {
        if self.checks.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self.checks.iter().map(|c| c.error * c.error).sum();
        (sum_sq / self.checks.len() as f64).sqrt()
    }

    /// Returns whether every check passed its kind's tolerance.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Checks whose absolute error exceeds `tolerance`.
    #[must_use]
    pub fn failed(&self, tolerance: f64) -> Vec<&RepricingCheck> {
        self.checks
            .iter()
            .filter(|c| c.error.abs() > tolerance)
            .collect()
    }

    /// Checks that failed their kind's tolerance.
    #[must_use]
    pub fn failed_checks(&self) -> Vec<&RepricingCheck> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }

    /// Number of checks that passed.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }
}

impl fmt::Display for RepricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Repricing Report")?;
        writeln!(f, "================")?;
        writeln!(f, "Status: {}", if self.is_valid() { "PASSED" } else { "FAILED" })?;
        writeln!(f, "Instruments: {}/{} passed", self.passed_count(), self.checks.len())?;
        writeln!(f, "Max Error: {:.2e}", self.max_error())?;
        writeln!(f, "RMS Error: {:.2e}", self.rms_error())?;

        if !self.checks.is_empty() {
            writeln!(f)?;
            writeln!(f, "Details:")?;
            for check in &self.checks {
                writeln!(f, "  {check}")?;
            }
        }

        Ok(())
    }
}

/// A bootstrapped curve together with its repricing report.
#[derive(Debug, Clone)]
pub struct BootstrapResult {
    /// The bootstrapped curve.
    pub curve: ZeroCurve,

    /// Repricing diagnostics for the input instruments.
    pub repricing_report: RepricingReport,

    /// Time taken to bootstrap and build the curve.
    pub build_duration: Duration,
}

impl BootstrapResult {
    /// Creates a new bootstrap result.
    #[must_use]
    pub fn new(curve: ZeroCurve, repricing_report: RepricingReport, build_duration: Duration) -> Self {
        Self {
            curve,
            repricing_report,
            build_duration,
        }
    }

    /// Returns whether every instrument repriced within tolerance.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.repricing_report.is_valid()
    }

    /// Consumes the result and returns the curve.
    #[must_use]
    pub fn into_curve(self) -> ZeroCurve {
        self.curve
    }
}

fn model_deposit_rate(inst: &MarketInstrument, curve: &ZeroCurve) -> f64 {
    let t = inst.maturity_years;
    (1.0 / curve.df(t) - 1.0) / t
}

fn model_par_rate(inst: &MarketInstrument, curve: &ZeroCurve) -> f64 {
    let t = inst.maturity_years;
    let n = payment_count(t, inst.fixed_freq);
    let dt = t / f64::from(n);

    let annuity: f64 = (1..=n).map(|k| dt * curve.df(f64::from(k) * dt)).sum();
    (1.0 - curve.df(t)) / annuity
}

fn model_bond_price(inst: &MarketInstrument, curve: &ZeroCurve) -> f64 {
    let t = inst.maturity_years;
    if inst.is_zero_coupon() {
        return curve.df(t);
    }

    let n = payment_count(t, inst.fixed_freq);
    let dt = t / f64::from(n);
    let coupon_cf = inst.coupon_pct / 100.0 * dt;

    let coupons: f64 = (1..=n).map(|k| coupon_cf * curve.df(f64::from(k) * dt)).sum();
    coupons + curve.df(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::SequentialBootstrapper;
    use crate::interpolation::InterpolationMethod;
    use approx::assert_relative_eq;

    #[test]
    fn test_check_sign_and_pass() {
        let check = RepricingCheck::new("x".into(), InstrumentKind::Swap, 0.03, 0.0302, 1e-4);
        assert_relative_eq!(check.error, 0.0002, epsilon = 1e-15);
        assert!(!check.passed);
    }

    #[test]
    fn test_pillar_instruments_reprice_exactly() {
        let instruments = [
            MarketInstrument::deposit(0.5, 0.030),
            MarketInstrument::swap(1.0, 0.032, 1),
            MarketInstrument::zero_coupon_bond(2.0, 0.935).unwrap(),
        ];

        let result = SequentialBootstrapper::new()
            .bootstrap_validated(&instruments, &InterpolationMethod::Linear)
            .unwrap();

        assert!(result.is_valid(), "{}", result.repricing_report);
        assert!(result.repricing_report.max_error() < 1e-10);
        assert!(result.repricing_report.failed(1e-10).is_empty());
    }

    #[test]
    fn test_interpolated_swap_has_small_error() {
        let instruments = [
            MarketInstrument::deposit(1.0, 0.030),
            MarketInstrument::swap(2.0, 0.032, 2),
            MarketInstrument::swap(5.0, 0.035, 2),
        ];

        let report = SequentialBootstrapper::new()
            .bootstrap_validated(&instruments, &InterpolationMethod::Linear)
            .unwrap()
            .repricing_report;

        assert_eq!(report.checks().len(), 3);
        assert!(report.max_error() < 5e-3, "{report}");
        assert!(report.rms_error() <= report.max_error());
    }

    #[test]
    fn test_failed_filters_by_tolerance() {
        let report = RepricingReport::new(vec![
            RepricingCheck::new("a".into(), InstrumentKind::Deposit, 0.02, 0.02, 1e-9),
            RepricingCheck::new("b".into(), InstrumentKind::Bond, 0.99, 0.985, 1e-4),
        ]);

        assert_eq!(report.failed(1e-3).len(), 1);
        assert_eq!(report.failed_checks()[0].instrument, "b");
        assert_eq!(report.passed_count(), 1);
        assert!(!report.is_valid());
        assert!(report.to_string().contains("FAILED"));
    }

    #[test]
    fn test_empty_report() {
        let report = RepricingReport::new(vec![]);
        assert_eq!(report.max_error(), 0.0);
        assert_eq!(report.rms_error(), 0.0);
        assert!(report.is_valid());
    }
}
