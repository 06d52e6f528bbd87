//! Sequential bootstrap algorithm.
//!
//! Solves for each instrument's zero rate in maturity order, discounting
//! intermediate cash flows on the pillars resolved so far.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use zerocurve_math::solvers::{bisection, SolverConfig, DEFAULT_MAX_ITERATIONS};
use zerocurve_math::tolerances::TENOR_EPSILON;
use zerocurve_math::MathError;

use super::defaults;
use crate::curve::ZeroCurve;
use crate::error::{CurveError, CurveResult};
use crate::instruments::{prepare_instruments, CurvePoint, InstrumentKind, MarketInstrument};
use crate::interpolation::InterpolationMethod;
use crate::repricing::{BootstrapResult, RepricingReport};

/// Configuration for sequential bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequentialBootstrapConfig {
    /// Search interval for swap zero rates.
    pub rate_bracket: (f64, f64),
    /// Maximum bisection halvings per swap.
    pub max_iterations: u32,
    /// Early-exit tolerance on the swap pricing residual.
    pub swap_tolerance: f64,
    /// Exclusive upper bound for bond-implied discount factors.
    pub max_discount_factor: f64,
}

impl Default for SequentialBootstrapConfig {
    fn default() -> Self {
        Self {
            rate_bracket: defaults::RATE_BRACKET,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            swap_tolerance: defaults::SWAP_TOLERANCE,
            max_discount_factor: defaults::MAX_DISCOUNT_FACTOR,
        }
    }
}

impl SequentialBootstrapConfig {
    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an empty or non-finite bracket, a zero
    /// iteration budget, or a non-positive tolerance or discount-factor cap.
    pub fn validate(&self) -> CurveResult<()> {
        let (lo, hi) = self.rate_bracket;
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(CurveError::invalid_config(format!(
                "rate_bracket must satisfy lo < hi, got ({lo}, {hi})"
            )));
        }
        if self.max_iterations == 0 {
            return Err(CurveError::invalid_config("max_iterations must be positive"));
        }
        if !(self.swap_tolerance.is_finite() && self.swap_tolerance > 0.0) {
            return Err(CurveError::invalid_config(format!(
                "swap_tolerance must be positive, got {}",
                self.swap_tolerance
            )));
        }
        if !(self.max_discount_factor.is_finite() && self.max_discount_factor > 0.0) {
            return Err(CurveError::invalid_config(format!(
                "max_discount_factor must be positive, got {}",
                self.max_discount_factor
            )));
        }
        Ok(())
    }
}

/// Sequential bootstrapper for zero curves.
///
/// The sequential bootstrap algorithm:
/// 1. Validate instruments, drop `(kind, maturity)` duplicates, sort by maturity
/// 2. For each instrument, solve its zero rate against the pillars resolved so far
/// 3. Append the pillar (replacing any pillar already at that maturity)
///
/// # Example
///
/// ```rust
/// use zerocurve_curves::bootstrap::SequentialBootstrapper;
/// use zerocurve_curves::instruments::MarketInstrument;
///
/// let pillars = SequentialBootstrapper::new()
///     .bootstrap(&[MarketInstrument::deposit(1.0, 0.02)])
///     .unwrap();
///
/// let expected = -(1.0_f64 / 1.02).ln();
/// assert!((pillars[0].zero_rate - expected).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SequentialBootstrapper {
    config: SequentialBootstrapConfig,
}

impl SequentialBootstrapper {
    /// Creates a bootstrapper with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bootstrap configuration.
    #[must_use]
    pub fn with_config(mut self, config: SequentialBootstrapConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the bootstrap configuration.
    #[must_use]
    pub fn config(&self) -> &SequentialBootstrapConfig {
        &self.config
    }

    /// Bootstraps curve pillars from market instruments.
    ///
    /// # Returns
    ///
    /// One pillar per surviving instrument, sorted by maturity.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No instruments are provided
    /// - An instrument or the configuration is invalid
    /// - A swap's bracket does not bound a root
    /// - A deposit or bond implies a discount factor outside `(0, max)`
    pub fn bootstrap(&self, instruments: &[MarketInstrument]) -> CurveResult<Vec<CurvePoint>> {
        let prepared = self.prepare(instruments)?;
        self.resolve_all(&prepared)
    }

    /// Bootstraps pillars, builds the curve and reprices every instrument.
    ///
    /// Repricing never fails the build; inspect the report.
    ///
    /// # Errors
    ///
    /// Returns an error if bootstrap or curve construction fails.
    pub fn bootstrap_validated(
        &self,
        instruments: &[MarketInstrument],
        method: &InterpolationMethod,
    ) -> CurveResult<BootstrapResult> {
        let start = Instant::now();

        let prepared = self.prepare(instruments)?;
        let pillars = self.resolve_all(&prepared)?;
        let curve = ZeroCurve::new(pillars, method)?;
        let report = RepricingReport::from_curve(&curve, &prepared);

        Ok(BootstrapResult::new(curve, report, start.elapsed()))
    }

    fn prepare(&self, instruments: &[MarketInstrument]) -> CurveResult<Vec<MarketInstrument>> {
        self.config.validate()?;
        if instruments.is_empty() {
            return Err(CurveError::insufficient_points(1, 0));
        }
        for inst in instruments {
            inst.validate()?;
        }
        Ok(prepare_instruments(instruments))
    }

    fn resolve_all(&self, prepared: &[MarketInstrument]) -> CurveResult<Vec<CurvePoint>> {
        let mut pillars: Vec<CurvePoint> = Vec::with_capacity(prepared.len());

        for inst in prepared {
            let zero_rate = match inst.kind {
                InstrumentKind::Deposit => self.resolve_deposit(inst)?,
                InstrumentKind::Swap => self.resolve_swap(inst, &pillars)?,
                InstrumentKind::Bond => self.resolve_bond(inst, &pillars)?,
            };

            let point = CurvePoint::new(inst.maturity_years, zero_rate);
            log::debug!(
                "resolved {inst}: zero {:.6}% df {:.10}",
                zero_rate * 100.0,
                point.discount_factor()
            );

            // A different kind quoted at the same maturity replaces the pillar
            if let Some(last) = pillars.last() {
                if (last.maturity - point.maturity).abs() < TENOR_EPSILON {
                    log::warn!(
                        "{inst} replaces pillar at {:.4}Y (zero {:.6}%)",
                        last.maturity,
                        last.zero_rate * 100.0
                    );
                    pillars.pop();
                }
            }

            pillars.push(point);
        }

        pillars.sort_by(|a, b| a.maturity.total_cmp(&b.maturity));
        Ok(pillars)
    }

    fn resolve_deposit(&self, inst: &MarketInstrument) -> CurveResult<f64> {
        let t = inst.maturity_years;
        let df = 1.0 / (1.0 + inst.rate * t);

        if !(df > 0.0 && df < self.config.max_discount_factor) {
            return Err(CurveError::bootstrap_failed(
                inst.description(),
                format!(
                    "implied discount factor {df} outside (0, {})",
                    self.config.max_discount_factor
                ),
            ));
        }

        Ok(-df.ln() / t)
    }

    fn resolve_swap(&self, inst: &MarketInstrument, resolved: &[CurvePoint]) -> CurveResult<f64> {
        let t = inst.maturity_years;
        let n = payment_count(t, inst.fixed_freq);
        let dt = t / f64::from(n);
        let rate = inst.rate;

        let interior: f64 = (1..n)
            .map(|k| interpolated_discount_factor(resolved, f64::from(k) * dt, rate))
            .sum();

        // Fixed leg against the 1 - DF(T) floating-leg approximation
        let residual = |z: f64| {
            let df_t = (-z * t).exp();
            let fixed = rate * dt * (interior + df_t);
            let floating = 1.0 - df_t;
            fixed - floating
        };

        let (lo, hi) = self.config.rate_bracket;
        let solver = SolverConfig::new(self.config.swap_tolerance, self.config.max_iterations);

        match bisection(residual, lo, hi, &solver) {
            Ok(result) => {
                log::trace!(
                    "{inst}: z={:.12} after {} iterations (residual {:.2e})",
                    result.root,
                    result.iterations,
                    result.residual
                );
                Ok(result.root)
            }
            Err(MathError::InvalidBracket { a, b, fa, fb }) => Err(CurveError::bootstrap_failed(
                inst.description(),
                format!(
                    "zero-rate bracket does not bound a root: f({a})={fa:.6e}, f({b})={fb:.6e} \
                     ({n} payments, interior DF sum {interior:.10})"
                ),
            )),
            Err(e) => Err(e.into()),
        }
    }

    fn resolve_bond(&self, inst: &MarketInstrument, resolved: &[CurvePoint]) -> CurveResult<f64> {
        let t = inst.maturity_years;
        let price = inst.price_fraction;

        let (df_t, detail) = if inst.is_zero_coupon() {
            (price, format!("zero-coupon price {price}"))
        } else {
            let n = payment_count(t, inst.fixed_freq);
            let dt = t / f64::from(n);
            let coupon_cf = inst.coupon_pct / 100.0 * dt;

            let interim_pv: f64 = (1..n)
                .map(|k| {
                    coupon_cf * interpolated_discount_factor(resolved, f64::from(k) * dt, inst.rate)
                })
                .sum();
            let final_cf = coupon_cf + 1.0;

            (
                (price - interim_pv) / final_cf,
                format!(
                    "price {price}, interim coupon PV {interim_pv:.10}, final cash flow {final_cf:.10}"
                ),
            )
        };

        if !(df_t > 0.0 && df_t < self.config.max_discount_factor) {
            return Err(CurveError::bootstrap_failed(
                inst.description(),
                format!(
                    "implied discount factor {df_t:.10} outside (0, {}): {detail}",
                    self.config.max_discount_factor
                ),
            ));
        }

        Ok(-df_t.ln() / t)
    }
}

/// Bootstraps pillars with the default configuration.
///
/// # Errors
///
/// See [`SequentialBootstrapper::bootstrap`].
pub fn build_zero_curve(instruments: &[MarketInstrument]) -> CurveResult<Vec<CurvePoint>> {
    SequentialBootstrapper::new().bootstrap(instruments)
}

/// Discount factor at `t` from already-resolved pillars.
///
/// - `t <= 0` gives 1
/// - no pillars yet: flat at `fallback_rate`
/// - outside the pillar range: flat at the nearest pillar's zero rate
/// - otherwise: linear in zero rate between the bracketing pillars
///
/// `resolved` must be sorted by maturity.
#[must_use]
pub fn interpolated_discount_factor(resolved: &[CurvePoint], t: f64, fallback_rate: f64) -> f64 {
    if t <= 0.0 {
        return 1.0;
    }
    let (Some(first), Some(last)) = (resolved.first(), resolved.last()) else {
        return (-fallback_rate * t).exp();
    };

    let z = if t <= first.maturity {
        first.zero_rate
    } else if t >= last.maturity {
        last.zero_rate
    } else {
        let i = resolved.partition_point(|p| p.maturity <= t);
        let (a, b) = (resolved[i - 1], resolved[i]);
        let w = (t - a.maturity) / (b.maturity - a.maturity);
        (1.0 - w) * a.zero_rate + w * b.zero_rate
    };

    (-z * t).exp()
}

/// Number of fixed payments, at least one.
pub(crate) fn payment_count(maturity_years: f64, freq: u32) -> u32 {
    (maturity_years * f64::from(freq)).round().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_deposit() {
        let pillars = build_zero_curve(&[MarketInstrument::deposit(1.0, 0.02)]).unwrap();

        assert_eq!(pillars.len(), 1);
        assert_relative_eq!(
            pillars[0].zero_rate,
            -(1.0_f64 / (1.0 + 0.02)).ln(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_one_period_swap_matches_deposit_df() {
        let pillars = build_zero_curve(&[MarketInstrument::swap(1.0, 0.03, 1)]).unwrap();

        // rate·DF + DF = 1
        assert_relative_eq!(pillars[0].discount_factor(), 1.0 / 1.03, epsilon = 1e-11);
    }

    #[test]
    fn test_swap_uses_prior_pillars() {
        let pillars = build_zero_curve(&[
            MarketInstrument::deposit(1.0, 0.02),
            MarketInstrument::swap(2.0, 0.025, 1),
        ])
        .unwrap();

        let df1 = 1.0 / 1.02;
        let df2 = pillars[1].discount_factor();
        // Par condition under the floating-leg approximation
        assert_relative_eq!(0.025 * (df1 + df2), 1.0 - df2, epsilon = 1e-11);
    }

    #[test]
    fn test_swap_bracket_failure_is_reported() {
        let err = build_zero_curve(&[MarketInstrument::swap(5.0, 0.60, 1)]).unwrap_err();

        match err {
            CurveError::BootstrapFailed { instrument, reason } => {
                assert!(instrument.starts_with("Swap 5.00Y"));
                assert!(reason.contains("bracket"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_coupon_bond() {
        let bond = MarketInstrument::zero_coupon_bond(2.0, 0.95).unwrap();
        let pillars = build_zero_curve(&[bond]).unwrap();

        assert_relative_eq!(pillars[0].zero_rate, -(0.95_f64).ln() / 2.0, epsilon = 1e-15);
    }

    #[test]
    fn test_coupon_bond_closed_form() {
        let bond = MarketInstrument::bond(2.0, 4.0, 1, 1.0, 0.04);
        let pillars = build_zero_curve(&[MarketInstrument::deposit(1.0, 0.03), bond]).unwrap();

        let df1 = 1.0 / 1.03;
        let df2 = (1.0 - 0.04 * df1) / 1.04;
        assert_relative_eq!(pillars[1].discount_factor(), df2, epsilon = 1e-14);
    }

    #[test]
    fn test_bond_price_out_of_range() {
        let bond = MarketInstrument::bond(1.0, 0.0, 0, 1.6, -0.3);
        assert!(matches!(
            build_zero_curve(&[bond]),
            Err(CurveError::BootstrapFailed { .. })
        ));
    }

    #[test]
    fn test_same_maturity_replaces_pillar() {
        let pillars = build_zero_curve(&[
            MarketInstrument::deposit(2.0, 0.02),
            MarketInstrument::swap(2.0, 0.03, 1),
        ])
        .unwrap();

        assert_eq!(pillars.len(), 1);
        assert!(pillars[0].zero_rate > 0.025);
    }

    #[test]
    fn test_output_sorted_regardless_of_input_order() {
        let pillars = build_zero_curve(&[
            MarketInstrument::swap(5.0, 0.035, 1),
            MarketInstrument::deposit(0.5, 0.02),
            MarketInstrument::swap(2.0, 0.03, 1),
            MarketInstrument::deposit(1.0, 0.025),
        ])
        .unwrap();

        let tenors: Vec<f64> = pillars.iter().map(|p| p.maturity).collect();
        assert_eq!(tenors, vec![0.5, 1.0, 2.0, 5.0]);
    }

    #[test]
    fn test_empty_and_invalid_input() {
        assert!(matches!(
            build_zero_curve(&[]),
            Err(CurveError::InsufficientPoints { .. })
        ));
        assert!(matches!(
            build_zero_curve(&[MarketInstrument::swap(5.0, 0.03, 0)]),
            Err(CurveError::InvalidInstrument { .. })
        ));
    }

    #[test]
    fn test_invalid_config() {
        let config = SequentialBootstrapConfig {
            rate_bracket: (0.2, -0.05),
            ..Default::default()
        };
        let result = SequentialBootstrapper::new()
            .with_config(config)
            .bootstrap(&[MarketInstrument::deposit(1.0, 0.02)]);
        assert!(matches!(result, Err(CurveError::InvalidConfig { .. })));
    }

    #[test]
    fn test_interpolated_discount_factor() {
        let resolved = [CurvePoint::new(1.0, 0.02), CurvePoint::new(3.0, 0.04)];

        assert_eq!(interpolated_discount_factor(&resolved, 0.0, 0.05), 1.0);
        assert_eq!(interpolated_discount_factor(&resolved, -1.0, 0.05), 1.0);
        assert_relative_eq!(
            interpolated_discount_factor(&[], 2.0, 0.05),
            (-0.1_f64).exp(),
            epsilon = 1e-15
        );
        assert_relative_eq!(
            interpolated_discount_factor(&resolved, 0.5, 0.05),
            (-0.01_f64).exp(),
            epsilon = 1e-15
        );
        assert_relative_eq!(
            interpolated_discount_factor(&resolved, 2.0, 0.05),
            (-0.06_f64).exp(),
            epsilon = 1e-15
        );
        assert_relative_eq!(
            interpolated_discount_factor(&resolved, 10.0, 0.05),
            (-0.4_f64).exp(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_payment_count() {
        assert_eq!(payment_count(5.0, 2), 10);
        assert_eq!(payment_count(0.25, 1), 1);
        assert_eq!(payment_count(2.4, 1), 2);
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: SequentialBootstrapConfig =
            serde_json::from_str(r#"{"max_iterations": 60}"#).unwrap();
        assert_eq!(config.max_iterations, 60);
        assert_eq!(config.rate_bracket, defaults::RATE_BRACKET);
    }
}
