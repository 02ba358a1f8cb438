//! Percentage calculations over cent amounts
//!
//! All ratios are computed in exact decimal arithmetic and rounded half away
//! from zero, so that the same inputs always give the same displayed figure.

use rust_decimal::{Decimal, RoundingStrategy};

use super::money::{decimal_to_f64, Money};
use crate::error::FinanceResult;

/// Options controlling how a percentage is rounded and bounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentOptions {
    /// Clamp the result into `[0, 100]`
    pub clamp: bool,
    /// Number of fraction digits to keep
    pub decimals: u32,
}

impl Default for PercentOptions {
    fn default() -> Self {
        Self {
            clamp: true,
            decimals: 2,
        }
    }
}

impl PercentOptions {
    /// Signed, unclamped percentage (e.g. savings rate)
    pub fn unclamped() -> Self {
        Self {
            clamp: false,
            ..Self::default()
        }
    }

    /// Set the number of fraction digits
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }
}

/// Compute `part / total * 100`, rounded half-up to `opts.decimals` digits
///
/// A non-positive `total` yields `0.0` instead of an error so that empty
/// dashboards render. With `opts.clamp` the result is bounded to `[0, 100]`.
///
/// # Errors
///
/// [`FinanceError::AmountOutOfRange`] when either amount is not a safe integer.
///
/// # Examples
/// ```
/// use finance_core::models::{percentage, Money, PercentOptions};
/// let opts = PercentOptions::default();
/// let pct = percentage(Money::from_cents(2500), Money::from_cents(20000), opts).unwrap();
/// assert_eq!(pct, 12.5);
/// ```
pub fn percentage(part: Money, total: Money, opts: PercentOptions) -> FinanceResult<f64> {
    let part = part.ensure_safe()?;
    let total = total.ensure_safe()?;

    if !total.is_positive() {
        return Ok(0.0);
    }

    let ratio = Decimal::from(part.cents()) * Decimal::ONE_HUNDRED / Decimal::from(total.cents());
    let mut rounded =
        ratio.round_dp_with_strategy(opts.decimals, RoundingStrategy::MidpointAwayFromZero);

    if opts.clamp {
        rounded = rounded.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    }

    decimal_to_f64(rounded)
}
