use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value::annuity_payment;
use crate::{pct_to_rate, KrediError, KrediResult, Money, Percent};

/// Smallest positive monthly rate accepted, in percent.
///
/// Below it the interest carried by `(1 + r)^-n` falls under the 28-digit
/// resolution of `Decimal` and the installment collapses to `P / n`, as if
/// the loan were interest free.
pub const MIN_POSITIVE_RATE_PCT: Percent = dec!(0.0000000001);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Requested loan amount.
    pub principal: Money,
    /// Monthly interest rate as a percentage (1.2 = 1.2% per month).
    pub monthly_rate_pct: Percent,
    /// Number of monthly installments.
    pub term_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Fixed installment due each month.
    pub monthly_payment: Money,
    /// `monthly_payment * term_months`
    pub total_to_pay: Money,
    /// `total_to_pay - principal`
    pub total_interest: Money,
}

impl SimulationInput {
    pub fn simulate(&self) -> KrediResult<SimulationResult> {
        simulate(self.principal, self.monthly_rate_pct, self.term_months)
    }
}

impl SimulationResult {
    /// Round every figure to `dp` decimal places for display.
    pub fn rounded(&self, dp: u32) -> SimulationResult {
        let round = |v: Money| v.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        SimulationResult {
            monthly_payment: round(self.monthly_payment),
            total_to_pay: round(self.total_to_pay),
            total_interest: round(self.total_interest),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Fixed monthly installment and totals for a standard amortising loan.
///
/// `monthly_payment = P·r / (1 - (1 + r)^-n)` with `r = monthly_rate_pct / 100`,
/// or `P / n` when the rate is zero. No rounding is applied.
///
/// Positive rates under [`MIN_POSITIVE_RATE_PCT`] and loans whose totals do
/// not fit in a `Decimal` are rejected with `InvalidArgument`.
pub fn simulate(
    principal: Money,
    monthly_rate_pct: Percent,
    term_months: u32,
) -> KrediResult<SimulationResult> {
    validate_input(principal, monthly_rate_pct, term_months)?;

    let rate = pct_to_rate(monthly_rate_pct);
    let monthly_payment = annuity_payment(principal, rate, term_months)?;
    let total_to_pay = monthly_payment
        .checked_mul(Decimal::from(term_months))
        .ok_or_else(|| KrediError::InvalidArgument {
            field: "principal".into(),
            reason: "Total to pay exceeds the decimal range.".into(),
        })?;
    let total_interest = total_to_pay - principal;

    log::debug!(
        "simulated principal={principal} rate={monthly_rate_pct}% term={term_months}: payment={monthly_payment}"
    );

    Ok(SimulationResult {
        monthly_payment,
        total_to_pay,
        total_interest,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(principal: Money, monthly_rate_pct: Percent, term_months: u32) -> KrediResult<()> {
    if principal <= Decimal::ZERO {
        return Err(KrediError::InvalidArgument {
            field: "principal".into(),
            reason: "Principal must be positive.".into(),
        });
    }
    if monthly_rate_pct < Decimal::ZERO {
        return Err(KrediError::InvalidArgument {
            field: "monthly_rate_pct".into(),
            reason: "Monthly rate cannot be negative.".into(),
        });
    }
    if monthly_rate_pct > Decimal::ZERO && monthly_rate_pct < MIN_POSITIVE_RATE_PCT {
        return Err(KrediError::InvalidArgument {
            field: "monthly_rate_pct".into(),
            reason: format!("Positive monthly rate must be at least {MIN_POSITIVE_RATE_PCT}%."),
        });
    }
    if term_months == 0 {
        return Err(KrediError::InvalidArgument {
            field: "term_months".into(),
            reason: "Term must be at least one month.".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
