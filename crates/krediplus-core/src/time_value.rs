use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::KrediError;
use crate::types::{Money, Rate};
use crate::KrediResult;

/// Discount factor `(1 + r)^-n` for `n` whole periods.
///
/// When `(1 + r)^n` exceeds the decimal range the factor is
/// indistinguishable from zero and zero is returned.
pub fn discount_factor(rate: Rate, nper: u32) -> KrediResult<Rate> {
    if rate <= Decimal::NEGATIVE_ONE {
        return Err(KrediError::InvalidArgument {
            field: "rate".into(),
            reason: "Periodic rate must be greater than -100%".into(),
        });
    }

    let one_plus_r = Decimal::ONE
        .checked_add(rate)
        .ok_or_else(|| out_of_range("rate", "Periodic rate is too large"))?;
    match one_plus_r.checked_powi(i64::from(nper)) {
        Some(growth) if !growth.is_zero() => Decimal::ONE
            .checked_div(growth)
            .ok_or_else(|| out_of_range("rate", "Discount factor is outside the decimal range")),
        _ => Ok(Decimal::ZERO),
    }
}

/// Level payment that amortises `principal` over `nper` periods at `rate`.
///
/// Returned as a positive amount, not with the spreadsheet PMT sign
/// convention. A zero rate spreads the principal evenly. A zero annuity
/// denominator yields a zero payment. A payment too large for a `Decimal`
/// is an `InvalidArgument` error, never a panic.
pub fn annuity_payment(principal: Money, rate: Rate, nper: u32) -> KrediResult<Money> {
    if nper == 0 {
        return Err(KrediError::InvalidArgument {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let denominator = Decimal::ONE - discount_factor(rate, nper)?;
    if denominator.is_zero() {
        log::warn!(
            "annuity denominator is zero (rate={rate}, nper={nper}); payment reported as 0"
        );
        return Ok(Decimal::ZERO);
    }

    principal
        .checked_mul(rate)
        .and_then(|interest| interest.checked_div(denominator))
        .ok_or_else(|| out_of_range("principal", "Installment exceeds the decimal range for this principal and rate"))
}

fn out_of_range(field: &str, reason: &str) -> KrediError {
    KrediError::InvalidArgument {
        field: field.into(),
        reason: reason.into(),
    }
}
