use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::amortization::simulate;
use super::config::SimulatorConfig;
use crate::{with_metadata, ComputationOutput, KrediError, KrediResult, Money, Percent, CURRENCY_DP};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// What a prospective borrower asks the official simulator for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub amount: Money,
    pub term_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationQuote {
    pub requested_amount: Money,
    pub term_months: u32,
    pub monthly_rate_pct: Percent,
    pub monthly_payment: Money,
    pub total_to_pay: Money,
    pub total_interest: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub amount_valid: bool,
    pub term_valid: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Check a request against `config` without failing, collecting every
/// violation.
pub fn validate_parameters(config: &SimulatorConfig, amount: Money, term_months: u32) -> ValidationReport {
    let mut errors = Vec::new();

    if amount < config.min_amount {
        errors.push(format!("The minimum amount is {}", config.min_amount));
    }
    if amount > config.max_amount {
        errors.push(format!("The maximum amount is {}", config.max_amount));
    }

    let term_valid = config.allows_term(term_months);
    if !term_valid {
        errors.push(format!("Available terms: {:?}", config.available_terms));
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        amount_valid: config.allows_amount(amount),
        term_valid,
    }
}

/// Official quote: the request must fit the configuration, the installment
/// is rounded to cents and the totals are derived from that installment.
pub fn quote(
    config: &SimulatorConfig,
    amount: Money,
    term_months: u32,
) -> KrediResult<ComputationOutput<SimulationQuote>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if !config.allows_amount(amount) {
        log::warn!(
            "quote rejected: amount {amount} outside [{}, {}]",
            config.min_amount,
            config.max_amount
        );
        return Err(KrediError::AmountOutOfRange {
            amount,
            min: config.min_amount,
            max: config.max_amount,
        });
    }
    if !config.allows_term(term_months) {
        log::warn!("quote rejected: term {term_months} not offered");
        return Err(KrediError::TermNotAvailable {
            term: term_months,
            available: config.available_terms.clone(),
        });
    }

    let estimate = simulate(amount, config.monthly_rate_pct, term_months)?;
    let monthly_payment = estimate
        .monthly_payment
        .round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointNearestEven);
    let total_to_pay = monthly_payment
        .checked_mul(Decimal::from(term_months))
        .ok_or_else(|| KrediError::InvalidArgument {
            field: "amount".into(),
            reason: "Total to pay exceeds the decimal range.".into(),
        })?;
    let total_interest = total_to_pay - amount;

    if total_interest > amount {
        warnings.push("Total interest exceeds the requested amount.".into());
    }

    let output = SimulationQuote {
        requested_amount: amount,
        term_months,
        monthly_rate_pct: config.monthly_rate_pct,
        monthly_payment,
        total_to_pay,
        total_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "config_id": config.id,
        "monthly_rate_pct": config.monthly_rate_pct.to_string(),
        "installment_rounding_dp": CURRENCY_DP,
    });

    Ok(with_metadata(
        "Fixed-rate annuity (French amortisation), installment rounded to cents",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn active_config() -> SimulatorConfig {
        let mut config = SimulatorConfig::new(dec!(1.5), dec!(100_000), dec!(50_000_000), vec![12, 24, 36, 48]);
        config.id = Some(1);
        config.is_active = true;
        config
    }

    #[test]
    fn test_quote_success() {
        let out = quote(&active_config(), dec!(1_000_000), 12).unwrap();
        let q = &out.result;
        assert_eq!(q.requested_amount, dec!(1_000_000));
        assert_eq!(q.term_months, 12);
        assert_eq!(q.monthly_rate_pct, dec!(1.5));
        // 1,000,000 at 1.5% over 12 months ≈ 91,679.99
        assert_eq!(q.monthly_payment, dec!(91_679.99));
        assert_eq!(q.total_to_pay, dec!(1_100_159.88));
        assert_eq!(q.total_interest, dec!(100_159.88));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_quote_amount_below_minimum() {
        let mut config = active_config();
        config.min_amount = dec!(500_000);
        let err = quote(&config, dec!(200_000), 12).unwrap_err();
        match err {
            KrediError::AmountOutOfRange { amount, min, .. } => {
                assert_eq!(amount, dec!(200_000));
                assert_eq!(min, dec!(500_000));
            }
            other => panic!("Expected AmountOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_quote_amount_above_maximum() {
        let err = quote(&active_config(), dec!(60_000_000), 12).unwrap_err();
        assert!(matches!(err, KrediError::AmountOutOfRange { .. }));
    }

    #[test]
    fn test_quote_term_not_offered() {
        let err = quote(&active_config(), dec!(1_000_000), 6).unwrap_err();
        match err {
            KrediError::TermNotAvailable { term, available } => {
                assert_eq!(term, 6);
                assert_eq!(available, vec![12, 24, 36, 48]);
            }
            other => panic!("Expected TermNotAvailable, got {other:?}"),
        }
    }

    #[test]
    fn test_quote_warns_on_heavy_interest() {
        let mut config = active_config();
        config.monthly_rate_pct = dec!(5);
        let out = quote(&config, dec!(1_000_000), 48).unwrap();
        assert!(out.result.total_interest > dec!(1_000_000));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_quote_metadata_populated() {
        let out = quote(&active_config(), dec!(1_000_000), 24).unwrap();
        assert!(!out.methodology.is_empty());
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
        assert_eq!(out.assumptions["config_id"], 1);
    }

    #[test]
    fn test_quote_beyond_decimal_range_is_an_error() {
        let mut config = active_config();
        config.monthly_rate_pct = dec!(10);
        config.max_amount = Decimal::MAX;
        config.available_terms = vec![60, 120];

        let huge = Decimal::MAX / dec!(2);
        let err = quote(&config, huge, 60).unwrap_err();
        assert!(matches!(err, KrediError::InvalidArgument { .. }));
    }

    #[test]
    fn test_validate_parameters_all_good() {
        let report = validate_parameters(&active_config(), dec!(1_000_000), 24);
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert!(report.amount_valid);
        assert!(report.term_valid);
    }

    #[test]
    fn test_validate_parameters_collects_every_error() {
        let report = validate_parameters(&active_config(), dec!(50_000), 7);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2);
        assert!(!report.amount_valid);
        assert!(!report.term_valid);
    }

    #[test]
    fn test_validate_parameters_above_maximum() {
        let report = validate_parameters(&active_config(), dec!(50_000_001), 12);
        assert!(!report.valid);
        assert_eq!(report.errors, vec!["The maximum amount is 50000000".to_string()]);
        assert!(report.term_valid);
    }
}
