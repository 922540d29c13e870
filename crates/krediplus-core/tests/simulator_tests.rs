use krediplus_core::simulator::{amortization, config::SimulatorConfig, quote};
use krediplus_core::KrediError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Calculator scenarios
// ===========================================================================

#[test]
fn test_one_million_at_one_point_two_percent() {
    let result = amortization::simulate(dec!(1_000_000), dec!(1.2), 12).unwrap();
    let shown = result.rounded(0);

    assert_eq!(shown.monthly_payment, dec!(89_975));
    assert_eq!(shown.total_to_pay, dec!(1_079_705));
    assert_eq!(shown.total_interest, dec!(79_705));
}

#[test]
fn test_one_million_at_one_point_two_five_percent() {
    // The marketing page example: ≈ 90,258 a month, 1,083,100 in total
    let result = amortization::simulate(dec!(1_000_000), dec!(1.25), 12).unwrap();
    let shown = result.rounded(0);

    assert_eq!(shown.monthly_payment, dec!(90_258));
    assert!((result.total_to_pay - dec!(1_083_099.75)).abs() < dec!(0.01));
    assert!((result.total_interest - dec!(83_099.75)).abs() < dec!(0.01));
}

#[test]
fn test_five_million_interest_free() {
    let result = amortization::simulate(dec!(5_000_000), Decimal::ZERO, 24).unwrap();

    assert_eq!(result.rounded(2).monthly_payment, dec!(208_333.33));
    assert_eq!(result.monthly_payment, dec!(5_000_000) / dec!(24));
    assert!(result.total_interest.abs() < dec!(0.000000001));
    assert!((result.total_to_pay - dec!(5_000_000)).abs() < dec!(0.000000001));
}

#[test]
fn test_single_month_for_several_rates() {
    for pct in [dec!(0), dec!(0.5), dec!(1.3), dec!(9.99)] {
        let result = amortization::simulate(dec!(750_000), pct, 1).unwrap();
        let expected = dec!(750_000) * (Decimal::ONE + pct / dec!(100));
        assert!(
            (result.monthly_payment - expected).abs() < dec!(0.000001),
            "rate {pct}: {} != {expected}",
            result.monthly_payment,
        );
    }
}

#[test]
fn test_longer_term_lowers_installment_raises_interest() {
    let short = amortization::simulate(dec!(10_000_000), dec!(1.3), 24).unwrap();
    let long = amortization::simulate(dec!(10_000_000), dec!(1.3), 72).unwrap();

    assert!(long.monthly_payment < short.monthly_payment);
    assert!(long.total_interest > short.total_interest);
}

#[test]
fn test_invalid_arguments_rejected_before_computing() {
    let cases = [
        (dec!(-1), dec!(1.2), 12, "principal"),
        (dec!(1_000_000), dec!(-0.01), 12, "monthly_rate_pct"),
        (dec!(1_000_000), dec!(1.2), 0, "term_months"),
    ];
    for (principal, rate, term, expected_field) in cases {
        match amortization::simulate(principal, rate, term).unwrap_err() {
            KrediError::InvalidArgument { field, .. } => assert_eq!(field, expected_field),
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }
    }
}

// ===========================================================================
// Official quote against the stock policy
// ===========================================================================

#[test]
fn test_quote_matches_rounded_estimate() {
    let config = SimulatorConfig::default();
    let estimate = amortization::simulate(dec!(2_000_000), config.monthly_rate_pct, 36).unwrap();
    let official = quote::quote(&config, dec!(2_000_000), 36).unwrap().result;

    assert_eq!(official.monthly_payment, estimate.monthly_payment.round_dp(2));
    assert_eq!(official.total_to_pay, official.monthly_payment * dec!(36));
    assert_eq!(official.total_interest, official.total_to_pay - dec!(2_000_000));
    // The estimate and the official figures differ by less than a cent a month
    assert!((official.total_to_pay - estimate.total_to_pay).abs() < dec!(0.36));
}

#[test]
fn test_quote_respects_stock_bounds() {
    let config = SimulatorConfig::default();

    assert!(quote::quote(&config, dec!(100_000), 6).is_ok());
    assert!(quote::quote(&config, dec!(100_000_000), 72).is_ok());
    assert!(matches!(
        quote::quote(&config, dec!(99_999), 6).unwrap_err(),
        KrediError::AmountOutOfRange { .. }
    ));
    assert!(matches!(
        quote::quote(&config, dec!(1_000_000), 120).unwrap_err(),
        KrediError::TermNotAvailable { .. }
    ));
}

#[test]
fn test_quote_serializes_money_as_strings() {
    let out = quote::quote(&SimulatorConfig::default(), dec!(1_000_000), 12).unwrap();
    let json = serde_json::to_value(&out).unwrap();

    assert_eq!(json["result"]["requested_amount"], "1000000");
    assert_eq!(json["result"]["term_months"], 12);
    assert!(json["result"]["monthly_payment"].is_string());
}

// ===========================================================================
// Registry-backed flow
// ===========================================================================

#[cfg(feature = "registry")]
mod registry_flow {
    use super::*;
    use krediplus_core::simulator::config::ConfigPatch;
    use krediplus_core::simulator::ConfigRegistry;

    #[test]
    fn test_quotes_follow_the_active_config() {
        let mut registry = ConfigRegistry::with_default();
        let promo = SimulatorConfig::new(dec!(0.9), dec!(500_000), dec!(20_000_000), vec![12, 24]);
        let promo = registry.create(promo).unwrap();
        assert!(!promo.is_active);

        let stock = quote::quote(registry.active().unwrap(), dec!(1_000_000), 12).unwrap();

        registry.activate(promo.id.unwrap()).unwrap();
        let promo_quote = quote::quote(registry.active().unwrap(), dec!(1_000_000), 12).unwrap();

        assert!(promo_quote.result.monthly_payment < stock.result.monthly_payment);
        assert_eq!(promo_quote.result.monthly_rate_pct, dec!(0.9));

        // The promo policy does not lend below 500k
        assert!(quote::quote(registry.active().unwrap(), dec!(200_000), 12).is_err());
    }

    #[test]
    fn test_patched_terms_take_effect() {
        let mut registry = ConfigRegistry::with_default();
        registry
            .modify(
                1,
                &ConfigPatch {
                    available_terms: Some(vec![96, 120]),
                    ..ConfigPatch::default()
                },
            )
            .unwrap();

        let active = registry.active().unwrap();
        assert!(quote::quote(active, dec!(1_000_000), 120).is_ok());
        assert!(quote::quote(active, dec!(1_000_000), 12).is_err());
    }
}
