//! Property-based tests for BRL formatting and parsing.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{format_currency_brl, mask_price_input, parse_currency_brl};

/// Strategy to generate non-negative amounts with 2 decimals (0.00 to 10,000,000,000.00).
fn non_negative_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate signed amounts with 2 decimals.
fn signed_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Formatting then parsing returns the original amount.
    #[test]
    fn prop_round_trip(amount in non_negative_amount()) {
        let text = format_currency_brl(amount);
        prop_assert_eq!(parse_currency_brl(&text), amount, "via {}", text);
    }

    /// The round trip also holds for amounts arriving as `f64`.
    #[test]
    fn prop_round_trip_from_float(whole in 0u64..100_000_000, cents in 0u8..100) {
        let literal = format!("{whole}.{cents:02}");
        let value: f64 = literal.parse().unwrap();
        let expected: Decimal = literal.parse().unwrap();
        prop_assert_eq!(parse_currency_brl(&format_currency_brl(value)), expected);
    }

    /// Negative amounts survive the round trip too.
    #[test]
    fn prop_round_trip_signed(amount in signed_amount()) {
        prop_assert_eq!(parse_currency_brl(&format_currency_brl(amount)), amount);
    }

    /// Output always has the `R$ ` prefix and exactly two fraction digits.
    #[test]
    fn prop_format_shape(amount in non_negative_amount()) {
        let text = format_currency_brl(amount);
        prop_assert!(text.starts_with("R$ "));
        let (_, fraction) = text.rsplit_once(',').unwrap();
        prop_assert_eq!(fraction.len(), 2);
        prop_assert!(fraction.chars().all(|c| c.is_ascii_digit()));
    }

    /// Parsing never panics and always yields a number.
    #[test]
    fn prop_parse_total(input in "\\PC{0,24}") {
        let _ = parse_currency_brl(&input);
    }

    /// The price mask output is a fixed point of parse-then-format.
    #[test]
    fn prop_mask_is_stable(raw in "[0-9]{0,15}") {
        let masked = mask_price_input(&raw);
        prop_assert_eq!(format_currency_brl(parse_currency_brl(&masked)), masked);
    }
}
