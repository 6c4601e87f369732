//! Property-based tests for CPF formatting and validation.

use proptest::prelude::*;

use super::{
    Cpf, CpfError, FORMATTED_CPF_LENGTH, check_digit, format_cpf, mask_cpf_input, validate_cpf,
};

/// Strategy to generate 9 base digits that are not all the same.
fn base_digits() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..10, 9).prop_filter("digits must not all repeat", |d| {
        d.iter().any(|&x| x != d[0])
    })
}

/// Appends both check digits to `base`.
fn with_check_digits(mut digits: Vec<u8>) -> Vec<u8> {
    digits.push(check_digit(&digits));
    digits.push(check_digit(&digits));
    digits
}

fn to_text(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any base with correctly computed check digits validates.
    #[test]
    fn prop_valid_checksums_accepted(base in base_digits()) {
        let text = to_text(&with_check_digits(base));
        prop_assert!(validate_cpf(&text), "{} should be valid", text);
        prop_assert!(validate_cpf(&format_cpf(&text)));
    }

    /// Changing the last check digit always invalidates the CPF.
    #[test]
    fn prop_wrong_second_digit_rejected(base in base_digits(), bump in 1u8..10) {
        let mut digits = with_check_digits(base);
        digits[10] = (digits[10] + bump) % 10;
        let text = to_text(&digits);
        prop_assert!(!validate_cpf(&text));
    }

    /// One digit repeated 11 times is never valid.
    #[test]
    fn prop_repeated_digits_rejected(d in 0u8..10) {
        let text = to_text(&[d; 11]);
        prop_assert_eq!(Cpf::parse(&text), Err(CpfError::RepeatedDigits));
    }

    /// Formatting keeps every digit in order and adds only separators.
    #[test]
    fn prop_format_preserves_digits(input in "[0-9a-z. -]{0,20}") {
        let formatted = format_cpf(&input);
        let kept: String = formatted.chars().filter(char::is_ascii_digit).collect();
        let original: String = input.chars().filter(char::is_ascii_digit).collect();
        prop_assert_eq!(kept, original);
        prop_assert!(formatted.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-'));
    }

    /// Output grows with the digit count and stops at 14 chars for 11 digits.
    #[test]
    fn prop_format_length_monotonic(digits in "[0-9]{0,11}") {
        let len = format_cpf(&digits).len();
        prop_assert!(len <= FORMATTED_CPF_LENGTH);
        if !digits.is_empty() {
            let shorter = format_cpf(&digits[..digits.len() - 1]).len();
            prop_assert!(shorter < len);
        }
    }

    /// Formatting is idempotent.
    #[test]
    fn prop_format_idempotent(digits in "[0-9]{0,14}") {
        let once = format_cpf(&digits);
        prop_assert_eq!(format_cpf(&once), once.clone());
        prop_assert!(mask_cpf_input(&digits).len() <= FORMATTED_CPF_LENGTH);
    }
}
