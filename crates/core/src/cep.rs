//! CEP (postal code) input mask.

/// Number of digits in a CEP.
pub const CEP_LENGTH: usize = 8;

/// Length of a formatted CEP (`#####-###`).
pub const FORMATTED_CEP_LENGTH: usize = 9;

/// Formats the digits of `input` as `#####-###`, dropping digits past the 8th.
#[must_use]
pub fn format_cep(input: &str) -> String {
    let mut formatted = String::with_capacity(FORMATTED_CEP_LENGTH);
    for (i, ch) in input
        .chars()
        .filter(char::is_ascii_digit)
        .take(CEP_LENGTH)
        .enumerate()
    {
        if i == 5 {
            formatted.push('-');
        }
        formatted.push(ch);
    }
    formatted
}

/// Returns the bare digits of a CEP once all 8 have been typed.
#[must_use]
pub fn cep_digits(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    (digits.len() == CEP_LENGTH).then_some(digits)
}

/// Returns true if `value` is a fully typed CEP in masked form.
#[must_use]
pub fn is_complete_cep(value: &str) -> bool {
    value.chars().count() == FORMATTED_CEP_LENGTH
}
