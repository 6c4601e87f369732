//! CPF (Cadastro de Pessoas Físicas) formatting and validation.
//!
//! A CPF is 11 decimal digits where the last two are modulo-11 check digits
//! over the preceding ones. Input arrives keystroke by keystroke, so every
//! function here accepts partially formatted text and ignores anything that
//! is not an ASCII digit.

pub mod error;

#[cfg(test)]
mod props;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::CpfError;

/// Number of digits in a CPF.
pub const CPF_LENGTH: usize = 11;

/// Length of a fully formatted CPF (`###.###.###-##`).
pub const FORMATTED_CPF_LENGTH: usize = 14;

/// Formats the digits of `input` as `###.###.###-##`, as far as they go.
///
/// Separators are inserted before the 4th and 7th digits (`.`) and before the
/// 10th digit (`-`). Digits past the 11th are kept; truncation is up to the
/// caller (see [`mask_cpf_input`]).
#[must_use]
pub fn format_cpf(input: &str) -> String {
    let mut formatted = String::with_capacity(FORMATTED_CPF_LENGTH);
    for (i, ch) in input.chars().filter(char::is_ascii_digit).enumerate() {
        match i {
            3 | 6 => formatted.push('.'),
            9 => formatted.push('-'),
            _ => {}
        }
        formatted.push(ch);
    }
    formatted
}

/// Input mask for a CPF text field: formats and cuts at 14 characters.
#[must_use]
pub fn mask_cpf_input(input: &str) -> String {
    format_cpf(input)
        .chars()
        .take(FORMATTED_CPF_LENGTH)
        .collect()
}

/// Returns true if `input` holds a valid CPF.
///
/// Separators are ignored. Sequences of one repeated digit are rejected even
/// though they satisfy the check-digit arithmetic.
#[must_use]
pub fn validate_cpf(input: &str) -> bool {
    match Cpf::parse(input) {
        Ok(_) => true,
        Err(err) => {
            debug!(reason = %err, "CPF rejected");
            false
        }
    }
}

/// Computes the check digit for `digits`, weighting them from
/// `digits.len() + 1` down to 2.
fn check_digit(digits: &[u8]) -> u8 {
    let top_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=top_weight).rev())
        .map(|(&d, weight)| u32::from(d) * weight)
        .sum();

    match 11 - sum % 11 {
        10 | 11 => 0,
        // always < 10 here
        check => check as u8,
    }
}

/// A valid CPF.
///
/// Displays and serializes as the formatted `###.###.###-##` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf([u8; CPF_LENGTH]);

impl Cpf {
    /// Parses and validates a CPF, ignoring non-digit characters.
    ///
    /// # Errors
    ///
    /// Returns the first rule the input breaks: length, repeated digits,
    /// first check digit, then second check digit.
    pub fn parse(input: &str) -> Result<Self, CpfError> {
        let values: Vec<u8> = input
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();

        let digits: [u8; CPF_LENGTH] = values
            .as_slice()
            .try_into()
            .map_err(|_| CpfError::WrongLength(values.len()))?;

        if digits.iter().all(|&d| d == digits[0]) {
            return Err(CpfError::RepeatedDigits);
        }

        for (position, len) in [(1, 9), (2, 10)] {
            let expected = check_digit(&digits[..len]);
            let found = digits[len];
            if expected != found {
                return Err(CpfError::CheckDigitMismatch {
                    position,
                    expected,
                    found,
                });
            }
        }

        Ok(Self(digits))
    }

    /// Returns the 11 digit values.
    #[must_use]
    pub const fn digits(&self) -> &[u8; CPF_LENGTH] {
        &self.0
    }

    /// Returns the bare 11-digit string.
    #[must_use]
    pub fn unformatted(&self) -> String {
        self.0.iter().map(|d| char::from(b'0' + d)).collect()
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_cpf(&self.unformatted()))
    }
}

impl FromStr for Cpf {
    type Err = CpfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cpf {
    type Error = CpfError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cpf> for String {
    fn from(cpf: Cpf) -> Self {
        cpf.to_string()
    }
}
