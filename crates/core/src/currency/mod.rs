//! Brazilian Real formatting and parsing for form inputs.
//!
//! Both directions are total: unparseable input degrades to zero instead of
//! failing, because they run on every keystroke of a price field.

mod number;

#[cfg(test)]
mod props;

use cadastro_shared::Brl;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use number::parse_numeric_prefix;

/// Most digits the price mask keeps; more would not fit a `Decimal`.
pub const MAX_PRICE_DIGITS: usize = 26;

/// A value handed to [`format_currency_brl`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurrencyInput<'a> {
    /// A binary floating-point number, as produced by numeric form fields.
    Number(f64),
    /// An exact decimal amount.
    Decimal(Decimal),
    /// Numeric text such as `"1234.5"`, read leniently.
    Text(&'a str),
}

impl CurrencyInput<'_> {
    /// Coerces the input to a decimal, or `None` if it is not a number.
    #[must_use]
    pub fn to_decimal(self) -> Option<Decimal> {
        match self {
            Self::Number(value) => Decimal::from_f64(value),
            Self::Decimal(value) => Some(value),
            Self::Text(text) => parse_numeric_prefix(text),
        }
    }
}

impl From<f64> for CurrencyInput<'_> {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CurrencyInput<'_> {
    fn from(value: i64) -> Self {
        Self::Decimal(Decimal::from(value))
    }
}

impl From<i32> for CurrencyInput<'_> {
    fn from(value: i32) -> Self {
        Self::Decimal(Decimal::from(value))
    }
}

impl From<u64> for CurrencyInput<'_> {
    fn from(value: u64) -> Self {
        Self::Decimal(Decimal::from(value))
    }
}

impl From<Decimal> for CurrencyInput<'_> {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<Brl> for CurrencyInput<'_> {
    fn from(value: Brl) -> Self {
        Self::Decimal(value.amount())
    }
}

impl<'a> From<&'a str> for CurrencyInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for CurrencyInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

/// Formats a value as BRL currency text, e.g. `R$ 1.234,50`.
///
/// Anything that is not a number (NaN, infinities, text without a numeric
/// prefix) formats as `R$ 0,00`.
#[must_use]
pub fn format_currency_brl<'a>(value: impl Into<CurrencyInput<'a>>) -> String {
    let input = value.into();
    let amount = input.to_decimal().unwrap_or_else(|| {
        debug!(?input, "not a number, formatting as zero");
        Decimal::ZERO
    });
    Brl::new(amount).to_string()
}

/// Parses BRL text, complete or partially typed, into an amount.
///
/// Drops `R`, `$`, whitespace and grouping dots, turns the first `,` into the
/// decimal point and reads the longest numeric prefix. Empty or unparseable
/// input yields zero.
#[must_use]
pub fn parse_currency_brl(value: &str) -> Decimal {
    if value.is_empty() {
        return Decimal::ZERO;
    }

    let stripped: String = value
        .chars()
        .filter(|c| !matches!(c, 'R' | '$' | '.') && !c.is_whitespace())
        .collect();
    let normalized = stripped.replacen(',', ".", 1);

    parse_numeric_prefix(&normalized).unwrap_or_else(|| {
        debug!(input = value, "unparseable currency text, reading as zero");
        Decimal::ZERO
    })
}

/// Input mask for a price field.
///
/// Treats every digit typed so far as a count of centavos, so typing
/// `1`, `2`, `3` shows `R$ 0,01`, `R$ 0,12`, `R$ 1,23`. Only the first
/// [`MAX_PRICE_DIGITS`] digits are used.
#[must_use]
pub fn mask_price_input(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_PRICE_DIGITS)
        .collect();

    let centavos = digits.parse::<i128>().unwrap_or(0);
    let amount = Decimal::try_from_i128_with_scale(centavos, 2).unwrap_or(Decimal::ZERO);
    Brl::new(amount).to_string()
}
