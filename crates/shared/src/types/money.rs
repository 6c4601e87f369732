//! Brazilian Real amount with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency symbol printed before every amount.
pub const CURRENCY_SYMBOL: &str = "R$";

/// Digit grouping separator.
pub const GROUP_SEPARATOR: char = '.';

/// Decimal separator.
pub const DECIMAL_SEPARATOR: char = ',';

/// Number of fraction digits shown for BRL.
pub const FRACTION_DIGITS: u32 = 2;

/// An amount in Brazilian Reais.
///
/// `Display` renders the pt-BR currency form, e.g. `R$ 1.234,50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Brl(pub Decimal);

impl Brl {
    /// Zero reais.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Creates an amount from a whole number of centavos.
    #[must_use]
    pub fn from_centavos(centavos: i64) -> Self {
        Self(Decimal::new(centavos, FRACTION_DIGITS))
    }

    /// Returns the inner decimal.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Rounds to centavos, half away from zero.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl From<Decimal> for Brl {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl std::fmt::Display for Brl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rounded = self.rounded();
        // -0,001 rounds to a signed zero; print it unsigned
        if rounded.is_negative() {
            f.write_str("-")?;
        }

        let digits = rounded.0.abs().to_string();
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

        write!(
            f,
            "{CURRENCY_SYMBOL} {}{DECIMAL_SEPARATOR}{frac_part:0<width$}",
            group_thousands(int_part),
            width = FRACTION_DIGITS as usize
        )
    }
}

/// Inserts `GROUP_SEPARATOR` every three digits from the right.
fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}
