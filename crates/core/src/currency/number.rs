//! Lenient decimal reading for partially typed numbers.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Beyond this many powers of ten every `Decimal` has overflowed or
/// underflowed to zero.
const MAX_EXPONENT_STEPS: u32 = 64;

/// Reads the longest numeric prefix of `text`, after leading whitespace.
///
/// Accepts an optional sign, digits with an optional `.` fraction, and an
/// optional `e`/`E` exponent. Trailing garbage is ignored, so `"12abc"`
/// reads as 12. Returns `None` when there is no numeric prefix or the value
/// does not fit a `Decimal`.
pub(crate) fn parse_numeric_prefix(text: &str) -> Option<Decimal> {
    let bytes = text.trim_start().as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos = 1;
            true
        }
        Some(b'+') => {
            pos = 1;
            false
        }
        _ => false,
    };

    let int_digits = take_digits(bytes, &mut pos);

    let mut frac_digits: &[u8] = &[];
    if bytes.get(pos) == Some(&b'.') {
        let mut frac_pos = pos + 1;
        let digits = take_digits(bytes, &mut frac_pos);
        if !int_digits.is_empty() || !digits.is_empty() {
            frac_digits = digits;
            pos = frac_pos;
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut literal = String::with_capacity(int_digits.len() + frac_digits.len() + 3);
    if negative {
        literal.push('-');
    }
    if int_digits.is_empty() {
        literal.push('0');
    } else {
        literal.push_str(std::str::from_utf8(int_digits).ok()?);
    }
    if !frac_digits.is_empty() {
        literal.push('.');
        literal.push_str(std::str::from_utf8(frac_digits).ok()?);
    }

    let mantissa = Decimal::from_str(&literal).ok()?;
    match read_exponent(bytes, pos) {
        Some(exponent) => scale_by_power_of_ten(mantissa, exponent),
        None => Some(mantissa),
    }
}

/// Advances `pos` over ASCII digits and returns them.
fn take_digits<'a>(bytes: &'a [u8], pos: &mut usize) -> &'a [u8] {
    let start = *pos;
    while bytes.get(*pos).is_some_and(u8::is_ascii_digit) {
        *pos += 1;
    }
    &bytes[start..*pos]
}

/// Reads `e[+-]digits` at `pos`. A bare `e` is not an exponent.
fn read_exponent(bytes: &[u8], mut pos: usize) -> Option<i64> {
    if !matches!(bytes.get(pos), Some(b'e' | b'E')) {
        return None;
    }
    pos += 1;

    let negative = match bytes.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let digits = take_digits(bytes, &mut pos);
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.iter().fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

fn scale_by_power_of_ten(mut value: Decimal, exponent: i64) -> Option<Decimal> {
    let steps = exponent.unsigned_abs().min(u64::from(MAX_EXPONENT_STEPS));
    for _ in 0..steps {
        value = if exponent > 0 {
            value.checked_mul(Decimal::TEN)?
        } else {
            value.checked_div(Decimal::TEN)?
        };
    }
    Some(value)
}
