//! Monetary amounts are persisted as integer minor units (cents) and exchanged
//! with callers as decimal strings with two fraction digits.

use thiserror::Error;

/// Errors produced while parsing a decimal amount.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("`{0}` is not a valid decimal amount")]
    Malformed(String),
    #[error("`{0}` has more than two fraction digits")]
    TooPrecise(String),
    #[error("`{0}` must not be negative")]
    Negative(String),
    #[error("`{0}` is too large")]
    Overflow(String),
}

/// Parse a non-negative decimal amount such as `149.99` into cents.
pub fn parse_cents(input: &str) -> Result<i64, AmountError> {
    let trimmed = input.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(AmountError::Malformed(trimmed.to_string()));
    }
    if !whole.chars().all(|ch| ch.is_ascii_digit())
        || !fraction.chars().all(|ch| ch.is_ascii_digit())
    {
        return Err(AmountError::Malformed(trimmed.to_string()));
    }

    let fraction = if fraction.len() > 2 {
        let significant = fraction.trim_end_matches('0');
        if significant.len() > 2 {
            return Err(AmountError::TooPrecise(trimmed.to_string()));
        }
        significant
    } else {
        fraction
    };

    let whole_value: i64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| AmountError::Overflow(trimmed.to_string()))?
    };
    let fraction_value: i64 = if fraction.is_empty() {
        0
    } else {
        format!("{fraction:0<2}")
            .parse()
            .map_err(|_| AmountError::Malformed(trimmed.to_string()))?
    };

    let cents = whole_value
        .checked_mul(100)
        .and_then(|value| value.checked_add(fraction_value))
        .ok_or_else(|| AmountError::Overflow(trimmed.to_string()))?;

    if negative && cents != 0 {
        return Err(AmountError::Negative(trimmed.to_string()));
    }

    Ok(cents)
}

/// Render cents as a decimal string, e.g. `14999` becomes `149.99`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
