use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::domain::money::{AmountError, parse_cents};

pub mod campaigns;
pub mod clients;
pub mod products;

/// Monetary amount accepted either as a JSON number or as a decimal string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AmountInput {
    Number(serde_json::Number),
    Text(String),
}

impl AmountInput {
    /// Convert the amount into cents. Blank text yields `None`.
    pub fn to_cents(&self) -> Result<Option<i64>, AmountError> {
        match self {
            AmountInput::Number(number) => parse_cents(&number.to_string()).map(Some),
            AmountInput::Text(text) if text.trim().is_empty() => Ok(None),
            AmountInput::Text(text) => parse_cents(text).map(Some),
        }
    }
}

/// Parse a timestamp and normalise it to naive UTC.
///
/// Accepts RFC 3339 (converted to UTC), a naive date-time (taken as UTC) or a
/// bare date (midnight UTC).
pub(crate) fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let trimmed = input.trim();

    if let Ok(value) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(value.with_timezone(&Utc).naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(value);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Sanitize optional single-line text, dropping it when nothing is left.
pub(crate) fn optional_inline_text(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
}

/// Sanitize optional multi-line text, dropping it when nothing is left.
pub(crate) fn optional_multiline_text(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_multiline_text)
        .filter(|value| !value.is_empty())
}

pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut previous_empty = false;
    for line in lines {
        if line.is_empty() {
            if previous_empty {
                continue;
            }
            previous_empty = true;
            result.push(String::new());
        } else {
            previous_empty = false;
            result.push(line);
        }
    }

    result.join("\n")
}
