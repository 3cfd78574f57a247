use itax_core::calculations::common::round_rupee;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a rupee amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

impl ParseAmountError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Trims whitespace and drops the rupee sign and digit-group separators.
fn normalize_amount_input(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | '₹') && !c.is_whitespace())
        .collect()
}

/// Parses a string into a rupee amount.
///
/// Accepts both Indian (`12,00,000`) and Western (`1,200,000`) digit grouping
/// and an optional leading `₹`. Empty or whitespace-only input is treated as 0.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a yes/no style flag. Returns `None` for anything unrecognised.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Formats an amount as whole rupees with Indian digit grouping,
/// e.g. `₹12,34,567`.
pub fn format_inr(amount: Decimal) -> String {
    let rounded = round_rupee(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();
    format!("{sign}₹{}", group_indian(&digits))
}

/// Formats a percentage with two decimals, e.g. `13.65%`.
pub fn format_percent(rate: Decimal) -> String {
    format!("{:.2}%", rate)
}

/// Inserts separators after the last three digits, then every two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        groups.push(pair);
        head = rest;
    }
    groups.push(head);
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}
