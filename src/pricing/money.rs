//! Price attribute parsing and Indian-locale currency formatting.
//!
//! Item prices arrive as free-form attribute strings and are displayed with
//! the `en-IN` digit grouping (`1,00,000`), so both directions live here.

use std::str::FromStr;

use rust_decimal::prelude::*;

/// Maximum fraction digits shown for an amount, matching `en-IN` number
/// formatting defaults.
pub const MAX_FRACTION_DIGITS: u32 = 3;

/// Parse a price attribute leniently.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"1800/-"` reads as 1800. Missing, empty or non-numeric values read as
/// zero. Numbers beyond the `Decimal` range saturate at its bounds.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use regional_pricing::pricing::money::parse_price;
///
/// assert_eq!(parse_price(Some("2000")), dec!(2000));
/// assert_eq!(parse_price(Some(" 1499.50 INR")), dec!(1499.50));
/// assert_eq!(parse_price(Some("free")), dec!(0));
/// assert_eq!(parse_price(None), dec!(0));
/// ```
pub fn parse_price(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw else {
        return Decimal::ZERO;
    };

    let literal = numeric_prefix(raw.trim_start());
    if literal.is_empty() {
        return Decimal::ZERO;
    }

    // Normalize to `[-]digits[.digits][e..]` before handing off to rust_decimal
    let (negative, unsigned) = match literal.as_bytes()[0] {
        b'-' => (true, &literal[1..]),
        b'+' => (false, &literal[1..]),
        _ => (false, literal),
    };
    let mut normalized = String::with_capacity(literal.len() + 2);
    if negative {
        normalized.push('-');
    }
    if unsigned.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(unsigned);

    let parsed = if normalized.contains(['e', 'E']) {
        Decimal::from_scientific(&normalized)
    } else {
        Decimal::from_str(&normalized)
    };
    parsed.unwrap_or_else(|_| out_of_range(&normalized))
}

/// Value for a well-formed literal that `Decimal` cannot hold: magnitudes too
/// large saturate at `Decimal::MAX`/`Decimal::MIN`, magnitudes too small read
/// as zero.
fn out_of_range(literal: &str) -> Decimal {
    let (mantissa, exponent) = literal.split_once(['e', 'E']).unwrap_or((literal, ""));
    let underflow = exponent.starts_with('-') && Decimal::from_str(mantissa).is_ok();

    if underflow {
        Decimal::ZERO
    } else if literal.starts_with('-') {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// Longest prefix of `s` forming a decimal literal (sign, digits, fraction,
/// exponent). Returns an empty slice when no digits are present.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        // A bare trailing dot is only kept when it follows integer digits
        if frac_end > frac_start || end > int_start {
            end = frac_end;
        }
    }

    if digits == 0 {
        return "";
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let literal = &s[..end];
    literal.strip_suffix('.').unwrap_or(literal)
}

/// Format an amount with Indian digit grouping and no currency symbol.
///
/// Up to three fraction digits are kept (rounded half away from zero) and
/// trailing zeros are dropped.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use regional_pricing::pricing::money::format_amount;
///
/// assert_eq!(format_amount(dec!(1800)), "1,800");
/// assert_eq!(format_amount(dec!(150000)), "1,50,000");
/// assert_eq!(format_amount(dec!(12345678.5)), "1,23,45,678.5");
/// ```
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + 4);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_indian(int_part));
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Format an amount prefixed with a currency symbol, e.g. `₹1,800`.
pub fn format_money(symbol: &str, amount: Decimal) -> String {
    format!("{}{}", symbol, format_amount(amount))
}

/// Group integer digits as lakh/crore: last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
