// 💵 Amount Normalizer
// Locale-tolerant monetary amounts → exact decimals
//
// Institutions write "1,234.56", "1.234,56" or "1234,56". The right-most
// separator is the decimal point unless that same character repeats, in
// which case every separator is grouping.

use crate::error::ValueError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a `TRNAMT` / `BALAMT` token
///
/// # Examples:
/// ```
/// use ofx_statement::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("1.234,56").unwrap(), Decimal::new(123456, 2));
/// assert_eq!(parse_amount("-42.50").unwrap(), Decimal::new(-4250, 2));
/// ```
pub fn parse_amount(token: &str) -> Result<Decimal, ValueError> {
    let token = token.trim();
    let malformed = || ValueError::MalformedAmount(token.to_string());

    let (negative, unsigned) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };

    let allowed = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || b == b'.' || b == b',');
    if !allowed || !unsigned.bytes().any(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    let decimal_point = decimal_separator(unsigned);

    let mut whole = String::new();
    let mut fraction: Option<String> = None;
    for c in unsigned.chars() {
        if c.is_ascii_digit() {
            match fraction.as_mut() {
                Some(fraction) => fraction.push(c),
                None => whole.push(c),
            }
        } else if Some(c) == decimal_point {
            fraction = Some(String::new());
        }
        // anything else is a grouping separator
    }

    let mut canonical = String::with_capacity(whole.len() + 4);
    if negative {
        canonical.push('-');
    }
    if whole.is_empty() {
        canonical.push('0');
    } else {
        canonical.push_str(&whole);
    }
    if let Some(fraction) = fraction.filter(|f| !f.is_empty()) {
        canonical.push('.');
        canonical.push_str(&fraction);
    }

    Decimal::from_str(&canonical).map_err(|_| malformed())
}

/// The character acting as decimal point, if any
fn decimal_separator(unsigned: &str) -> Option<char> {
    let last = unsigned.chars().rev().find(|c| *c == '.' || *c == ',')?;
    let occurrences = unsigned.chars().filter(|c| *c == last).count();
    (occurrences == 1).then_some(last)
}

// ============================================================================
// TESTS
// ============================================================================
