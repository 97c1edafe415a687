//! Numeric literal scanning
//!
//! Distinguishes integer tokens from number tokens: a fraction or exponent
//! part makes the literal a float. Integers are policed against the I-JSON
//! interoperable range at scan time.

use super::core::Tokenizer;
use crate::error::{JsonPathError, JsonPathResult, LexErrorKind, Span};
use crate::tokens::TokenKind;

/// Largest integer exactly representable in an IEEE 754 double (2^53 - 1),
/// the I-JSON interoperability bound of RFC 9535 section 2.1.
const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Scan a numeric literal starting at a digit or `-`.
pub(super) fn scan_number(t: &mut Tokenizer<'_>) -> JsonPathResult<()> {
    let start = t.offset();
    let bad_number = |t: &Tokenizer<'_>, msg: String| {
        JsonPathError::lex(LexErrorKind::BadNumber, msg, Span::new(start, t.offset()))
    };

    let negative = t.current() == Some('-');
    if negative {
        t.bump();
    }

    // Integer part: '0' alone, or a non-zero digit followed by digits
    match t.current() {
        Some('0') => {
            t.bump();
            if t.current().is_some_and(|c| c.is_ascii_digit()) {
                t.bump();
                return Err(bad_number(t, "leading zeros are not allowed".to_string()));
            }
        }
        Some(c) if c.is_ascii_digit() => {
            while t.current().is_some_and(|c| c.is_ascii_digit()) {
                t.bump();
            }
        }
        _ => return Err(bad_number(t, "expected digit after '-'".to_string())),
    }

    let mut is_float = false;

    // Fraction: '.' followed by at least one digit. A dot with no digit
    // after it is left for the parser (it is never part of a number).
    if t.current() == Some('.') && t.peek(1).is_some_and(|c| c.is_ascii_digit()) {
        is_float = true;
        t.bump();
        while t.current().is_some_and(|c| c.is_ascii_digit()) {
            t.bump();
        }
    }

    // Exponent: [eE][+-]?digits
    if matches!(t.current(), Some('e') | Some('E')) {
        is_float = true;
        t.bump();
        if matches!(t.current(), Some('+') | Some('-')) {
            t.bump();
        }
        if !t.current().is_some_and(|c| c.is_ascii_digit()) {
            return Err(bad_number(t, "expected digit in exponent".to_string()));
        }
        while t.current().is_some_and(|c| c.is_ascii_digit()) {
            t.bump();
        }
    }

    let text = &t.input[start..t.offset()];

    // '-0' is grammatically a number, not an int; lexing it as a float makes
    // index selectors reject it while comparisons still see it numerically.
    if !is_float && text == "-0" {
        t.emit(TokenKind::Number(-0.0), start);
        return Ok(());
    }

    if is_float {
        let value: f64 = text
            .parse()
            .map_err(|_| bad_number(t, format!("malformed number literal '{text}'")))?;
        if !value.is_finite() {
            return Err(bad_number(t, format!("number literal '{text}' out of range")));
        }
        t.emit(TokenKind::Number(value), start);
    } else {
        let value: i64 = text
            .parse()
            .map_err(|_| bad_number(t, format!("integer literal '{text}' out of range")))?;
        if value.unsigned_abs() > MAX_SAFE_INTEGER {
            return Err(bad_number(
                t,
                format!("integer literal '{text}' outside the I-JSON range"),
            ));
        }
        t.emit(TokenKind::Int(value), start);
    }
    Ok(())
}
