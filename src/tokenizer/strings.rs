//! String literal scanning
//!
//! RFC 9535 string literals are delimited by either single or double quotes.
//! Escapes are decoded here, including `\uXXXX` surrogate pairs, so the
//! parser only ever sees the decoded member name or literal value.

use super::core::Tokenizer;
use crate::error::{JsonPathError, JsonPathResult, LexErrorKind, Span};
use crate::tokens::TokenKind;

/// Scan a quoted string literal starting at the current quote character.
pub(super) fn scan_string(t: &mut Tokenizer<'_>) -> JsonPathResult<()> {
    let start = t.offset();
    let quote = match t.bump() {
        Some(q) => q,
        None => return Ok(()),
    };
    let mut decoded = String::new();
    loop {
        let char_start = t.offset();
        match t.bump() {
            None => {
                return Err(JsonPathError::lex(
                    LexErrorKind::UnterminatedString,
                    format!("unterminated string literal, expected closing {quote}"),
                    Span::new(start, t.offset()),
                ));
            }
            Some(c) if c == quote => {
                t.emit(TokenKind::Str(decoded), start);
                return Ok(());
            }
            Some('\\') => {
                decoded.push(scan_escape(t, quote, char_start)?);
            }
            Some(c) if (c as u32) < 0x20 => {
                return Err(JsonPathError::lex(
                    LexErrorKind::UnexpectedChar,
                    format!("bare control character U+{:04X} in string literal", c as u32),
                    Span::new(char_start, t.offset()),
                ));
            }
            Some(c) => decoded.push(c),
        }
    }
}

/// Decode one escape sequence; the backslash at `esc_start` is consumed.
fn scan_escape(t: &mut Tokenizer<'_>, quote: char, esc_start: usize) -> JsonPathResult<char> {
    let bad_escape = |t: &Tokenizer<'_>, msg: String| {
        JsonPathError::lex(LexErrorKind::BadEscape, msg, Span::new(esc_start, t.offset()))
    };
    match t.bump() {
        Some('b') => Ok('\u{0008}'),
        Some('f') => Ok('\u{000C}'),
        Some('n') => Ok('\n'),
        Some('r') => Ok('\r'),
        Some('t') => Ok('\t'),
        Some('/') => Ok('/'),
        Some('\\') => Ok('\\'),
        // The quote escape must match the delimiter: \' only inside '...',
        // \" only inside "..."
        Some('\'') if quote == '\'' => Ok('\''),
        Some('"') if quote == '"' => Ok('"'),
        Some('u') => scan_unicode_escape(t, esc_start),
        Some(c) => Err(bad_escape(t, format!("invalid escape sequence '\\{c}'"))),
        None => Err(bad_escape(t, "incomplete escape at end of input".to_string())),
    }
}

/// Decode `\uXXXX`, combining UTF-16 surrogate pairs.
fn scan_unicode_escape(t: &mut Tokenizer<'_>, esc_start: usize) -> JsonPathResult<char> {
    let bad_escape = |t: &Tokenizer<'_>, msg: String| {
        JsonPathError::lex(LexErrorKind::BadEscape, msg, Span::new(esc_start, t.offset()))
    };
    let first = scan_hex4(t, esc_start)?;
    if (0xDC00..=0xDFFF).contains(&first) {
        return Err(bad_escape(
            t,
            format!("lone low surrogate \\u{first:04X}"),
        ));
    }
    if (0xD800..=0xDBFF).contains(&first) {
        // High surrogate must be followed by \uXXXX low surrogate
        if t.current() != Some('\\') || t.peek(1) != Some('u') {
            return Err(bad_escape(
                t,
                format!("high surrogate \\u{first:04X} not followed by a low surrogate"),
            ));
        }
        t.bump();
        t.bump();
        let second = scan_hex4(t, esc_start)?;
        if !(0xDC00..=0xDFFF).contains(&second) {
            return Err(bad_escape(
                t,
                format!("expected low surrogate after \\u{first:04X}, found \\u{second:04X}"),
            ));
        }
        let combined = 0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
        return char::from_u32(combined)
            .ok_or_else(|| bad_escape(t, format!("invalid surrogate pair U+{combined:X}")));
    }
    char::from_u32(first).ok_or_else(|| bad_escape(t, format!("invalid code point \\u{first:04X}")))
}

fn scan_hex4(t: &mut Tokenizer<'_>, esc_start: usize) -> JsonPathResult<u32> {
    let mut value: u32 = 0;
    for _ in 0..4 {
        let digit = t
            .bump()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| {
                JsonPathError::lex(
                    LexErrorKind::BadEscape,
                    "expected four hex digits after \\u".to_string(),
                    Span::new(esc_start, t.offset()),
                )
            })?;
        value = (value << 4) | digit;
    }
    Ok(value)
}
