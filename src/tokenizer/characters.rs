//! Identifier, keyword, and structural character scanning
//!
//! Implements the RFC 9535 `name-first` / `name-char` classes and the
//! contextual split between member-name shorthand and function names.

use super::core::Tokenizer;
use crate::error::{JsonPathError, JsonPathResult, LexErrorKind, Span};
use crate::tokens::TokenKind;

/// RFC 9535 `name-first`: ALPHA / "_" / any code point at or above U+0080.
#[inline]
pub(super) fn is_name_first(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || (c as u32) >= 0x80
}

/// RFC 9535 `name-char`: `name-first` plus ASCII digits.
#[inline]
pub(super) fn is_name_char(c: char) -> bool {
    is_name_first(c) || c.is_ascii_digit()
}

/// Scan an identifier starting at the current character.
///
/// `true` / `false` / `null` become keyword tokens. Any other identifier is
/// a function name when the next non-whitespace character is `(`, otherwise
/// a member-name shorthand. This is a character lookahead in the scanner,
/// not a parser callback.
pub(super) fn scan_identifier(t: &mut Tokenizer<'_>) {
    let start = t.offset();
    while let Some(c) = t.current() {
        if !is_name_char(c) {
            break;
        }
        t.bump();
    }
    let text = &t.input[start..t.offset()];
    let kind = match text {
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "null" => TokenKind::Null,
        _ => {
            if next_nonblank_is_lparen(t) {
                TokenKind::FunctionName(text.to_string())
            } else {
                TokenKind::MemberName(text.to_string())
            }
        }
    };
    t.emit(kind, start);
}

fn next_nonblank_is_lparen(t: &Tokenizer<'_>) -> bool {
    let mut n = 0;
    while let Some(c) = t.peek(n) {
        match c {
            ' ' | '\t' | '\n' | '\r' => n += 1,
            '(' => return true,
            _ => return false,
        }
    }
    false
}

/// Scan a single- or two-character structural token.
pub(super) fn scan_structural(t: &mut Tokenizer<'_>) -> JsonPathResult<()> {
    let start = t.offset();
    let c = match t.bump() {
        Some(c) => c,
        None => return Ok(()),
    };
    let kind = match c {
        '$' => TokenKind::Root,
        '@' => TokenKind::Current,
        '[' => TokenKind::LBracket,
        ']' => TokenKind::RBracket,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        ',' => TokenKind::Comma,
        ':' => TokenKind::Colon,
        '*' => TokenKind::Star,
        '?' => TokenKind::Question,
        '.' => {
            // '..' takes precedence over two adjacent '.'
            if t.current() == Some('.') {
                t.bump();
                TokenKind::DoubleDot
            } else {
                TokenKind::Dot
            }
        }
        other => {
            return Err(JsonPathError::lex(
                LexErrorKind::UnexpectedChar,
                format!("unexpected character '{other}'"),
                Span::new(start, t.offset()),
            ));
        }
    };
    t.emit(kind, start);
    Ok(())
}
