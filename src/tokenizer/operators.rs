//! Comparison and logical operator scanning

use super::core::Tokenizer;
use crate::error::{JsonPathError, JsonPathResult, LexErrorKind, Span};
use crate::tokens::TokenKind;

/// Scan an operator starting at `=`, `!`, `<`, `>`, `&`, or `|`.
pub(super) fn scan_operator(t: &mut Tokenizer<'_>) -> JsonPathResult<()> {
    let start = t.offset();
    let c = match t.bump() {
        Some(c) => c,
        None => return Ok(()),
    };
    let kind = match c {
        '=' => {
            if t.current() == Some('=') {
                t.bump();
                TokenKind::Eq
            } else {
                return Err(unexpected(t, start, "'=' is not an operator, use '=='"));
            }
        }
        '!' => {
            if t.current() == Some('=') {
                t.bump();
                TokenKind::Ne
            } else {
                TokenKind::Bang
            }
        }
        '<' => {
            if t.current() == Some('=') {
                t.bump();
                TokenKind::Le
            } else {
                TokenKind::Lt
            }
        }
        '>' => {
            if t.current() == Some('=') {
                t.bump();
                TokenKind::Ge
            } else {
                TokenKind::Gt
            }
        }
        '&' => {
            if t.current() == Some('&') {
                t.bump();
                TokenKind::LogicalAnd
            } else {
                return Err(unexpected(t, start, "'&' is not an operator, use '&&'"));
            }
        }
        '|' => {
            if t.current() == Some('|') {
                t.bump();
                TokenKind::LogicalOr
            } else {
                return Err(unexpected(t, start, "'|' is not an operator, use '||'"));
            }
        }
        other => {
            return Err(unexpected(
                t,
                start,
                &format!("unexpected character '{other}'"),
            ));
        }
    };
    t.emit(kind, start);
    Ok(())
}

fn unexpected(t: &Tokenizer<'_>, start: usize, msg: &str) -> JsonPathError {
    JsonPathError::lex(
        LexErrorKind::UnexpectedChar,
        msg.to_string(),
        Span::new(start, t.offset()),
    )
}
