//! Bracketed selection and slice parsing

use super::core::Parser;
use crate::ast::{Selector, SliceBounds};
use crate::error::{JsonPathError, JsonPathResult};
use crate::tokens::TokenKind;

impl Parser {
    /// Parse `[ selector (',' selector)* ]`, consuming both brackets.
    pub(super) fn parse_bracketed(&mut self) -> JsonPathResult<Vec<Selector>> {
        self.expect(&TokenKind::LBracket, "to open a bracketed selection")?;
        if matches!(self.peek_kind(), TokenKind::RBracket) {
            return Err(self.error_at_peek("bracketed selection requires at least one selector"));
        }
        let mut selectors = vec![self.parse_selector()?];
        loop {
            match self.peek_kind() {
                TokenKind::Comma => {
                    self.advance();
                    selectors.push(self.parse_selector()?);
                }
                TokenKind::RBracket => {
                    self.advance();
                    break;
                }
                _ => {
                    return Err(self.error_at_peek("expected ',' or ']' in bracketed selection"));
                }
            }
        }
        Ok(selectors)
    }

    fn parse_selector(&mut self) -> JsonPathResult<Selector> {
        match self.peek_kind() {
            TokenKind::Str(name) => {
                let name = name.clone();
                self.advance();
                Ok(Selector::Name(name))
            }
            TokenKind::Star => {
                self.advance();
                Ok(Selector::Wildcard)
            }
            TokenKind::Int(n) => {
                let n = *n;
                if matches!(self.peek_second(), Some(TokenKind::Colon)) {
                    self.advance();
                    self.parse_slice(Some(n))
                } else {
                    self.advance();
                    Ok(Selector::Index(n))
                }
            }
            TokenKind::Colon => self.parse_slice(None),
            TokenKind::Question => {
                self.advance();
                Ok(Selector::Filter(self.parse_logical_or()?))
            }
            TokenKind::Number(_) => Err(self.error_at_peek(
                "a number with a fraction or exponent cannot be used as an array index",
            )),
            _ => Err(self.error_at_peek("expected string, integer, slice, '*', or '?' selector")),
        }
    }

    /// Parse the remainder of a slice; the start index, if any, is already
    /// consumed and the current token is the first colon.
    fn parse_slice(&mut self, start: Option<i64>) -> JsonPathResult<Selector> {
        self.expect(&TokenKind::Colon, "in slice selector")?;
        let end = match self.peek_kind() {
            TokenKind::Int(n) => {
                let n = *n;
                self.advance();
                Some(n)
            }
            _ => None,
        };
        let step = if matches!(self.peek_kind(), TokenKind::Colon) {
            self.advance();
            match self.peek_kind() {
                TokenKind::Int(n) => {
                    let n = *n;
                    let span = self.peek().span;
                    self.advance();
                    if n == 0 {
                        return Err(JsonPathError::validate("slice step must not be zero", span));
                    }
                    Some(n)
                }
                _ => None,
            }
        } else {
            None
        };
        Ok(Selector::Slice(SliceBounds { start, end, step }))
    }
}
