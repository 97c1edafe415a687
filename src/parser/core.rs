//! Parser state and segment-level productions
//!
//! Owns the token queue and the consume/peek/expect primitives shared by the
//! selector, filter, and function sub-parsers.

use std::collections::VecDeque;

use crate::ast::{JsonPathQuery, Segment, Selector};
use crate::error::{JsonPathError, JsonPathResult, Span};
use crate::tokens::{Token, TokenKind};

/// Recursive-descent parser over a token stream.
pub struct Parser {
    tokens: VecDeque<Token>,
    eof: Token,
    last_end: usize,
}

impl Parser {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof_span = tokens.last().map_or(Span::point(0), |tok| tok.span);
        Self {
            tokens: tokens.into(),
            eof: Token::new(TokenKind::Eof, eof_span),
            last_end: 0,
        }
    }

    /// Parse a complete query: `$` followed by segments, then end of input.
    pub fn parse(mut self) -> JsonPathResult<JsonPathQuery> {
        match self.peek_kind() {
            TokenKind::Root => {
                self.advance();
            }
            TokenKind::Current => {
                return Err(JsonPathError::validate(
                    "relative query outside a filter: '@' is only valid within [?...]",
                    self.peek().span,
                ));
            }
            other => {
                return Err(JsonPathError::parse(
                    format!("query must begin with '$', found {}", other.describe()),
                    self.peek().span,
                ));
            }
        }
        let segments = self.parse_segments()?;
        match self.peek_kind() {
            TokenKind::Eof => Ok(JsonPathQuery { segments }),
            other => Err(JsonPathError::parse(
                format!("unexpected trailing {} after the query", other.describe()),
                self.peek().span,
            )),
        }
    }

    /// Parse zero or more child/descendant segments.
    ///
    /// Also used for the query embedded in a filter expression; the loop
    /// stops at any token that cannot start a segment.
    pub(super) fn parse_segments(&mut self) -> JsonPathResult<Vec<Segment>> {
        let mut segments = Vec::new();
        loop {
            match self.peek_kind() {
                TokenKind::Dot => {
                    self.advance();
                    match self.peek_kind() {
                        TokenKind::Star => {
                            self.advance();
                            segments.push(Segment::Child(vec![Selector::Wildcard]));
                        }
                        kind => {
                            if let Some(name) = kind.shorthand_name() {
                                let name = name.to_string();
                                self.advance();
                                segments.push(Segment::Child(vec![Selector::Name(name)]));
                            } else {
                                return Err(
                                    self.error_at_peek("expected member name or '*' after '.'")
                                );
                            }
                        }
                    }
                }
                TokenKind::DoubleDot => {
                    self.advance();
                    match self.peek_kind() {
                        TokenKind::Star => {
                            self.advance();
                            segments.push(Segment::Descendant(vec![Selector::Wildcard]));
                        }
                        TokenKind::LBracket => {
                            let selectors = self.parse_bracketed()?;
                            segments.push(Segment::Descendant(selectors));
                        }
                        kind => {
                            if let Some(name) = kind.shorthand_name() {
                                let name = name.to_string();
                                self.advance();
                                segments.push(Segment::Descendant(vec![Selector::Name(name)]));
                            } else {
                                return Err(self.error_at_peek(
                                    "expected member name, '*', or '[' after '..'",
                                ));
                            }
                        }
                    }
                }
                TokenKind::LBracket => {
                    let selectors = self.parse_bracketed()?;
                    segments.push(Segment::Child(selectors));
                }
                _ => break,
            }
        }
        Ok(segments)
    }

    /// Next token without consuming it. The stream always ends in `Eof`.
    #[inline]
    pub(super) fn peek(&self) -> &Token {
        self.tokens.front().unwrap_or(&self.eof)
    }

    #[inline]
    pub(super) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    /// Kind of the token after the next one, if any.
    #[inline]
    pub(super) fn peek_second(&self) -> Option<&TokenKind> {
        self.tokens.get(1).map(|tok| &tok.kind)
    }

    /// Consume the next token. `Eof` is a sentinel and is never removed.
    pub(super) fn advance(&mut self) -> Token {
        if matches!(
            self.tokens.front().map(|tok| &tok.kind),
            Some(TokenKind::Eof) | None
        ) {
            return self.peek().clone();
        }
        let tok = self.tokens.pop_front().unwrap_or_else(|| self.eof.clone());
        self.last_end = tok.span.end;
        tok
    }

    /// Consume a token of the expected kind or fail with context.
    pub(super) fn expect(&mut self, expected: &TokenKind, context: &str) -> JsonPathResult<Token> {
        if std::mem::discriminant(self.peek_kind()) == std::mem::discriminant(expected) {
            Ok(self.advance())
        } else {
            Err(JsonPathError::parse(
                format!(
                    "expected {} {context}, found {}",
                    expected.describe(),
                    self.peek_kind().describe()
                ),
                self.peek().span,
            ))
        }
    }

    /// Parse error at the current token, appending what was found.
    pub(super) fn error_at_peek(&self, message: impl Into<String>) -> JsonPathError {
        JsonPathError::parse(
            format!(
                "{}, found {}",
                message.into(),
                self.peek_kind().describe()
            ),
            self.peek().span,
        )
    }

    /// Byte offset just past the most recently consumed token.
    #[inline]
    pub(super) fn last_end(&self) -> usize {
        self.last_end
    }
}
