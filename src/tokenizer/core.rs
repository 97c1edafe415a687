//! Core scanner types and main tokenize loop
//!
//! Owns the character cursor and token output; dispatches to the string,
//! number, operator, and identifier sub-scanners on the leading character.

use super::{characters, numbers, operators, strings};
use crate::error::{JsonPathResult, Span};
use crate::tokens::{Token, TokenKind};

/// Scanner over a JSONPath query string.
///
/// Produces a token stream terminated by [`TokenKind::Eof`], or the first
/// lex error with its byte span.
pub struct Tokenizer<'a> {
    pub(super) input: &'a str,
    pub(super) chars: Vec<(usize, char)>,
    pub(super) pos: usize,
    pub(super) tokens: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().collect(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    /// Scan the whole input into a token stream ending in `Eof`.
    pub fn tokenize(mut self) -> JsonPathResult<Vec<Token>> {
        while let Some(c) = self.current() {
            match c {
                ' ' | '\t' | '\n' | '\r' => {
                    self.bump();
                }
                '\'' | '"' => strings::scan_string(&mut self)?,
                '-' => numbers::scan_number(&mut self)?,
                c if c.is_ascii_digit() => numbers::scan_number(&mut self)?,
                '=' | '!' | '<' | '>' | '&' | '|' => operators::scan_operator(&mut self)?,
                c if characters::is_name_first(c) => characters::scan_identifier(&mut self),
                _ => characters::scan_structural(&mut self)?,
            }
        }
        let end = self.input.len();
        self.tokens.push(Token::new(TokenKind::Eof, Span::point(end)));
        Ok(self.tokens)
    }

    /// Current character without consuming it.
    #[inline]
    pub(super) fn current(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    /// Character `n` positions ahead of the current one.
    #[inline]
    pub(super) fn peek(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).map(|&(_, c)| c)
    }

    /// Byte offset of the current character, or the input length at the end.
    #[inline]
    pub(super) fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map_or(self.input.len(), |&(off, _)| off)
    }

    /// Consume and return the current character.
    #[inline]
    pub(super) fn bump(&mut self) -> Option<char> {
        let c = self.current();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    /// Emit a token spanning from `start` to the current offset.
    pub(super) fn emit(&mut self, kind: TokenKind, start: usize) {
        let span = Span::new(start, self.offset());
        self.tokens.push(Token::new(kind, span));
    }
}
