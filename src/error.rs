//! JSONPath error types
//!
//! One error type covers the whole compile/evaluate pipeline. Every error
//! carries a kind, a human-readable message, and a byte span into the
//! original query string.

use std::error::Error;
use std::fmt;

use serde::Serialize;

/// Byte range into the query string an error refers to.
///
/// `start` is inclusive, `end` exclusive. A zero-length span marks a point
/// (typically end of input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-length span at a single offset.
    #[inline]
    #[must_use]
    pub fn point(at: usize) -> Self {
        Self { start: at, end: at }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Malformed source code units detected while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LexErrorKind {
    /// String literal with no closing quote
    UnterminatedString,
    /// Unknown or malformed escape sequence inside a string literal
    BadEscape,
    /// Malformed numeric literal (leading zero, missing digits, out of range)
    BadNumber,
    /// Character that cannot start any token, or a bare control character
    UnexpectedChar,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LexErrorKind::UnterminatedString => "unterminated string",
            LexErrorKind::BadEscape => "bad escape",
            LexErrorKind::BadNumber => "bad number",
            LexErrorKind::UnexpectedChar => "unexpected character",
        };
        f.write_str(name)
    }
}

/// JSONPath processing error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Tokenizer rejected the source text
    Lex(LexErrorKind),
    /// Token stream violates the RFC 9535 grammar
    Parse,
    /// Grammar-accepted input violating a well-formedness rule: non-singular
    /// query in a comparable position, function arity or type mismatch,
    /// slice step zero, relative query outside a filter
    Validate,
    /// The regex oracle failed during `match()` / `search()` evaluation
    RegexOracle,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lex(kind) => write!(f, "lex ({kind})"),
            ErrorKind::Parse => f.write_str("parse"),
            ErrorKind::Validate => f.write_str("validate"),
            ErrorKind::RegexOracle => f.write_str("regex oracle"),
        }
    }
}

/// Main JSONPath error type
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPathError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
}

/// Result type for JSONPath operations
pub type JsonPathResult<T> = Result<T, JsonPathError>;

impl JsonPathError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
        }
    }

    #[must_use]
    pub fn lex(kind: LexErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Lex(kind), message, span)
    }

    #[must_use]
    pub fn parse(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Parse, message, span)
    }

    #[must_use]
    pub fn validate(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Validate, message, span)
    }

    /// Evaluation-time regex failure. The span is attached by the evaluator
    /// from the offending function call site.
    #[must_use]
    pub fn regex_oracle(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RegexOracle, message, Span::point(0))
    }

    /// Error kind check without destructuring.
    #[inline]
    #[must_use]
    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for JsonPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "JSONPath {} error at {}: {}",
            self.kind, self.span, self.message
        )
    }
}

impl Error for JsonPathError {}
