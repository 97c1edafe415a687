//! Filter expression parsing
//!
//! Implements `||` over `&&` over basic expressions with the RFC 9535
//! precedence. A query on either side of a comparison operator is admitted
//! only if it converts to a singular query; comparison is non-associative.

use serde_json::Value;

use super::core::Parser;
use crate::ast::{
    BasicExpr, Comparable, ComparisonExpr, ComparisonOp, FilterQuery, FunctionCall,
    LogicalAndExpr, LogicalOrExpr, TestExpr,
};
use crate::error::{JsonPathError, JsonPathResult, Span};
use crate::tokens::TokenKind;
use crate::type_system::FunctionType;

impl Parser {
    /// `logical_or := logical_and ("||" logical_and)*`
    pub(super) fn parse_logical_or(&mut self) -> JsonPathResult<LogicalOrExpr> {
        let mut terms = vec![self.parse_logical_and()?];
        while matches!(self.peek_kind(), TokenKind::LogicalOr) {
            self.advance();
            terms.push(self.parse_logical_and()?);
        }
        Ok(LogicalOrExpr { terms })
    }

    fn parse_logical_and(&mut self) -> JsonPathResult<LogicalAndExpr> {
        let mut terms = vec![self.parse_basic_expr()?];
        while matches!(self.peek_kind(), TokenKind::LogicalAnd) {
            self.advance();
            terms.push(self.parse_basic_expr()?);
        }
        Ok(LogicalAndExpr { terms })
    }

    fn parse_basic_expr(&mut self) -> JsonPathResult<BasicExpr> {
        match self.peek_kind() {
            TokenKind::Bang => {
                self.advance();
                match self.peek_kind() {
                    TokenKind::LParen => {
                        let expr = self.parse_paren()?;
                        Ok(BasicExpr::Paren {
                            negated: true,
                            expr,
                        })
                    }
                    TokenKind::Current | TokenKind::Root => {
                        let query = self.parse_filter_query()?;
                        Ok(BasicExpr::Test {
                            negated: true,
                            expr: TestExpr::Query(query),
                        })
                    }
                    TokenKind::FunctionName(_) => {
                        let call = self.parse_function_call()?;
                        self.require_test_function(&call)?;
                        Ok(BasicExpr::Test {
                            negated: true,
                            expr: TestExpr::Function(call),
                        })
                    }
                    _ => Err(self.error_at_peek(
                        "expected '(', a query, or a function call after '!'",
                    )),
                }
            }
            TokenKind::LParen => {
                let expr = self.parse_paren()?;
                Ok(BasicExpr::Paren {
                    negated: false,
                    expr,
                })
            }
            TokenKind::Current | TokenKind::Root => {
                let query_start = self.peek().span.start;
                let query = self.parse_filter_query()?;
                if self.peek_kind().is_comparison_operator() {
                    let left = self.singular_comparable(query, query_start)?;
                    self.parse_comparison_rest(left)
                } else {
                    Ok(BasicExpr::Test {
                        negated: false,
                        expr: TestExpr::Query(query),
                    })
                }
            }
            kind if kind.is_literal() => {
                let value = literal_value(kind).unwrap_or(Value::Null);
                self.advance();
                if self.peek_kind().is_comparison_operator() {
                    self.parse_comparison_rest(Comparable::Literal(value))
                } else {
                    Err(self.error_at_peek("a literal must be part of a comparison"))
                }
            }
            TokenKind::FunctionName(_) => {
                let call = self.parse_function_call()?;
                if self.peek_kind().is_comparison_operator() {
                    self.require_value_function(&call)?;
                    self.parse_comparison_rest(Comparable::Function(call))
                } else {
                    self.require_test_function(&call)?;
                    Ok(BasicExpr::Test {
                        negated: false,
                        expr: TestExpr::Function(call),
                    })
                }
            }
            _ => Err(self.error_at_peek("expected a filter expression")),
        }
    }

    fn parse_paren(&mut self) -> JsonPathResult<LogicalOrExpr> {
        self.expect(&TokenKind::LParen, "to open a grouped expression")?;
        let expr = self.parse_logical_or()?;
        self.expect(&TokenKind::RParen, "to close the grouped expression")?;
        Ok(expr)
    }

    /// `filter_query := ("@"|"$") segment*`
    pub(super) fn parse_filter_query(&mut self) -> JsonPathResult<FilterQuery> {
        let relative = match self.peek_kind() {
            TokenKind::Current => true,
            TokenKind::Root => false,
            _ => return Err(self.error_at_peek("expected '@' or '$' to begin a query")),
        };
        self.advance();
        let segments = self.parse_segments()?;
        Ok(FilterQuery { relative, segments })
    }

    /// Parse `op comparable` after the left side is known, rejecting a
    /// chained comparison.
    pub(super) fn parse_comparison_rest(&mut self, left: Comparable) -> JsonPathResult<BasicExpr> {
        let op = self.parse_comparison_op()?;
        let right = self.parse_comparable()?;
        if self.peek_kind().is_comparison_operator() {
            return Err(
                self.error_at_peek("comparison is non-associative, group with parentheses")
            );
        }
        Ok(BasicExpr::Comparison(ComparisonExpr { left, op, right }))
    }

    fn parse_comparison_op(&mut self) -> JsonPathResult<ComparisonOp> {
        let op = match self.peek_kind() {
            TokenKind::Eq => ComparisonOp::Eq,
            TokenKind::Ne => ComparisonOp::Ne,
            TokenKind::Lt => ComparisonOp::Lt,
            TokenKind::Le => ComparisonOp::Le,
            TokenKind::Gt => ComparisonOp::Gt,
            TokenKind::Ge => ComparisonOp::Ge,
            _ => return Err(self.error_at_peek("expected a comparison operator")),
        };
        self.advance();
        Ok(op)
    }

    fn parse_comparable(&mut self) -> JsonPathResult<Comparable> {
        match self.peek_kind() {
            kind if kind.is_literal() => {
                let value = literal_value(kind).unwrap_or(Value::Null);
                self.advance();
                Ok(Comparable::Literal(value))
            }
            TokenKind::Current | TokenKind::Root => {
                let start = self.peek().span.start;
                let query = self.parse_filter_query()?;
                self.singular_comparable(query, start)
            }
            TokenKind::FunctionName(_) => {
                let call = self.parse_function_call()?;
                self.require_value_function(&call)?;
                Ok(Comparable::Function(call))
            }
            _ => Err(self.error_at_peek("expected a literal, singular query, or function call")),
        }
    }

    /// Admit a query into a comparable position: it must be singular.
    pub(super) fn singular_comparable(
        &self,
        query: FilterQuery,
        start: usize,
    ) -> JsonPathResult<Comparable> {
        match query.as_singular() {
            Some(singular) => Ok(Comparable::SingularQuery(singular)),
            None => Err(JsonPathError::validate(
                "not a singular query: only name and index segments may appear in a comparison",
                Span::new(start, self.last_end()),
            )),
        }
    }

    /// A function used as a comparable must return ValueType.
    pub(super) fn require_value_function(&self, call: &FunctionCall) -> JsonPathResult<()> {
        if call.return_type == FunctionType::ValueType {
            Ok(())
        } else {
            Err(JsonPathError::validate(
                format!(
                    "function '{}' returns {} and cannot be compared",
                    call.kind.name(),
                    call.return_type
                ),
                call.span,
            ))
        }
    }

    /// A function used as a test must return LogicalType or NodesType.
    pub(super) fn require_test_function(&self, call: &FunctionCall) -> JsonPathResult<()> {
        if call.return_type == FunctionType::ValueType {
            Err(JsonPathError::validate(
                format!(
                    "function '{}' returns ValueType and cannot be used as a test",
                    call.kind.name()
                ),
                call.span,
            ))
        } else {
            Ok(())
        }
    }
}

/// JSON value of a literal token, `None` for non-literals.
pub(super) fn literal_value(kind: &TokenKind) -> Option<Value> {
    match kind {
        TokenKind::Int(n) => Some(Value::from(*n)),
        TokenKind::Number(f) => {
            Some(serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number))
        }
        TokenKind::Str(s) => Some(Value::String(s.clone())),
        TokenKind::True => Some(Value::Bool(true)),
        TokenKind::False => Some(Value::Bool(false)),
        TokenKind::Null => Some(Value::Null),
        _ => None,
    }
}
