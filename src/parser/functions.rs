//! Function-expression parsing and well-typedness checks
//!
//! Each argument is parsed in its productive form and then checked against
//! the declared parameter type. The one implicit conversion RFC 9535 allows
//! into a ValueType slot is a singular query, which is rewritten to the
//! dedicated `SingularQuery` argument form here.

use super::core::Parser;
use super::filters::literal_value;
use crate::ast::{
    BasicExpr, Comparable, FunctionArg, FunctionCall, LogicalAndExpr, LogicalOrExpr,
};
use crate::error::{JsonPathError, JsonPathResult, Span};
use crate::tokens::TokenKind;
use crate::type_system::{FunctionKind, FunctionType};

impl Parser {
    /// Parse `name ( [arg (',' arg)*] )` with arity and type checking.
    pub(super) fn parse_function_call(&mut self) -> JsonPathResult<FunctionCall> {
        let tok = self.advance();
        let start = tok.span.start;
        let name = match tok.kind {
            TokenKind::FunctionName(name) => name,
            other => {
                return Err(JsonPathError::parse(
                    format!("expected function name, found {}", other.describe()),
                    tok.span,
                ));
            }
        };
        let kind = FunctionKind::lookup(&name).ok_or_else(|| {
            JsonPathError::validate(format!("unknown function '{name}'"), tok.span)
        })?;
        self.expect(&TokenKind::LParen, "after function name")?;
        let mut args = Vec::new();
        if !matches!(self.peek_kind(), TokenKind::RParen) {
            loop {
                args.push(self.parse_function_arg()?);
                if matches!(self.peek_kind(), TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen, "to close the argument list")?;
        let span = Span::new(start, self.last_end());

        let signature = kind.signature();
        if args.len() != signature.params.len() {
            return Err(JsonPathError::validate(
                format!(
                    "function '{}' expects {} argument(s), got {}",
                    kind.name(),
                    signature.params.len(),
                    args.len()
                ),
                span,
            ));
        }
        let mut checked = Vec::with_capacity(args.len());
        for (arg, &param) in args.into_iter().zip(signature.params) {
            checked.push(check_function_arg(kind, arg, param, span)?);
        }
        Ok(FunctionCall {
            kind,
            args: checked,
            return_type: signature.return_type,
            span,
        })
    }

    fn parse_function_arg(&mut self) -> JsonPathResult<FunctionArg> {
        match self.peek_kind() {
            TokenKind::Bang | TokenKind::LParen => {
                Ok(FunctionArg::Logical(self.parse_logical_or()?))
            }
            kind if kind.is_literal() => {
                let value = literal_value(kind).unwrap_or(serde_json::Value::Null);
                self.advance();
                if self.peek_kind().is_comparison_operator() {
                    let basic = self.parse_comparison_rest(Comparable::Literal(value))?;
                    Ok(FunctionArg::Logical(wrap_basic(basic)))
                } else {
                    Ok(FunctionArg::Literal(value))
                }
            }
            TokenKind::Current | TokenKind::Root => {
                let start = self.peek().span.start;
                let query = self.parse_filter_query()?;
                if self.peek_kind().is_comparison_operator() {
                    let left = self.singular_comparable(query, start)?;
                    let basic = self.parse_comparison_rest(left)?;
                    Ok(FunctionArg::Logical(wrap_basic(basic)))
                } else {
                    Ok(FunctionArg::Query(query))
                }
            }
            TokenKind::FunctionName(_) => {
                let call = self.parse_function_call()?;
                if self.peek_kind().is_comparison_operator() {
                    self.require_value_function(&call)?;
                    let basic = self.parse_comparison_rest(Comparable::Function(call))?;
                    Ok(FunctionArg::Logical(wrap_basic(basic)))
                } else {
                    Ok(FunctionArg::Function(call))
                }
            }
            _ => Err(self.error_at_peek("expected a function argument")),
        }
    }
}

/// Check one parsed argument against the declared parameter type, applying
/// the permitted implicit conversions.
fn check_function_arg(
    kind: FunctionKind,
    arg: FunctionArg,
    param: FunctionType,
    span: Span,
) -> JsonPathResult<FunctionArg> {
    let mismatch = |got: &str| {
        JsonPathError::validate(
            format!(
                "invalid argument to '{}': expected {param}, got {got}",
                kind.name()
            ),
            span,
        )
    };
    match param {
        FunctionType::ValueType => match arg {
            FunctionArg::Literal(_) | FunctionArg::SingularQuery(_) => Ok(arg),
            // A NodesType query feeds a ValueType slot only when singular
            FunctionArg::Query(query) => match query.as_singular() {
                Some(singular) => Ok(FunctionArg::SingularQuery(singular)),
                None => Err(mismatch("a non-singular query")),
            },
            FunctionArg::Function(call) => {
                if call.return_type == FunctionType::ValueType {
                    Ok(FunctionArg::Function(call))
                } else {
                    Err(mismatch("a function of another type"))
                }
            }
            FunctionArg::Logical(_) => Err(mismatch("a logical expression")),
        },
        FunctionType::NodesType => match arg {
            FunctionArg::Query(_) | FunctionArg::SingularQuery(_) => Ok(arg),
            FunctionArg::Function(call) => {
                if call.return_type == FunctionType::NodesType {
                    Ok(FunctionArg::Function(call))
                } else {
                    Err(mismatch("a function of another type"))
                }
            }
            FunctionArg::Literal(_) => Err(mismatch("a literal")),
            FunctionArg::Logical(_) => Err(mismatch("a logical expression")),
        },
        FunctionType::LogicalType => match arg {
            // A query converts to an existence test, NodesType to non-empty
            FunctionArg::Logical(_) | FunctionArg::Query(_) => Ok(arg),
            FunctionArg::Function(call) => {
                if call.return_type == FunctionType::ValueType {
                    Err(mismatch("a function returning ValueType"))
                } else {
                    Ok(FunctionArg::Function(call))
                }
            }
            FunctionArg::Literal(_) | FunctionArg::SingularQuery(_) => Err(mismatch("a literal")),
        },
    }
}

fn wrap_basic(basic: BasicExpr) -> LogicalOrExpr {
    LogicalOrExpr {
        terms: vec![LogicalAndExpr { terms: vec![basic] }],
    }
}
