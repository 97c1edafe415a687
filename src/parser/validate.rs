//! Post-parse AST validation
//!
//! A single traversal re-asserting the "well-formed and valid" predicate
//! over the finished tree: slice step is never zero, every function call
//! matches its declared arity, and functions sit in positions their return
//! type permits. Most violations are already unrepresentable or rejected
//! during descent; this traversal is the final gate every compiled query
//! passes through.

use crate::ast::{
    BasicExpr, Comparable, FunctionArg, FunctionCall, JsonPathQuery, LogicalOrExpr, Segment,
    Selector, TestExpr,
};
use crate::error::{JsonPathError, JsonPathResult, Span};
use crate::type_system::FunctionType;

/// Validate a parsed query. `source_len` bounds the whole-query span used
/// for violations that are not tied to a single call site.
pub fn validate_query(query: &JsonPathQuery, source_len: usize) -> JsonPathResult<()> {
    let whole = Span::new(0, source_len);
    validate_segments(&query.segments, whole)
}

fn validate_segments(segments: &[Segment], whole: Span) -> JsonPathResult<()> {
    for segment in segments {
        for selector in segment.selectors() {
            match selector {
                Selector::Slice(bounds) => {
                    if bounds.step == Some(0) {
                        return Err(JsonPathError::validate(
                            "slice step must not be zero",
                            whole,
                        ));
                    }
                }
                Selector::Filter(expr) => validate_logical(expr, whole)?,
                Selector::Name(_) | Selector::Wildcard | Selector::Index(_) => {}
            }
        }
    }
    Ok(())
}

fn validate_logical(expr: &LogicalOrExpr, whole: Span) -> JsonPathResult<()> {
    for and_expr in &expr.terms {
        for basic in &and_expr.terms {
            match basic {
                BasicExpr::Paren { expr, .. } => validate_logical(expr, whole)?,
                BasicExpr::Comparison(cmp) => {
                    validate_comparable(&cmp.left, whole)?;
                    validate_comparable(&cmp.right, whole)?;
                }
                BasicExpr::Test { expr, .. } => match expr {
                    TestExpr::Query(query) => validate_segments(&query.segments, whole)?,
                    TestExpr::Function(call) => {
                        if call.return_type == FunctionType::ValueType {
                            return Err(JsonPathError::validate(
                                format!(
                                    "function '{}' returns ValueType and cannot be used as a test",
                                    call.kind.name()
                                ),
                                call.span,
                            ));
                        }
                        validate_function(call, whole)?;
                    }
                },
            }
        }
    }
    Ok(())
}

fn validate_comparable(comparable: &Comparable, whole: Span) -> JsonPathResult<()> {
    match comparable {
        Comparable::Function(call) => {
            if call.return_type != FunctionType::ValueType {
                return Err(JsonPathError::validate(
                    format!(
                        "function '{}' returns {} and cannot be compared",
                        call.kind.name(),
                        call.return_type
                    ),
                    call.span,
                ));
            }
            validate_function(call, whole)
        }
        Comparable::Literal(_) | Comparable::SingularQuery(_) => Ok(()),
    }
}

fn validate_function(call: &FunctionCall, whole: Span) -> JsonPathResult<()> {
    let signature = call.kind.signature();
    if call.args.len() != signature.params.len() {
        return Err(JsonPathError::validate(
            format!(
                "function '{}' expects {} argument(s), got {}",
                call.kind.name(),
                signature.params.len(),
                call.args.len()
            ),
            call.span,
        ));
    }
    for arg in &call.args {
        match arg {
            FunctionArg::Query(query) => validate_segments(&query.segments, whole)?,
            FunctionArg::Logical(expr) => validate_logical(expr, whole)?,
            FunctionArg::Function(inner) => validate_function(inner, whole)?,
            FunctionArg::Literal(_) | FunctionArg::SingularQuery(_) => {}
        }
    }
    Ok(())
}
