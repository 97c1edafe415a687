//! Filter expression evaluation
//!
//! Logical expressions evaluate to plain booleans. Comparables evaluate
//! into the [`ValueOrNothing`] domain, where Nothing is an explicit variant
//! distinct from null, false, and the empty nodelist, and propagates through
//! every comparison per RFC 9535 section 2.3.5.2.

use std::borrow::Cow;

use serde_json::Value;

use super::core::{eval_filter_query, EvalContext};
use super::functions::{self, FunctionOutcome};
use super::selectors;
use crate::ast::{
    BasicExpr, Comparable, ComparisonExpr, ComparisonOp, LogicalOrExpr, SingularQuery,
    SingularSegment, TestExpr,
};
use crate::error::JsonPathResult;

/// Comparable-value domain: a JSON value or the distinguished Nothing.
pub(super) enum ValueOrNothing<'v> {
    Nothing,
    Value(Cow<'v, Value>),
}

/// Evaluate a logical expression with `@` bound to `current`.
pub(super) fn eval_logical<'a>(
    ctx: &EvalContext<'a, '_>,
    expr: &LogicalOrExpr,
    current: &'a Value,
) -> JsonPathResult<bool> {
    for and_expr in &expr.terms {
        let mut all = true;
        for basic in &and_expr.terms {
            if !eval_basic(ctx, basic, current)? {
                all = false;
                break;
            }
        }
        if all {
            return Ok(true);
        }
    }
    Ok(false)
}

fn eval_basic<'a>(
    ctx: &EvalContext<'a, '_>,
    basic: &BasicExpr,
    current: &'a Value,
) -> JsonPathResult<bool> {
    match basic {
        BasicExpr::Paren { negated, expr } => Ok(eval_logical(ctx, expr, current)? != *negated),
        BasicExpr::Comparison(cmp) => eval_comparison(ctx, cmp, current),
        BasicExpr::Test { negated, expr } => {
            let truth = match expr {
                TestExpr::Query(query) => !eval_filter_query(ctx, query, current)?.is_empty(),
                TestExpr::Function(call) => match functions::eval_function(ctx, call, current)? {
                    FunctionOutcome::Logical(b) => b,
                    FunctionOutcome::Nodes(nodes) => !nodes.is_empty(),
                    // ValueType in test position is rejected at compile time
                    FunctionOutcome::Value(_) => false,
                },
            };
            Ok(truth != *negated)
        }
    }
}

fn eval_comparison<'a>(
    ctx: &EvalContext<'a, '_>,
    cmp: &ComparisonExpr,
    current: &'a Value,
) -> JsonPathResult<bool> {
    let left = eval_comparable(ctx, &cmp.left, current)?;
    let right = eval_comparable(ctx, &cmp.right, current)?;
    Ok(compare(&left, cmp.op, &right))
}

fn eval_comparable<'a: 'e, 'e>(
    ctx: &EvalContext<'a, '_>,
    comparable: &'e Comparable,
    current: &'a Value,
) -> JsonPathResult<ValueOrNothing<'e>> {
    match comparable {
        Comparable::Literal(value) => Ok(ValueOrNothing::Value(Cow::Borrowed(value))),
        Comparable::SingularQuery(query) => {
            Ok(match eval_singular_query(ctx, query, current) {
                Some(value) => ValueOrNothing::Value(Cow::Borrowed(value)),
                None => ValueOrNothing::Nothing,
            })
        }
        Comparable::Function(call) => match functions::eval_function(ctx, call, current)? {
            FunctionOutcome::Value(value) => Ok(value),
            // Non-ValueType returns are rejected at compile time
            _ => Ok(ValueOrNothing::Nothing),
        },
    }
}

/// Walk a singular query to its single value, or Nothing if any step
/// selects nothing.
pub(super) fn eval_singular_query<'a>(
    ctx: &EvalContext<'a, '_>,
    query: &SingularQuery,
    current: &'a Value,
) -> Option<&'a Value> {
    let mut value = if query.relative { current } else { ctx.root };
    for segment in &query.segments {
        value = match segment {
            SingularSegment::Name(name) => value.as_object()?.get(name)?,
            SingularSegment::Index(index) => {
                let items = value.as_array()?;
                let idx = selectors::normalize_index(*index, items.len())?;
                &items[idx]
            }
        };
    }
    Some(value)
}

/// RFC 9535 comparison over the value-or-Nothing domain.
fn compare(left: &ValueOrNothing<'_>, op: ComparisonOp, right: &ValueOrNothing<'_>) -> bool {
    match op {
        ComparisonOp::Eq => equals(left, right),
        ComparisonOp::Ne => !equals(left, right),
        ComparisonOp::Lt => less_than(left, right),
        ComparisonOp::Le => less_than(left, right) || equals(left, right),
        ComparisonOp::Gt => less_than(right, left),
        ComparisonOp::Ge => less_than(right, left) || equals(left, right),
    }
}

/// `==`: true iff both sides are Nothing, or both are values that are
/// deeply equal.
fn equals(left: &ValueOrNothing<'_>, right: &ValueOrNothing<'_>) -> bool {
    match (left, right) {
        (ValueOrNothing::Nothing, ValueOrNothing::Nothing) => true,
        (ValueOrNothing::Value(a), ValueOrNothing::Value(b)) => json_equal(a, b),
        _ => false,
    }
}

/// `<`: defined only for number/number (numeric) and string/string
/// (code-point order); anything else, Nothing included, is false.
fn less_than(left: &ValueOrNothing<'_>, right: &ValueOrNothing<'_>) -> bool {
    match (left, right) {
        (ValueOrNothing::Value(a), ValueOrNothing::Value(b)) => match (a.as_ref(), b.as_ref()) {
            (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => x < y,
                _ => false,
            },
            (Value::String(x), Value::String(y)) => x < y,
            _ => false,
        },
        _ => false,
    }
}

/// Deep JSON equality: numbers compared numerically across integer and
/// float representations (`1 == 1.0`), strings byte-wise, arrays
/// elementwise, objects by unordered key/value equality.
pub(super) fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => number_equal(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(xv, yv)| json_equal(xv, yv))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, xv)| y.get(key).is_some_and(|yv| json_equal(xv, yv)))
        }
        _ => false,
    }
}

fn number_equal(x: &serde_json::Number, y: &serde_json::Number) -> bool {
    // Exact integer paths first, f64 comparison across representations
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
