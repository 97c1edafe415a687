//! Function extension evaluation
//!
//! Evaluates the five RFC 9535 builtins. Arguments arrive already coerced
//! to the declared parameter types by the parser, so each builtin reads its
//! arguments through the matching accessor and never inspects types at
//! runtime. Type-mismatched operands at evaluation time (a non-string fed
//! to `match()`) yield false or Nothing, never an error; the one failure
//! mode is the regex oracle itself.

use std::borrow::Cow;

use serde_json::Value;

use super::core::{eval_filter_query, EvalContext};
use super::filters::{self, ValueOrNothing};
use crate::ast::{FunctionArg, FunctionCall};
use crate::error::JsonPathResult;
use crate::nodelist::Node;
use crate::normalized_paths::PathChain;
use crate::type_system::FunctionKind;

/// Result of a function call, tagged by the declared return type.
pub(super) enum FunctionOutcome<'v> {
    Value(ValueOrNothing<'v>),
    Logical(bool),
    Nodes(Vec<Node<'v>>),
}

pub(super) fn eval_function<'a: 'e, 'e>(
    ctx: &EvalContext<'a, '_>,
    call: &'e FunctionCall,
    current: &'a Value,
) -> JsonPathResult<FunctionOutcome<'e>> {
    match call.kind {
        FunctionKind::Length => {
            let outcome = match eval_value_arg(ctx, call.args.first(), current)? {
                ValueOrNothing::Value(value) => match value.as_ref() {
                    Value::String(s) => count_value(s.chars().count()),
                    Value::Array(items) => count_value(items.len()),
                    Value::Object(map) => count_value(map.len()),
                    _ => ValueOrNothing::Nothing,
                },
                ValueOrNothing::Nothing => ValueOrNothing::Nothing,
            };
            Ok(FunctionOutcome::Value(outcome))
        }
        FunctionKind::Count => {
            let nodes = eval_nodes_arg(ctx, call.args.first(), current)?;
            Ok(FunctionOutcome::Value(count_value(nodes.len())))
        }
        FunctionKind::Match | FunctionKind::Search => {
            let anchored = call.kind == FunctionKind::Match;
            let text = eval_value_arg(ctx, call.args.first(), current)?;
            let pattern = eval_value_arg(ctx, call.args.get(1), current)?;
            match (&text, &pattern) {
                (ValueOrNothing::Value(text), ValueOrNothing::Value(pattern)) => {
                    match (text.as_ref(), pattern.as_ref()) {
                        (Value::String(text), Value::String(pattern)) => {
                            let matched = ctx
                                .oracle
                                .regex_test(pattern, text, anchored)
                                .map_err(|mut err| {
                                    err.span = call.span;
                                    err
                                })?;
                            Ok(FunctionOutcome::Logical(matched))
                        }
                        _ => Ok(FunctionOutcome::Logical(false)),
                    }
                }
                _ => Ok(FunctionOutcome::Logical(false)),
            }
        }
        FunctionKind::Value => {
            let mut nodes = eval_nodes_arg(ctx, call.args.first(), current)?;
            if nodes.len() == 1 {
                match nodes.pop() {
                    Some(node) => Ok(FunctionOutcome::Value(ValueOrNothing::Value(
                        Cow::Borrowed(node.value()),
                    ))),
                    None => Ok(FunctionOutcome::Value(ValueOrNothing::Nothing)),
                }
            } else {
                Ok(FunctionOutcome::Value(ValueOrNothing::Nothing))
            }
        }
    }
}

fn count_value<'v>(n: usize) -> ValueOrNothing<'v> {
    ValueOrNothing::Value(Cow::Owned(Value::from(n as u64)))
}

/// Evaluate an argument sitting in a ValueType slot.
fn eval_value_arg<'a: 'e, 'e>(
    ctx: &EvalContext<'a, '_>,
    arg: Option<&'e FunctionArg>,
    current: &'a Value,
) -> JsonPathResult<ValueOrNothing<'e>> {
    match arg {
        Some(FunctionArg::Literal(value)) => Ok(ValueOrNothing::Value(Cow::Borrowed(value))),
        Some(FunctionArg::SingularQuery(query)) => {
            Ok(match filters::eval_singular_query(ctx, query, current) {
                Some(value) => ValueOrNothing::Value(Cow::Borrowed(value)),
                None => ValueOrNothing::Nothing,
            })
        }
        Some(FunctionArg::Function(inner)) => match eval_function(ctx, inner, current)? {
            FunctionOutcome::Value(value) => Ok(value),
            _ => Ok(ValueOrNothing::Nothing),
        },
        // General queries and logical expressions never type-check into a
        // ValueType slot
        _ => Ok(ValueOrNothing::Nothing),
    }
}

/// Evaluate an argument sitting in a NodesType slot.
fn eval_nodes_arg<'a: 'e, 'e>(
    ctx: &EvalContext<'a, '_>,
    arg: Option<&'e FunctionArg>,
    current: &'a Value,
) -> JsonPathResult<Vec<Node<'e>>> {
    match arg {
        Some(FunctionArg::Query(query)) => Ok(eval_filter_query(ctx, query, current)?),
        Some(FunctionArg::SingularQuery(query)) => {
            Ok(match filters::eval_singular_query(ctx, query, current) {
                Some(value) => vec![Node {
                    chain: PathChain::root(),
                    value,
                }],
                None => Vec::new(),
            })
        }
        Some(FunctionArg::Function(inner)) => match eval_function(ctx, inner, current)? {
            FunctionOutcome::Nodes(nodes) => Ok(nodes),
            _ => Ok(Vec::new()),
        },
        _ => Ok(Vec::new()),
    }
}
