//! Selector application
//!
//! Name, wildcard, index, slice, and filter selectors applied to a single
//! node. Selectors are silent on values of the wrong shape: a name selector
//! on an array, or an index selector on an object, emits nothing.

use serde_json::Value;

use super::core::EvalContext;
use super::filters;
use crate::ast::{Selector, SliceBounds};
use crate::error::JsonPathResult;
use crate::nodelist::Node;
use crate::normalized_paths::PathStep;

/// Apply one selector to `node`, appending results in document order.
pub(super) fn apply_selector<'a>(
    ctx: &EvalContext<'a, '_>,
    selector: &Selector,
    node: &Node<'a>,
    out: &mut Vec<Node<'a>>,
) -> JsonPathResult<()> {
    match selector {
        Selector::Name(name) => {
            if let Value::Object(map) = node.value {
                if let Some(value) = map.get(name) {
                    out.push(Node {
                        chain: node.chain.child(PathStep::Name(name.clone())),
                        value,
                    });
                }
            }
        }
        Selector::Wildcard => match node.value {
            Value::Object(map) => {
                for (key, value) in map {
                    out.push(Node {
                        chain: node.chain.child(PathStep::Name(key.clone())),
                        value,
                    });
                }
            }
            Value::Array(items) => {
                for (index, value) in items.iter().enumerate() {
                    out.push(Node {
                        chain: node.chain.child(PathStep::Index(index)),
                        value,
                    });
                }
            }
            _ => {}
        },
        Selector::Index(index) => {
            if let Value::Array(items) = node.value {
                if let Some(idx) = normalize_index(*index, items.len()) {
                    out.push(Node {
                        chain: node.chain.child(PathStep::Index(idx)),
                        value: &items[idx],
                    });
                }
            }
        }
        Selector::Slice(bounds) => {
            if let Value::Array(items) = node.value {
                for idx in slice_indices(bounds, items.len()) {
                    out.push(Node {
                        chain: node.chain.child(PathStep::Index(idx)),
                        value: &items[idx],
                    });
                }
            }
        }
        Selector::Filter(expr) => match node.value {
            Value::Object(map) => {
                for (key, value) in map {
                    if filters::eval_logical(ctx, expr, value)? {
                        out.push(Node {
                            chain: node.chain.child(PathStep::Name(key.clone())),
                            value,
                        });
                    }
                }
            }
            Value::Array(items) => {
                for (index, value) in items.iter().enumerate() {
                    if filters::eval_logical(ctx, expr, value)? {
                        out.push(Node {
                            chain: node.chain.child(PathStep::Index(index)),
                            value,
                        });
                    }
                }
            }
            _ => {}
        },
    }
    Ok(())
}

/// Resolve a possibly negative index against an array length.
pub(super) fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let idx = if index >= 0 { index } else { len + index };
    if (0..len).contains(&idx) {
        Some(idx as usize)
    } else {
        None
    }
}

/// Indices selected by a slice, in iteration order, per the bounds
/// algorithm of RFC 9535 section 2.3.4.2.2.
pub(super) fn slice_indices(bounds: &SliceBounds, len: usize) -> Vec<usize> {
    let len = len as i64;
    let step = bounds.step.unwrap_or(1);
    if step == 0 {
        // Rejected at compile time; evaluation stays total regardless
        return Vec::new();
    }
    let (start, end) = if step > 0 {
        (bounds.start.unwrap_or(0), bounds.end.unwrap_or(len))
    } else {
        (bounds.start.unwrap_or(len - 1), bounds.end.unwrap_or(-len - 1))
    };
    let normalize = |i: i64| if i >= 0 { i } else { len + i };
    let n_start = normalize(start);
    let n_end = normalize(end);

    let mut indices = Vec::new();
    if step > 0 {
        let lower = n_start.clamp(0, len);
        let upper = n_end.clamp(0, len);
        let mut i = lower;
        while i < upper {
            indices.push(i as usize);
            i += step;
        }
    } else {
        let upper = n_start.clamp(-1, len - 1);
        let lower = n_end.clamp(-1, len - 1);
        let mut i = upper;
        while i > lower {
            indices.push(i as usize);
            i += step;
        }
    }
    indices
}
