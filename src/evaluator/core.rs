//! Top-level walk and segment application
//!
//! The walk starts from the singleton nodelist `[($, root)]` and applies
//! each segment to every node in the current list, in order. Descendant
//! traversal is pre-order, depth-first, left-to-right, driven by an
//! explicit stack so document depth never grows the call stack.

use serde_json::Value;

use super::selectors;
use crate::ast::{FilterQuery, JsonPathQuery, Segment, Selector};
use crate::error::JsonPathResult;
use crate::nodelist::{Node, NodeList};
use crate::normalized_paths::{PathChain, PathStep};
use crate::regex_oracle::RegexOracle;

/// Shared evaluation state: the document root (for `$` inside filters) and
/// the regex oracle behind `match()` / `search()`.
pub(super) struct EvalContext<'a, 'o> {
    pub(super) root: &'a Value,
    pub(super) oracle: &'o dyn RegexOracle,
}

/// Evaluate a compiled query against `root`.
pub(crate) fn evaluate_query<'a>(
    query: &JsonPathQuery,
    root: &'a Value,
    oracle: &dyn RegexOracle,
) -> JsonPathResult<NodeList<'a>> {
    let ctx = EvalContext { root, oracle };
    let mut nodes = vec![Node {
        chain: PathChain::root(),
        value: root,
    }];
    for segment in &query.segments {
        nodes = apply_segment(&ctx, segment, &nodes)?;
    }
    Ok(NodeList::from_nodes(nodes))
}

/// Apply one segment to every node of the input list, preserving document
/// order in the output.
pub(super) fn apply_segment<'a>(
    ctx: &EvalContext<'a, '_>,
    segment: &Segment,
    input: &[Node<'a>],
) -> JsonPathResult<Vec<Node<'a>>> {
    let mut out = Vec::new();
    match segment {
        Segment::Child(selector_list) => {
            for node in input {
                for selector in selector_list {
                    selectors::apply_selector(ctx, selector, node, &mut out)?;
                }
            }
        }
        Segment::Descendant(selector_list) => {
            for node in input {
                descend(ctx, selector_list, node, &mut out)?;
            }
        }
    }
    Ok(out)
}

/// Visit `origin` and every node below it in pre-order, applying the
/// selectors at each visited node.
fn descend<'a>(
    ctx: &EvalContext<'a, '_>,
    selector_list: &[Selector],
    origin: &Node<'a>,
    out: &mut Vec<Node<'a>>,
) -> JsonPathResult<()> {
    let mut stack = vec![origin.clone()];
    while let Some(current) = stack.pop() {
        for selector in selector_list {
            selectors::apply_selector(ctx, selector, &current, out)?;
        }
        // Children pushed in reverse so the leftmost pops first
        match current.value {
            Value::Object(map) => {
                for (key, value) in map.iter().rev() {
                    stack.push(Node {
                        chain: current.chain.child(PathStep::Name(key.clone())),
                        value,
                    });
                }
            }
            Value::Array(items) => {
                for (index, value) in items.iter().enumerate().rev() {
                    stack.push(Node {
                        chain: current.chain.child(PathStep::Index(index)),
                        value,
                    });
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Evaluate a query embedded in a filter expression, anchored at the
/// current node (`@`) or the document root (`$`).
///
/// The resulting paths restart at the query origin; filters only ever use
/// the values and the emptiness of the list, never the paths.
pub(super) fn eval_filter_query<'a>(
    ctx: &EvalContext<'a, '_>,
    query: &FilterQuery,
    current: &'a Value,
) -> JsonPathResult<Vec<Node<'a>>> {
    let origin = if query.relative { current } else { ctx.root };
    let mut nodes = vec![Node {
        chain: PathChain::root(),
        value: origin,
    }];
    for segment in &query.segments {
        nodes = apply_segment(ctx, segment, &nodes)?;
    }
    Ok(nodes)
}
