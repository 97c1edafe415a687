//! Recursive-descent JSONPath parser
//!
//! Predictive, one-token lookahead, no backtracking. Consumes the token
//! stream and produces a [`crate::ast::JsonPathQuery`] or a structured error
//! naming the expected and actual tokens with their span. Singular-query
//! admission and function well-typedness are enforced during descent, not by
//! post-hoc inspection; the validation traversal re-asserts the rules as a
//! final gate.

mod core;
mod filters;
mod functions;
mod selectors;
mod validate;

pub use self::core::Parser;
pub use self::validate::validate_query;
