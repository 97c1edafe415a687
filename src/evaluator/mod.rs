//! JSONPath evaluator
//!
//! Walks a compiled AST against a JSON root and produces a nodelist in
//! document order. Evaluation is total over valid ASTs: absent members,
//! out-of-range indices, and type-mismatched comparisons yield empty
//! results or false, never errors. The only evaluation-time failure is a
//! regex-oracle error from `match()` / `search()`.

mod core;
mod filters;
mod functions;
mod selectors;

pub(crate) use self::core::evaluate_query;
