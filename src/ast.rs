//! JSONPath abstract syntax tree
//!
//! The typed tree built by the parser and walked by the evaluator. The shape
//! encodes the RFC 9535 well-formedness rules: the root query is always
//! absolute, relative queries exist only inside filter expressions, and
//! singular queries are their own type so singular-only positions cannot
//! hold a general query.

use std::fmt;

use serde_json::Value;

use crate::error::Span;
use crate::type_system::{FunctionKind, FunctionType};

/// A compiled JSONPath query: `$` followed by segments.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPathQuery {
    pub segments: Vec<Segment>,
}

/// One query segment holding its selector list.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Child segment: selectors applied to each input node
    Child(Vec<Selector>),
    /// Descendant segment: selectors applied to each input node and every
    /// node below it, in document order
    Descendant(Vec<Selector>),
}

impl Segment {
    #[inline]
    #[must_use]
    pub fn selectors(&self) -> &[Selector] {
        match self {
            Segment::Child(selectors) | Segment::Descendant(selectors) => selectors,
        }
    }
}

/// Individual selector inside a segment.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Object member by name (`.name` or `['name']`)
    Name(String),
    /// Every member of an object or element of an array (`*`)
    Wildcard,
    /// Array element by index, negative counts from the end (`[3]`, `[-1]`)
    Index(i64),
    /// Array slice (`[start:end:step]`)
    Slice(SliceBounds),
    /// Filter selector (`[?expr]`)
    Filter(LogicalOrExpr),
}

/// Raw slice bounds as written in the query; `None` means omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceBounds {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub step: Option<i64>,
}

/// Disjunction of conjunctions: `a || b || c`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalOrExpr {
    pub terms: Vec<LogicalAndExpr>,
}

/// Conjunction of basic expressions: `a && b && c`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalAndExpr {
    pub terms: Vec<BasicExpr>,
}

/// One unit of a filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum BasicExpr {
    /// Parenthesized sub-expression, optionally negated
    Paren { negated: bool, expr: LogicalOrExpr },
    /// Comparison between two comparables
    Comparison(ComparisonExpr),
    /// Existence or logical test, optionally negated
    Test { negated: bool, expr: TestExpr },
}

/// `left op right` over the value-or-Nothing domain.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonExpr {
    pub left: Comparable,
    pub op: ComparisonOp,
    pub right: Comparable,
}

/// Comparison operators. Non-associative: `a == b == c` does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            ComparisonOp::Eq => "==",
            ComparisonOp::Ne => "!=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Le => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Ge => ">=",
        };
        f.write_str(op)
    }
}

/// Body of a test expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TestExpr {
    /// Filter query: true iff its nodelist is non-empty
    Query(FilterQuery),
    /// Function call returning LogicalType or NodesType
    Function(FunctionCall),
}

/// A general query embedded in a filter, anchored at `@` or `$`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    pub relative: bool,
    pub segments: Vec<Segment>,
}

impl FilterQuery {
    /// Reinterpret this query as a singular query if every segment is a
    /// child segment with a single name or index selector.
    #[must_use]
    pub fn as_singular(&self) -> Option<SingularQuery> {
        let mut segments = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            let selectors = match segment {
                Segment::Child(selectors) => selectors,
                Segment::Descendant(_) => return None,
            };
            match selectors.as_slice() {
                [Selector::Name(name)] => segments.push(SingularSegment::Name(name.clone())),
                [Selector::Index(index)] => segments.push(SingularSegment::Index(*index)),
                _ => return None,
            }
        }
        Some(SingularQuery {
            relative: self.relative,
            segments,
        })
    }
}

/// Operand of a comparison; always ValueType.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparable {
    /// Literal JSON value from the query text
    Literal(Value),
    /// Query guaranteed to select at most one node
    SingularQuery(SingularQuery),
    /// Function call returning ValueType
    Function(FunctionCall),
}

/// A query provably yielding at most one node: only name and index steps.
#[derive(Debug, Clone, PartialEq)]
pub struct SingularQuery {
    pub relative: bool,
    pub segments: Vec<SingularSegment>,
}

/// One step of a singular query.
#[derive(Debug, Clone, PartialEq)]
pub enum SingularSegment {
    Name(String),
    Index(i64),
}

/// A call to one of the registered function extensions.
///
/// The resolved builtin and its declared return type are fixed at parse
/// time; the evaluator never inspects types at runtime. The span covers the
/// call in the source query and is attached to evaluation-time regex errors.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub kind: FunctionKind,
    pub args: Vec<FunctionArg>,
    pub return_type: FunctionType,
    pub span: Span,
}

/// One argument of a function call, already coerced to the declared
/// parameter type where RFC 9535 permits an implicit conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionArg {
    /// Literal value (ValueType)
    Literal(Value),
    /// Singular query feeding a ValueType parameter
    SingularQuery(SingularQuery),
    /// General query feeding a NodesType or LogicalType parameter
    Query(FilterQuery),
    /// Logical expression feeding a LogicalType parameter
    Logical(LogicalOrExpr),
    /// Nested function call
    Function(FunctionCall),
}
