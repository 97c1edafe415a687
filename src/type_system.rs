//! RFC 9535 function extension type system
//!
//! Every JSONPath sub-expression has exactly one of three static types:
//! `ValueType` (a single JSON value or Nothing), `LogicalType` (true/false),
//! or `NodesType` (a nodelist). The registry below gives the declared
//! signature of each builtin; the parser checks arguments against it so the
//! evaluator can dispatch on AST variants without runtime type inspection.

use std::fmt;

/// The three static types of JSONPath function expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionType {
    /// A single JSON value or the special result Nothing
    ValueType,
    /// A logical true/false, unrelated to the JSON literals true and false
    LogicalType,
    /// A nodelist
    NodesType,
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FunctionType::ValueType => "ValueType",
            FunctionType::LogicalType => "LogicalType",
            FunctionType::NodesType => "NodesType",
        };
        f.write_str(name)
    }
}

/// The function extensions defined by RFC 9535 section 2.4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// `length(value)`: code points of a string, elements of an array,
    /// members of an object; otherwise Nothing
    Length,
    /// `count(nodes)`: number of nodes in a nodelist
    Count,
    /// `match(value, regex)`: anchored regular expression test
    Match,
    /// `search(value, regex)`: substring regular expression test
    Search,
    /// `value(nodes)`: the value of a singleton nodelist, otherwise Nothing
    Value,
}

/// Declared parameter and return types of a function extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSignature {
    pub params: &'static [FunctionType],
    pub return_type: FunctionType,
}

impl FunctionKind {
    /// Resolve a function name against the static registry.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "length" => Some(FunctionKind::Length),
            "count" => Some(FunctionKind::Count),
            "match" => Some(FunctionKind::Match),
            "search" => Some(FunctionKind::Search),
            "value" => Some(FunctionKind::Value),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            FunctionKind::Length => "length",
            FunctionKind::Count => "count",
            FunctionKind::Match => "match",
            FunctionKind::Search => "search",
            FunctionKind::Value => "value",
        }
    }

    /// RFC 9535 section 2.4 signature for this function.
    #[must_use]
    pub fn signature(self) -> FunctionSignature {
        use FunctionType::{LogicalType, NodesType, ValueType};
        match self {
            FunctionKind::Length => FunctionSignature {
                params: &[ValueType],
                return_type: ValueType,
            },
            FunctionKind::Count => FunctionSignature {
                params: &[NodesType],
                return_type: ValueType,
            },
            FunctionKind::Match | FunctionKind::Search => FunctionSignature {
                params: &[ValueType, ValueType],
                return_type: LogicalType,
            },
            FunctionKind::Value => FunctionSignature {
                params: &[NodesType],
                return_type: ValueType,
            },
        }
    }
}
