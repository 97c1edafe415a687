//! RFC 9535 JSONPath query engine
//!
//! Compiles JSONPath query strings into immutable [`CompiledQuery`] values
//! and evaluates them against [`serde_json::Value`] documents, producing a
//! [`NodeList`]: an ordered sequence of (normalized path, value reference)
//! pairs in document order.
//!
//! The pipeline is tokenizer, then parser, then validation, then
//! evaluator. Compilation catches every syntactic and well-formedness
//! problem up front; evaluation over a compiled query cannot fail except
//! when the regex oracle rejects a `match()` / `search()` pattern.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//!
//! let doc = json!({"store": {"book": [
//!     {"title": "A", "price": 8.95},
//!     {"title": "B", "price": 12.99},
//! ]}});
//!
//! let query = jsonpath_core::compile("$.store.book[?@.price < 10].title")?;
//! let nodes = query.evaluate(&doc)?;
//!
//! assert_eq!(nodes.values(), vec![&json!("A")]);
//! assert_eq!(nodes.paths(), vec!["$['store']['book'][0]['title']"]);
//! # Ok::<(), jsonpath_core::JsonPathError>(())
//! ```
//!
//! The input document is never mutated; the nodelist borrows it and must
//! not outlive it. A compiled query is `Send + Sync` and may be shared
//! across threads, each evaluation owning its accumulator.

pub mod ast;
pub mod error;
mod evaluator;
pub mod nodelist;
pub mod normalized_paths;
pub mod parser;
pub mod regex_oracle;
pub mod tokenizer;
pub mod tokens;
pub mod type_system;

pub use self::error::{ErrorKind, JsonPathError, JsonPathResult, LexErrorKind, Span};
pub use self::nodelist::{enumerate_nodes, Node, NodeList};
pub use self::normalized_paths::{NormalizedPath, PathStep};
pub use self::regex_oracle::{CachedRegexOracle, RegexOracle};
pub use self::type_system::{FunctionKind, FunctionSignature, FunctionType};

use serde_json::Value;

/// Compile a JSONPath query string: tokenize, parse, validate.
///
/// # Errors
///
/// Returns a [`JsonPathError`] of kind `Lex`, `Parse`, or `Validate`, each
/// carrying a message and a byte span into the query string.
pub fn compile(query: &str) -> JsonPathResult<CompiledQuery> {
    CompiledQuery::compile(query)
}

/// A compiled, immutable JSONPath query.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    source: String,
    ast: ast::JsonPathQuery,
}

impl CompiledQuery {
    /// Compile a query string. See [`compile`].
    pub fn compile(query: &str) -> JsonPathResult<Self> {
        let tokens = tokenizer::Tokenizer::new(query).tokenize()?;
        let ast = parser::Parser::new(tokens).parse()?;
        parser::validate_query(&ast, query.len())?;
        log::debug!(
            "compiled JSONPath query '{query}' ({} segment(s))",
            ast.segments.len()
        );
        Ok(Self {
            source: query.to_string(),
            ast,
        })
    }

    /// The query string this was compiled from.
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled syntax tree.
    #[inline]
    #[must_use]
    pub fn query(&self) -> &ast::JsonPathQuery {
        &self.ast
    }

    /// Evaluate against a JSON document using the shared regex oracle.
    ///
    /// # Errors
    ///
    /// Only a regex-oracle failure during `match()` / `search()` can error;
    /// absent members, out-of-range indices, and type-mismatched
    /// comparisons yield empty results or false per RFC 9535.
    pub fn evaluate<'a>(&self, root: &'a Value) -> JsonPathResult<NodeList<'a>> {
        self.evaluate_with_oracle(root, &*regex_oracle::SHARED_ORACLE)
    }

    /// Evaluate with a caller-supplied regex oracle.
    pub fn evaluate_with_oracle<'a>(
        &self,
        root: &'a Value,
        oracle: &dyn RegexOracle,
    ) -> JsonPathResult<NodeList<'a>> {
        let nodes = evaluator::evaluate_query(&self.ast, root, oracle)?;
        log::debug!(
            "query '{}' selected {} node(s)",
            self.source,
            nodes.len()
        );
        Ok(nodes)
    }
}
