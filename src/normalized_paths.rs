//! RFC 9535 normalized paths
//!
//! A normalized path uniquely identifies one node in a JSON document using
//! only name and index steps, rendered in the canonical bracket syntax of
//! RFC 9535 section 2.7 (`$['store']['book'][0]`). The evaluator threads an
//! O(1)-extend [`PathChain`] through the walk and flattens it to a
//! [`NormalizedPath`] only when a caller asks.

use std::fmt;
use std::rc::Rc;

use serde::{Serialize, Serializer};
use serde_json::Value;

/// One step of a normalized path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Object member name
    Name(String),
    /// Array element index (always non-negative in normal form)
    Index(usize),
}

/// A normalized path: `$` followed by name/index steps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedPath {
    steps: Vec<PathStep>,
}

impl NormalizedPath {
    /// The root path `$`.
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self { steps: Vec::new() }
    }

    #[must_use]
    pub fn from_steps(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps below the root.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Follow the path through `root`, returning the referenced value.
    ///
    /// Only name and index steps are needed, so resolution cannot branch;
    /// a missing member or out-of-range index yields `None`.
    #[must_use]
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for step in &self.steps {
            current = match step {
                PathStep::Name(name) => current.as_object()?.get(name)?,
                PathStep::Index(index) => current.as_array()?.get(*index)?,
            };
        }
        Some(current)
    }

    /// Render this path as an RFC 6901 JSON Pointer (`/store/book/0`).
    #[must_use]
    pub fn to_json_pointer(&self) -> String {
        let mut pointer = String::new();
        for step in &self.steps {
            pointer.push('/');
            match step {
                PathStep::Name(name) => {
                    // RFC 6901 reference-token escaping: ~ first, then /
                    for c in name.chars() {
                        match c {
                            '~' => pointer.push_str("~0"),
                            '/' => pointer.push_str("~1"),
                            other => pointer.push(other),
                        }
                    }
                }
                PathStep::Index(index) => {
                    pointer.push_str(&index.to_string());
                }
            }
        }
        pointer
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for step in &self.steps {
            match step {
                PathStep::Name(name) => write!(f, "['{}']", escape_member_name(name))?,
                PathStep::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for NormalizedPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Escape a member name for the single-quoted normal form of RFC 9535
/// section 2.7: backslash, single quote, and the JSON control characters.
#[must_use]
pub fn escape_member_name(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '\u{0008}' => escaped.push_str("\\b"),
            '\u{000C}' => escaped.push_str("\\f"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\'' => escaped.push_str("\\'"),
            '\\' => escaped.push_str("\\\\"),
            c if (c as u32) < 0x20 => {
                escaped.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => escaped.push(c),
        }
    }
    escaped
}

/// Persistent path representation used while evaluating: each frame shares
/// its parent and adds one step, so extending is O(1) and nothing is copied
/// until a caller requests the flattened form.
#[derive(Clone)]
pub(crate) struct PathChain {
    link: Option<Rc<PathLink>>,
}

struct PathLink {
    parent: PathChain,
    step: PathStep,
}

impl PathChain {
    /// Chain for the document root `$`.
    #[inline]
    pub(crate) fn root() -> Self {
        Self { link: None }
    }

    /// Extend the chain by one step, sharing the prefix.
    #[inline]
    pub(crate) fn child(&self, step: PathStep) -> Self {
        Self {
            link: Some(Rc::new(PathLink {
                parent: self.clone(),
                step,
            })),
        }
    }

    /// Flatten into an owned normalized path.
    pub(crate) fn to_normalized(&self) -> NormalizedPath {
        let mut steps = Vec::new();
        let mut current = self;
        while let Some(link) = &current.link {
            steps.push(link.step.clone());
            current = &link.parent;
        }
        steps.reverse();
        NormalizedPath { steps }
    }
}
