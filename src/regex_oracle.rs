//! Regex oracle for the `match()` and `search()` function extensions
//!
//! The engine presents I-Regexp patterns verbatim; adapting them to the host
//! regex flavor is the oracle's concern. The default oracle compiles with
//! the `regex` crate and keeps a bounded pattern cache so repeated filter
//! evaluation does not recompile.

use std::collections::HashMap;
use std::sync::RwLock;

use regex::Regex;

use crate::error::{JsonPathError, JsonPathResult};

/// Regular-expression test the evaluator delegates to.
///
/// `anchored` requests a whole-string match (`match()`); unanchored tests
/// for any matching substring (`search()`).
pub trait RegexOracle: Send + Sync {
    fn regex_test(&self, pattern: &str, text: &str, anchored: bool) -> JsonPathResult<bool>;
}

/// Default oracle: `regex` crate with a bounded compile-once cache.
pub struct CachedRegexOracle {
    cache: RwLock<HashMap<String, Regex>>,
}

/// Cache size cap; beyond it patterns are compiled per call.
const CACHE_CAPACITY: usize = 64;

impl CachedRegexOracle {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn get_or_compile(&self, pattern: &str, anchored: bool) -> JsonPathResult<Regex> {
        let key = if anchored {
            format!("a:{pattern}")
        } else {
            format!("s:{pattern}")
        };

        if let Ok(cache) = self.cache.read() {
            if let Some(regex) = cache.get(&key) {
                return Ok(regex.clone());
            }
        }

        let effective = if anchored {
            format!("^(?:{pattern})$")
        } else {
            pattern.to_string()
        };
        let regex = Regex::new(&effective).map_err(|err| {
            log::warn!("invalid regex pattern '{pattern}': {err}");
            JsonPathError::regex_oracle(format!("invalid regex pattern '{pattern}': {err}"))
        })?;

        if let Ok(mut cache) = self.cache.write() {
            if cache.len() < CACHE_CAPACITY {
                log::debug!("caching compiled regex pattern ({} cached)", cache.len() + 1);
                cache.insert(key, regex.clone());
            }
        }
        Ok(regex)
    }
}

impl Default for CachedRegexOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl RegexOracle for CachedRegexOracle {
    fn regex_test(&self, pattern: &str, text: &str, anchored: bool) -> JsonPathResult<bool> {
        let regex = self.get_or_compile(pattern, anchored)?;
        Ok(regex.is_match(text))
    }
}

lazy_static::lazy_static! {
    /// Shared oracle used by [`crate::CompiledQuery::evaluate`].
    pub(crate) static ref SHARED_ORACLE: CachedRegexOracle = CachedRegexOracle::new();
}
