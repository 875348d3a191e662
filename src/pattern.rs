use crate::constants::DEFAULT_ORIGIN_PATTERNS;
use once_cell::sync::Lazy;
use regex_automata::meta::{BuildError, Regex};
use regex_automata::util::syntax;
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to compile origin pattern")]
    Build(#[source] Box<BuildError>),
    #[error("compiling origin pattern exceeded the configured budget")]
    Timeout { elapsed: Duration, budget: Duration },
    #[error("origin pattern length {length} exceeds maximum allowed {max}")]
    TooLong { length: usize, max: usize },
}

const PATTERN_COMPILE_BUDGET: Duration = Duration::from_millis(100);
const MAX_PATTERN_LENGTH: usize = 50_000;
pub(crate) const MAX_ORIGIN_LENGTH: usize = 4_096;

// The built-in set is compiled without a time budget.
static DEFAULT_PATTERNS: Lazy<Vec<OriginPattern>> = Lazy::new(|| {
    DEFAULT_ORIGIN_PATTERNS
        .iter()
        .filter_map(|source| match OriginPattern::without_budget(source) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                error!(pattern = source, error = %err, "default origin pattern dropped");
                None
            }
        })
        .collect()
});

/// A compiled regular expression admitting a whole family of origins.
///
/// Patterns are matched against the full candidate string. Anchoring is the
/// pattern author's responsibility; the defaults all carry `^` and `$`.
#[derive(Clone)]
pub struct OriginPattern {
    source: String,
    regex: Regex,
}

impl OriginPattern {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        Self::compile(pattern, PATTERN_COMPILE_BUDGET)
    }

    fn compile(pattern: &str, budget: Duration) -> Result<Self, PatternError> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(PatternError::TooLong {
                length: pattern.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        let started = Instant::now();
        // ASCII classes keep `\d` to [0-9]; utf8 is off so byte classes compile.
        let regex = Regex::builder()
            .syntax(syntax::Config::new().unicode(false).utf8(false))
            .build(pattern)
            .map_err(|err| PatternError::Build(Box::new(err)))?;
        let elapsed = started.elapsed();
        if elapsed > budget {
            return Err(PatternError::Timeout { elapsed, budget });
        }

        Ok(Self {
            source: pattern.to_owned(),
            regex,
        })
    }

    pub(crate) fn without_budget(pattern: &str) -> Result<Self, PatternError> {
        Self::compile(pattern, Duration::MAX)
    }

    #[cfg(test)]
    pub(crate) fn with_budget(pattern: &str, budget: Duration) -> Result<Self, PatternError> {
        Self::compile(pattern, budget)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, candidate: &str) -> bool {
        candidate.len() <= MAX_ORIGIN_LENGTH && self.regex.is_match(candidate.as_bytes())
    }
}

impl fmt::Debug for OriginPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OriginPattern").field(&self.source).finish()
    }
}

/// The loopback and private network patterns, compiled once per process.
pub fn default_patterns() -> Vec<OriginPattern> {
    DEFAULT_PATTERNS.clone()
}

#[cfg(test)]
#[path = "pattern_test.rs"]
mod pattern_test;
