use crate::detect::is_web_origin;
use crate::error::AdmissionError;
use crate::pattern::{OriginPattern, default_patterns};
use indexmap::IndexSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-wide allow-list: exact origins plus trusted origin patterns.
///
/// The exact set only grows. Lookups either observe an origin or they do
/// not; both are valid states around a concurrent insert.
#[derive(Debug)]
pub struct OriginRegistry {
    exact: RwLock<IndexSet<String>>,
    patterns: Vec<OriginPattern>,
}

impl Default for OriginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginRegistry {
    /// Registry with the loopback and private network patterns and no exact entries.
    pub fn new() -> Self {
        Self::with_patterns(default_patterns())
    }

    pub fn with_patterns<I>(patterns: I) -> Self
    where
        I: IntoIterator<Item = OriginPattern>,
    {
        Self {
            exact: RwLock::new(IndexSet::new()),
            patterns: patterns.into_iter().collect(),
        }
    }

    /// Append a pattern. Only possible while the registry is still exclusively owned.
    pub fn add_pattern(&mut self, pattern: OriginPattern) {
        self.patterns.push(pattern);
    }

    pub fn patterns(&self) -> &[OriginPattern] {
        &self.patterns
    }

    /// Insert an exact origin. Returns `true` if it was not present before.
    pub fn add(&self, origin: &str) -> bool {
        let origin = origin.trim();
        if origin.is_empty() {
            return false;
        }
        if self.read().contains(origin) {
            return false;
        }
        self.write().insert(origin.to_owned())
    }

    /// Insert every origin, returning how many were new.
    pub fn extend<I, S>(&self, origins: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        origins
            .into_iter()
            .filter(|origin| self.add(origin.as_ref()))
            .count()
    }

    /// Add an origin observed at runtime after checking it is an `http`/`https` URL.
    pub fn learn(&self, origin: &str) -> Result<bool, AdmissionError> {
        if origin.trim().is_empty() {
            return Err(AdmissionError::MissingDomain);
        }
        if !is_web_origin(origin) {
            return Err(AdmissionError::InvalidDomainSubmission {
                domain: origin.to_owned(),
            });
        }
        Ok(self.add(origin))
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.contains_exact(origin) || self.matches_pattern(origin)
    }

    pub fn contains_exact(&self, origin: &str) -> bool {
        self.read().contains(origin)
    }

    pub fn matches_pattern(&self, origin: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(origin))
    }

    /// Snapshot of the exact entries in insertion order.
    pub fn allowed_origins(&self) -> Vec<String> {
        self.read().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexSet<String>> {
        self.exact.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexSet<String>> {
        self.exact.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;
