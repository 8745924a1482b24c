//! The shared manifest-to-dependencies mapping.

use crate::cache::CachedMapping;
use dashmap::DashMap;
use std::sync::Arc;

/// Manifest path to ordered coordinate lines, shared between the resolution
/// worker (the only writer) and any number of readers.
///
/// Uses DashMap so readers computing library roots never wait for a run to
/// finish; they observe each file's entry either before or after its update.
#[derive(Debug, Clone, Default)]
pub struct DependencyMap {
    entries: Arc<DashMap<String, Vec<String>>>,
}

impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `lines` for `manifest`, replacing any previous entry.
    pub fn insert(&self, manifest: impl Into<String>, lines: Vec<String>) {
        self.entries.insert(manifest.into(), lines);
    }

    #[must_use]
    pub fn get(&self, manifest: &str) -> Option<Vec<String>> {
        self.entries.get(manifest).map(|entry| entry.value().clone())
    }

    #[must_use]
    pub fn contains(&self, manifest: &str) -> bool {
        self.entries.contains_key(manifest)
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Replaces every entry with `mapping`.
    pub fn replace_all(&self, mapping: CachedMapping) {
        self.entries.clear();
        for (manifest, lines) in mapping {
            self.entries.insert(manifest, lines);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> CachedMapping {
        self.entries.iter().map(|entry| (entry.key().clone(), entry.value().clone())).collect()
    }
}
