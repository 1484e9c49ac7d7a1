//! Run-scoped registry of external declarations the emitted type text needs.

use indexmap::IndexSet;

/// Grows monotonically during one generation run, deduplicated, and is read
/// out by the render stage once the run is over. Identifiers are opaque here;
/// each target defines its own vocabulary (`java.util.List`, ...).
#[derive(Debug, Clone, Default)]
pub struct DependencyRegistry {
    entries: IndexSet<String>,
}

impl DependencyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent; returns whether the entry was new.
    pub fn register(&mut self, dependency: impl Into<String>) -> bool {
        self.entries.insert(dependency.into())
    }

    /// Unique entries in first-registration order.
    pub fn list(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_list(self) -> Vec<String> {
        self.entries.into_iter().collect()
    }
}
