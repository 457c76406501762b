use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use serde::Serialize;

/// A stable document identifier derived from (collection, relative_path).
///
/// The numeric value doubles as the deterministic ordering tie-break in the
/// taxonomy index, so the derive order of the fields matters: `numeric`
/// comes first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DocumentId {
    /// The numeric ID used for deduplication and ordering.
    pub numeric: u64,
    /// The short hex string for human display (e.g. "a1b2c3").
    pub short: String,
}

impl DocumentId {
    /// Generate a stable document ID from collection name and relative path.
    pub fn new(collection: &str, relative_path: &str) -> Self {
        let numeric = Self::hash_pair(collection, relative_path);
        let short = Self::short_hex(numeric, 6);
        Self { numeric, short }
    }

    fn hash_pair(collection: &str, relative_path: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        collection.hash(&mut hasher);
        relative_path.hash(&mut hasher);
        hasher.finish()
    }

    fn short_hex(value: u64, len: usize) -> String {
        let full = format!("{value:016x}");
        full[..len].to_string()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.short)
    }
}
