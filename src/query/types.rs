use serde_json::Value;

/// Backend-qualified index names, deduplicated, in first-occurrence order.
///
/// Only [`IndexResolver`](super::indexes::IndexResolver) builds non-empty sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIndexSet(Vec<String>);

impl ResolvedIndexSet {
    pub(crate) fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma-joined form used in backend URL paths.
    pub fn to_path_segment(&self) -> String {
        self.0.join(",")
    }
}

/// The final query handed to the search backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedQuery {
    pub indexes: ResolvedIndexSet,
    /// Caller query AND visibility filter, as a backend `bool` query.
    pub query: Value,
    pub size: Option<u64>,
    pub from: u64,
    pub sort: Option<Value>,
    pub highlight: Option<Value>,
}
