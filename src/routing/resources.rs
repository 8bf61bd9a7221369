//! Resource lookup.
//!
//! # Responsibilities
//! - Store the resources exposed under `/api/{resource}`
//! - Resolve a requested path segment to a known resource
//! - Return an explicit no-match for anything else
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Exact, case-sensitive match: the segment is forwarded upstream verbatim

use std::collections::HashSet;

/// The set of catalog resources the proxy forwards.
#[derive(Debug, Clone)]
pub struct ResourceTable {
    resources: HashSet<String>,
}

impl ResourceTable {
    pub fn new<I, S>(resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            resources: resources.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve `segment` to a configured resource name.
    pub fn resolve(&self, segment: &str) -> Option<&str> {
        self.resources.get(segment).map(String::as_str)
    }
}
