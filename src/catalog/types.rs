//! Catalog data model and error definitions.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Name of the envelope field holding the result list.
pub const RESULTS_FIELD: &str = "results";

/// A single catalog item: field name to arbitrary JSON value.
///
/// The field set is open; unknown fields are carried through untouched.
pub type Record = Map<String, Value>;

/// Ordered result list extracted from an [`Envelope`].
pub type ResultSet = Vec<Record>;

/// Outer upstream response object.
///
/// Holds `results` plus whatever sibling metadata the upstream sent
/// (`count`, `next`, `previous`, ...). Only `results` is ever rewritten.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Envelope {
    fields: Map<String, Value>,
}

impl Envelope {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Look up a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    pub(crate) fn insert(&mut self, key: &str, value: Value) {
        self.fields.insert(key.to_string(), value);
    }
}

impl From<Map<String, Value>> for Envelope {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// Requested ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Wire token selecting descending order. Anything else is ascending.
    pub const DESCENDING_TOKEN: &'static str = "desc";

    /// Resolve a client-supplied `order` token.
    ///
    /// Only the exact `desc` token selects descending; empty, malformed or
    /// unrecognised tokens fall back to ascending rather than failing.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some(Self::DESCENDING_TOKEN) => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortDirection::Ascending
    }
}

/// Field to sort by and the direction to sort in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    /// Build a spec from raw `sortBy` / `order` query values.
    ///
    /// Returns `None` when no sort key was requested.
    pub fn from_query(sort_by: &str, order: Option<&str>) -> Option<Self> {
        if sort_by.is_empty() {
            return None;
        }
        Some(Self::new(sort_by, SortDirection::from_token(order)))
    }
}

/// Errors raised while fetching from the upstream catalog.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport call could not be completed (connect, timeout, read).
    #[error("error making request to upstream catalog: {0}")]
    Network(#[source] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("upstream catalog returned non-success status: {}", .0.as_u16())]
    UpstreamStatus(StatusCode),

    /// Upstream body was not a JSON object.
    #[error("error decoding upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL cannot address the requested resource.
    #[error("invalid upstream URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::UpstreamStatus(_) => "upstream_status",
            FetchError::Decode(_) => "decode",
            FetchError::InvalidUrl(_) => "invalid_url",
        }
    }
}

/// The decoded envelope does not have the shape required to sort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("missing or invalid results field")]
    MissingResults,

    #[error("invalid item format at index {index}")]
    InvalidItem { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_tokens() {
        assert_eq!(SortDirection::from_token(Some("desc")), SortDirection::Descending);
        assert_eq!(SortDirection::from_token(Some("asc")), SortDirection::Ascending);
        assert_eq!(SortDirection::from_token(None), SortDirection::Ascending);
        assert_eq!(SortDirection::from_token(Some("")), SortDirection::Ascending);
        // Only the exact token counts.
        assert_eq!(SortDirection::from_token(Some("DESC")), SortDirection::Ascending);
        assert_eq!(SortDirection::from_token(Some("descending")), SortDirection::Ascending);
    }

    #[test]
    fn test_sort_spec_requires_key() {
        assert_eq!(SortSpec::from_query("", Some("desc")), None);

        let spec = SortSpec::from_query("name", Some("desc")).unwrap();
        assert_eq!(spec.key, "name");
        assert_eq!(spec.direction, SortDirection::Descending);
    }

    #[test]
    fn test_envelope_is_transparent() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"count": 2, "next": null, "results": []}"#).unwrap();
        assert_eq!(envelope.get("count"), Some(&Value::from(2)));

        let out = serde_json::to_string(&envelope).unwrap();
        assert_eq!(out, r#"{"count":2,"next":null,"results":[]}"#);
    }

    #[test]
    fn test_envelope_rejects_non_objects() {
        assert!(serde_json::from_str::<Envelope>("[1, 2]").is_err());
        assert!(serde_json::from_str::<Envelope>("\"results\"").is_err());
    }

    #[test]
    fn test_shape_error_messages() {
        assert_eq!(
            ShapeError::MissingResults.to_string(),
            "missing or invalid results field"
        );
        assert_eq!(
            ShapeError::InvalidItem { index: 3 }.to_string(),
            "invalid item format at index 3"
        );
    }
}
