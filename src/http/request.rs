//! Request handling and extraction.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4) when the client sent none
//! - Read the request ID back for logging
//! - Extract catalog query parameters (`search`, `page`, `sortBy`, `order`)
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Query values are forwarded verbatim; absent values become empty strings
//! - A repeated parameter resolves to its first value; parsing never rejects

use axum::http::{HeaderMap, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use url::form_urlencoded;
use uuid::Uuid;

use crate::catalog::SortSpec;

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates `x-request-id` values as UUID v4 strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Request ID of an inbound request, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Query parameters accepted by `GET /api/{resource}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: String,
    pub page: String,
    pub sort_by: String,
    pub order: Option<String>,
}

impl CatalogQuery {
    /// Parse a raw query string such as `search=luke&sortBy=name`.
    ///
    /// Unknown keys are ignored. Malformed percent-escapes decode lossily.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let mut search = None;
        let mut page = None;
        let mut sort_by = None;
        let mut order = None;

        for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            let slot = match key.as_ref() {
                "search" => &mut search,
                "page" => &mut page,
                "sortBy" => &mut sort_by,
                "order" => &mut order,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Self {
            search: search.unwrap_or_default(),
            page: page.unwrap_or_default(),
            sort_by: sort_by.unwrap_or_default(),
            order,
        }
    }

    /// Sort requested by this query, if any.
    pub fn sort_spec(&self) -> Option<SortSpec> {
        SortSpec::from_query(&self.sort_by, self.order.as_deref())
    }
}
