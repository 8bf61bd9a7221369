//! Response handling and error mapping.
//!
//! # Responsibilities
//! - Map catalog errors to appropriate HTTP status codes
//! - Render every failure as a single JSON error body
//!
//! # Design Decisions
//! - Upstream non-success codes are forwarded as-is
//! - Network, decode and shape failures are 500s
//! - An expired inbound deadline is a 408
//! - A response is either the full envelope or one error body, never both

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{FetchError, ShapeError};

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Terminal failure of an `/api/{resource}` request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown resource '{0}'")]
    UnknownResource(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid response format from upstream: {0}")]
    Shape(#[from] ShapeError),

    #[error("request exceeded the {0:?} deadline")]
    DeadlineExceeded(Duration),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownResource(_) => StatusCode::NOT_FOUND,
            ApiError::Fetch(FetchError::UpstreamStatus(code)) => *code,
            ApiError::Fetch(_) | ApiError::Shape(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::DeadlineExceeded(_) => StatusCode::REQUEST_TIMEOUT,
        }
    }

    /// Metrics label for failures caused by the upstream.
    pub fn upstream_kind(&self) -> Option<&'static str> {
        match self {
            ApiError::UnknownResource(_) | ApiError::DeadlineExceeded(_) => None,
            ApiError::Fetch(e) => Some(e.kind()),
            ApiError::Shape(_) => Some("shape"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
