//! Inbound request deadline.
//! Expiry renders the same JSON error body as every other failure.

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::response::ApiError;

/// Upper bound on the time spent producing one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(pub Duration);

pub async fn deadline_middleware(
    State(Deadline(limit)): State<Deadline>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_owned();

    match tokio::time::timeout(limit, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(path = %path, timeout = ?limit, "Request deadline exceeded");
            ApiError::DeadlineExceeded(limit).into_response()
        }
    }
}
