//! CORS Middleware.
//! Admits one configured browser origin, over http or https.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::http::response::ErrorBody;

const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Outcome of checking a request's `Origin` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginCheck {
    /// No `Origin` header: a non-browser caller.
    Absent,
    /// Matches the allowed origin; carries the exact header value to echo.
    Allowed(HeaderValue),
    Denied,
}

/// The single allowed origin, expanded to both schemes.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed: Vec<String>,
}

impl CorsPolicy {
    /// Build a policy for a bare host such as `localhost:5173`.
    ///
    /// `None` admits no browser origin at all.
    pub fn new(allowed_origin: Option<&str>) -> Self {
        let allowed = match allowed_origin.map(str::trim) {
            Some(host) if !host.is_empty() => {
                vec![format!("http://{host}"), format!("https://{host}")]
            }
            _ => Vec::new(),
        };
        Self { allowed }
    }

    pub fn check(&self, origin: Option<&HeaderValue>) -> OriginCheck {
        let Some(origin) = origin else {
            return OriginCheck::Absent;
        };
        match origin.to_str() {
            Ok(value) if self.allowed.iter().any(|allowed| allowed == value) => {
                OriginCheck::Allowed(origin.clone())
            }
            _ => OriginCheck::Denied,
        }
    }
}

fn apply_cors_headers(response: &mut Response, origin: HeaderValue) {
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.append(header::VARY, HeaderValue::from_static("origin"));
}

pub async fn cors_middleware(
    State(policy): State<Arc<CorsPolicy>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let check = policy.check(req.headers().get(header::ORIGIN));
    let preflight = req.method() == Method::OPTIONS;

    match check {
        OriginCheck::Denied => {
            tracing::warn!(
                origin = ?req.headers().get(header::ORIGIN),
                path = %req.uri().path(),
                "Rejected cross-origin request"
            );
            (StatusCode::FORBIDDEN, Json(ErrorBody::new("origin not allowed"))).into_response()
        }
        OriginCheck::Absent if preflight => StatusCode::NO_CONTENT.into_response(),
        OriginCheck::Absent => next.run(req).await,
        OriginCheck::Allowed(origin) => {
            let mut response = if preflight {
                StatusCode::NO_CONTENT.into_response()
            } else {
                next.run(req).await
            };
            apply_cors_headers(&mut response, origin);
            response
        }
    }
}
