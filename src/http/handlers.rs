//! Route handlers.

use std::time::Instant;

use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::catalog::{assemble, normalize, sort, Envelope};
use crate::http::request::{request_id, CatalogQuery};
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /api/{resource}`: forward a search and optionally re-sort the page.
pub async fn search_catalog(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    RawQuery(raw_query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let start_time = Instant::now();
    let query = CatalogQuery::from_raw(raw_query.as_deref());
    let request_id = request_id(&headers);

    tracing::debug!(
        request_id = %request_id,
        resource = %resource,
        search = %query.search,
        page = %query.page,
        sort_by = %query.sort_by,
        order = ?query.order,
        "Catalog search"
    );

    let response = match search(&state, &resource, &query).await {
        Ok(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        Err(e) => {
            if let Some(kind) = e.upstream_kind() {
                metrics::record_upstream_error(kind);
                tracing::error!(request_id = %request_id, resource = %resource, error = %e, "Catalog search failed");
            } else {
                tracing::warn!(request_id = %request_id, resource = %resource, "Unknown resource");
            }
            e.into_response()
        }
    };

    let label = state.resources.resolve(&resource).unwrap_or("unknown");
    metrics::record_request(label, response.status().as_u16(), start_time);

    response
}

async fn search(state: &AppState, resource: &str, query: &CatalogQuery) -> Result<Envelope, ApiError> {
    let resource = state
        .resources
        .resolve(resource)
        .ok_or_else(|| ApiError::UnknownResource(resource.to_string()))?;

    let mut envelope = state
        .client
        .fetch(resource, &query.search, &query.page)
        .await?;

    let records = normalize(&mut envelope)?;
    let records = match query.sort_spec() {
        Some(spec) => sort(records, &spec),
        None => records,
    };

    Ok(assemble(envelope, records))
}
