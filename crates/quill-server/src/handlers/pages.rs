//! Pages API endpoint.
//!
//! Read-only JSON view of the persisted snapshot.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use quill_model::to_snapshot;

use crate::error::ServerError;
use crate::handlers::compute_etag;
use crate::state::AppState;

/// Handle GET /api/pages.
///
/// Returns the whole collection in its persisted form.
pub(crate) async fn get_pages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let json = to_snapshot(&state.store.load())?;
    Ok(json_with_etag(&state, &headers, json))
}

/// Handle GET /api/pages/{id}.
pub(crate) async fn get_page(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let pages = state.store.load();
    let page = pages
        .get(&id)
        .ok_or_else(|| ServerError::PageNotFound(id.clone()))?;
    let json = serde_json::to_string(page)?;
    Ok(json_with_etag(&state, &headers, json))
}

fn json_with_etag(state: &AppState, headers: &HeaderMap, json: String) -> Response {
    let etag = compute_etag(&state.version, &json);

    // Check If-None-Match header for conditional request
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return StatusCode::NOT_MODIFIED.into_response();
    }

    (
        [
            (header::CONTENT_TYPE, "application/json".to_owned()),
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "no-cache".to_owned()),
        ],
        json,
    )
        .into_response()
}
