//! Remote catalog endpoints.
//!
//! Sections and content items of the content gateway, listed next to the
//! pages and never merged into them.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use quill_gateway::{ContentItem, ContentValue, RemoteSection, SectionWithContent};
use serde::Deserialize;

use super::{ConfirmQuery, OutcomeResponse, run_admin};
use crate::error::ServerError;
use crate::state::AppState;

#[derive(Deserialize)]
pub(crate) struct SectionRequest {
    title: String,
}

/// Request body for content items: `{"title": .., "content": {"type": .., "value": ..}}`.
#[derive(Deserialize)]
pub(crate) struct ContentRequest {
    title: String,
    content: ContentValue,
}

/// Handle GET /api/admin/remote/sections.
pub(crate) async fn list_sections(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SectionWithContent>>, ServerError> {
    Ok(Json(run_admin(&state, |admin| admin.remote_sections()).await?))
}

/// Handle POST /api/admin/remote/sections.
pub(crate) async fn create_section(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SectionRequest>,
) -> Result<Json<OutcomeResponse<RemoteSection>>, ServerError> {
    let outcome = run_admin(&state, move |admin| admin.create_remote_section(&request.title)).await?;
    Ok(Json(outcome.into()))
}

/// Handle PUT /api/admin/remote/sections/{id}.
pub(crate) async fn update_section(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<SectionRequest>,
) -> Result<Json<OutcomeResponse<RemoteSection>>, ServerError> {
    let outcome = run_admin(&state, move |admin| {
        admin.update_remote_section(&id, &request.title)
    })
    .await?;
    Ok(Json(outcome.into()))
}

/// Handle DELETE /api/admin/remote/sections/{id}.
pub(crate) async fn delete_section(
    Path(id): Path<String>,
    Query(query): Query<ConfirmQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<OutcomeResponse<()>>, ServerError> {
    let confirm = query.confirmation();
    let outcome = run_admin(&state, move |admin| admin.delete_remote_section(&id, confirm)).await?;
    Ok(Json(outcome.into()))
}

/// Handle GET /api/admin/remote/sections/{id}/content.
pub(crate) async fn list_content(
    Path(section_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ContentItem>>, ServerError> {
    Ok(Json(
        run_admin(&state, move |admin| admin.remote_content(&section_id)).await?,
    ))
}

/// Handle POST /api/admin/remote/sections/{id}/content.
pub(crate) async fn create_content(
    Path(section_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<ContentRequest>,
) -> Result<Json<OutcomeResponse<ContentItem>>, ServerError> {
    let outcome = run_admin(&state, move |admin| {
        admin.create_remote_content(&section_id, &request.title, &request.content)
    })
    .await?;
    Ok(Json(outcome.into()))
}

/// Handle PUT /api/admin/remote/content/{id}.
pub(crate) async fn update_content(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<ContentRequest>,
) -> Result<Json<OutcomeResponse<ContentItem>>, ServerError> {
    let outcome = run_admin(&state, move |admin| {
        admin.update_remote_content(&id, &request.title, &request.content)
    })
    .await?;
    Ok(Json(outcome.into()))
}

/// Handle DELETE /api/admin/remote/content/{id}.
pub(crate) async fn delete_content(
    Path(id): Path<String>,
    Query(query): Query<ConfirmQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<OutcomeResponse<()>>, ServerError> {
    let confirm = query.confirmation();
    let outcome = run_admin(&state, move |admin| admin.delete_remote_content(&id, confirm)).await?;
    Ok(Json(outcome.into()))
}
