//! Page, field and section endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use quill_editor::{FieldPath, ImageTarget};
use quill_model::Page;
use serde::Deserialize;

use super::{ConfirmQuery, OutcomeResponse, confirmation, run_admin};
use crate::error::ServerError;
use crate::state::AppState;

type PageOutcome = Json<OutcomeResponse<Page>>;

#[derive(Deserialize)]
pub(crate) struct CreatePageRequest {
    name: String,
}

/// Handle POST /api/admin/pages.
///
/// Responds with the new page id.
pub(crate) async fn create_page(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatePageRequest>,
) -> Result<Json<OutcomeResponse<String>>, ServerError> {
    let outcome = run_admin(&state, move |admin| admin.create_page(&request.name)).await?;
    Ok(Json(outcome.into()))
}

/// Handle DELETE /api/admin/pages/{id}.
pub(crate) async fn delete_page(
    Path(page_id): Path<String>,
    Query(query): Query<ConfirmQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<OutcomeResponse<()>>, ServerError> {
    let confirm = query.confirmation();
    let outcome = run_admin(&state, move |admin| admin.delete_page(&page_id, confirm)).await?;
    Ok(Json(outcome.into()))
}

#[derive(Deserialize)]
pub(crate) struct EditFieldRequest {
    path: FieldPath,
    value: String,
}

/// Handle PUT /api/admin/pages/{id}/fields.
pub(crate) async fn edit_field(
    Path(page_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<EditFieldRequest>,
) -> Result<PageOutcome, ServerError> {
    let outcome = run_admin(&state, move |admin| {
        admin.edit_field(&page_id, &request.path, &request.value)
    })
    .await?;
    Ok(Json(outcome.into()))
}

#[derive(Deserialize)]
pub(crate) struct TargetQuery {
    target: ImageTarget,
    #[serde(default)]
    confirm: Option<String>,
}

/// Handle DELETE /api/admin/pages/{id}/description.
pub(crate) async fn clear_description(
    Path(page_id): Path<String>,
    Query(query): Query<TargetQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<PageOutcome, ServerError> {
    let confirm = confirmation(query.confirm.as_deref());
    let outcome = run_admin(&state, move |admin| {
        admin.clear_description(&page_id, &query.target, confirm)
    })
    .await?;
    Ok(Json(outcome.into()))
}

#[derive(Default, Deserialize)]
pub(crate) struct AddSectionRequest {
    /// Without a title the section gets placeholder text.
    #[serde(default)]
    title: Option<String>,
}

/// Handle POST /api/admin/pages/{id}/sections.
pub(crate) async fn add_section(
    Path(page_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddSectionRequest>,
) -> Result<PageOutcome, ServerError> {
    let outcome = run_admin(&state, move |admin| {
        admin.add_section(&page_id, request.title.as_deref())
    })
    .await?;
    Ok(Json(outcome.into()))
}

/// Handle DELETE /api/admin/pages/{id}/sections/{section_id}.
pub(crate) async fn delete_section(
    Path((page_id, section_id)): Path<(String, String)>,
    Query(query): Query<ConfirmQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<PageOutcome, ServerError> {
    let confirm = query.confirmation();
    let outcome = run_admin(&state, move |admin| {
        admin.delete_section(&page_id, &section_id, confirm)
    })
    .await?;
    Ok(Json(outcome.into()))
}
