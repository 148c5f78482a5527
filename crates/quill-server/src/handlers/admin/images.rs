//! Image endpoints.
//!
//! Images are either local references (`blob:` URLs that only live on the
//! editing client) or uploads that go to the content gateway first.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use quill_admin::ImageUpload;
use quill_editor::ImageTarget;
use quill_model::Page;
use serde::Deserialize;

use super::{OutcomeResponse, confirmation, run_admin};
use crate::error::ServerError;
use crate::state::AppState;

/// Request body for POST /api/admin/pages/{id}/images.
#[derive(Deserialize)]
pub(crate) struct AddImageRequest {
    target: ImageTarget,
    /// Put the image in place of the first one instead of appending.
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    alt: String,
    /// File to upload. Without it a local reference is added.
    #[serde(default)]
    upload: Option<UploadBody>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadBody {
    filename: String,
    content_type: String,
    /// Base64 encoded file content.
    data: String,
}

impl UploadBody {
    fn decode(self, alt: String) -> Result<ImageUpload, ServerError> {
        let data = STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| ServerError::BadRequest(format!("upload data: {e}")))?;
        Ok(ImageUpload {
            filename: self.filename,
            content_type: self.content_type,
            data,
            alt,
        })
    }
}

/// Handle POST /api/admin/pages/{id}/images.
pub(crate) async fn add_image(
    Path(page_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddImageRequest>,
) -> Result<Json<OutcomeResponse<Page>>, ServerError> {
    let AddImageRequest {
        target,
        replace,
        alt,
        upload,
    } = request;

    let outcome = match upload {
        Some(body) => {
            let upload = body.decode(alt)?;
            run_admin(&state, move |admin| {
                if replace {
                    admin.replace_with_upload(&page_id, &target, &upload)
                } else {
                    admin.upload_image(&page_id, &target, &upload)
                }
            })
            .await?
        }
        None => {
            run_admin(&state, move |admin| {
                if replace {
                    admin.replace_local_image(&page_id, &target, &alt)
                } else {
                    admin.add_local_image(&page_id, &target, &alt)
                }
            })
            .await?
        }
    };
    Ok(Json(outcome.into()))
}

#[derive(Deserialize)]
pub(crate) struct DeleteImageQuery {
    target: ImageTarget,
    /// Without an index every image of the target is removed.
    #[serde(default)]
    index: Option<usize>,
    #[serde(default)]
    confirm: Option<String>,
}

/// Handle DELETE /api/admin/pages/{id}/images.
pub(crate) async fn delete_image(
    Path(page_id): Path<String>,
    Query(query): Query<DeleteImageQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<OutcomeResponse<Page>>, ServerError> {
    let confirm = confirmation(query.confirm.as_deref());
    let outcome = run_admin(&state, move |admin| match query.index {
        Some(index) => admin.delete_image(&page_id, &query.target, index, confirm),
        None => admin.clear_images(&page_id, &query.target, confirm),
    })
    .await?;
    Ok(Json(outcome.into()))
}
