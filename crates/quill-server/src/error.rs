//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quill_admin::AdminError;
use quill_editor::EditError;
use quill_model::SnapshotError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Page not found in the snapshot.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Request body or query could not be used.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Admin operation failed.
    #[error(transparent)]
    Admin(#[from] AdminError),

    /// Snapshot could not be serialized.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Response body could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Blocking admin task panicked or was cancelled.
    #[error("Task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<EditError> for ServerError {
    fn from(e: EditError) -> Self {
        Self::Admin(AdminError::Edit(e))
    }
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::PageNotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Admin(e) => match e {
                AdminError::NotAuthenticated => StatusCode::UNAUTHORIZED,
                AdminError::Gateway(_) => StatusCode::BAD_GATEWAY,
                AdminError::Edit(EditError::PageNotFound(_) | EditError::SectionNotFound(_)) => {
                    StatusCode::NOT_FOUND
                }
                AdminError::Edit(
                    EditError::ImageIndexOutOfRange { .. } | EditError::InvalidPath(_),
                ) => StatusCode::BAD_REQUEST,
                AdminError::Store(_) | AdminError::TokenIo { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Snapshot(_) | Self::Json(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        }

        let body = match &self {
            Self::PageNotFound(id) => json!({"error": "Page not found", "id": id}),
            _ => json!({"error": self.to_string()}),
        };

        (status, axum::Json(body)).into_response()
    }
}
