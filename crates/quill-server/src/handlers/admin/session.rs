//! Login state endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use super::run_admin;
use crate::error::ServerError;
use crate::middleware::auth::bearer;
use crate::state::{Admin, AppState};

#[derive(Deserialize)]
pub(crate) struct LoginRequest {
    name: String,
    password: String,
}

/// Response for the session endpoints.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionResponse {
    logged_in: bool,
    /// Credential to send as `Authorization: Bearer` (login only).
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// Handle POST /api/admin/login.
pub(crate) async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ServerError> {
    run_admin(&state, move |admin| admin.login(&request.name, &request.password)).await?;
    Ok(Json(SessionResponse {
        logged_in: true,
        token: Some(state.sessions.issue()),
    }))
}

/// Handle POST /api/admin/logout.
///
/// Revokes the caller's credential. The gateway token is dropped once no
/// client is logged in anymore.
pub(crate) async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, ServerError> {
    let remaining = bearer(&headers).map_or(0, |credential| state.sessions.revoke(credential));
    if remaining == 0 {
        run_admin(&state, Admin::logout).await?;
    }
    Ok(Json(SessionResponse {
        logged_in: false,
        token: None,
    }))
}

/// Handle GET /api/admin/session.
pub(crate) async fn get_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<SessionResponse> {
    let known = bearer(&headers).is_some_and(|credential| state.sessions.contains(credential));
    Json(SessionResponse {
        logged_in: known && state.admin.is_logged_in(),
        token: None,
    })
}
