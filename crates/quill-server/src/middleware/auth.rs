//! Admin session credentials.
//!
//! `POST /api/admin/login` hands each client its own credential. Every other
//! admin route requires it as `Authorization: Bearer <credential>`; holding
//! the gateway token on the server is not enough on its own.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use quill_admin::AdminError;

use crate::error::ServerError;
use crate::state::AppState;

/// Credentials issued to logged in admin clients.
#[derive(Debug, Default)]
pub(crate) struct SessionRegistry {
    credentials: Mutex<HashSet<String>>,
}

impl SessionRegistry {
    /// Issue a fresh credential.
    pub(crate) fn issue(&self) -> String {
        let credential = uuid::Uuid::new_v4().simple().to_string();
        self.lock().insert(credential.clone());
        credential
    }

    pub(crate) fn contains(&self, credential: &str) -> bool {
        self.lock().contains(credential)
    }

    /// Revoke a credential and return how many remain.
    pub(crate) fn revoke(&self, credential: &str) -> usize {
        let mut credentials = self.lock();
        credentials.remove(credential);
        credentials.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.credentials.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Credential from an `Authorization: Bearer` header.
pub(crate) fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|credential| !credential.is_empty())
}

/// Reject requests without a credential issued by this server.
pub(crate) async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let authorized = bearer(request.headers()).is_some_and(|c| state.sessions.contains(c));
    if !authorized {
        return Err(AdminError::NotAuthenticated.into());
    }
    Ok(next.run(request).await)
}
