//! Admin API.
//!
//! Every handler runs its [`AdminSession`](quill_admin::AdminSession)
//! operation on the blocking pool: page writes touch the snapshot file and
//! gateway calls are synchronous HTTP requests.

pub(crate) mod catalog;
pub(crate) mod images;
pub(crate) mod pages;
pub(crate) mod session;

use std::sync::Arc;

use quill_admin::{AdminError, Outcome};
use quill_editor::Confirmation;
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::state::{Admin, AppState};

/// Run an admin operation off the async runtime.
pub(crate) async fn run_admin<T, F>(state: &AppState, op: F) -> Result<T, ServerError>
where
    T: Send + 'static,
    F: FnOnce(&Admin) -> Result<T, AdminError> + Send + 'static,
{
    let admin = Arc::clone(&state.admin);
    Ok(tokio::task::spawn_blocking(move || op(&admin)).await??)
}

/// JSON form of an [`Outcome`].
///
/// `{"status": "applied", "result": ...}` or `{"status": "skipped"}`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "lowercase")]
pub(crate) enum OutcomeResponse<T> {
    Applied(T),
    Skipped,
}

impl<T> From<Outcome<T>> for OutcomeResponse<T> {
    fn from(outcome: Outcome<T>) -> Self {
        match outcome {
            Outcome::Applied(value) => Self::Applied(value),
            Outcome::Skipped => Self::Skipped,
        }
    }
}

/// Map a `confirm` query value. Only `true` confirms; any other value declines.
pub(crate) fn confirmation(flag: Option<&str>) -> Confirmation {
    Confirmation::from_flag(flag == Some("true"))
}

/// `?confirm=true` on destructive requests.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ConfirmQuery {
    #[serde(default)]
    confirm: Option<String>,
}

impl ConfirmQuery {
    pub(crate) fn confirmation(&self) -> Confirmation {
        confirmation(self.confirm.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_response_shape() {
        let applied = serde_json::to_value(OutcomeResponse::from(Outcome::Applied("about-1"))).unwrap();
        let skipped = serde_json::to_value(OutcomeResponse::<()>::from(Outcome::Skipped)).unwrap();

        assert_eq!(applied, serde_json::json!({"status": "applied", "result": "about-1"}));
        assert_eq!(skipped, serde_json::json!({"status": "skipped"}));
    }

    #[test]
    fn test_confirmation_values() {
        assert_eq!(confirmation(Some("true")), Confirmation::Confirmed);
        assert_eq!(confirmation(Some("yes")), Confirmation::Declined);
        assert_eq!(confirmation(Some("")), Confirmation::Declined);
        assert_eq!(confirmation(None), Confirmation::Declined);
    }
}
