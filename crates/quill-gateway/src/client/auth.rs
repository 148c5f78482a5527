//! Login against the remote content API.

use serde_json::json;
use tracing::info;

use super::{HttpGateway, read_json};
use crate::error::GatewayError;
use crate::types::{AuthToken, LoginResponse};

impl HttpGateway {
    /// `POST /auth/login`.
    pub(crate) fn post_login(&self, name: &str, password: &str) -> Result<AuthToken, GatewayError> {
        let url = self.url("/auth/login", None);

        info!("Logging in as '{}'", name);

        let payload = serde_json::to_vec(&json!({ "name": name, "password": password }))?;

        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload[..])?;

        let login: LoginResponse = read_json(response)?;
        Ok(login.token)
    }
}
