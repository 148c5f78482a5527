//! Remote content API client.
//!
//! Sync HTTP client over `ureq`. Error statuses are not turned into transport
//! errors by the agent; each call checks the status itself and reports
//! [`GatewayError::HttpResponse`] with the response body.

mod auth;
mod catalog;
mod images;

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use ureq::{Agent, Body, RequestBuilder};

use crate::error::GatewayError;
use crate::gateway::ContentGateway;
use crate::types::{AuthToken, ContentItem, ContentValue, RemoteSection, StoredImage};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001/api";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Unreserved characters (A-Z a-z 0-9 - . _ ~) pass through path segments.
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// HTTP implementation of [`ContentGateway`].
pub struct HttpGateway {
    agent: Agent,
    base_url: String,
    token: RwLock<Option<AuthToken>>,
}

impl HttpGateway {
    /// Create a client for the API rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: RwLock::new(None),
        }
    }

    /// API base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an endpoint URL from a fixed prefix and one dynamic segment.
    fn url(&self, prefix: &str, segment: Option<&str>) -> String {
        match segment {
            Some(segment) => format!(
                "{}{}/{}",
                self.base_url,
                prefix,
                utf8_percent_encode(segment, SEGMENT_ENCODE_SET)
            ),
            None => format!("{}{}", self.base_url, prefix),
        }
    }

    /// Attach the bearer token, if any.
    fn authorize<B>(&self, request: RequestBuilder<B>) -> RequestBuilder<B> {
        let token = self.token.read().unwrap_or_else(PoisonError::into_inner);
        match token.as_ref() {
            Some(token) => request.header("Authorization", &format!("Bearer {}", token.as_str())),
            None => request,
        }
    }
}

impl Default for HttpGateway {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT))
    }
}

/// Turn an error status into [`GatewayError::HttpResponse`].
fn check_status(response: ureq::http::Response<Body>) -> Result<Body, GatewayError> {
    let status = response.status().as_u16();
    let mut body_reader = response.into_body();

    if status >= 400 {
        let error_body = body_reader
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(GatewayError::HttpResponse {
            status,
            body: error_body,
        });
    }

    Ok(body_reader)
}

/// Check the status and decode a JSON body.
fn read_json<T: DeserializeOwned>(response: ureq::http::Response<Body>) -> Result<T, GatewayError> {
    let mut body_reader = check_status(response)?;
    Ok(body_reader.read_json()?)
}

impl ContentGateway for HttpGateway {
    fn login(&self, name: &str, password: &str) -> Result<AuthToken, GatewayError> {
        self.post_login(name, password)
    }

    fn set_token(&self, token: Option<AuthToken>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    fn list_sections(&self) -> Result<Vec<RemoteSection>, GatewayError> {
        self.get_sections()
    }

    fn create_section(&self, title: &str) -> Result<RemoteSection, GatewayError> {
        self.post_section(title)
    }

    fn update_section(&self, id: &str, title: &str) -> Result<RemoteSection, GatewayError> {
        self.put_section(id, title)
    }

    fn delete_section(&self, id: &str) -> Result<(), GatewayError> {
        self.delete_resource("/sections", id)
    }

    fn list_content(&self, section_id: &str) -> Result<Vec<ContentItem>, GatewayError> {
        self.get_section_content(section_id)
    }

    fn create_content(
        &self,
        section_id: &str,
        title: &str,
        value: &ContentValue,
    ) -> Result<ContentItem, GatewayError> {
        self.post_content(section_id, title, value)
    }

    fn update_content(
        &self,
        id: &str,
        title: &str,
        value: &ContentValue,
    ) -> Result<ContentItem, GatewayError> {
        self.put_content(id, title, value)
    }

    fn delete_content(&self, id: &str) -> Result<(), GatewayError> {
        self.delete_resource("/contents", id)
    }

    fn upload_image(
        &self,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<StoredImage, GatewayError> {
        self.post_upload(filename, data, content_type)
    }

    fn delete_image(&self, remote_id: &str) -> Result<(), GatewayError> {
        self.delete_resource("", remote_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_trims_trailing_slash() {
        let gateway = HttpGateway::new("http://cms.local/api/", Duration::from_secs(1));

        assert_eq!(gateway.base_url(), "http://cms.local/api");
        assert_eq!(gateway.url("/sections", None), "http://cms.local/api/sections");
    }

    #[test]
    fn test_url_encodes_segment() {
        let gateway = HttpGateway::new("http://cms.local/api", Duration::from_secs(1));

        assert_eq!(
            gateway.url("/contents/section", Some("a b/c")),
            "http://cms.local/api/contents/section/a%20b%2Fc"
        );
        assert_eq!(gateway.url("", Some("img-1")), "http://cms.local/api/img-1");
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(HttpGateway::default().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_unreachable_host_is_request_error() {
        let gateway = HttpGateway::new("http://127.0.0.1:1", Duration::from_secs(2));

        let result = gateway.list_sections();

        assert!(matches!(result, Err(GatewayError::HttpRequest(_))));
    }
}
