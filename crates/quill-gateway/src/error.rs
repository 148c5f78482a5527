//! Error types for the remote content gateway.

/// Error from remote content API operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// Content item carried a `type` other than `text` or `image`.
    #[error("unknown content type: {0}")]
    UnknownContentType(String),

    /// The call requires a login token and none is set.
    #[error("not authenticated")]
    NotAuthenticated,
}
