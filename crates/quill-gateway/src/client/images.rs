//! Image asset operations for the remote content API.

use rand::RngExt;
use tracing::info;

use super::{HttpGateway, read_json};
use crate::error::GatewayError;
use crate::types::StoredImage;

/// Build a `multipart/form-data` body holding a single `file` part.
fn multipart_body(boundary: &str, filename: &str, data: &[u8], content_type: &str) -> Vec<u8> {
    let mut body = Vec::with_capacity(data.len() + 256);

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(b"\r\n");

    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

impl HttpGateway {
    /// `POST /upload` as multipart form data.
    pub(crate) fn post_upload(
        &self,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<StoredImage, GatewayError> {
        let url = self.url("/upload", None);

        info!("Uploading image '{}' ({} bytes)", filename, data.len());

        let boundary = format!("----QuillFormBoundary{:016x}", rand::rng().random::<u64>());
        // Quotes would terminate the filename parameter early.
        let filename = filename.replace('"', "_");
        let body = multipart_body(&boundary, &filename, data, content_type);

        let response = self
            .authorize(self.agent.post(&url))
            .header(
                "Content-Type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .header("Accept", "application/json")
            .send(&body[..])?;

        let stored: StoredImage = read_json(response)?;
        info!("Stored image '{}' as {}", filename, stored.id);
        Ok(stored)
    }
}
