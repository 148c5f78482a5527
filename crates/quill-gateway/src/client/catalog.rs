//! Section and content operations for the remote content API.

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::info;
use ureq::RequestBuilder;
use ureq::typestate::WithBody;

use super::{HttpGateway, check_status, read_json};
use crate::error::GatewayError;
use crate::types::{ContentItem, ContentValue, RawContentItem, RemoteSection};

impl HttpGateway {
    /// `GET /sections`.
    pub(crate) fn get_sections(&self) -> Result<Vec<RemoteSection>, GatewayError> {
        let url = self.url("/sections", None);

        info!("Listing remote sections");

        let response = self
            .authorize(self.agent.get(&url))
            .header("Accept", "application/json")
            .call()?;

        let sections: Vec<RemoteSection> = read_json(response)?;
        info!("Found {} remote sections", sections.len());
        Ok(sections)
    }

    /// `POST /sections`.
    pub(crate) fn post_section(&self, title: &str) -> Result<RemoteSection, GatewayError> {
        let url = self.url("/sections", None);

        info!("Creating remote section '{}'", title);

        self.send_json(self.agent.post(&url), &json!({ "title": title }))
    }

    /// `PUT /sections/{id}`.
    pub(crate) fn put_section(&self, id: &str, title: &str) -> Result<RemoteSection, GatewayError> {
        let url = self.url("/sections", Some(id));

        info!("Renaming remote section {} to '{}'", id, title);

        self.send_json(self.agent.put(&url), &json!({ "title": title }))
    }

    /// `GET /contents/section/{id}`.
    pub(crate) fn get_section_content(
        &self,
        section_id: &str,
    ) -> Result<Vec<ContentItem>, GatewayError> {
        let url = self.url("/contents/section", Some(section_id));

        info!("Getting content for remote section {}", section_id);

        let response = self
            .authorize(self.agent.get(&url))
            .header("Accept", "application/json")
            .call()?;

        let raw: Vec<RawContentItem> = read_json(response)?;
        raw.into_iter().map(ContentItem::try_from).collect()
    }

    /// `POST /contents`.
    pub(crate) fn post_content(
        &self,
        section_id: &str,
        title: &str,
        value: &ContentValue,
    ) -> Result<ContentItem, GatewayError> {
        let url = self.url("/contents", None);

        info!(
            "Creating {} content '{}' in remote section {}",
            value.kind(),
            title,
            section_id
        );

        let payload = json!({
            "section": section_id,
            "title": title,
            "type": value.kind(),
            "value": value.value(),
        });
        let raw: RawContentItem = self.send_json(self.agent.post(&url), &payload)?;
        ContentItem::try_from(raw)
    }

    /// `PUT /contents/{id}`.
    pub(crate) fn put_content(
        &self,
        id: &str,
        title: &str,
        value: &ContentValue,
    ) -> Result<ContentItem, GatewayError> {
        let url = self.url("/contents", Some(id));

        info!("Updating remote content {}", id);

        let payload = json!({ "title": title, "value": value.value() });
        let raw: RawContentItem = self.send_json(self.agent.put(&url), &payload)?;
        ContentItem::try_from(raw)
    }

    /// `DELETE {prefix}/{id}`.
    pub(crate) fn delete_resource(&self, prefix: &str, id: &str) -> Result<(), GatewayError> {
        let url = self.url(prefix, Some(id));

        info!("Deleting {}", url);

        let response = self.authorize(self.agent.delete(&url)).call()?;

        check_status(response)?;
        Ok(())
    }

    /// Send a JSON body and decode the JSON reply.
    fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder<WithBody>,
        payload: &Value,
    ) -> Result<T, GatewayError> {
        let payload_bytes = serde_json::to_vec(payload)?;

        let response = self
            .authorize(request)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        read_json(response)
    }
}
