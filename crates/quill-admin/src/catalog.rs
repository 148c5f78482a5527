//! Remote section and content catalog.
//!
//! Thin pass-throughs to the gateway with the input checks of the admin
//! dashboard. The remote catalog is listed next to the pages, never merged
//! into them.

use quill_editor::Confirmation;
use quill_gateway::{
    ContentGateway, ContentItem, ContentValue, GatewayError, RemoteSection, SectionWithContent,
};
use tracing::error;

use crate::error::AdminError;
use crate::session::{AdminSession, Outcome};

fn logged<T>(operation: &str, result: Result<T, GatewayError>) -> Result<T, AdminError> {
    result.map_err(|e| {
        error!(operation, error = %e, "Remote catalog call failed");
        AdminError::Gateway(e)
    })
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

impl<G: ContentGateway> AdminSession<G> {
    /// All remote sections with their content.
    pub fn remote_sections(&self) -> Result<Vec<SectionWithContent>, AdminError> {
        self.require_login()?;
        logged("list sections", self.gateway.list_sections_with_content())
    }

    /// Create a remote section. Skipped when the trimmed title is empty.
    pub fn create_remote_section(&self, title: &str) -> Result<Outcome<RemoteSection>, AdminError> {
        self.require_login()?;
        if is_blank(title) {
            return Ok(Outcome::Skipped);
        }
        logged("create section", self.gateway.create_section(title.trim())).map(Outcome::Applied)
    }

    /// Rename a remote section. Skipped when the trimmed title is empty.
    pub fn update_remote_section(
        &self,
        id: &str,
        title: &str,
    ) -> Result<Outcome<RemoteSection>, AdminError> {
        self.require_login()?;
        if is_blank(title) {
            return Ok(Outcome::Skipped);
        }
        logged("update section", self.gateway.update_section(id, title.trim())).map(Outcome::Applied)
    }

    /// Delete a remote section.
    pub fn delete_remote_section(
        &self,
        id: &str,
        confirm: Confirmation,
    ) -> Result<Outcome<()>, AdminError> {
        self.require_login()?;
        if confirm.token().is_none() {
            return Ok(Outcome::Skipped);
        }
        logged("delete section", self.gateway.delete_section(id)).map(Outcome::Applied)
    }

    /// Content of one remote section.
    pub fn remote_content(&self, section_id: &str) -> Result<Vec<ContentItem>, AdminError> {
        self.require_login()?;
        logged("list content", self.gateway.list_content(section_id))
    }

    /// Create a content item. Skipped when title or value is blank.
    pub fn create_remote_content(
        &self,
        section_id: &str,
        title: &str,
        value: &ContentValue,
    ) -> Result<Outcome<ContentItem>, AdminError> {
        self.require_login()?;
        if is_blank(title) || is_blank(value.value()) {
            return Ok(Outcome::Skipped);
        }
        logged("create content", self.gateway.create_content(section_id, title, value))
            .map(Outcome::Applied)
    }

    /// Update a content item. Skipped when title or value is blank.
    pub fn update_remote_content(
        &self,
        id: &str,
        title: &str,
        value: &ContentValue,
    ) -> Result<Outcome<ContentItem>, AdminError> {
        self.require_login()?;
        if is_blank(title) || is_blank(value.value()) {
            return Ok(Outcome::Skipped);
        }
        logged("update content", self.gateway.update_content(id, title, value)).map(Outcome::Applied)
    }

    /// Delete a content item.
    pub fn delete_remote_content(
        &self,
        id: &str,
        confirm: Confirmation,
    ) -> Result<Outcome<()>, AdminError> {
        self.require_login()?;
        if confirm.token().is_none() {
            return Ok(Outcome::Skipped);
        }
        logged("delete content", self.gateway.delete_content(id)).map(Outcome::Applied)
    }
}
