//! Page, section and text field operations.

use quill_editor::{
    Confirmation, FieldPath, ImageTarget, add_section, add_section_titled, clear_description,
    create_page, delete_page, delete_section, edit_field,
};
use quill_gateway::ContentGateway;
use quill_model::Page;
use tracing::info;

use crate::error::AdminError;
use crate::session::{AdminSession, Outcome};

impl<G: ContentGateway> AdminSession<G> {
    /// Create a page named `name` and return its id.
    ///
    /// Skipped when the trimmed name is empty.
    pub fn create_page(&self, name: &str) -> Result<Outcome<String>, AdminError> {
        self.require_login()?;
        let outcome = self.update_pages(|pages| Ok(create_page(pages, name, &mut self.ids())))?;
        if let Outcome::Applied(id) = &outcome {
            info!(page = %id, "Created page");
        }
        Ok(outcome)
    }

    /// Delete a page.
    pub fn delete_page(&self, page_id: &str, confirm: Confirmation) -> Result<Outcome<()>, AdminError> {
        self.require_login()?;
        let Some(confirmed) = confirm.token() else {
            return Ok(Outcome::Skipped);
        };
        let outcome = self.update_pages(|pages| Ok(Some((delete_page(pages, page_id, confirmed)?, ()))))?;
        info!(page = page_id, "Deleted page");
        Ok(outcome)
    }

    /// Set a text field.
    pub fn edit_field(
        &self,
        page_id: &str,
        path: &FieldPath,
        value: &str,
    ) -> Result<Outcome<Page>, AdminError> {
        self.require_login()?;
        self.update_page(page_id, |page| Ok(Some(edit_field(page, path, value)?)))
    }

    /// Append a content section.
    ///
    /// Without a title the section gets placeholder text; a blank title skips.
    pub fn add_section(&self, page_id: &str, title: Option<&str>) -> Result<Outcome<Page>, AdminError> {
        self.require_login()?;
        self.update_page(page_id, |page| {
            let mut ids = self.ids();
            Ok(match title {
                Some(title) => add_section_titled(page, title, &mut ids),
                None => Some(add_section(page, &mut ids)),
            })
        })
    }

    /// Remove a content section.
    pub fn delete_section(
        &self,
        page_id: &str,
        section_id: &str,
        confirm: Confirmation,
    ) -> Result<Outcome<Page>, AdminError> {
        self.require_login()?;
        let Some(confirmed) = confirm.token() else {
            return Ok(Outcome::Skipped);
        };
        self.update_page(page_id, |page| Ok(Some(delete_section(page, section_id, confirmed)?)))
    }

    /// Empty the description of the featured or a content section.
    pub fn clear_description(
        &self,
        page_id: &str,
        target: &ImageTarget,
        confirm: Confirmation,
    ) -> Result<Outcome<Page>, AdminError> {
        self.require_login()?;
        let Some(confirmed) = confirm.token() else {
            return Ok(Outcome::Skipped);
        };
        self.update_page(page_id, |page| Ok(Some(clear_description(page, target, confirmed)?)))
    }
}
