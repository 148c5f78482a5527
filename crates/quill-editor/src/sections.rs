//! Content section edits.

use quill_model::{
    ContentSection, IdGenerator, NEW_SECTION_DESCRIPTION, NEW_SECTION_TITLE, Page,
    placeholder_images,
};

use crate::confirm::Confirmed;
use crate::error::EditError;

fn append(page: &Page, title: &str, description: &str, ids: &mut IdGenerator) -> Page {
    let mut id = ids.section_id();
    while page.section(&id).is_some() {
        id = ids.section_id();
    }
    let mut next = page.clone();
    next.content_sections.push(ContentSection {
        id,
        title: title.to_owned(),
        description: description.to_owned(),
        images: placeholder_images(),
    });
    next
}

/// Append a section with placeholder title, description and image.
#[must_use]
pub fn add_section(page: &Page, ids: &mut IdGenerator) -> Page {
    append(page, NEW_SECTION_TITLE, NEW_SECTION_DESCRIPTION, ids)
}

/// Append a section with the given title.
///
/// Returns `None` when the trimmed title is empty.
#[must_use]
pub fn add_section_titled(page: &Page, title: &str, ids: &mut IdGenerator) -> Option<Page> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    Some(append(page, title, NEW_SECTION_DESCRIPTION, ids))
}

/// Remove a content section.
pub fn delete_section(page: &Page, id: &str, _confirmed: Confirmed) -> Result<Page, EditError> {
    let index = page
        .section_index(id)
        .ok_or_else(|| EditError::SectionNotFound(id.to_owned()))?;
    let mut next = page.clone();
    next.content_sections.remove(index);
    Ok(next)
}
