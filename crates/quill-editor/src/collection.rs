//! Page-level edits over a whole collection.

use quill_model::{IdGenerator, Page, PageCollection, blank_page};

use crate::confirm::Confirmed;
use crate::error::EditError;

/// Add a new page named `name`.
///
/// Returns the new collection together with the new page's id, or `None`
/// when the trimmed name is empty.
#[must_use]
pub fn create_page(
    pages: &PageCollection,
    name: &str,
    ids: &mut IdGenerator,
) -> Option<(PageCollection, String)> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let mut id = ids.page_id(name);
    while pages.contains(&id) {
        id = ids.page_id(name);
    }
    let mut next = pages.clone();
    next.insert(blank_page(id.clone(), name));
    Some((next, id))
}

/// Remove a page.
pub fn delete_page(
    pages: &PageCollection,
    id: &str,
    _confirmed: Confirmed,
) -> Result<PageCollection, EditError> {
    if !pages.contains(id) {
        return Err(EditError::PageNotFound(id.to_owned()));
    }
    let mut next = pages.clone();
    next.remove(id);
    Ok(next)
}

/// Swap in an edited page, keeping its position.
pub fn replace_page(pages: &PageCollection, page: Page) -> Result<PageCollection, EditError> {
    if !pages.contains(&page.id) {
        return Err(EditError::PageNotFound(page.id));
    }
    let mut next = pages.clone();
    next.insert(page);
    Ok(next)
}
