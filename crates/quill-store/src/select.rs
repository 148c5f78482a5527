//! Current page selection.

use quill_model::{DEFAULT_PAGE_ID, Page, PageCollection};

/// Resolve a requested page identifier against the collection.
///
/// Returns the requested identifier if the page exists, otherwise the first
/// page's identifier, otherwise [`DEFAULT_PAGE_ID`].
#[must_use]
pub fn resolve_selected_id(collection: &PageCollection, selected: Option<&str>) -> String {
    match selected {
        Some(id) if collection.contains(id) => id.to_owned(),
        _ => collection
            .first()
            .map_or_else(|| DEFAULT_PAGE_ID.to_owned(), |page| page.id.clone()),
    }
}

/// The page to display for a requested identifier.
///
/// Falls back to the first page; `None` only when the collection is empty.
#[must_use]
pub fn select_current<'a>(collection: &'a PageCollection, selected: Option<&str>) -> Option<&'a Page> {
    selected
        .and_then(|id| collection.get(id))
        .or_else(|| collection.first())
}
