//! Text field edits.

use quill_model::Page;

use crate::confirm::Confirmed;
use crate::error::EditError;
use crate::path::{FieldPath, ImageTarget, TextField};

fn field_mut<'a>(page: &'a mut Page, path: &FieldPath) -> Result<&'a mut String, EditError> {
    let slot = match path {
        FieldPath::PageName => &mut page.name,
        FieldPath::PageTitle => &mut page.title,
        FieldPath::Featured(TextField::Title) => &mut page.featured_section.title,
        FieldPath::Featured(TextField::Description) => &mut page.featured_section.description,
        FieldPath::Section { id, field } => {
            let section = page
                .content_sections
                .iter_mut()
                .find(|s| &s.id == id)
                .ok_or_else(|| EditError::SectionNotFound(id.clone()))?;
            match field {
                TextField::Title => &mut section.title,
                TextField::Description => &mut section.description,
            }
        }
    };
    Ok(slot)
}

/// Read the string at `path`.
pub fn read_field<'a>(page: &'a Page, path: &FieldPath) -> Result<&'a str, EditError> {
    let value = match path {
        FieldPath::PageName => &page.name,
        FieldPath::PageTitle => &page.title,
        FieldPath::Featured(TextField::Title) => &page.featured_section.title,
        FieldPath::Featured(TextField::Description) => &page.featured_section.description,
        FieldPath::Section { id, field } => {
            let section = page
                .section(id)
                .ok_or_else(|| EditError::SectionNotFound(id.clone()))?;
            match field {
                TextField::Title => &section.title,
                TextField::Description => &section.description,
            }
        }
    };
    Ok(value)
}

/// Replace the string at `path`. The value is used verbatim.
pub fn edit_field(page: &Page, path: &FieldPath, value: impl Into<String>) -> Result<Page, EditError> {
    let mut next = page.clone();
    *field_mut(&mut next, path)? = value.into();
    Ok(next)
}

/// Set the string at `path` to empty.
pub fn clear_field(page: &Page, path: &FieldPath, _confirmed: Confirmed) -> Result<Page, EditError> {
    edit_field(page, path, String::new())
}

/// Clear the description belonging to an image target's section.
///
/// The banner has no description and yields [`EditError::InvalidPath`].
pub fn clear_description(
    page: &Page,
    target: &ImageTarget,
    confirmed: Confirmed,
) -> Result<Page, EditError> {
    let path = match target {
        ImageTarget::Banner => return Err(EditError::InvalidPath(target.to_string())),
        ImageTarget::Featured => FieldPath::Featured(TextField::Description),
        ImageTarget::Section(id) => FieldPath::section(id, TextField::Description),
    };
    clear_field(page, &path, confirmed)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use quill_model::{PageCollection, default_page};
    use quill_store::{MemoryBackend, PageStore};

    use super::*;
    use crate::confirm::Confirmation;

    fn all_paths(page: &Page) -> Vec<FieldPath> {
        let mut paths = vec![
            FieldPath::PageName,
            FieldPath::PageTitle,
            FieldPath::Featured(TextField::Title),
            FieldPath::Featured(TextField::Description),
        ];
        for section in &page.content_sections {
            paths.push(FieldPath::section(&section.id, TextField::Title));
            paths.push(FieldPath::section(&section.id, TextField::Description));
        }
        paths
    }

    #[test]
    fn test_edit_field_leaves_input_untouched() {
        let page = default_page();

        let edited = edit_field(&page, &FieldPath::PageTitle, "New title").unwrap();

        assert_eq!(edited.title, "New title");
        assert_eq!(page, default_page());
    }

    #[test]
    fn test_edit_every_field_reads_back() {
        let page = default_page();
        for path in all_paths(&page) {
            let value = format!("value for {path}");

            let edited = edit_field(&page, &path, value.clone()).unwrap();

            assert_eq!(read_field(&edited, &path).unwrap(), value);
        }
    }

    #[test]
    fn test_edit_every_field_survives_persistence() {
        let store = PageStore::new(Arc::new(MemoryBackend::new()));
        let page = default_page();

        for path in all_paths(&page) {
            let edited = edit_field(&page, &path, format!("persisted {path}")).unwrap();
            let collection: PageCollection = std::iter::once(edited).collect();

            store.save(&collection).unwrap();

            assert_eq!(store.load(), collection, "round trip failed for {path}");
        }
    }

    #[test]
    fn test_value_is_used_verbatim() {
        let page = default_page();

        let edited = edit_field(&page, &FieldPath::PageName, "  spaced  ").unwrap();

        assert_eq!(edited.name, "  spaced  ");
    }

    #[test]
    fn test_unknown_section_is_error() {
        let page = default_page();
        let path = FieldPath::section("404", TextField::Title);

        assert_eq!(
            edit_field(&page, &path, "x"),
            Err(EditError::SectionNotFound("404".to_owned()))
        );
        assert!(read_field(&page, &path).is_err());
    }

    #[test]
    fn test_clear_description() {
        let page = default_page();
        let path = FieldPath::section("1", TextField::Description);
        let confirmed = Confirmation::Confirmed.token().unwrap();

        let cleared = clear_field(&page, &path, confirmed).unwrap();

        assert_eq!(read_field(&cleared, &path).unwrap(), "");
        assert_eq!(cleared.content_sections[0].title, page.content_sections[0].title);
    }

    #[test]
    fn test_clear_description_by_target() {
        let page = default_page();
        let token = || Confirmation::Confirmed.token().unwrap();

        let featured = clear_description(&page, &ImageTarget::Featured, token()).unwrap();
        let banner = clear_description(&page, &ImageTarget::Banner, token());

        assert_eq!(featured.featured_section.description, "");
        assert_eq!(banner, Err(EditError::InvalidPath("banner".to_owned())));
    }
}
