//! Persisted snapshot codec.
//!
//! The snapshot is a single JSON object keyed by page identifier. Reading is
//! tolerant of two older shapes:
//!
//! - sections carrying a single `imageUrl`/`imageAlt` pair instead of an
//!   `images` array
//! - the whole map wrapped as `{ "pages": { ... } }`
//!
//! Image arrays that are missing or malformed are normalized to empty
//! sequences, and a section repeating an earlier section id of the same page
//! is dropped. Anything else that does not match the page shape is rejected
//! with [`SnapshotError::Shape`]. Writing always produces the canonical form.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::page::{ContentSection, FeaturedSection, ImageItem, Page, PageCollection};

/// Error reading or writing a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot is not valid JSON.
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON does not describe a page collection.
    #[error("unexpected snapshot shape: {0}")]
    Shape(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPage {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    banner_image: Option<Value>,
    #[serde(default)]
    featured_section: Option<RawSection>,
    #[serde(default)]
    content_sections: Vec<RawSection>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSection {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    images: Option<Value>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    image_alt: Option<String>,
}

impl RawSection {
    /// Resolve the image sequence, upgrading the legacy singular fields.
    fn images(&mut self, owner: &str) -> Vec<ImageItem> {
        let images = match self.images.take() {
            Some(Value::Null) | None => Vec::new(),
            Some(value) => Vec::<ImageItem>::deserialize(value).unwrap_or_else(|e| {
                tracing::warn!(section = %owner, error = %e, "Malformed image list, using empty list");
                Vec::new()
            }),
        };
        if !images.is_empty() {
            return images;
        }
        match self.image_url.take() {
            Some(url) if !url.is_empty() => {
                vec![ImageItem::local(url, self.image_alt.take().unwrap_or_default())]
            }
            _ => images,
        }
    }
}

impl RawPage {
    fn into_page(self) -> Result<Page, SnapshotError> {
        let id = self.id;
        let featured_section = match self.featured_section {
            Some(mut raw) => FeaturedSection {
                images: raw.images(&format!("{id}/featured")),
                title: raw.title,
                description: raw.description,
            },
            None => FeaturedSection {
                title: String::new(),
                description: String::new(),
                images: Vec::new(),
            },
        };

        let mut content_sections = Vec::with_capacity(self.content_sections.len());
        for mut raw in self.content_sections {
            let section_id = raw
                .id
                .take()
                .ok_or_else(|| SnapshotError::Shape(format!("section without id in page {id}")))?;
            if content_sections
                .iter()
                .any(|s: &ContentSection| s.id == section_id)
            {
                tracing::warn!(page = %id, section = %section_id, "Duplicate section id, dropping section");
                continue;
            }
            content_sections.push(ContentSection {
                images: raw.images(&format!("{id}/{section_id}")),
                id: section_id,
                title: raw.title,
                description: raw.description,
            });
        }

        let banner_image = self
            .banner_image
            .filter(|v| !v.is_null())
            .and_then(|v| match ImageItem::deserialize(v) {
                Ok(image) => Some(image),
                Err(e) => {
                    tracing::warn!(page = %id, error = %e, "Malformed banner image, dropping it");
                    None
                }
            });

        Ok(Page {
            name: self.name.unwrap_or_else(|| id.clone()),
            id,
            title: self.title,
            banner_image,
            featured_section,
            content_sections,
        })
    }
}

/// Strip the legacy `{ "pages": { ... } }` wrapper if present.
fn unwrap_pages(mut map: Map<String, Value>) -> Map<String, Value> {
    let wrapped = map.len() == 1
        && map
            .get("pages")
            .and_then(Value::as_object)
            .is_some_and(|inner| !inner.contains_key("id"));
    if wrapped && let Some(Value::Object(inner)) = map.remove("pages") {
        return inner;
    }
    map
}

/// Parse a persisted snapshot into a page collection.
///
/// Pages are keyed by their own `id`; the map key is only used for ordering.
pub fn parse_snapshot(json: &str) -> Result<PageCollection, SnapshotError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(map) = value else {
        return Err(SnapshotError::Shape(
            "snapshot root must be an object".to_owned(),
        ));
    };

    let mut collection = PageCollection::new();
    for (key, value) in unwrap_pages(map) {
        let raw = RawPage::deserialize(value)
            .map_err(|e| SnapshotError::Shape(format!("page {key}: {e}")))?;
        collection.insert(raw.into_page()?);
    }
    Ok(collection)
}

/// Serialize a page collection into the canonical snapshot form.
pub fn to_snapshot(collection: &PageCollection) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(collection)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::defaults::{default_collection, default_page};

    #[test]
    fn test_round_trip_default_collection() {
        let collection = default_collection();

        let json = to_snapshot(&collection).unwrap();
        let parsed = parse_snapshot(&json).unwrap();

        assert_eq!(parsed, collection);
    }

    #[test]
    fn test_round_trip_keeps_remote_ids_and_banner() {
        let mut page = default_page();
        page.banner_image = Some(ImageItem::remote("https://cdn/b.png", "banner", "b1"));
        page.content_sections[0]
            .images
            .push(ImageItem::remote("https://cdn/a.png", "a", "a1"));
        let collection: PageCollection = std::iter::once(page).collect();

        let parsed = parse_snapshot(&to_snapshot(&collection).unwrap()).unwrap();

        assert_eq!(parsed, collection);
    }

    #[test]
    fn test_legacy_image_fields_are_upgraded() {
        let json = r#"{
            "pages": {
                "content": {
                    "id": "content",
                    "name": "Content",
                    "title": "Hub",
                    "featuredSection": {
                        "title": "F",
                        "description": "D",
                        "imageUrl": "/f.png",
                        "imageAlt": "featured"
                    },
                    "contentSections": [
                        { "id": "1", "title": "S", "description": "", "imageUrl": "/s.png", "imageAlt": "s" }
                    ]
                }
            }
        }"#;

        let collection = parse_snapshot(json).unwrap();
        let page = collection.get("content").unwrap();

        assert_eq!(
            page.featured_section.images,
            vec![ImageItem::local("/f.png", "featured")]
        );
        assert_eq!(
            page.content_sections[0].images,
            vec![ImageItem::local("/s.png", "s")]
        );
    }

    #[test]
    fn test_malformed_images_become_empty() {
        let json = r#"{
            "p": {
                "id": "p",
                "name": "P",
                "title": "T",
                "featuredSection": { "title": "F", "description": "", "images": "nope" },
                "contentSections": [
                    { "id": "1", "title": "S", "description": "" },
                    { "id": "2", "title": "S2", "description": "", "images": [{ "alt": 3 }] }
                ]
            }
        }"#;

        let collection = parse_snapshot(json).unwrap();
        let page = collection.get("p").unwrap();

        assert!(page.featured_section.images.is_empty());
        assert!(page.content_sections[0].images.is_empty());
        assert!(page.content_sections[1].images.is_empty());
    }

    #[test]
    fn test_missing_featured_section_is_materialized() {
        let json = r#"{ "p": { "id": "p", "title": "T" } }"#;

        let collection = parse_snapshot(json).unwrap();
        let page = collection.get("p").unwrap();

        assert_eq!(page.name, "p");
        assert!(page.featured_section.title.is_empty());
        assert!(page.content_sections.is_empty());
    }

    #[test]
    fn test_page_without_id_is_rejected() {
        let json = r#"{ "p": { "title": "T" } }"#;

        let err = parse_snapshot(json).unwrap_err();

        assert!(matches!(err, SnapshotError::Shape(_)));
    }

    #[test]
    fn test_duplicate_section_keeps_first_and_other_pages() {
        let json = r#"{
            "p": { "id": "p", "contentSections": [
                { "id": "1", "title": "a", "description": "" },
                { "id": "2", "title": "b", "description": "" },
                { "id": "1", "title": "c", "description": "" }
            ] },
            "q": { "id": "q", "title": "Other" }
        }"#;

        let collection = parse_snapshot(json).unwrap();
        let page = collection.get("p").unwrap();

        let titles: Vec<_> = page.content_sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
        assert_eq!(collection.get("q").unwrap().title, "Other");
    }

    #[test]
    fn test_non_object_root_is_rejected() {
        assert!(matches!(
            parse_snapshot("[1, 2]").unwrap_err(),
            SnapshotError::Shape(_)
        ));
        assert!(matches!(
            parse_snapshot("{not json").unwrap_err(),
            SnapshotError::Json(_)
        ));
    }

    #[test]
    fn test_page_named_pages_is_not_unwrapped() {
        let json = r#"{ "pages": { "id": "pages", "name": "Pages", "title": "All pages" } }"#;

        let collection = parse_snapshot(json).unwrap();

        assert_eq!(collection.get("pages").unwrap().title, "All pages");
    }

    #[test]
    fn test_written_form_is_keyed_by_id() {
        let json = to_snapshot(&default_collection()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["content"]["id"], "content");
        assert_eq!(value["content"]["contentSections"][1]["id"], "2");
        assert!(value["content"].get("bannerImage").is_none());
    }
}
