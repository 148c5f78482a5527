//! Page tree types.
//!
//! The serialized field names follow the persisted snapshot format
//! (`featuredSection`, `contentSections`, `bannerImage`). Image remote
//! identifiers serialize as `id` and are omitted while an image only exists
//! locally.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single image reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageItem {
    /// Image URL (local object reference or remote storage URL).
    pub url: String,
    /// Alternative text.
    #[serde(default)]
    pub alt: String,
    /// Identifier assigned by the remote content gateway on upload.
    #[serde(default, rename = "id", skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
}

impl ImageItem {
    /// Create an image that only exists locally.
    #[must_use]
    pub fn local(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: alt.into(),
            remote_id: None,
        }
    }

    /// Create an image backed by a remotely stored asset.
    #[must_use]
    pub fn remote(
        url: impl Into<String>,
        alt: impl Into<String>,
        remote_id: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            alt: alt.into(),
            remote_id: Some(remote_id.into()),
        }
    }
}

/// The highlighted block shown first on a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedSection {
    pub title: String,
    pub description: String,
    pub images: Vec<ImageItem>,
}

/// A titled block of text and images within a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSection {
    /// Identifier, unique within the owning page.
    pub id: String,
    pub title: String,
    pub description: String,
    pub images: Vec<ImageItem>,
}

/// A named, independently navigable unit of content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Slug-like identifier, immutable after creation.
    pub id: String,
    /// Display name (used for navigation tabs).
    pub name: String,
    /// Page heading.
    pub title: String,
    /// Optional banner shown above the featured section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_image: Option<ImageItem>,
    pub featured_section: FeaturedSection,
    pub content_sections: Vec<ContentSection>,
}

impl Page {
    /// Look up a content section by identifier.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&ContentSection> {
        self.content_sections.iter().find(|s| s.id == id)
    }

    /// Position of a content section within the page.
    #[must_use]
    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.content_sections.iter().position(|s| s.id == id)
    }
}

/// All pages of one snapshot, keyed by page identifier.
///
/// Insertion order is preserved so that "the first page" is stable across a
/// save/load cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageCollection {
    pages: IndexMap<String, Page>,
}

impl PageCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns `true` if the collection holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get a page by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Page> {
        self.pages.get(id)
    }

    /// Returns `true` if a page with this identifier exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.pages.contains_key(id)
    }

    /// The first page in insertion order.
    #[must_use]
    pub fn first(&self) -> Option<&Page> {
        self.pages.values().next()
    }

    /// Insert or replace a page, keyed by its own identifier.
    ///
    /// Replacing keeps the page's original position.
    pub fn insert(&mut self, page: Page) {
        self.pages.insert(page.id.clone(), page);
    }

    /// Remove a page, preserving the order of the remaining pages.
    pub fn remove(&mut self, id: &str) -> Option<Page> {
        self.pages.shift_remove(id)
    }

    /// Iterate pages in order.
    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    /// Iterate page identifiers in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }
}

impl FromIterator<Page> for PageCollection {
    fn from_iter<T: IntoIterator<Item = Page>>(iter: T) -> Self {
        let mut collection = Self::new();
        for page in iter {
            collection.insert(page);
        }
        collection
    }
}
