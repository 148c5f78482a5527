//! Page tree data model for Quill.
//!
//! This crate defines the values that every other Quill crate passes around:
//!
//! - [`Page`], [`FeaturedSection`], [`ContentSection`] and [`ImageItem`]
//! - [`PageCollection`], the ordered set of pages that forms one snapshot
//! - [`parse_snapshot`] / [`to_snapshot`] for the persisted JSON form
//! - [`IdGenerator`] for page and section identifiers
//! - the hardcoded default page and the placeholder image
//!
//! Nothing here performs I/O. Persistence lives in `quill-store`, mutation
//! rules in `quill-editor`.

mod defaults;
mod ids;
mod page;
mod snapshot;

pub use defaults::{
    DEFAULT_PAGE_ID, NEW_SECTION_DESCRIPTION, NEW_SECTION_TITLE, PLACEHOLDER_ALT, PLACEHOLDER_URL,
    blank_page, default_collection, default_page, placeholder_image, placeholder_images,
};
pub use ids::{IdGenerator, slugify};
pub use page::{ContentSection, FeaturedSection, ImageItem, Page, PageCollection};
pub use snapshot::{SnapshotError, parse_snapshot, to_snapshot};
