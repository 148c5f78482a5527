//! Built-in content: the default page and the placeholder image.

use crate::page::{ContentSection, FeaturedSection, ImageItem, Page, PageCollection};

/// Identifier of the hardcoded default page, also the selection fallback
/// when a collection is empty.
pub const DEFAULT_PAGE_ID: &str = "content";

/// URL of the placeholder image.
pub const PLACEHOLDER_URL: &str = "/placeholder.svg?height=200&width=400";

/// Alt text of the placeholder image.
pub const PLACEHOLDER_ALT: &str = "Placeholder image";

/// Title given to freshly added content sections.
pub const NEW_SECTION_TITLE: &str = "New Section";

/// Description given to freshly added content sections.
pub const NEW_SECTION_DESCRIPTION: &str = "Add your content here";

/// The image substituted whenever an image sequence would become empty.
#[must_use]
pub fn placeholder_image() -> ImageItem {
    ImageItem::local(PLACEHOLDER_URL, PLACEHOLDER_ALT)
}

/// A sequence holding only the placeholder image.
#[must_use]
pub fn placeholder_images() -> Vec<ImageItem> {
    vec![placeholder_image()]
}

fn placeholder_with_alt(alt: &str) -> Vec<ImageItem> {
    vec![ImageItem::local(PLACEHOLDER_URL, alt)]
}

/// The page materialized when no snapshot has been persisted yet.
#[must_use]
pub fn default_page() -> Page {
    Page {
        id: DEFAULT_PAGE_ID.to_owned(),
        name: "Content".to_owned(),
        title: "Welcome to Your Content Hub".to_owned(),
        banner_image: None,
        featured_section: FeaturedSection {
            title: "Elevate Your Brand with Compelling Content".to_owned(),
            description: "Craft and manage engaging content that resonates with your audience \
                          and drives results."
                .to_owned(),
            images: placeholder_with_alt("Modern office workspace"),
        },
        content_sections: vec![
            ContentSection {
                id: "1".to_owned(),
                title: "Boost Engagement with Visual Stories".to_owned(),
                description: "Create captivating visual narratives that capture attention and \
                              leave a lasting impression."
                    .to_owned(),
                images: placeholder_with_alt("Visual storytelling concept"),
            },
            ContentSection {
                id: "2".to_owned(),
                title: "Optimize Your Content for Maximum Impact".to_owned(),
                description: "Refine your content strategy with data-driven insights to achieve \
                              your business goals."
                    .to_owned(),
                images: placeholder_with_alt("Content optimization analytics"),
            },
        ],
    }
}

/// A collection holding only [`default_page`].
#[must_use]
pub fn default_collection() -> PageCollection {
    std::iter::once(default_page()).collect()
}

/// Skeleton for a newly created page.
///
/// The title starts out as the display name; the featured section carries
/// placeholder text and image and there are no content sections yet.
#[must_use]
pub fn blank_page(id: impl Into<String>, name: &str) -> Page {
    Page {
        id: id.into(),
        name: name.to_owned(),
        title: name.to_owned(),
        banner_image: None,
        featured_section: FeaturedSection {
            title: "Featured".to_owned(),
            description: String::new(),
            images: placeholder_images(),
        },
        content_sections: Vec::new(),
    }
}
