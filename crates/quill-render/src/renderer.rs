//! Public page renderer.

use std::fmt::Write;

use quill_model::{ImageItem, Page, PageCollection, default_page};
use quill_store::select_current;
use serde::Serialize;

use crate::escape::escape_html;

/// Image source used when an image has no URL.
const FALLBACK_IMAGE: &str = "/placeholder.svg";

/// Navigation entry for one page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageTab {
    pub id: String,
    pub name: String,
    /// `true` for the page being rendered.
    pub active: bool,
}

/// Output of [`PublicRenderer::render`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    /// Id of the page that was rendered.
    pub page_id: String,
    /// Page title (unescaped).
    pub title: String,
    /// HTML fragment for the page body.
    pub html: String,
    pub tabs: Vec<PageTab>,
}

/// Renders the public view of a page collection.
#[derive(Clone, Copy, Debug, Default)]
pub struct PublicRenderer;

impl PublicRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render the selected page, falling back to the first page.
    ///
    /// An empty collection renders the built-in default page.
    #[must_use]
    pub fn render(&self, pages: &PageCollection, selected: Option<&str>) -> RenderedPage {
        let fallback;
        let page = match select_current(pages, selected) {
            Some(page) => page,
            None => {
                fallback = default_page();
                &fallback
            }
        };

        let tabs = pages
            .iter()
            .map(|p| PageTab {
                id: p.id.clone(),
                name: p.name.clone(),
                active: p.id == page.id,
            })
            .collect::<Vec<_>>();

        let mut html = String::with_capacity(4096);
        render_tabs(&mut html, &tabs);
        render_body(&mut html, page);

        RenderedPage {
            page_id: page.id.clone(),
            title: page.title.clone(),
            html,
            tabs,
        }
    }
}

fn render_tabs(html: &mut String, tabs: &[PageTab]) {
    if tabs.len() < 2 {
        return;
    }
    html.push_str("<nav class=\"page-tabs\">\n<ul>\n");
    for tab in tabs {
        let class = if tab.active { " class=\"active\"" } else { "" };
        let _ = writeln!(
            html,
            "<li{}><a href=\"/pages/{}\">{}</a></li>",
            class,
            escape_html(&tab.id),
            escape_html(&tab.name),
        );
    }
    html.push_str("</ul>\n</nav>\n");
}

fn render_body(html: &mut String, page: &Page) {
    html.push_str("<main class=\"page\">\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(&page.title));

    if let Some(banner) = &page.banner_image {
        html.push_str("<div class=\"banner\">");
        render_image(html, banner);
        html.push_str("</div>\n");
    }

    let featured = &page.featured_section;
    html.push_str("<section class=\"featured\">\n");
    html.push_str("<div class=\"text\">\n<p class=\"label\">Featured</p>\n");
    let _ = writeln!(html, "<h2>{}</h2>", escape_html(&featured.title));
    let _ = writeln!(html, "<p>{}</p>", escape_html(&featured.description));
    html.push_str("</div>\n");
    render_images(html, &featured.images);
    html.push_str("</section>\n");

    for section in &page.content_sections {
        let _ = writeln!(
            html,
            "<section class=\"content\" id=\"section-{}\">",
            escape_html(&section.id)
        );
        html.push_str("<div class=\"text\">\n");
        let _ = writeln!(html, "<h3>{}</h3>", escape_html(&section.title));
        let _ = writeln!(html, "<p>{}</p>", escape_html(&section.description));
        html.push_str("</div>\n");
        render_images(html, &section.images);
        html.push_str("</section>\n");
    }

    html.push_str("</main>\n");
}

fn render_images(html: &mut String, images: &[ImageItem]) {
    html.push_str("<div class=\"images\">");
    for image in images {
        render_image(html, image);
    }
    html.push_str("</div>\n");
}

fn render_image(html: &mut String, image: &ImageItem) {
    let src = if image.url.is_empty() {
        FALLBACK_IMAGE
    } else {
        &image.url
    };
    let _ = write!(
        html,
        "<img src=\"{}\" alt=\"{}\">",
        escape_html(src),
        escape_html(&image.alt)
    );
}
