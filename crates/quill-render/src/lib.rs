//! Public page rendering for Quill.
//!
//! [`PublicRenderer`] turns the current page of a [`PageCollection`] into an
//! HTML fragment plus navigation tabs; [`render_document`] wraps a fragment
//! into a complete HTML page.
//!
//! [`PageCollection`]: quill_model::PageCollection

mod document;
mod escape;
mod renderer;

pub use document::render_document;
pub use escape::escape_html;
pub use renderer::{PageTab, PublicRenderer, RenderedPage};
