//! Page, section and image edit operations for Quill.
//!
//! Every operation is a pure function: it takes the current [`Page`] (or
//! [`PageCollection`]) and returns a new value, leaving the input untouched.
//! Persisting the result is the caller's job (see `quill-store`).
//!
//! Text fields are addressed by a single [`FieldPath`], images by an
//! [`ImageTarget`]. Destructive operations require a [`Confirmed`] token,
//! which can only be obtained from a [`Confirmation`] answered with
//! "confirmed".
//!
//! [`Page`]: quill_model::Page
//! [`PageCollection`]: quill_model::PageCollection

mod collection;
mod confirm;
mod error;
mod fields;
mod images;
mod path;
mod sections;

pub use collection::{create_page, delete_page, replace_page};
pub use confirm::{Confirmation, Confirmed};
pub use error::EditError;
pub use fields::{clear_description, clear_field, edit_field, read_field};
pub use images::{add_image, clear_images, image_at, images, remove_image, replace_image};
pub use path::{FieldPath, ImageTarget, TextField};
pub use sections::{add_section, add_section_titled, delete_section};
