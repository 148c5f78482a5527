//! Administration of Quill pages.
//!
//! [`AdminSession`] ties a [`PageStore`] to a [`ContentGateway`]: every page
//! edit is applied through [`PageStore::update`], image uploads and deletions
//! go through the gateway first, and the login token is kept in a
//! [`TokenSlot`].
//!
//! Failures follow three rules:
//! - invalid input (blank names or titles) and declined confirmations are
//!   no-ops reported as [`Outcome::Skipped`]
//! - gateway failures abandon the whole operation and leave the page
//!   untouched
//! - operations that talk to the gateway require a login
//!
//! [`PageStore`]: quill_store::PageStore
//! [`PageStore::update`]: quill_store::PageStore::update
//! [`ContentGateway`]: quill_gateway::ContentGateway

mod catalog;
mod error;
mod images;
mod pages;
mod session;
mod token;

pub use error::AdminError;
pub use images::{ImageUpload, LOCAL_IMAGE_SCHEME};
pub use session::{AdminSession, Outcome};
pub use token::TokenSlot;
