//! Remote content gateway for Quill.
//!
//! The remote service stores uploaded image assets and keeps its own catalog
//! of sections and content items. [`ContentGateway`] describes the calls the
//! admin makes against it; [`HttpGateway`] is the blocking HTTP
//! implementation.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use quill_gateway::{ContentGateway, HttpGateway};
//!
//! let gateway = HttpGateway::new("http://localhost:5001/api", Duration::from_secs(30));
//! let token = gateway.login("admin", "secret")?;
//! gateway.set_token(Some(token));
//! for section in gateway.list_sections_with_content()? {
//!     println!("{}: {} items", section.section.title, section.content.len());
//! }
//! ```

mod client;
mod error;
mod gateway;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod types;

pub use client::{DEFAULT_BASE_URL, HttpGateway};
pub use error::GatewayError;
pub use gateway::ContentGateway;
#[cfg(any(test, feature = "mock"))]
pub use mock::{GatewayCall, MockGateway};
pub use types::{AuthToken, ContentItem, ContentValue, RemoteSection, SectionWithContent, StoredImage};
