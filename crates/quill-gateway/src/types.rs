//! Remote content API types.
//!
//! Only fields Quill uses are declared; serde ignores the rest of each
//! response. Remote identifiers arrive as `_id`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Bearer token returned by a successful login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

/// Login response.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: AuthToken,
}

/// A section of the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSection {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
}

/// Value of a content item, discriminated by its `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ContentValue {
    /// Plain text.
    Text(String),
    /// Image URL.
    Image(String),
}

impl ContentValue {
    /// Build a value from its wire discriminator.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UnknownContentType`] for anything but `text`
    /// or `image`.
    pub fn from_wire(kind: &str, value: String) -> Result<Self, GatewayError> {
        match kind {
            "text" => Ok(Self::Text(value)),
            "image" => Ok(Self::Image(value)),
            other => Err(GatewayError::UnknownContentType(other.to_owned())),
        }
    }

    /// Wire discriminator.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Image(_) => "image",
        }
    }

    /// The text or URL.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Text(v) | Self::Image(v) => v,
        }
    }
}

/// A content item of the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    #[serde(rename = "_id")]
    pub id: String,
    /// Owning remote section id.
    pub section: String,
    pub title: String,
    #[serde(flatten)]
    pub value: ContentValue,
}

/// Content item as received, before the `type` is checked.
#[derive(Debug, Deserialize)]
pub(crate) struct RawContentItem {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    section: String,
    title: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    value: String,
}

impl TryFrom<RawContentItem> for ContentItem {
    type Error = GatewayError;

    fn try_from(raw: RawContentItem) -> Result<Self, Self::Error> {
        Ok(Self {
            value: ContentValue::from_wire(&raw.kind, raw.value)?,
            id: raw.id,
            section: raw.section,
            title: raw.title,
        })
    }
}

/// A remote section together with its content items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionWithContent {
    #[serde(flatten)]
    pub section: RemoteSection,
    pub content: Vec<ContentItem>,
}

/// An image stored by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    /// Public URL of the asset.
    #[serde(alias = "imageUrl")]
    pub url: String,
    /// Remote identifier, needed to delete the asset.
    #[serde(alias = "_id")]
    pub id: String,
}
