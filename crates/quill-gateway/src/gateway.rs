//! Content gateway abstraction.

use std::sync::Arc;

use tracing::error;

use crate::error::GatewayError;
use crate::types::{
    AuthToken, ContentItem, ContentValue, RemoteSection, SectionWithContent, StoredImage,
};

/// Operations against the remote content service.
///
/// Calls are blocking. Implementations attach the current token (see
/// [`set_token`](Self::set_token)) to every request once one is set.
pub trait ContentGateway: Send + Sync {
    /// Exchange credentials for a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are rejected.
    fn login(&self, name: &str, password: &str) -> Result<AuthToken, GatewayError>;

    /// Replace the token attached to subsequent requests.
    fn set_token(&self, token: Option<AuthToken>);

    /// List sections of the remote catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn list_sections(&self) -> Result<Vec<RemoteSection>, GatewayError>;

    /// Create a section.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn create_section(&self, title: &str) -> Result<RemoteSection, GatewayError>;

    /// Rename a section.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn update_section(&self, id: &str, title: &str) -> Result<RemoteSection, GatewayError>;

    /// Delete a section.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn delete_section(&self, id: &str) -> Result<(), GatewayError>;

    /// List content items of one section.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or an item has an unknown type.
    fn list_content(&self, section_id: &str) -> Result<Vec<ContentItem>, GatewayError>;

    /// Create a content item in a section.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn create_content(
        &self,
        section_id: &str,
        title: &str,
        value: &ContentValue,
    ) -> Result<ContentItem, GatewayError>;

    /// Update title and value of a content item.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn update_content(
        &self,
        id: &str,
        title: &str,
        value: &ContentValue,
    ) -> Result<ContentItem, GatewayError>;

    /// Delete a content item.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn delete_content(&self, id: &str) -> Result<(), GatewayError>;

    /// Upload an image asset.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn upload_image(
        &self,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<StoredImage, GatewayError>;

    /// Delete a previously uploaded image asset.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn delete_image(&self, remote_id: &str) -> Result<(), GatewayError>;

    /// List all sections, each with its content items.
    ///
    /// A section whose content cannot be fetched is listed with no content.
    ///
    /// # Errors
    ///
    /// Returns an error only if the section list itself cannot be fetched.
    fn list_sections_with_content(&self) -> Result<Vec<SectionWithContent>, GatewayError> {
        let sections = self.list_sections()?;
        Ok(sections
            .into_iter()
            .map(|section| {
                let content = self.list_content(&section.id).unwrap_or_else(|e| {
                    error!(section = %section.id, error = %e, "Failed to fetch section content");
                    Vec::new()
                });
                SectionWithContent { section, content }
            })
            .collect())
    }
}

/// Shared gateways, so one client can back several owners (e.g. a server
/// state holding `Arc<dyn ContentGateway>`).
impl<G: ContentGateway + ?Sized> ContentGateway for Arc<G> {
    fn login(&self, name: &str, password: &str) -> Result<AuthToken, GatewayError> {
        (**self).login(name, password)
    }

    fn set_token(&self, token: Option<AuthToken>) {
        (**self).set_token(token);
    }

    fn list_sections(&self) -> Result<Vec<RemoteSection>, GatewayError> {
        (**self).list_sections()
    }

    fn create_section(&self, title: &str) -> Result<RemoteSection, GatewayError> {
        (**self).create_section(title)
    }

    fn update_section(&self, id: &str, title: &str) -> Result<RemoteSection, GatewayError> {
        (**self).update_section(id, title)
    }

    fn delete_section(&self, id: &str) -> Result<(), GatewayError> {
        (**self).delete_section(id)
    }

    fn list_content(&self, section_id: &str) -> Result<Vec<ContentItem>, GatewayError> {
        (**self).list_content(section_id)
    }

    fn create_content(
        &self,
        section_id: &str,
        title: &str,
        value: &ContentValue,
    ) -> Result<ContentItem, GatewayError> {
        (**self).create_content(section_id, title, value)
    }

    fn update_content(
        &self,
        id: &str,
        title: &str,
        value: &ContentValue,
    ) -> Result<ContentItem, GatewayError> {
        (**self).update_content(id, title, value)
    }

    fn delete_content(&self, id: &str) -> Result<(), GatewayError> {
        (**self).delete_content(id)
    }

    fn upload_image(
        &self,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<StoredImage, GatewayError> {
        (**self).upload_image(filename, data, content_type)
    }

    fn delete_image(&self, remote_id: &str) -> Result<(), GatewayError> {
        (**self).delete_image(remote_id)
    }

    fn list_sections_with_content(&self) -> Result<Vec<SectionWithContent>, GatewayError> {
        (**self).list_sections_with_content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{GatewayCall, MockGateway};

    fn titles<G: ContentGateway>(gateway: &G) -> Vec<String> {
        gateway
            .list_sections()
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect()
    }

    #[test]
    fn test_shared_gateway_delegates() {
        let mock = Arc::new(MockGateway::new().with_section("s1", "News"));
        let shared: Arc<dyn ContentGateway> = Arc::clone(&mock) as Arc<dyn ContentGateway>;

        assert_eq!(titles(&shared), vec!["News".to_owned()]);
        assert_eq!(mock.calls(), vec![GatewayCall::ListSections]);
    }
}
