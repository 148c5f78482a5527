//! Mock gateway for testing.
//!
//! Provides [`MockGateway`], an in-memory remote catalog and image store that
//! records every call.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use crate::error::GatewayError;
use crate::gateway::ContentGateway;
use crate::types::{AuthToken, ContentItem, ContentValue, RemoteSection, StoredImage};

/// A call received by [`MockGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Login { name: String },
    ListSections,
    CreateSection { title: String },
    UpdateSection { id: String, title: String },
    DeleteSection { id: String },
    ListContent { section_id: String },
    CreateContent { section_id: String, title: String, value: ContentValue },
    UpdateContent { id: String, title: String, value: ContentValue },
    DeleteContent { id: String },
    UploadImage { filename: String, size: usize, content_type: String },
    DeleteImage { remote_id: String },
}

/// Mock content gateway for testing.
///
/// Remote ids are handed out sequentially (`sec-1`, `img-2`, ...). Use
/// [`set_failing`](Self::set_failing) to make every call fail like an
/// unavailable server.
///
/// # Example
///
/// ```ignore
/// use quill_gateway::{ContentGateway, MockGateway};
///
/// let gateway = MockGateway::new().with_credentials("admin", "secret");
/// let image = gateway.upload_image("a.png", b"...", "image/png").unwrap();
/// gateway.delete_image(&image.id).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockGateway {
    credentials: RwLock<Option<(String, String)>>,
    token: RwLock<Option<AuthToken>>,
    sections: RwLock<Vec<RemoteSection>>,
    contents: RwLock<Vec<ContentItem>>,
    images: RwLock<HashMap<String, StoredImage>>,
    broken_sections: RwLock<HashSet<String>>,
    calls: RwLock<Vec<GatewayCall>>,
    next_id: AtomicU64,
    failing: AtomicBool,
    latency: Option<Duration>,
}

impl MockGateway {
    /// Create a new empty mock gateway that accepts any credentials.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept this name and password on login.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_credentials(self, name: &str, password: &str) -> Self {
        *self.credentials.write().unwrap() = Some((name.to_owned(), password.to_owned()));
        self
    }

    /// Add a remote section.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_section(self, id: &str, title: &str) -> Self {
        self.sections.write().unwrap().push(RemoteSection {
            id: id.to_owned(),
            title: title.to_owned(),
        });
        self
    }

    /// Add a content item to a remote section.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_content(self, section_id: &str, id: &str, title: &str, value: ContentValue) -> Self {
        self.contents.write().unwrap().push(ContentItem {
            id: id.to_owned(),
            section: section_id.to_owned(),
            title: title.to_owned(),
            value,
        });
        self
    }

    /// Make content listing of one section fail.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_broken_section(self, id: &str) -> Self {
        self.broken_sections.write().unwrap().insert(id.to_owned());
        self
    }

    /// Answer every call only after `latency`, like a slow server.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Calls received so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.read().unwrap().clone()
    }

    /// Token most recently set with [`ContentGateway::set_token`].
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        self.token.read().unwrap().clone()
    }

    /// Returns `true` if an uploaded image with this id is still stored.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn has_image(&self, remote_id: &str) -> bool {
        self.images.read().unwrap().contains_key(remote_id)
    }

    fn record(&self, call: GatewayCall) -> Result<(), GatewayError> {
        self.calls.write().unwrap().push(call);
        if let Some(latency) = self.latency {
            std::thread::sleep(latency);
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

fn unavailable() -> GatewayError {
    GatewayError::HttpResponse {
        status: 503,
        body: "service unavailable".to_owned(),
    }
}

fn not_found(id: &str) -> GatewayError {
    GatewayError::HttpResponse {
        status: 404,
        body: format!("{id} not found"),
    }
}

impl ContentGateway for MockGateway {
    fn login(&self, name: &str, password: &str) -> Result<AuthToken, GatewayError> {
        self.record(GatewayCall::Login {
            name: name.to_owned(),
        })?;
        if let Some((expected_name, expected_password)) = &*self.credentials.read().unwrap()
            && (expected_name != name || expected_password != password)
        {
            return Err(GatewayError::HttpResponse {
                status: 401,
                body: "invalid credentials".to_owned(),
            });
        }
        Ok(AuthToken::new(self.next_id("token")))
    }

    fn set_token(&self, token: Option<AuthToken>) {
        *self.token.write().unwrap() = token;
    }

    fn list_sections(&self) -> Result<Vec<RemoteSection>, GatewayError> {
        self.record(GatewayCall::ListSections)?;
        Ok(self.sections.read().unwrap().clone())
    }

    fn create_section(&self, title: &str) -> Result<RemoteSection, GatewayError> {
        self.record(GatewayCall::CreateSection {
            title: title.to_owned(),
        })?;
        let section = RemoteSection {
            id: self.next_id("sec"),
            title: title.to_owned(),
        };
        self.sections.write().unwrap().push(section.clone());
        Ok(section)
    }

    fn update_section(&self, id: &str, title: &str) -> Result<RemoteSection, GatewayError> {
        self.record(GatewayCall::UpdateSection {
            id: id.to_owned(),
            title: title.to_owned(),
        })?;
        let mut sections = self.sections.write().unwrap();
        let section = sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| not_found(id))?;
        title.clone_into(&mut section.title);
        Ok(section.clone())
    }

    fn delete_section(&self, id: &str) -> Result<(), GatewayError> {
        self.record(GatewayCall::DeleteSection { id: id.to_owned() })?;
        let mut sections = self.sections.write().unwrap();
        let before = sections.len();
        sections.retain(|s| s.id != id);
        if sections.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    fn list_content(&self, section_id: &str) -> Result<Vec<ContentItem>, GatewayError> {
        self.record(GatewayCall::ListContent {
            section_id: section_id.to_owned(),
        })?;
        if self.broken_sections.read().unwrap().contains(section_id) {
            return Err(unavailable());
        }
        Ok(self
            .contents
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.section == section_id)
            .cloned()
            .collect())
    }

    fn create_content(
        &self,
        section_id: &str,
        title: &str,
        value: &ContentValue,
    ) -> Result<ContentItem, GatewayError> {
        self.record(GatewayCall::CreateContent {
            section_id: section_id.to_owned(),
            title: title.to_owned(),
            value: value.clone(),
        })?;
        let item = ContentItem {
            id: self.next_id("cnt"),
            section: section_id.to_owned(),
            title: title.to_owned(),
            value: value.clone(),
        };
        self.contents.write().unwrap().push(item.clone());
        Ok(item)
    }

    fn update_content(
        &self,
        id: &str,
        title: &str,
        value: &ContentValue,
    ) -> Result<ContentItem, GatewayError> {
        self.record(GatewayCall::UpdateContent {
            id: id.to_owned(),
            title: title.to_owned(),
            value: value.clone(),
        })?;
        let mut contents = self.contents.write().unwrap();
        let item = contents
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found(id))?;
        title.clone_into(&mut item.title);
        item.value = value.clone();
        Ok(item.clone())
    }

    fn delete_content(&self, id: &str) -> Result<(), GatewayError> {
        self.record(GatewayCall::DeleteContent { id: id.to_owned() })?;
        let mut contents = self.contents.write().unwrap();
        let before = contents.len();
        contents.retain(|c| c.id != id);
        if contents.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    fn upload_image(
        &self,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<StoredImage, GatewayError> {
        self.record(GatewayCall::UploadImage {
            filename: filename.to_owned(),
            size: data.len(),
            content_type: content_type.to_owned(),
        })?;
        let id = self.next_id("img");
        let image = StoredImage {
            url: format!("https://uploads.invalid/{id}/{filename}"),
            id: id.clone(),
        };
        self.images.write().unwrap().insert(id, image.clone());
        Ok(image)
    }

    fn delete_image(&self, remote_id: &str) -> Result<(), GatewayError> {
        self.record(GatewayCall::DeleteImage {
            remote_id: remote_id.to_owned(),
        })?;
        self.images
            .write()
            .unwrap()
            .remove(remote_id)
            .map(|_| ())
            .ok_or_else(|| not_found(remote_id))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_upload_then_delete() {
        let gateway = MockGateway::new();

        let image = gateway.upload_image("a.png", b"png", "image/png").unwrap();
        assert!(gateway.has_image(&image.id));

        gateway.delete_image(&image.id).unwrap();

        assert!(!gateway.has_image(&image.id));
        assert_eq!(
            gateway.calls().last(),
            Some(&GatewayCall::DeleteImage {
                remote_id: image.id
            })
        );
    }

    #[test]
    fn test_credentials_checked() {
        let gateway = MockGateway::new().with_credentials("admin", "secret");

        assert!(gateway.login("admin", "wrong").is_err());
        assert!(gateway.login("admin", "secret").is_ok());
    }

    #[test]
    fn test_failing_records_call() {
        let gateway = MockGateway::new();
        gateway.set_failing(true);

        let result = gateway.create_section("News");

        assert!(matches!(
            result,
            Err(GatewayError::HttpResponse { status: 503, .. })
        ));
        assert_eq!(gateway.calls().len(), 1);
        gateway.set_failing(false);
        assert!(gateway.list_sections().unwrap().is_empty());
    }

    #[test]
    fn test_sections_with_content_degrades_per_section() {
        let gateway = MockGateway::new()
            .with_section("s1", "News")
            .with_section("s2", "Blog")
            .with_content("s1", "c1", "Hello", ContentValue::Text("hi".to_owned()))
            .with_content("s2", "c2", "Post", ContentValue::Text("body".to_owned()))
            .with_broken_section("s2");

        let listing = gateway.list_sections_with_content().unwrap();

        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].content.len(), 1);
        assert_eq!(listing[0].content[0].id, "c1");
        assert!(listing[1].content.is_empty());
    }

    #[test]
    fn test_sections_with_content_fails_without_sections() {
        let gateway = MockGateway::new();
        gateway.set_failing(true);

        assert!(gateway.list_sections_with_content().is_err());
    }

    #[test]
    fn test_update_content() {
        let gateway = MockGateway::new().with_section("s1", "News");
        let item = gateway
            .create_content("s1", "Hero", &ContentValue::Image("https://cdn/a.png".to_owned()))
            .unwrap();

        let updated = gateway
            .update_content(&item.id, "Hero 2", &ContentValue::Image("https://cdn/b.png".to_owned()))
            .unwrap();

        assert_eq!(updated.title, "Hero 2");
        assert_eq!(gateway.list_content("s1").unwrap(), vec![updated]);
    }
}
