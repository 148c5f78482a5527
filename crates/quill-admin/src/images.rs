//! Image operations: local references, uploads and deletions.

use quill_editor::{
    Confirmation, ImageTarget, add_image, clear_images, image_at, images, remove_image,
    replace_image,
};
use quill_gateway::ContentGateway;
use quill_model::{ImageItem, Page};
use tracing::{error, info, warn};

use crate::error::AdminError;
use crate::session::{AdminSession, Outcome};

/// URL prefix of images that only exist on the editing client.
pub const LOCAL_IMAGE_SCHEME: &str = "blob:quill/";

/// An image file to send to the gateway.
#[derive(Clone, Debug)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
    /// Alternative text recorded in the page.
    pub alt: String,
}

fn local_image(alt: &str) -> ImageItem {
    ImageItem::local(format!("{LOCAL_IMAGE_SCHEME}{}", uuid::Uuid::new_v4()), alt)
}

impl<G: ContentGateway> AdminSession<G> {
    /// Append a locally referenced image.
    pub fn add_local_image(
        &self,
        page_id: &str,
        target: &ImageTarget,
        alt: &str,
    ) -> Result<Outcome<Page>, AdminError> {
        self.require_login()?;
        self.update_page(page_id, |page| Ok(Some(add_image(page, target, local_image(alt))?)))
    }

    /// Replace the first image with a locally referenced one.
    pub fn replace_local_image(
        &self,
        page_id: &str,
        target: &ImageTarget,
        alt: &str,
    ) -> Result<Outcome<Page>, AdminError> {
        self.require_login()?;
        self.update_page(page_id, |page| {
            Ok(Some(replace_image(page, target, local_image(alt))?))
        })
    }

    /// Upload an image and append it.
    pub fn upload_image(
        &self,
        page_id: &str,
        target: &ImageTarget,
        upload: &ImageUpload,
    ) -> Result<Outcome<Page>, AdminError> {
        self.upload_with(page_id, target, upload, add_image)
    }

    /// Upload an image and put it in place of the first image.
    pub fn replace_with_upload(
        &self,
        page_id: &str,
        target: &ImageTarget,
        upload: &ImageUpload,
    ) -> Result<Outcome<Page>, AdminError> {
        self.upload_with(page_id, target, upload, replace_image)
    }

    fn upload_with(
        &self,
        page_id: &str,
        target: &ImageTarget,
        upload: &ImageUpload,
        place: fn(&Page, &ImageTarget, ImageItem) -> Result<Page, quill_editor::EditError>,
    ) -> Result<Outcome<Page>, AdminError> {
        self.require_login()?;
        // A bad target costs no remote call.
        images(&self.load_page(page_id)?, target)?;

        let stored = self
            .gateway
            .upload_image(&upload.filename, &upload.data, &upload.content_type)
            .map_err(|e| {
                error!(page = page_id, file = %upload.filename, error = %e, "Image upload failed");
                e
            })?;
        info!(page = page_id, remote_id = %stored.id, "Uploaded image");

        let remote_id = stored.id.clone();
        let image = ImageItem::remote(stored.url, &upload.alt, stored.id);
        self.update_page(page_id, |page| Ok(Some(place(page, target, image)?)))
            .inspect_err(|e| {
                warn!(page = page_id, remote_id = %remote_id, error = %e, "Uploaded image was not recorded");
            })
    }

    /// Delete the image at `index`.
    ///
    /// Uploaded images are deleted from the gateway first; the page changes
    /// only if that succeeds. The remote call runs outside the store's write
    /// lock, so the image is looked up again before it is removed.
    pub fn delete_image(
        &self,
        page_id: &str,
        target: &ImageTarget,
        index: usize,
        confirm: Confirmation,
    ) -> Result<Outcome<Page>, AdminError> {
        self.require_login()?;
        if confirm.token().is_none() {
            return Ok(Outcome::Skipped);
        }
        let image = image_at(&self.load_page(page_id)?, target, index)?.clone();
        if let Some(remote_id) = &image.remote_id {
            self.delete_remote_image(page_id, remote_id)?;
        }

        self.update_page(page_id, |page| {
            let current = images(page, target)?;
            let position = if current.get(index) == Some(&image) {
                Some(index)
            } else {
                current.iter().position(|i| i == &image)
            };
            let Some(position) = position else {
                warn!(page = page_id, index, "Image already removed");
                return Ok(None);
            };
            Ok(confirm
                .token()
                .map(|confirmed| remove_image(page, target, position, confirmed))
                .transpose()?)
        })
    }

    /// Drop all images of a target, deleting uploaded ones from the gateway.
    ///
    /// Stops at the first failed remote deletion without changing the page.
    /// Images added while the remote deletions ran are kept.
    pub fn clear_images(
        &self,
        page_id: &str,
        target: &ImageTarget,
        confirm: Confirmation,
    ) -> Result<Outcome<Page>, AdminError> {
        self.require_login()?;
        if confirm.token().is_none() {
            return Ok(Outcome::Skipped);
        }
        let before = images(&self.load_page(page_id)?, target)?.to_vec();
        let deleted: Vec<&str> = before.iter().filter_map(|i| i.remote_id.as_deref()).collect();
        for remote_id in &deleted {
            self.delete_remote_image(page_id, remote_id)?;
        }

        self.update_page(page_id, |page| {
            let current = images(page, target)?;
            if current == before.as_slice() {
                return Ok(confirm
                    .token()
                    .map(|confirmed| clear_images(page, target, confirmed))
                    .transpose()?);
            }
            warn!(page = page_id, "Images changed during clear, removing deleted uploads only");
            let stale: Vec<usize> = current
                .iter()
                .enumerate()
                .filter(|(_, i)| i.remote_id.as_deref().is_some_and(|id| deleted.contains(&id)))
                .map(|(position, _)| position)
                .collect();
            let mut next = page.clone();
            for position in stale.into_iter().rev() {
                if let Some(confirmed) = confirm.token() {
                    next = remove_image(&next, target, position, confirmed)?;
                }
            }
            Ok(Some(next))
        })
    }

    fn delete_remote_image(&self, page_id: &str, remote_id: &str) -> Result<(), AdminError> {
        self.gateway.delete_image(remote_id).map_err(|e| {
            error!(page = page_id, remote_id, error = %e, "Image delete failed");
            e
        })?;
        info!(page = page_id, remote_id, "Deleted image");
        Ok(())
    }
}
