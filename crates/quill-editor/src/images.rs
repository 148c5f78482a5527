//! Image sequence edits.
//!
//! Featured and content sections hold a sequence of images that is never
//! left empty: removing the last image substitutes the placeholder. The
//! banner is a single optional slot and simply becomes empty.

use quill_model::{ImageItem, Page, placeholder_images};

use crate::confirm::Confirmed;
use crate::error::EditError;
use crate::path::ImageTarget;

fn sequence_mut<'a>(
    page: &'a mut Page,
    target: &ImageTarget,
) -> Result<Option<&'a mut Vec<ImageItem>>, EditError> {
    match target {
        ImageTarget::Banner => Ok(None),
        ImageTarget::Featured => Ok(Some(&mut page.featured_section.images)),
        ImageTarget::Section(id) => page
            .content_sections
            .iter_mut()
            .find(|s| &s.id == id)
            .map(|s| Some(&mut s.images))
            .ok_or_else(|| EditError::SectionNotFound(id.clone())),
    }
}

/// Images currently held by `target`, in display order.
pub fn images<'a>(page: &'a Page, target: &ImageTarget) -> Result<&'a [ImageItem], EditError> {
    match target {
        ImageTarget::Banner => Ok(page.banner_image.as_slice()),
        ImageTarget::Featured => Ok(&page.featured_section.images),
        ImageTarget::Section(id) => page
            .section(id)
            .map(|s| s.images.as_slice())
            .ok_or_else(|| EditError::SectionNotFound(id.clone())),
    }
}

/// The image at `index` within `target`.
pub fn image_at<'a>(
    page: &'a Page,
    target: &ImageTarget,
    index: usize,
) -> Result<&'a ImageItem, EditError> {
    let all = images(page, target)?;
    all.get(index).ok_or(EditError::ImageIndexOutOfRange {
        index,
        len: all.len(),
    })
}

/// Append an image. On the banner this sets the banner.
pub fn add_image(page: &Page, target: &ImageTarget, image: ImageItem) -> Result<Page, EditError> {
    let mut next = page.clone();
    match sequence_mut(&mut next, target)? {
        Some(seq) => seq.push(image),
        None => next.banner_image = Some(image),
    }
    Ok(next)
}

/// Overwrite the first image, or append when the sequence is empty.
pub fn replace_image(
    page: &Page,
    target: &ImageTarget,
    image: ImageItem,
) -> Result<Page, EditError> {
    let mut next = page.clone();
    match sequence_mut(&mut next, target)? {
        Some(seq) => match seq.first_mut() {
            Some(first) => *first = image,
            None => seq.push(image),
        },
        None => next.banner_image = Some(image),
    }
    Ok(next)
}

/// Remove the image at `index`.
pub fn remove_image(
    page: &Page,
    target: &ImageTarget,
    index: usize,
    _confirmed: Confirmed,
) -> Result<Page, EditError> {
    let mut next = page.clone();
    match sequence_mut(&mut next, target)? {
        Some(seq) => {
            if index >= seq.len() {
                return Err(EditError::ImageIndexOutOfRange {
                    index,
                    len: seq.len(),
                });
            }
            seq.remove(index);
            if seq.is_empty() {
                *seq = placeholder_images();
            }
        }
        None => {
            if index != 0 || next.banner_image.is_none() {
                return Err(EditError::ImageIndexOutOfRange {
                    index,
                    len: usize::from(next.banner_image.is_some()),
                });
            }
            next.banner_image = None;
        }
    }
    Ok(next)
}

/// Drop every image of `target`, leaving only the placeholder.
pub fn clear_images(
    page: &Page,
    target: &ImageTarget,
    _confirmed: Confirmed,
) -> Result<Page, EditError> {
    let mut next = page.clone();
    match sequence_mut(&mut next, target)? {
        Some(seq) => *seq = placeholder_images(),
        None => next.banner_image = None,
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quill_model::{PLACEHOLDER_URL, default_page, placeholder_image};

    use super::*;
    use crate::confirm::Confirmation;

    fn confirmed() -> Confirmed {
        Confirmation::Confirmed.token().unwrap()
    }

    fn section(id: &str) -> ImageTarget {
        ImageTarget::Section(id.to_owned())
    }

    #[test]
    fn test_deleting_only_image_leaves_placeholder() {
        let page = default_page();
        let target = section("1");
        let with_upload = replace_image(
            &page,
            &target,
            ImageItem::remote("https://cdn/a.png", "a", "img-1"),
        )
        .unwrap();

        let removed = remove_image(&with_upload, &target, 0, confirmed()).unwrap();

        assert_eq!(images(&removed, &target).unwrap(), &[placeholder_image()]);
    }

    #[test]
    fn test_remove_keeps_other_images() {
        let page = default_page();
        let target = ImageTarget::Featured;
        let two = add_image(&page, &target, ImageItem::local("blob:quill/1", "one")).unwrap();

        let removed = remove_image(&two, &target, 0, confirmed()).unwrap();

        assert_eq!(
            images(&removed, &target).unwrap(),
            &[ImageItem::local("blob:quill/1", "one")]
        );
    }

    #[test]
    fn test_remove_out_of_range() {
        let page = default_page();

        let result = remove_image(&page, &section("2"), 3, confirmed());

        assert_eq!(
            result,
            Err(EditError::ImageIndexOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_replace_overwrites_first() {
        let page = default_page();
        let target = section("2");
        let image = ImageItem::local("blob:quill/9", "nine");

        let replaced = replace_image(&page, &target, image.clone()).unwrap();

        assert_eq!(images(&replaced, &target).unwrap(), &[image]);
    }

    #[test]
    fn test_replace_appends_when_empty() {
        let mut page = default_page();
        page.featured_section.images.clear();
        let image = ImageItem::local("blob:quill/1", "");

        let replaced = replace_image(&page, &ImageTarget::Featured, image.clone()).unwrap();

        assert_eq!(replaced.featured_section.images, vec![image]);
    }

    #[test]
    fn test_banner_slot() {
        let page = default_page();
        let banner = ImageItem::remote("https://cdn/b.png", "banner", "img-2");

        let with_banner = add_image(&page, &ImageTarget::Banner, banner.clone()).unwrap();
        assert_eq!(image_at(&with_banner, &ImageTarget::Banner, 0), Ok(&banner));

        let without = remove_image(&with_banner, &ImageTarget::Banner, 0, confirmed()).unwrap();
        assert_eq!(without.banner_image, None);
        assert!(remove_image(&without, &ImageTarget::Banner, 0, confirmed()).is_err());
    }

    #[test]
    fn test_clear_images() {
        let page = default_page();
        let target = section("1");
        let more = add_image(&page, &target, ImageItem::local("blob:quill/3", "")).unwrap();

        let cleared = clear_images(&more, &target, confirmed()).unwrap();

        let urls: Vec<_> = images(&cleared, &target)
            .unwrap()
            .iter()
            .map(|i| i.url.as_str())
            .collect();
        assert_eq!(urls, vec![PLACEHOLDER_URL]);
    }

    #[test]
    fn test_unknown_section() {
        let page = default_page();

        assert_eq!(
            add_image(&page, &section("x"), placeholder_image()),
            Err(EditError::SectionNotFound("x".to_owned()))
        );
    }
}
