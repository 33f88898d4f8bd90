//! Attached image set

use crate::types::ImageRef;

/// Ordered set of attached images, unique by `ImageRef::id`
///
/// Insertion order is the render order for previews and thumbnails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaSelection {
    images: Vec<ImageRef>,
}

impl MediaSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `image` unless an image with the same id is already attached
    ///
    /// Returns `true` when the image was appended.
    pub fn select(&mut self, image: ImageRef) -> bool {
        if self.contains(&image.id) {
            return false;
        }
        self.images.push(image);
        true
    }

    /// Detach the image with `id`; returns `true` if one was removed
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.images.len();
        self.images.retain(|image| image.id != id);
        self.images.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.images.iter().any(|image| image.id == id)
    }

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }
}
