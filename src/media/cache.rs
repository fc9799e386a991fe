use iced::widget::image::Handle;
use std::collections::HashMap;

use super::placeholder::{placeholder, PlaceholderSize};

/// Load state of one image reference
#[derive(Debug, Clone)]
pub enum ImageState {
    Loading,
    Ready(Handle),
    Failed,
}

/// Decoded images for the session, plus pre-rendered placeholders.
///
/// Each reference is requested at most once; a failure stays a failure.
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<String, ImageState>,
    placeholders: HashMap<(Option<usize>, PlaceholderSize), Handle>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `image` as loading. Returns true when the caller should start
    /// decoding it, false when it is already known.
    pub fn request(&mut self, image: &str) -> bool {
        if self.entries.contains_key(image) {
            return false;
        }
        self.entries.insert(image.to_string(), ImageState::Loading);
        true
    }

    /// Record the outcome of a load
    pub fn finish(&mut self, image: String, result: Result<Handle, String>) {
        let state = match result {
            Ok(handle) => ImageState::Ready(handle),
            Err(e) => {
                tracing::warn!(image = %image, error = %e, "Image unavailable, using placeholder");
                ImageState::Failed
            }
        };
        self.entries.insert(image, state);
    }

    pub fn state(&self, image: &str) -> Option<&ImageState> {
        self.entries.get(image)
    }

    /// Render placeholders for positions `1..=count` in the given size,
    /// plus the unlabelled one. Already rendered ones are kept.
    pub fn prepare_placeholders(&mut self, count: usize, size: PlaceholderSize) {
        let (width, height) = size.dimensions();
        let labels = std::iter::once(None).chain((1..=count).map(Some));
        for label in labels {
            self.placeholders.entry((label, size)).or_insert_with(|| {
                let img = placeholder(label, width, height);
                Handle::from_rgba(width, height, img.into_raw())
            });
        }
    }

    /// Handle to draw for `image` at 1-based `position`.
    ///
    /// `None` while the image is still loading (or was never requested).
    /// Failed images resolve to the matching placeholder, falling back to
    /// the unlabelled one when that position was not prepared.
    pub fn handle_for(
        &self,
        image: &str,
        position: Option<usize>,
        size: PlaceholderSize,
    ) -> Option<Handle> {
        match self.state(image)? {
            ImageState::Loading => None,
            ImageState::Ready(handle) => Some(handle.clone()),
            ImageState::Failed => self
                .placeholders
                .get(&(position, size))
                .or_else(|| self.placeholders.get(&(None, size)))
                .cloned(),
        }
    }

    /// Forget everything (used when switching to another site root)
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel() -> Handle {
        Handle::from_rgba(1, 1, vec![0, 0, 0, 255])
    }

    #[test]
    fn test_request_only_once() {
        let mut cache = ImageCache::new();
        assert!(cache.request("a.jpg"));
        assert!(!cache.request("a.jpg"));
        assert!(matches!(cache.state("a.jpg"), Some(ImageState::Loading)));

        cache.finish("a.jpg".into(), Err("missing".into()));
        assert!(!cache.request("a.jpg"));
        assert!(matches!(cache.state("a.jpg"), Some(ImageState::Failed)));
    }

    #[test]
    fn test_ready_image_is_returned() {
        let mut cache = ImageCache::new();
        cache.request("a.jpg");
        assert!(cache.handle_for("a.jpg", Some(1), PlaceholderSize::Main).is_none());

        let handle = pixel();
        cache.finish("a.jpg".into(), Ok(handle.clone()));
        let drawn = cache.handle_for("a.jpg", Some(1), PlaceholderSize::Main);
        assert_eq!(drawn.map(|h| h.id()), Some(handle.id()));
    }

    #[test]
    fn test_failed_image_uses_position_placeholder() {
        let mut cache = ImageCache::new();
        cache.prepare_placeholders(2, PlaceholderSize::Thumb);
        cache.request("b.jpg");
        cache.finish("b.jpg".into(), Err("decode".into()));

        let id = |position| {
            cache
                .handle_for("b.jpg", position, PlaceholderSize::Thumb)
                .map(|h| h.id())
        };
        let second = id(Some(2));
        let unlabelled = id(None);
        let unknown_position = id(Some(9));

        assert!(second.is_some());
        assert_ne!(second, unlabelled);
        assert_eq!(unknown_position, unlabelled);
        assert!(cache.handle_for("b.jpg", Some(2), PlaceholderSize::Main).is_none());
    }

    #[test]
    fn test_clear_forgets_entries() {
        let mut cache = ImageCache::new();
        cache.request("a.jpg");
        cache.clear();
        assert!(cache.state("a.jpg").is_none());
        assert!(cache.request("a.jpg"));
    }
}
