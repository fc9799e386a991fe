//! Image loading module
//!
//! This module handles:
//! - Resolving image references against the site root
//! - Decoding and downscaling images off the UI thread
//! - Synthesizing placeholders for images that fail to load
//! - Keeping decoded images for the rest of the session

pub mod cache;
pub mod loader;
pub mod placeholder;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use cache::ImageCache;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("remote images are not fetched: {0}")]
    Remote(String),
    #[error("decoder task failed: {0}")]
    Join(String),
}

/// Turn an image reference into a file path.
///
/// Absolute paths are used as they are, everything else is relative to the
/// site root. URLs are rejected since there is no network stack.
pub fn resolve(site_root: &Path, image: &str) -> Result<PathBuf, MediaError> {
    let lowered = image.to_ascii_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        return Err(MediaError::Remote(image.to_string()));
    }

    let path = Path::new(image.trim_start_matches("./"));
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(site_root.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_and_absolute() {
        let root = Path::new("/srv/site");
        assert_eq!(
            resolve(root, "assets/images/projetos/modelo_1/1.jpg").unwrap(),
            PathBuf::from("/srv/site/assets/images/projetos/modelo_1/1.jpg")
        );
        assert_eq!(
            resolve(root, "./a.jpg").unwrap(),
            PathBuf::from("/srv/site/a.jpg")
        );
        assert_eq!(resolve(root, "/tmp/b.png").unwrap(), PathBuf::from("/tmp/b.png"));
    }

    #[test]
    fn test_resolve_rejects_urls() {
        let result = resolve(Path::new("."), "HTTPS://example.com/a.jpg");
        assert!(matches!(result, Err(MediaError::Remote(_))));
    }
}
