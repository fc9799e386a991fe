//! Image decoding
//!
//! Reads an image referenced by a project descriptor, decodes it and
//! downscales it so the GPU never receives more pixels than the window can use.

use image::{imageops::FilterType, DynamicImage, RgbaImage};
use std::path::PathBuf;
use tokio::task;

use super::{resolve, MediaError};
use iced::widget::image::Handle;

/// Load and decode one image into an iced handle
///
/// # Arguments
/// * `site_root` - Directory relative references are resolved against
/// * `image` - The image reference from the descriptor
/// * `max_dimension` - Longest allowed side after downscaling
pub async fn load_image(
    site_root: PathBuf,
    image: String,
    max_dimension: u32,
) -> Result<Handle, MediaError> {
    let path = resolve(&site_root, &image)?;

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| MediaError::Io { path, source })?;

    // Spawn blocking because decoding is CPU-intensive
    let rgba = task::spawn_blocking(move || decode_rgba(&bytes, max_dimension))
        .await
        .map_err(|e| MediaError::Join(e.to_string()))??;

    Ok(Handle::from_rgba(rgba.width(), rgba.height(), rgba.into_raw()))
}

/// Decode encoded bytes (JPEG, PNG, ...) to RGBA, downscaled to fit `max_dimension`
pub fn decode_rgba(bytes: &[u8], max_dimension: u32) -> Result<RgbaImage, MediaError> {
    let img = image::load_from_memory(bytes)?;
    Ok(fit_within(img, max_dimension).to_rgba8())
}

/// Downscale preserving aspect ratio; smaller images are left alone
fn fit_within(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    if img.width() <= max_dimension && img.height() <= max_dimension {
        return img;
    }
    img.resize(max_dimension, max_dimension, FilterType::Triangle)
}
