//! Utility functions for page images.
//!
//! Loading tolerates mismatched file extensions: when the extension-guessed
//! decoder fails, the file is decoded again with the format sniffed from its
//! content.

use crate::core::errors::{GlyphError, ImageProcessError};
use crate::processors::{GridGeometry, crop_page};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageError, ImageReader, RgbImage};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

/// Converts a DynamicImage to an RgbImage.
pub fn dynamic_to_rgb(img: DynamicImage) -> RgbImage {
    img.to_rgb8()
}

/// Loads a page image as RGB.
///
/// # Errors
///
/// Returns [`GlyphError::ImageLoad`] when neither the extension nor the
/// content identifies a decodable format.
pub fn load_page_image(path: &Path) -> Result<RgbImage, GlyphError> {
    load_dynamic_image(path)
        .map(dynamic_to_rgb)
        .map_err(GlyphError::ImageLoad)
}

fn load_dynamic_image(path: &Path) -> Result<DynamicImage, ImageError> {
    match image::open(path) {
        Ok(img) => Ok(img),
        Err(err) if should_retry(&err) => {
            warn!(
                "Standard decode failed for {} ({err}). Retrying with format sniffing.",
                path.display()
            );
            decode_with_guessed_format(path)
        }
        Err(err) => Err(err),
    }
}

fn should_retry(err: &ImageError) -> bool {
    matches!(err, ImageError::Decoding(_) | ImageError::Unsupported(_))
}

fn decode_with_guessed_format(path: &Path) -> Result<DynamicImage, ImageError> {
    let file = File::open(path)?;
    let reader = ImageReader::new(BufReader::new(file)).with_guessed_format()?;
    reader.decode()
}

/// Resamples a page to exactly `width` x `height` with Lanczos3.
///
/// A page that already has the requested size is returned unchanged.
pub fn resize_page(page: RgbImage, width: u32, height: u32) -> Result<RgbImage, GlyphError> {
    if width == 0 || height == 0 {
        return Err(GlyphError::resize_error(
            "page normalization",
            ImageProcessError::InvalidSize(width, height),
        ));
    }
    if page.dimensions() == (width, height) {
        return Ok(page);
    }
    Ok(imageops::resize(&page, width, height, FilterType::Lanczos3))
}

/// Crops the table area of `grid` out of its page.
///
/// Returns `None` for an empty table.
pub fn crop_table(page: &RgbImage, grid: &GridGeometry) -> Option<RgbImage> {
    crop_page(page, &grid.table_rect()).ok()
}
