//! Post-crop transform strategies.

use crate::core::constants::DEFAULT_BINARIZE_THRESHOLD;
use image::{DynamicImage, GrayImage, Luma};
use serde::{Deserialize, Serialize};

/// Transform applied to a cell after it has been cropped and resized.
///
/// `Identity` keeps the scanned colors; `Binarize` converts to single-channel
/// luminance and maps every pixel to pure ink (0) or paper (255).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PostCropTransform {
    /// Emit the resized crop unchanged.
    #[default]
    Identity,
    /// Grayscale, then `luma < threshold` becomes 0 and everything else 255.
    Binarize {
        #[serde(default = "PostCropTransform::default_threshold")]
        threshold: u8,
    },
}

impl PostCropTransform {
    /// Binarization at the default luminance threshold.
    pub fn binarize() -> Self {
        Self::Binarize {
            threshold: DEFAULT_BINARIZE_THRESHOLD,
        }
    }

    /// Applies the transform.
    pub fn apply(&self, img: DynamicImage) -> DynamicImage {
        match *self {
            PostCropTransform::Identity => img,
            PostCropTransform::Binarize { threshold } => {
                DynamicImage::ImageLuma8(binarize(&img.to_luma8(), threshold))
            }
        }
    }

    fn default_threshold() -> u8 {
        DEFAULT_BINARIZE_THRESHOLD
    }
}

/// Thresholds a grayscale image into black and white.
pub fn binarize(gray: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let Luma([value]) = *gray.get_pixel(x, y);
        if value < threshold {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_binarize_threshold_boundary() {
        let mut gray = GrayImage::new(3, 1);
        gray.put_pixel(0, 0, Luma([199]));
        gray.put_pixel(1, 0, Luma([200]));
        gray.put_pixel(2, 0, Luma([10]));

        let out = binarize(&gray, 200);
        assert_eq!(out.get_pixel(0, 0), &Luma([0]));
        assert_eq!(out.get_pixel(1, 0), &Luma([255]));
        assert_eq!(out.get_pixel(2, 0), &Luma([0]));
    }

    #[test]
    fn test_identity_keeps_color() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([10, 200, 30])));
        let out = PostCropTransform::Identity.apply(img);
        assert_eq!(out.to_rgb8().get_pixel(0, 0), &Rgb([10, 200, 30]));
    }

    #[test]
    fn test_binarize_outputs_single_channel() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([250, 250, 250])));
        let out = PostCropTransform::binarize().apply(img);
        assert!(matches!(out, DynamicImage::ImageLuma8(_)));
        assert_eq!(out.to_luma8().get_pixel(3, 3), &Luma([255]));
    }

    #[test]
    fn test_deserialize_tagged() -> Result<(), serde_json::Error> {
        let t: PostCropTransform = serde_json::from_str(r#"{"type": "Binarize"}"#)?;
        assert_eq!(t, PostCropTransform::binarize());
        let t: PostCropTransform = serde_json::from_str(r#"{"type": "Binarize", "threshold": 128}"#)?;
        assert_eq!(t, PostCropTransform::Binarize { threshold: 128 });
        let t: PostCropTransform = serde_json::from_str(r#"{"type": "Identity"}"#)?;
        assert_eq!(t, PostCropTransform::Identity);
        Ok(())
    }
}
