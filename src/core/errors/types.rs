//! Error type definitions for the glyph extraction pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Stage of the page/cell pipeline an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Cropping a cell out of the page.
    Crop,
    /// Resampling a crop or a page.
    Resize,
    /// Encoding and writing an output image.
    Encode,
    /// Drawing a debug artifact.
    Render,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Crop => write!(f, "crop"),
            ProcessingStage::Resize => write!(f, "resize"),
            ProcessingStage::Encode => write!(f, "encode"),
            ProcessingStage::Render => write!(f, "render"),
        }
    }
}

/// Errors raised while slicing template pages into glyph images.
///
/// Only [`GlyphError::Storage`] is treated as fatal by the pipeline; every
/// other variant is caught at page or cell granularity, logged and counted.
#[derive(Error, Debug)]
pub enum GlyphError {
    /// A page image could not be decoded.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// A per-cell or per-page processing step failed.
    #[error("{kind} failed: {context}")]
    Processing {
        /// The stage where the error occurred.
        kind: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An output directory could not be created.
    #[error("cannot create output directory {path}")]
    Storage {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid input handed to a pipeline component.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Invalid or inconsistent configuration.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration problem.
        message: String,
    },

    /// Configuration file could not be parsed.
    #[error("configuration parse")]
    ConfigParse(#[from] serde_json::Error),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

/// Error raised by low-level crop helpers before it is attached to a stage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageProcessError {
    /// The crop rectangle has zero or negative area.
    #[error("invalid crop coordinates ({left}, {top}, {right}, {bottom})")]
    InvalidCropCoordinates {
        left: i64,
        top: i64,
        right: i64,
        bottom: i64,
    },

    /// The crop rectangle reaches outside the source image.
    #[error("crop ({left}, {top}, {right}, {bottom}) exceeds image bounds {width}x{height}")]
    CropOutOfBounds {
        left: i64,
        top: i64,
        right: i64,
        bottom: i64,
        width: u32,
        height: u32,
    },

    /// A target size has a zero dimension.
    #[error("invalid target size {0}x{1}")]
    InvalidSize(u32, u32),
}
