//! Error constructor utilities for the glyph pipeline.
//!
//! Helpers that attach a [`ProcessingStage`] and a short context string to an
//! underlying error, so call sites stay one line long:
//!
//! ```rust
//! use glyph_grid::core::GlyphError;
//!
//! let error = GlyphError::encode(
//!     "write U+AC00.png",
//!     std::io::Error::other("disk full"),
//! );
//! assert!(error.to_string().starts_with("encode failed"));
//! ```

use super::types::{GlyphError, ProcessingStage};
use std::path::Path;

impl GlyphError {
    /// Creates a processing error for an arbitrary stage.
    pub fn processing_error(
        kind: ProcessingStage,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates an error for a failed cell crop.
    pub fn crop(context: &str, error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::processing_error(ProcessingStage::Crop, context, error)
    }

    /// Creates an error for a failed resample.
    pub fn resize_error(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::processing_error(ProcessingStage::Resize, context, error)
    }

    /// Creates an error for a failed encode or write of an output image.
    pub fn encode(context: &str, error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::processing_error(ProcessingStage::Encode, context, error)
    }

    /// Creates an error for a failed debug artifact.
    pub fn render(context: &str, error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::processing_error(ProcessingStage::Render, context, error)
    }

    /// Creates the fatal storage error for an uncreatable output directory.
    pub fn storage(path: &Path, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates an error for invalid input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Creates a configuration error naming the offending field and value.
    pub fn config_error_with_context(field: &str, value: &str, reason: &str) -> Self {
        Self::ConfigError {
            message: format!(
                "Configuration error in field '{}' with value '{}': {}",
                field, value, reason
            ),
        }
    }

    /// Whether this error must stop the run instead of being counted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}

impl From<image::ImageError> for GlyphError {
    fn from(error: image::ImageError) -> Self {
        Self::ImageLoad(error)
    }
}

impl From<crate::core::config::ConfigError> for GlyphError {
    fn from(error: crate::core::config::ConfigError) -> Self {
        Self::config_error(error.to_string())
    }
}

impl From<super::types::ImageProcessError> for GlyphError {
    fn from(error: super::types::ImageProcessError) -> Self {
        Self::crop("image processing failed", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_processing_error_display_names_stage() {
        let error = GlyphError::crop("cell 3", std::io::Error::other("bad"));
        assert_eq!(error.to_string(), "crop failed: cell 3");
        assert!(!error.is_fatal());
    }

    #[test]
    fn test_storage_error_is_fatal() {
        let error = GlyphError::storage(
            &PathBuf::from("/readonly/out"),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(error.is_fatal());
        assert!(error.to_string().contains("/readonly/out"));
    }

    #[test]
    fn test_config_error_with_context() {
        let error = GlyphError::config_error_with_context("dpi", "0", "must be positive");
        match error {
            GlyphError::ConfigError { message } => {
                assert_eq!(
                    message,
                    "Configuration error in field 'dpi' with value '0': must be positive"
                );
            }
            _ => panic!("Expected ConfigError"),
        }
    }
}
