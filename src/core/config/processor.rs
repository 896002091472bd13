//! Cell processing configuration.

use super::errors::{ConfigError, ConfigValidator};
use super::transform::PostCropTransform;
use crate::core::constants::{DEFAULT_CELL_PADDING, DEFAULT_TARGET_SIZE};
use crate::domain::CodepointFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How each mapped cell is turned into a glyph image and where it goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Inward padding applied to every side of a cell, in pixels.
    #[serde(default = "ProcessorConfig::default_padding")]
    pub padding: u32,

    /// Output size as [width, height].
    #[serde(default = "ProcessorConfig::default_target_size")]
    pub target_size: [u32; 2],

    /// Transform applied after resizing.
    #[serde(default)]
    pub transform: PostCropTransform,

    /// Filename scheme for generic-class glyphs.
    #[serde(default)]
    pub codepoint_format: CodepointFormat,

    /// Destination of generic-class glyphs.
    #[serde(default = "ProcessorConfig::default_output_dir")]
    pub output_dir: PathBuf,

    /// Destination of reference-class glyphs.
    #[serde(default = "ProcessorConfig::default_reference_dir")]
    pub reference_dir: PathBuf,
}

impl ProcessorConfig {
    /// Creates a configuration writing to the given directories.
    pub fn new(output_dir: impl Into<PathBuf>, reference_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            reference_dir: reference_dir.into(),
            ..Self::default()
        }
    }

    /// Sets the post-crop transform.
    pub fn with_transform(mut self, transform: PostCropTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Sets the generic filename scheme.
    pub fn with_codepoint_format(mut self, format: CodepointFormat) -> Self {
        self.codepoint_format = format;
        self
    }

    /// Sets the inward padding.
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the output size.
    pub fn with_target_size(mut self, width: u32, height: u32) -> Self {
        self.target_size = [width, height];
        self
    }

    fn default_padding() -> u32 {
        DEFAULT_CELL_PADDING
    }

    fn default_target_size() -> [u32; 2] {
        [DEFAULT_TARGET_SIZE, DEFAULT_TARGET_SIZE]
    }

    fn default_output_dir() -> PathBuf {
        PathBuf::from("output")
    }

    fn default_reference_dir() -> PathBuf {
        PathBuf::from("ref_chars")
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            padding: Self::default_padding(),
            target_size: Self::default_target_size(),
            transform: PostCropTransform::default(),
            codepoint_format: CodepointFormat::default(),
            output_dir: Self::default_output_dir(),
            reference_dir: Self::default_reference_dir(),
        }
    }
}

impl ConfigValidator for ProcessorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_positive("target_size.width", self.target_size[0])?;
        self.validate_positive("target_size.height", self.target_size[1])?;
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfig {
                message: "output_dir must not be empty".to_string(),
            });
        }
        if self.reference_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfig {
                message: "reference_dir must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
