//! The core module of the glyph extraction pipeline.
//!
//! This module contains the fundamental pieces shared by every stage:
//! - Configuration management and validation
//! - Constants for template geometry and cell processing
//! - Error handling
//!
//! It also re-exports the commonly used types for convenience.

pub mod config;
pub mod constants;
pub mod errors;

pub use config::{
    ConfigError, ConfigValidator, ExtractionConfig, LayoutParams, ParallelPolicy,
    PostCropTransform, ProcessorConfig,
};
pub use constants::*;
pub use errors::{GlyphError, GlyphResult, ImageProcessError, ProcessingStage};
