//! Configuration management for the glyph extraction pipeline.
//!
//! This module provides configuration types, validation traits, and the JSON
//! loadable top-level [`ExtractionConfig`].

pub mod errors;
pub mod extraction;
pub mod layout;
pub mod parallel;
pub mod processor;
pub mod transform;

pub use errors::{ConfigError, ConfigValidator};
pub use extraction::ExtractionConfig;
pub use layout::{LayoutParams, PixelLayout};
pub use parallel::ParallelPolicy;
pub use processor::ProcessorConfig;
pub use transform::{PostCropTransform, binarize};
