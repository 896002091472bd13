//! Top-level configuration of one extraction run.

use super::errors::{ConfigError, ConfigValidator};
use super::layout::LayoutParams;
use super::parallel::ParallelPolicy;
use super::processor::ProcessorConfig;
use crate::core::errors::GlyphError;
use crate::domain::CharsetRegistry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything the extractor needs besides the input directory.
///
/// Loadable from JSON; every section falls back to its default, so a file
/// that only overrides the margins is valid:
///
/// ```rust
/// use glyph_grid::core::config::ExtractionConfig;
///
/// let config: ExtractionConfig = serde_json::from_str(r#"{
///     "layout": {
///         "left_margin_cm": 1.8, "right_margin_cm": 1.8, "top_margin_cm": 2.15,
///         "short_row_cm": 0.8, "tall_row_cm": 3.5
///     }
/// }"#).unwrap();
/// assert_eq!(config.layout.cols, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub layout: LayoutParams,

    #[serde(default)]
    pub processor: ProcessorConfig,

    #[serde(default)]
    pub parallel: ParallelPolicy,

    /// Character sets and the page assignment.
    #[serde(default)]
    pub registry: CharsetRegistry,

    /// When set, every page is resampled to [width, height] before the grid
    /// is computed.
    #[serde(default)]
    pub page_size: Option<[u32; 2]>,

    /// When set, grid and cell overlays are written here.
    #[serde(default)]
    pub debug_dir: Option<PathBuf>,
}

impl ExtractionConfig {
    /// Creates a configuration with the standard layout and template sets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and validates a JSON configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self, GlyphError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_layout(mut self, layout: LayoutParams) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_processor(mut self, processor: ProcessorConfig) -> Self {
        self.processor = processor;
        self
    }

    pub fn with_parallel(mut self, parallel: ParallelPolicy) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_registry(mut self, registry: CharsetRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_page_size(mut self, page_size: Option<[u32; 2]>) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_debug_dir(mut self, debug_dir: Option<PathBuf>) -> Self {
        self.debug_dir = debug_dir;
        self
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            layout: LayoutParams::default(),
            processor: ProcessorConfig::default(),
            parallel: ParallelPolicy::default(),
            registry: CharsetRegistry::default(),
            page_size: None,
            debug_dir: None,
        }
    }
}

impl ConfigValidator for ExtractionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        self.processor.validate()?;
        if let Some([width, height]) = self.page_size {
            self.validate_positive("page_size.width", width)?;
            self.validate_positive("page_size.height", height)?;
        }
        if self.parallel.max_threads == Some(0) {
            return Err(ConfigError::NonPositive {
                field: "parallel.max_threads",
                value: "0".to_string(),
            });
        }
        self.registry.validate()
    }
}
