//! # glyph-grid
//!
//! A Rust library that slices scanned handwriting template sheets into
//! normalized per-character glyph images.
//!
//! A template page holds a printed table: pairs of a short label row and a
//! tall content row, with a fixed number of columns. Each content cell holds
//! one handwritten character. Given the physical layout of the sheet and the
//! ordered characters each page carries, the library computes the pixel grid,
//! maps characters onto content cells in reading order and writes one image
//! per character.
//!
//! ## Features
//!
//! - Pixel grid derived from margins, row heights and DPI
//! - Character sets as configuration data, with positional or explicit page
//!   assignment
//! - Padding with fallback, Lanczos3 resampling and optional binarization
//! - Literal-character or code-point file naming per character set
//! - Parallel page and cell processing
//! - Grid and cell debug overlays (`visualization` feature)
//!
//! ## Modules
//!
//! * [`core`] - Configuration, constants and error handling
//! * [`domain`] - Character sets, Unicode key resolution and glyph indexing
//! * [`pipeline`] - Directory driver, statistics and page observers
//! * [`processors`] - Grid geometry, cell mapping and cell processing
//! * [`utils`] - Page image helpers, overlays and logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glyph_grid::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractionConfig::new()
//!     .with_layout(LayoutParams::standard())
//!     .with_processor(
//!         ProcessorConfig::new("output", "ref_chars")
//!             .with_transform(PostCropTransform::binarize()),
//!     );
//!
//! let extractor = TemplateExtractor::new(config)?;
//! let stats = extractor.run(Path::new("scans"))?;
//! println!("{}", stats);
//! # Ok(())
//! # }
//! ```
//!
//! ### JSON Configuration
//!
//! ```rust,no_run
//! use glyph_grid::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config: ExtractionConfig = serde_json::from_str(r#"
//! {
//!   "layout": {
//!     "dpi": 120,
//!     "left_margin_cm": 2.9,
//!     "right_margin_cm": 2.9,
//!     "top_margin_cm": 3.7,
//!     "short_row_cm": 1.1,
//!     "tall_row_cm": 5.8
//!   },
//!   "processor": {
//!     "output_dir": "output",
//!     "reference_dir": "ref_chars",
//!     "transform": { "type": "Binarize", "threshold": 200 }
//!   },
//!   "registry": {
//!     "sets": [
//!       { "name": "han1", "routing": "reference", "chars": ["값", "같", "곬"] },
//!       { "name": "digits", "chars": ["0", "1", "2"] }
//!     ],
//!     "manifest": { "scan_a.png": "han1", "scan_b": "digits" }
//!   }
//! }
//! "#)?;
//!
//! let stats = TemplateExtractor::new(config)?.run(Path::new("scans"))?;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod pipeline;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// ```rust
/// use glyph_grid::prelude::*;
/// ```
///
/// For lower-level pieces (geometry, cell processing, glyph indexing), import
/// directly from [`processors`](crate::processors) and [`domain`](crate::domain).
pub mod prelude {
    // Pipeline
    pub use crate::pipeline::{ExtractionStats, TemplateExtractor};

    // Configuration
    pub use crate::core::config::{
        ExtractionConfig, LayoutParams, ParallelPolicy, PostCropTransform, ProcessorConfig,
    };
    pub use crate::domain::{CharacterSet, CharsetRegistry, CodepointFormat, RoutingTag};

    // Error Handling
    pub use crate::core::{GlyphError, GlyphResult};
}
