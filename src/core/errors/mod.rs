//! Error types for the glyph extraction pipeline.
//!
//! The pipeline distinguishes recoverable errors (an unreadable page, a cell
//! that fails to crop or encode) from the single fatal category, an output
//! directory that cannot be created.
//!
//! # Usage
//!
//! ```rust
//! use glyph_grid::core::errors::{GlyphError, ProcessingStage};
//!
//! let error = GlyphError::processing_error(
//!     ProcessingStage::Resize,
//!     "cell 'A'",
//!     std::io::Error::other("zero-sized crop"),
//! );
//! assert!(!error.is_fatal());
//!
//! let config_error = GlyphError::config_error("cols must be positive");
//! # let _ = config_error;
//! ```

pub mod constructors;
pub mod types;

pub use types::{GlyphError, ImageProcessError, ProcessingStage};

/// Convenient result alias for glyph pipeline operations.
pub type GlyphResult<T> = Result<T, GlyphError>;
