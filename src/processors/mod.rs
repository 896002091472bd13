//! Page and cell processing.
//!
//! * `geometry` - Pixel grid of a template page
//! * `extract` - Mapping of character labels onto content cells
//! * `cell` - Cropping, normalization and persistence of glyph images

pub mod cell;
pub mod extract;
pub mod geometry;

pub use cell::{CellOutcome, CellProcessor, Destination, GlyphRecord, SkipReason, crop_page};
pub use extract::{MappedCell, extract_cells};
pub use geometry::{CellRect, GridGeometry};
