//! Constants used throughout the glyph extraction pipeline.
//!
//! Template geometry defaults, cell processing defaults and the accepted page
//! image extensions.

/// Centimeters per inch, used for physical to pixel conversion.
pub const CM_PER_INCH: f64 = 2.54;

/// Number of label/content row pairs on one template page.
///
/// The printed template is fixed at six pairs; the value is part of the
/// layout so that `row_positions` always has `2 * 6 + 1` boundaries.
pub const DEFAULT_ROW_PAIRS: u32 = 6;

/// Number of character columns on one template page.
pub const DEFAULT_COLS: u32 = 5;

/// Scan resolution the template layouts are calibrated for.
pub const DEFAULT_DPI: u32 = 120;

/// Inward padding applied to every cell before cropping, in pixels.
///
/// Keeps the printed cell borders out of the glyph image.
pub const DEFAULT_CELL_PADDING: u32 = 10;

/// Side length of every emitted glyph image.
pub const DEFAULT_TARGET_SIZE: u32 = 128;

/// Luminance threshold for binarization: darker pixels become ink.
pub const DEFAULT_BINARIZE_THRESHOLD: u8 = 200;

/// Page size the standard template is normalized to when page
/// normalization is enabled (A4 at 200 DPI).
pub const TEMPLATE_PAGE_SIZE: (u32, u32) = (1654, 2339);

/// Default threshold for parallel processing.
///
/// Collections with at most this many items are processed sequentially.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4;

/// File extensions accepted as template pages (compared case-insensitively).
pub const SUPPORTED_PAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "tiff", "bmp", "gif"];

/// File extensions accepted when indexing a finished glyph directory.
pub const SUPPORTED_GLYPH_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Extension of every emitted glyph and debug artifact.
pub const OUTPUT_EXTENSION: &str = "png";
