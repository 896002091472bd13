//! Physical layout of a printed handwriting template.

use super::errors::{ConfigError, ConfigValidator};
use crate::core::constants::{CM_PER_INCH, DEFAULT_COLS, DEFAULT_DPI, DEFAULT_ROW_PAIRS};
use serde::{Deserialize, Serialize};

/// Layout of the template table in physical units.
///
/// All lengths are centimeters on the printed sheet; `dpi` relates them to
/// the pixels of the scanned page. The table starts `top_margin_cm` below the
/// top edge and spans the page width minus the side margins. It holds
/// `row_pairs` pairs of a short label row followed by a tall content row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    /// Scan resolution in dots per inch.
    #[serde(default = "LayoutParams::default_dpi")]
    pub dpi: u32,
    pub left_margin_cm: f64,
    pub right_margin_cm: f64,
    pub top_margin_cm: f64,
    /// Height of a label row.
    pub short_row_cm: f64,
    /// Height of a content row.
    pub tall_row_cm: f64,
    /// Number of character columns.
    #[serde(default = "LayoutParams::default_cols")]
    pub cols: u32,
    /// Number of label/content row pairs. Fixed by the printed template.
    #[serde(default = "LayoutParams::default_row_pairs")]
    pub row_pairs: u32,
}

impl LayoutParams {
    /// The standard template: 1.1 cm labels, 5.8 cm content rows.
    pub fn standard() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            left_margin_cm: 2.9,
            right_margin_cm: 2.9,
            top_margin_cm: 3.7,
            short_row_cm: 1.1,
            tall_row_cm: 5.8,
            cols: DEFAULT_COLS,
            row_pairs: DEFAULT_ROW_PAIRS,
        }
    }

    /// The compact template with narrow margins and 3.5 cm content rows.
    pub fn compact() -> Self {
        Self {
            left_margin_cm: 1.8,
            right_margin_cm: 1.8,
            top_margin_cm: 2.15,
            short_row_cm: 0.8,
            tall_row_cm: 3.5,
            ..Self::standard()
        }
    }

    /// The standard margins with a 0.9 cm label row and 5.5 cm content rows.
    pub fn tall_label() -> Self {
        Self {
            top_margin_cm: 3.5,
            short_row_cm: 0.9,
            tall_row_cm: 5.5,
            ..Self::standard()
        }
    }

    /// Looks up a named preset (`standard`, `compact`, `tall-label`).
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(Self::standard()),
            "compact" => Some(Self::compact()),
            "tall-label" | "tall_label" => Some(Self::tall_label()),
            _ => None,
        }
    }

    /// Converts a physical length to pixels at this layout's DPI.
    ///
    /// Rounds half away from zero.
    pub fn cm_to_px(&self, cm: f64) -> i64 {
        (cm / CM_PER_INCH * f64::from(self.dpi)).round() as i64
    }

    /// Returns the layout converted to pixel units.
    pub fn to_pixels(&self) -> PixelLayout {
        PixelLayout {
            left_margin: self.cm_to_px(self.left_margin_cm),
            right_margin: self.cm_to_px(self.right_margin_cm),
            top_margin: self.cm_to_px(self.top_margin_cm),
            short_row: self.cm_to_px(self.short_row_cm),
            tall_row: self.cm_to_px(self.tall_row_cm),
            cols: self.cols,
            row_pairs: self.row_pairs,
        }
    }

    fn default_dpi() -> u32 {
        DEFAULT_DPI
    }

    fn default_cols() -> u32 {
        DEFAULT_COLS
    }

    fn default_row_pairs() -> u32 {
        DEFAULT_ROW_PAIRS
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::standard()
    }
}

impl ConfigValidator for LayoutParams {
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_positive("dpi", self.dpi)?;
        self.validate_positive("cols", self.cols)?;
        if self.row_pairs != DEFAULT_ROW_PAIRS {
            return Err(ConfigError::InvalidConfig {
                message: format!(
                    "row_pairs is fixed by the printed template at {}, got {}",
                    DEFAULT_ROW_PAIRS, self.row_pairs
                ),
            });
        }
        self.validate_length("left_margin_cm", self.left_margin_cm)?;
        self.validate_length("right_margin_cm", self.right_margin_cm)?;
        self.validate_length("top_margin_cm", self.top_margin_cm)?;
        self.validate_positive_length("short_row_cm", self.short_row_cm)?;
        self.validate_positive_length("tall_row_cm", self.tall_row_cm)?;
        Ok(())
    }
}

/// A [`LayoutParams`] converted to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLayout {
    pub left_margin: i64,
    pub right_margin: i64,
    pub top_margin: i64,
    pub short_row: i64,
    pub tall_row: i64,
    pub cols: u32,
    pub row_pairs: u32,
}
