//! Turning mapped cells into normalized glyph images.
//!
//! For every [`MappedCell`] the processor pads the rectangle inward (falling
//! back to the unpadded rectangle when padding collapses it), crops the page,
//! resamples to the configured target size with Lanczos3, applies the
//! post-crop transform and writes a PNG whose name depends on the cell's
//! routing tag.

use super::extract::MappedCell;
use super::geometry::{CellRect, GridGeometry};
use crate::core::config::ProcessorConfig;
use crate::core::constants::OUTPUT_EXTENSION;
use crate::core::errors::{GlyphError, ImageProcessError};
use crate::domain::{RoutingTag, format_codepoint, resolve_codepoint};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbImage};
use std::path::PathBuf;
use tracing::{debug, warn};

/// A persisted glyph image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRecord {
    pub label: String,
    /// Filename stem: the literal label or its formatted code point.
    pub key: String,
    pub routing: RoutingTag,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Why a cell produced no output without being an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Both the padded and the unpadded rectangle are empty.
    DegenerateCell,
    /// The label does not resolve to a single code point.
    UnresolvedKey,
    /// The label cannot be used as a file name.
    UnsafeFilename,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::DegenerateCell => write!(f, "degenerate cell"),
            SkipReason::UnresolvedKey => write!(f, "unresolved code point"),
            SkipReason::UnsafeFilename => write!(f, "unsafe file name"),
        }
    }
}

/// Result of processing one cell.
#[derive(Debug)]
pub enum CellOutcome {
    Saved(GlyphRecord),
    Skipped { label: String, reason: SkipReason },
    Failed { label: String, error: GlyphError },
}

impl CellOutcome {
    pub fn record(&self) -> Option<&GlyphRecord> {
        match self {
            CellOutcome::Saved(record) => Some(record),
            _ => None,
        }
    }
}

/// Where a cell's glyph goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub key: String,
    pub dir: PathBuf,
}

impl Destination {
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.{}", self.key, OUTPUT_EXTENSION))
    }
}

/// Crops, normalizes and writes glyph images.
#[derive(Debug, Clone)]
pub struct CellProcessor {
    config: ProcessorConfig,
}

impl CellProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// The rectangle actually cropped for `rect`.
    ///
    /// Padding is applied to all four sides; if that leaves no area the
    /// unpadded rectangle is used. Returns `None` only when `rect` itself is
    /// degenerate.
    pub fn crop_rect(&self, rect: &CellRect) -> Option<CellRect> {
        if rect.is_degenerate() {
            return None;
        }
        let padded = rect.shrink(i64::from(self.config.padding));
        if padded.is_degenerate() {
            warn!(
                "Padding {} collapses cell {}, using the unpadded cell",
                self.config.padding, rect
            );
            Some(*rect)
        } else {
            Some(padded)
        }
    }

    /// Resolves the output key and directory of a cell.
    pub fn destination(&self, cell: &MappedCell) -> Result<Destination, SkipReason> {
        match cell.routing {
            RoutingTag::Reference => {
                if !is_safe_file_stem(&cell.label) {
                    return Err(SkipReason::UnsafeFilename);
                }
                Ok(Destination {
                    key: cell.label.clone(),
                    dir: self.config.reference_dir.clone(),
                })
            }
            RoutingTag::Generic => {
                let codepoint = resolve_codepoint(&cell.label).ok_or(SkipReason::UnresolvedKey)?;
                Ok(Destination {
                    key: format_codepoint(codepoint, self.config.codepoint_format),
                    dir: self.config.output_dir.clone(),
                })
            }
        }
    }

    /// Crops the table-local `rect` out of `page` and normalizes it.
    pub fn render(
        &self,
        page: &RgbImage,
        grid: &GridGeometry,
        rect: &CellRect,
    ) -> Result<DynamicImage, GlyphError> {
        let crop = crop_page(page, &grid.to_page(rect))
            .map_err(|e| GlyphError::crop(&format!("cell {}", rect), e))?;

        let [width, height] = self.config.target_size;
        if width == 0 || height == 0 {
            return Err(GlyphError::resize_error(
                "glyph target size",
                ImageProcessError::InvalidSize(width, height),
            ));
        }
        let resized = imageops::resize(&crop, width, height, FilterType::Lanczos3);

        Ok(self.config.transform.apply(DynamicImage::ImageRgb8(resized)))
    }

    /// Processes one cell end to end.
    ///
    /// Skips and per-cell failures come back as [`CellOutcome`]; only an
    /// uncreatable destination directory is returned as `Err`.
    pub fn process(
        &self,
        page: &RgbImage,
        grid: &GridGeometry,
        cell: &MappedCell,
    ) -> Result<CellOutcome, GlyphError> {
        let destination = match self.destination(cell) {
            Ok(destination) => destination,
            Err(reason) => {
                warn!("Skipping '{}': {}", cell.label, reason);
                return Ok(CellOutcome::Skipped {
                    label: cell.label.clone(),
                    reason,
                });
            }
        };

        let Some(rect) = self.crop_rect(&cell.rect) else {
            warn!("Skipping '{}': cell {} is degenerate", cell.label, cell.rect);
            return Ok(CellOutcome::Skipped {
                label: cell.label.clone(),
                reason: SkipReason::DegenerateCell,
            });
        };

        let glyph = match self.render(page, grid, &rect) {
            Ok(glyph) => glyph,
            Err(error) => {
                warn!("Failed to render '{}': {}", cell.label, error);
                return Ok(CellOutcome::Failed {
                    label: cell.label.clone(),
                    error,
                });
            }
        };

        std::fs::create_dir_all(&destination.dir)
            .map_err(|e| GlyphError::storage(&destination.dir, e))?;

        let path = destination.path();
        if let Err(e) = glyph.save_with_format(&path, ImageFormat::Png) {
            let error = GlyphError::encode(&format!("write {}", path.display()), e);
            warn!("Failed to save '{}': {}", cell.label, error);
            return Ok(CellOutcome::Failed {
                label: cell.label.clone(),
                error,
            });
        }

        debug!("Saved '{}' to {}", cell.label, path.display());
        Ok(CellOutcome::Saved(GlyphRecord {
            label: cell.label.clone(),
            key: destination.key,
            routing: cell.routing,
            path,
            width: glyph.width(),
            height: glyph.height(),
        }))
    }
}

impl Default for CellProcessor {
    fn default() -> Self {
        Self::new(ProcessorConfig::default())
    }
}

/// Crops a page-coordinate rectangle out of `page`.
pub fn crop_page(page: &RgbImage, rect: &CellRect) -> Result<RgbImage, ImageProcessError> {
    if rect.is_degenerate() {
        return Err(ImageProcessError::InvalidCropCoordinates {
            left: rect.left,
            top: rect.top,
            right: rect.right,
            bottom: rect.bottom,
        });
    }

    let (width, height) = page.dimensions();
    if rect.left < 0
        || rect.top < 0
        || rect.right > i64::from(width)
        || rect.bottom > i64::from(height)
    {
        return Err(ImageProcessError::CropOutOfBounds {
            left: rect.left,
            top: rect.top,
            right: rect.right,
            bottom: rect.bottom,
            width,
            height,
        });
    }

    Ok(imageops::crop_imm(
        page,
        rect.left as u32,
        rect.top as u32,
        rect.width() as u32,
        rect.height() as u32,
    )
    .to_image())
}

fn is_safe_file_stem(label: &str) -> bool {
    !label.is_empty()
        && label != "."
        && label != ".."
        && !label.contains(['/', '\\', '\0'])
}
