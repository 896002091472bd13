//! Debug overlays of the computed grid.
//!
//! For every page two images are written to the debug directory, both drawn
//! on the table area of the page:
//!
//! - `debug_grid_<stem>.png`: column boundaries in red, row boundaries in blue
//! - `debug_cells_<stem>.png`: the grid plus every mapped cell outlined in
//!   green and labeled in red
//!
//! Labels need a font; without one only the rectangles are drawn.
//!
//! # Examples
//!
//! ```rust,no_run
//! use glyph_grid::pipeline::TemplateExtractor;
//! use glyph_grid::core::config::ExtractionConfig;
//! use glyph_grid::utils::visualization::DebugOverlay;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = TemplateExtractor::new(ExtractionConfig::new())?
//!     .with_observer(Box::new(DebugOverlay::with_system_font("debug")));
//! # Ok(())
//! # }
//! ```

use crate::core::errors::GlyphError;
use crate::pipeline::{PageObserver, PageView};
use crate::processors::{GridGeometry, MappedCell};
use crate::utils::image::crop_table;

use ab_glyph::{FontVec, PxScale};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const COLUMN_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

const ROW_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

const CELL_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

const LABEL_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Offset of a label from its cell's top-left corner.
const LABEL_OFFSET: i32 = 5;

/// Writes grid and cell overlays for every observed page.
pub struct DebugOverlay {
    output_dir: PathBuf,

    /// The font for cell labels. If None, labels are skipped.
    pub font: Option<FontVec>,

    /// Label height in pixels. Defaults to 24.0.
    pub font_scale: f32,

    /// Width of grid lines and cell outlines. Defaults to 2.
    pub line_thickness: u32,
}

impl DebugOverlay {
    /// Creates an overlay without a font.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            font: None,
            font_scale: 24.0,
            line_thickness: 2,
        }
    }

    /// Creates an overlay with a font loaded from the specified path.
    pub fn with_font_path(
        output_dir: impl Into<PathBuf>,
        font_path: &Path,
    ) -> Result<Self, GlyphError> {
        let font_data = std::fs::read(font_path)?;
        let font = FontVec::try_from_vec(font_data).map_err(|e| {
            GlyphError::render(&format!("parse font {}", font_path.display()), e)
        })?;
        Ok(Self {
            font: Some(font),
            ..Self::new(output_dir)
        })
    }

    /// Creates an overlay with the first system font found.
    ///
    /// Hangul-capable fonts are tried first. Falls back to no font.
    pub fn with_system_font(output_dir: impl Into<PathBuf>) -> Self {
        let font_paths = [
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
            "C:\\Windows\\Fonts\\malgun.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/System/Library/Fonts/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ];

        for path in &font_paths {
            if let Ok(font_data) = std::fs::read(path)
                && let Ok(font) = FontVec::try_from_vec(font_data)
            {
                info!("Loaded system font: {}", path);
                return Self {
                    font: Some(font),
                    ..Self::new(output_dir)
                };
            }
        }

        debug!("No system font found, cell labels will be skipped");
        Self::new(output_dir)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the grid-only overlay of a page.
    pub fn grid_path(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("debug_grid_{stem}.png"))
    }

    /// Path of the labeled cell overlay of a page.
    pub fn cells_path(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("debug_cells_{stem}.png"))
    }

    /// Draws the grid lines on a table image.
    pub fn draw_grid(&self, table: &mut RgbImage, grid: &GridGeometry) {
        let (width, height) = table.dimensions();
        let thickness = self.line_thickness.max(1);

        for &x in &grid.column_positions {
            let x = line_start(x, thickness, width);
            draw_filled_rect_mut(table, Rect::at(x, 0).of_size(thickness, height), COLUMN_COLOR);
        }
        for &y in &grid.row_positions {
            let y = line_start(y, thickness, height);
            draw_filled_rect_mut(table, Rect::at(0, y).of_size(width, thickness), ROW_COLOR);
        }
    }

    /// Outlines and labels mapped cells on a table image.
    pub fn draw_cells(&self, table: &mut RgbImage, cells: &[MappedCell]) {
        for cell in cells {
            let rect = &cell.rect;
            for inset in 0..self.line_thickness.max(1) as i64 {
                let width = rect.width() - 2 * inset;
                let height = rect.height() - 2 * inset;
                if width <= 0 || height <= 0 {
                    break;
                }
                let outline = Rect::at((rect.left + inset) as i32, (rect.top + inset) as i32)
                    .of_size(width as u32, height as u32);
                draw_hollow_rect_mut(table, outline, CELL_COLOR);
            }

            if let Some(font) = &self.font {
                draw_text_mut(
                    table,
                    LABEL_COLOR,
                    rect.left as i32 + LABEL_OFFSET,
                    rect.top as i32 + LABEL_OFFSET,
                    PxScale::from(self.font_scale),
                    font,
                    &cell.label,
                );
            }
        }
    }

    /// Renders and writes both overlays for one page.
    pub fn render(&self, view: &PageView<'_>) -> Result<(), GlyphError> {
        let Some(mut table) = crop_table(view.page, view.grid) else {
            debug!("Page {} has an empty table, no overlay written", view.stem);
            return Ok(());
        };

        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| GlyphError::storage(&self.output_dir, e))?;

        self.draw_grid(&mut table, view.grid);
        let grid_path = self.grid_path(view.stem);
        table
            .save_with_format(&grid_path, ImageFormat::Png)
            .map_err(|e| GlyphError::render(&format!("write {}", grid_path.display()), e))?;

        self.draw_cells(&mut table, view.cells);
        let cells_path = self.cells_path(view.stem);
        table
            .save_with_format(&cells_path, ImageFormat::Png)
            .map_err(|e| GlyphError::render(&format!("write {}", cells_path.display()), e))?;

        debug!(
            "Wrote overlays {} and {}",
            grid_path.display(),
            cells_path.display()
        );
        Ok(())
    }
}

impl PageObserver for DebugOverlay {
    fn observe(&self, view: &PageView<'_>) {
        if let Err(e) = self.render(view) {
            warn!("Debug overlay for {} failed: {}", view.path.display(), e);
        }
    }
}

impl std::fmt::Debug for DebugOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugOverlay")
            .field("output_dir", &self.output_dir)
            .field("font", &self.font.is_some())
            .field("font_scale", &self.font_scale)
            .field("line_thickness", &self.line_thickness)
            .finish()
    }
}

/// First pixel of a line at boundary `pos`, kept inside `[0, limit)`.
fn line_start(pos: i64, thickness: u32, limit: u32) -> i32 {
    let max_start = i64::from(limit.saturating_sub(thickness));
    pos.clamp(0, max_start) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LayoutParams;
    use crate::domain::{CharacterSet, RoutingTag};
    use crate::processors::extract_cells;
    use tempfile::TempDir;

    #[test]
    fn test_overlays_are_written_with_table_size() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let overlay = DebugOverlay::new(dir.path().join("debug"));

        let page = RgbImage::from_pixel(1654, 2339, Rgb([255, 255, 255]));
        let grid = GridGeometry::compute(&LayoutParams::standard(), 1654, 2339);
        let charset = CharacterSet::from_chars("digits", RoutingTag::Generic, "89");
        let cells = extract_cells(&grid, &charset);
        let path = dir.path().join("page_8.png");

        overlay.render(&PageView {
            path: &path,
            stem: "page_8",
            page: &page,
            grid: &grid,
            cells: &cells,
        })?;

        let grid_img = image::open(overlay.grid_path("page_8"))?.to_rgb8();
        assert_eq!(grid_img.dimensions(), (1380, 2164));
        // Column boundary at x = 276, row boundary at y = 52.
        assert_eq!(grid_img.get_pixel(276, 200), &COLUMN_COLOR);
        assert_eq!(grid_img.get_pixel(100, 52), &ROW_COLOR);

        let cells_img = image::open(overlay.cells_path("page_8"))?.to_rgb8();
        // Left edge of the second cell's outline, inset by one pixel.
        assert_eq!(cells_img.get_pixel(277, 200), &CELL_COLOR);
        // Third column carries no mapped cell.
        assert_eq!(cells_img.get_pixel(600, 200), &Rgb([255, 255, 255]));
        Ok(())
    }

    #[test]
    fn test_empty_table_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let overlay = DebugOverlay::new(dir.path().join("debug"));
        let page = RgbImage::new(100, 100);
        let grid = GridGeometry::compute(&LayoutParams::standard(), 100, 100);
        let path = dir.path().join("tiny.png");

        overlay.observe(&PageView {
            path: &path,
            stem: "tiny",
            page: &page,
            grid: &grid,
            cells: &[],
        });
        assert!(!overlay.grid_path("tiny").exists());
        Ok(())
    }

    #[test]
    fn test_unwritable_output_dir_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"")?;
        let overlay = DebugOverlay::new(blocker.join("debug"));

        let layout = LayoutParams::standard();
        let page = RgbImage::new(1654, 2339);
        let grid = GridGeometry::compute(&layout, 1654, 2339);
        let view = PageView {
            path: Path::new("p1.png"),
            stem: "p1",
            page: &page,
            grid: &grid,
            cells: &[],
        };

        assert!(overlay.render(&view).is_err());
        overlay.observe(&view);
        assert!(!overlay.grid_path("p1").exists());
        Ok(())
    }

    #[test]
    fn test_line_start_stays_inside() {
        assert_eq!(line_start(0, 2, 100), 0);
        assert_eq!(line_start(50, 2, 100), 50);
        assert_eq!(line_start(100, 2, 100), 98);
        assert_eq!(line_start(-3, 2, 100), 0);
    }
}
