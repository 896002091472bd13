//! Grid geometry of a template page.
//!
//! [`GridGeometry`] converts a physical [`LayoutParams`] into pixel column and
//! row boundaries for one page. All offsets are relative to the table origin
//! (`table_left`, `table_top`), so a [`CellRect`] is table-local and is
//! translated back to page coordinates only when cropping.

use crate::core::config::LayoutParams;
use serde::{Deserialize, Serialize};

/// An axis-aligned cell rectangle in table-local pixels.
///
/// Signed so that rectangles derived from a degenerate table can still be
/// represented and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl CellRect {
    pub fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }

    /// Whether the rectangle has zero or negative area.
    pub fn is_degenerate(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Whether the rectangle has positive area inside a table of the given size.
    pub fn is_valid_within(&self, table_width: i64, table_height: i64) -> bool {
        !self.is_degenerate() && self.right <= table_width && self.bottom <= table_height
    }

    /// Shrinks every side by `padding` pixels.
    ///
    /// The result may be degenerate; callers decide how to fall back.
    pub fn shrink(&self, padding: i64) -> Self {
        Self {
            left: self.left.saturating_add(padding),
            top: self.top.saturating_add(padding),
            right: self.right.saturating_sub(padding),
            bottom: self.bottom.saturating_sub(padding),
        }
    }

    /// Moves the rectangle by `(dx, dy)`.
    pub fn translate(&self, dx: i64, dy: i64) -> Self {
        Self {
            left: self.left.saturating_add(dx),
            top: self.top.saturating_add(dy),
            right: self.right.saturating_add(dx),
            bottom: self.bottom.saturating_add(dy),
        }
    }
}

impl std::fmt::Display for CellRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Pixel grid of one template page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Page x of the table's left edge.
    pub table_left: i64,
    /// Page y of the table's top edge.
    pub table_top: i64,
    pub table_width: i64,
    pub table_height: i64,
    /// `cols + 1` column boundaries in `[0, table_width]`.
    pub column_positions: Vec<i64>,
    /// `2 * row_pairs + 1` row boundaries in `[0, table_height]`, label and
    /// content rows alternating.
    pub row_positions: Vec<i64>,
}

impl GridGeometry {
    /// Computes the grid for a page of `page_width` x `page_height` pixels.
    ///
    /// Never fails: margins larger than the page give an empty table, which
    /// yields no valid cells. Pixel arithmetic saturates, so arbitrarily
    /// large physical lengths only collapse the grid.
    pub fn compute(layout: &LayoutParams, page_width: u32, page_height: u32) -> Self {
        let px = layout.to_pixels();

        let table_left = px.left_margin;
        let table_top = px.top_margin;
        let table_right = i64::from(page_width).saturating_sub(px.right_margin);
        let table_width = table_right.saturating_sub(table_left).max(0);
        let table_height = i64::from(page_height).saturating_sub(table_top).max(0);

        let cols = i64::from(px.cols.max(1));
        let column_positions = (0..=cols)
            .map(|i| (i as f64 * table_width as f64 / cols as f64).round() as i64)
            .collect();

        let mut row_positions = Vec::with_capacity(2 * px.row_pairs as usize + 1);
        row_positions.push(0);
        let mut current = 0i64;
        for _ in 0..px.row_pairs {
            current = current.saturating_add(px.short_row);
            row_positions.push(current.min(table_height));
            current = current.saturating_add(px.tall_row);
            row_positions.push(current.min(table_height));
        }

        Self {
            table_left,
            table_top,
            table_width,
            table_height,
            column_positions,
            row_positions,
        }
    }

    /// Number of column slots.
    pub fn cols(&self) -> usize {
        self.column_positions.len().saturating_sub(1)
    }

    /// Number of content rows (odd-indexed row spans).
    pub fn content_rows(&self) -> usize {
        self.row_positions.len().saturating_sub(1) / 2
    }

    /// Iterates the content-row cell rectangles in raster order, valid or not.
    pub fn content_cells(&self) -> impl Iterator<Item = CellRect> + '_ {
        let rows = self.row_positions.len().saturating_sub(1);
        (1..rows).step_by(2).flat_map(move |row_idx| {
            let top = self.row_positions[row_idx];
            let bottom = self.row_positions[row_idx + 1];
            self.column_positions
                .windows(2)
                .map(move |cols| CellRect::new(cols[0], top, cols[1], bottom))
        })
    }

    /// Whether `rect` is a usable cell of this table.
    pub fn is_valid_cell(&self, rect: &CellRect) -> bool {
        rect.is_valid_within(self.table_width, self.table_height)
    }

    /// The table area in page coordinates.
    pub fn table_rect(&self) -> CellRect {
        CellRect::new(
            self.table_left,
            self.table_top,
            self.table_left.saturating_add(self.table_width),
            self.table_top.saturating_add(self.table_height),
        )
    }

    /// Translates a table-local rectangle to page coordinates.
    pub fn to_page(&self, rect: &CellRect) -> CellRect {
        rect.translate(self.table_left, self.table_top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ConfigValidator;

    fn is_non_decreasing(values: &[i64]) -> bool {
        values.windows(2).all(|w| w[0] <= w[1])
    }

    #[test]
    fn test_standard_template_grid() {
        let grid = GridGeometry::compute(&LayoutParams::standard(), 1654, 2339);
        assert_eq!(grid.table_left, 137);
        assert_eq!(grid.table_top, 175);
        assert_eq!(grid.table_width, 1380);
        assert_eq!(grid.table_height, 2164);
        assert_eq!(grid.column_positions, vec![0, 276, 552, 828, 1104, 1380]);
        assert_eq!(
            grid.row_positions,
            vec![0, 52, 326, 378, 652, 704, 978, 1030, 1304, 1356, 1630, 1682, 1956]
        );
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid.content_rows(), 6);
    }

    #[test]
    fn test_grid_is_monotonic_across_page_sizes() {
        let layouts = [
            LayoutParams::standard(),
            LayoutParams::compact(),
            LayoutParams::tall_label(),
            LayoutParams {
                cols: 7,
                dpi: 300,
                ..LayoutParams::standard()
            },
        ];
        let sizes = [(1654, 2339), (800, 600), (100, 100), (0, 0), (4000, 1200)];

        for layout in &layouts {
            for &(w, h) in &sizes {
                let grid = GridGeometry::compute(layout, w, h);
                assert_eq!(grid.column_positions.len(), layout.cols as usize + 1);
                assert_eq!(grid.row_positions.len(), 13);
                assert!(is_non_decreasing(&grid.column_positions));
                assert!(is_non_decreasing(&grid.row_positions));
                assert!(grid.column_positions.iter().all(|&x| (0..=grid.table_width).contains(&x)));
                assert!(grid.row_positions.iter().all(|&y| (0..=grid.table_height).contains(&y)));
                assert_eq!(grid.column_positions.last(), Some(&grid.table_width));
            }
        }
    }

    #[test]
    fn test_huge_lengths_collapse_without_overflow() {
        let tall = LayoutParams {
            tall_row_cm: 1e17,
            ..LayoutParams::standard()
        };
        let wide = LayoutParams {
            left_margin_cm: 1e18,
            right_margin_cm: 1e18,
            ..LayoutParams::standard()
        };
        let deep = LayoutParams {
            top_margin_cm: 1e300,
            short_row_cm: 1e300,
            ..LayoutParams::standard()
        };

        for layout in [&tall, &wide, &deep] {
            assert!(layout.validate().is_ok());
            let grid = GridGeometry::compute(layout, 1654, 2339);
            assert_eq!(grid.row_positions.len(), 13);
            assert!(is_non_decreasing(&grid.row_positions));
            assert!(is_non_decreasing(&grid.column_positions));
            assert!(grid.row_positions.iter().all(|&y| (0..=grid.table_height).contains(&y)));
            assert!(grid.column_positions.iter().all(|&x| (0..=grid.table_width).contains(&x)));
        }

        let grid = GridGeometry::compute(&tall, 1654, 2339);
        assert_eq!(&grid.row_positions[..3], &[0, 52, 2164]);
        assert_eq!(grid.content_cells().filter(|c| grid.is_valid_cell(c)).count(), 5);

        let grid = GridGeometry::compute(&wide, 1654, 2339);
        assert_eq!(grid.table_width, 0);
        assert_eq!(grid.content_cells().filter(|c| grid.is_valid_cell(c)).count(), 0);
    }

    #[test]
    fn test_last_row_is_clamped_to_table_height() {
        // 2000 - 175 = 1825 < 1956
        let grid = GridGeometry::compute(&LayoutParams::standard(), 1654, 2000);
        assert_eq!(grid.table_height, 1825);
        assert_eq!(grid.row_positions.last(), Some(&1825));
        assert_eq!(grid.row_positions[11], 1682);
    }

    #[test]
    fn test_degenerate_page_has_empty_table() {
        let grid = GridGeometry::compute(&LayoutParams::standard(), 200, 150);
        assert_eq!(grid.table_width, 0);
        assert_eq!(grid.table_height, 0);
        assert_eq!(grid.content_cells().filter(|c| grid.is_valid_cell(c)).count(), 0);
    }

    #[test]
    fn test_content_cells_raster_order() {
        let grid = GridGeometry::compute(&LayoutParams::standard(), 1654, 2339);
        let cells: Vec<CellRect> = grid.content_cells().collect();
        assert_eq!(cells.len(), 30);
        assert_eq!(cells[0], CellRect::new(0, 52, 276, 326));
        assert_eq!(cells[4], CellRect::new(1104, 52, 1380, 326));
        assert_eq!(cells[5], CellRect::new(0, 378, 276, 652));
        assert_eq!(cells[29], CellRect::new(1104, 1682, 1380, 1956));
    }

    #[test]
    fn test_cell_rect_helpers() {
        let rect = CellRect::new(0, 0, 15, 30);
        assert_eq!(rect.shrink(10), CellRect::new(10, 10, 5, 20));
        assert!(rect.shrink(10).is_degenerate());
        assert!(!rect.is_degenerate());
        assert!(rect.is_valid_within(15, 30));
        assert!(!rect.is_valid_within(14, 30));
        assert_eq!(rect.translate(5, 7), CellRect::new(5, 7, 20, 37));
        assert_eq!(rect.to_string(), "(0, 0, 15, 30)");
    }
}
