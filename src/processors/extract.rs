//! Mapping of character labels onto grid cells.

use super::geometry::{CellRect, GridGeometry};
use crate::domain::{CharacterSet, RoutingTag};
use tracing::{debug, warn};

/// A label paired with the cell it was written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedCell {
    /// Position of the label in its character set.
    pub slot: usize,
    pub label: String,
    pub routing: RoutingTag,
    /// Table-local cell rectangle.
    pub rect: CellRect,
}

/// Pairs the labels of `charset` with the valid content cells of `grid`.
///
/// Content rows are walked top to bottom and their cells left to right.
/// Invalid rectangles are dropped without consuming a label; the n-th valid
/// cell takes the n-th label. The result has
/// `min(valid cells, charset.len())` entries in raster order.
pub fn extract_cells(grid: &GridGeometry, charset: &CharacterSet) -> Vec<MappedCell> {
    let mut valid_cells = grid.content_cells().filter(|rect| {
        let valid = grid.is_valid_cell(rect);
        if !valid {
            debug!("Dropping invalid cell {}", rect);
        }
        valid
    });

    let mut mapped = Vec::with_capacity(charset.len());
    for (slot, label) in charset.chars.iter().enumerate() {
        match valid_cells.next() {
            Some(rect) => mapped.push(MappedCell {
                slot,
                label: label.clone(),
                routing: charset.routing,
                rect,
            }),
            None => {
                for missing in &charset.chars[slot..] {
                    warn!(
                        "No cell available for '{}' in character set '{}', skipping",
                        missing, charset.name
                    );
                }
                break;
            }
        }
    }

    debug!(
        "Mapped {} of {} labels of '{}' onto the grid",
        mapped.len(),
        charset.len(),
        charset.name
    );
    mapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LayoutParams;

    fn standard_grid() -> GridGeometry {
        GridGeometry::compute(&LayoutParams::standard(), 1654, 2339)
    }

    #[test]
    fn test_full_page_maps_every_label() {
        let grid = standard_grid();
        let charset = CharacterSet::from_chars(
            "latin1",
            RoutingTag::Generic,
            "ABCDEFGHIJKLMNOPQRSTUVWXYZabcd",
        );
        let cells = extract_cells(&grid, &charset);
        assert_eq!(cells.len(), 30);
        assert_eq!(cells[0].label, "A");
        assert_eq!(cells[0].rect, CellRect::new(0, 52, 276, 326));
        assert_eq!(cells[6].label, "G");
        assert_eq!(cells[6].rect, CellRect::new(276, 378, 552, 652));
        assert!(cells.iter().enumerate().all(|(i, c)| c.slot == i));
    }

    #[test]
    fn test_short_charset_stops_early() {
        let grid = standard_grid();
        let charset = CharacterSet::from_chars("digits", RoutingTag::Generic, "89");
        let cells = extract_cells(&grid, &charset);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1].rect, CellRect::new(276, 52, 552, 326));
    }

    #[test]
    fn test_long_charset_is_truncated_to_valid_cells() {
        let grid = standard_grid();
        let labels: String = ('a'..='z').chain('A'..='Z').collect();
        let charset = CharacterSet::from_chars("long", RoutingTag::Generic, &labels);
        let cells = extract_cells(&grid, &charset);
        assert_eq!(cells.len(), 30);
        assert_eq!(cells.last().map(|c| c.label.as_str()), Some("D"));
    }

    #[test]
    fn test_invalid_cells_do_not_consume_labels() {
        // On a 2000 px page the last content row is clamped but still valid.
        let layout = LayoutParams::standard();
        let labels: String = ('a'..='z').chain('A'..='Z').collect();
        let charset = CharacterSet::from_chars("long", RoutingTag::Generic, &labels);

        let grid = GridGeometry::compute(&layout, 1654, 2000);
        assert_eq!(extract_cells(&grid, &charset).len(), 30);

        let grid = GridGeometry::compute(&layout, 1654, 1850);
        // On a 1850 px page table_height is 1675 < 1682, so the sixth content
        // row collapses.
        let cells = extract_cells(&grid, &charset);
        assert_eq!(cells.len(), 25);
        assert_eq!(cells[24].label, "y");
    }

    #[test]
    fn test_degenerate_page_yields_nothing() {
        let grid = GridGeometry::compute(&LayoutParams::standard(), 100, 100);
        let charset = CharacterSet::from_chars("x", RoutingTag::Generic, "abc");
        assert!(extract_cells(&grid, &charset).is_empty());
    }

    #[test]
    fn test_routing_is_carried() {
        let grid = standard_grid();
        let charset = CharacterSet::from_chars("ref", RoutingTag::Reference, "값같");
        let cells = extract_cells(&grid, &charset);
        assert!(cells.iter().all(|c| c.routing == RoutingTag::Reference));
    }
}
