//! Overlay-to-cell mapping.
//!
//! Assigns free-floating overlay elements to grid cells by center-point
//! containment, recenters them on their cell, and raises them to the top
//! of the paint order.

use crate::error::Result;
use crate::host::Container;
use crate::types::{BatchOutcome, Cell, Element, Grid};

/// One overlay-to-cell assignment.
#[derive(Debug, Clone)]
pub struct Assignment<'a> {
    pub cell: Cell,
    pub overlay: &'a Element,
}

/// Assign each overlay to the first cell (row-major) whose rectangle
/// contains its center point. Boundary ties therefore resolve to the
/// first matching cell. Overlays whose center lies outside every cell
/// are dropped with a log line, never an error.
pub fn assign<'a>(grid: &Grid, overlays: &'a [Element]) -> Vec<Assignment<'a>> {
    let cells: Vec<Cell> = grid.cells().collect();
    let mut assignments: Vec<Assignment<'a>> = Vec::new();
    for overlay in overlays {
        let center = overlay.frame.center();
        match cells.iter().find(|cell| cell.rect.contains(center)) {
            Some(cell) => assignments.push(Assignment {
                cell: *cell,
                overlay,
            }),
            None => {
                log::debug!(
                    "overlay '{}' center outside every cell, dropped",
                    overlay.name
                );
            }
        }
    }
    // Per-cell processing order: row-major by cell, stable within a cell
    assignments.sort_by_key(|a| (a.cell.row, a.cell.col));
    assignments
}

/// Map overlays onto the grid: each assigned overlay is centered on its
/// cell's center point and raised to the top of the paint order, in
/// per-cell processing order. Original relative stacking is not
/// preserved. Per-element failures are logged and skipped.
pub fn map_overlays<C: Container>(
    container: &mut C,
    grid: &Grid,
    overlays: &[Element],
) -> Result<BatchOutcome> {
    let mut outcome = BatchOutcome::default();
    for a in assign(grid, overlays) {
        let centered = a.overlay.frame.centered_on(a.cell.center());
        let moved = container
            .set_frame(a.overlay.id, centered)
            .and_then(|()| container.bring_to_front(a.overlay.id));
        match moved {
            Ok(()) => outcome.record_ok(),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                log::warn!("failed to place overlay '{}': {e}", a.overlay.name);
                outcome.record_skip();
            }
        }
    }
    Ok(outcome)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::{ElementId, ElementKind, FontSpec, Rect};

    fn shape(id: u64, left: f32, top: f32, width: f32, height: f32) -> Element {
        Element {
            id: ElementId(id),
            name: format!("Shape {id}"),
            frame: Rect::new(left, top, width, height),
            text: None,
            font: FontSpec::default(),
            rotation: 0.0,
            kind: ElementKind::Shape,
        }
    }

    fn grid_2x2() -> Grid {
        Grid::from_rows(vec![
            vec![shape(1, 0.0, 0.0, 100.0, 50.0), shape(2, 110.0, 0.0, 100.0, 50.0)],
            vec![shape(3, 0.0, 60.0, 100.0, 50.0), shape(4, 110.0, 60.0, 100.0, 50.0)],
        ])
    }

    #[test]
    fn test_strict_interior_center_assigns_to_that_cell() {
        let grid = grid_2x2();
        let overlay = shape(10, 120.0, 70.0, 20.0, 20.0); // center (130, 80) in (1,1)
        let overlays = [overlay];
        let assigned = assign(&grid, &overlays);
        assert_eq!(assigned.len(), 1);
        assert_eq!((assigned[0].cell.row, assigned[0].cell.col), (1, 1));
    }

    #[test]
    fn test_outside_center_is_dropped() {
        let grid = grid_2x2();
        let overlay = shape(10, 400.0, 400.0, 20.0, 20.0);
        assert!(assign(&grid, &[overlay]).is_empty());
    }

    #[test]
    fn test_gap_between_cells_drops_overlay() {
        let grid = grid_2x2();
        // center (105, 25) falls in the spacing gap
        let overlay = shape(10, 95.0, 15.0, 20.0, 20.0);
        assert!(assign(&grid, &[overlay]).is_empty());
    }

    #[test]
    fn test_boundary_tie_takes_first_row_major_cell() {
        // Adjacent cells sharing edge x=100
        let grid = Grid::from_rows(vec![vec![
            shape(1, 0.0, 0.0, 100.0, 50.0),
            shape(2, 100.0, 0.0, 100.0, 50.0),
        ]]);
        let overlay = shape(10, 90.0, 15.0, 20.0, 20.0); // center exactly (100, 25)
        let overlays = [overlay];
        let assigned = assign(&grid, &overlays);
        assert_eq!((assigned[0].cell.row, assigned[0].cell.col), (0, 0));
    }

    #[test]
    fn test_assignments_ordered_row_major_by_cell() {
        let grid = grid_2x2();
        let overlays = vec![
            shape(10, 120.0, 70.0, 10.0, 10.0), // (1,1)
            shape(11, 10.0, 10.0, 10.0, 10.0),  // (0,0)
            shape(12, 20.0, 10.0, 10.0, 10.0),  // (0,0) second
        ];
        let order: Vec<(usize, usize, u64)> = assign(&grid, &overlays)
            .iter()
            .map(|a| (a.cell.row, a.cell.col, a.overlay.id.0))
            .collect();
        assert_eq!(order, vec![(0, 0, 11), (0, 0, 12), (1, 1, 10)]);
    }
}
