//! Decorative row-separator management.
//!
//! Separators are zero-height lines spanning the grid's horizontal
//! extent at each inter-row boundary. Their identity lives entirely in a
//! name-prefix convention — the one metadata channel the host exposes —
//! never in position, since positions change on every reflow. They are
//! owned by the container and are the only long-lived artifact this
//! engine produces.

use crate::detect;
use crate::error::Result;
use crate::host::Container;
use crate::types::{Element, Grid, Point, Rect, SeparatorStyle};

/// Name prefix encoding separator identity; the boundary index follows.
pub const SEPARATOR_PREFIX: &str = "gfsep_";

/// Name for the separator at inter-row boundary `index` (0 = between
/// rows 0 and 1).
pub fn separator_name(index: usize) -> String {
    format!("{SEPARATOR_PREFIX}{index}")
}

/// Parse a boundary index back out of a separator name.
pub fn parse_separator_index(name: &str) -> Option<usize> {
    name.strip_prefix(SEPARATOR_PREFIX)?.parse().ok()
}

/// Whether an element is one of our separators: a line whose name
/// carries the index encoding.
pub fn is_separator(el: &Element) -> bool {
    el.is_line() && parse_separator_index(&el.name).is_some()
}

/// Where one separator belongs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparatorPosition {
    pub start_x: f32,
    pub end_x: f32,
    pub y: f32,
}

impl SeparatorPosition {
    /// The zero-height frame for a separator at this position.
    pub fn frame(&self) -> Rect {
        Rect::new(self.start_x, self.y, self.end_x - self.start_x, 0.0)
    }
}

/// Recompute separator positions for a grid: one per internal boundary
/// (rows−1 entries), each at the vertical midpoint between the previous
/// row's max bottom and the next row's min top, spanning the grid's
/// horizontal extent.
pub fn recompute_positions(grid: &Grid) -> Vec<SeparatorPosition> {
    let (start_x, end_x) = grid.extent_x();
    let mut positions = Vec::new();
    for boundary in 1..grid.row_count() {
        let above = grid.row_bottom(boundary - 1);
        let below = grid.row_top(boundary);
        if let (Some(above), Some(below)) = (above, below) {
            positions.push(SeparatorPosition {
                start_x,
                end_x,
                y: (above + below) / 2.0,
            });
        }
    }
    positions
}

/// Create separators for the grid detected from the container's
/// elements, replacing any that already exist. One zero-height line per
/// internal boundary, named by the index convention. Returns the number
/// created.
pub fn apply<C: Container>(container: &mut C, style: &SeparatorStyle) -> Result<usize> {
    delete_all(container)?;
    let all = container.elements()?;
    let grid = detect::detect_grid(&all)?;
    let positions = recompute_positions(&grid);
    for (index, pos) in positions.iter().enumerate() {
        let created = container.create_line(
            Point::new(pos.start_x, pos.y),
            Point::new(pos.end_x, pos.y),
            &separator_name(index),
            style,
        );
        match created {
            Ok(_) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => log::warn!("failed to create separator {index}: {e}"),
        }
    }
    Ok(positions.len())
}

/// Reconcile existing separators with the current element geometry.
///
/// No-op when no separators exist. Rederives the grid from the
/// container's non-line elements; when the boundary count changed, all
/// separators are deleted and recreated (style sampled from the first
/// surviving separator, else `default_style`); otherwise each one moves
/// to its index-aligned position, preserving identity and selection
/// continuity. Returns the separator count after reconciliation.
pub fn realign<C: Container>(container: &mut C, default_style: &SeparatorStyle) -> Result<usize> {
    let all = container.elements()?;
    let mut seps: Vec<&Element> = all.iter().filter(|el| is_separator(el)).collect();
    if seps.is_empty() {
        return Ok(0);
    }
    seps.sort_by_key(|el| parse_separator_index(&el.name).unwrap_or(usize::MAX));

    let grid = detect::detect_grid(&all)?;
    let positions = recompute_positions(&grid);

    if positions.len() != seps.len() {
        log::debug!(
            "separator count changed ({} -> {}), recreating",
            seps.len(),
            positions.len()
        );
        let style = seps
            .first()
            .and_then(|el| container.line_style(el.id))
            .unwrap_or_else(|| default_style.clone());

        for sep in &seps {
            match container.delete_element(sep.id) {
                Ok(()) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => log::warn!("failed to delete separator '{}': {e}", sep.name),
            }
        }
        for (index, pos) in positions.iter().enumerate() {
            let created = container.create_line(
                Point::new(pos.start_x, pos.y),
                Point::new(pos.end_x, pos.y),
                &separator_name(index),
                &style,
            );
            match created {
                Ok(_) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => log::warn!("failed to create separator {index}: {e}"),
            }
        }
        return Ok(positions.len());
    }

    for (sep, pos) in seps.iter().zip(&positions) {
        match container.set_frame(sep.id, pos.frame()) {
            Ok(()) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => log::warn!("failed to move separator '{}': {e}", sep.name),
        }
    }
    Ok(seps.len())
}

/// Delete every separator in the container. Idempotent; a failure
/// deleting one element is logged and skipped. Returns the number
/// removed.
pub fn delete_all<C: Container>(container: &mut C) -> Result<usize> {
    let all = container.elements()?;
    let mut removed = 0usize;
    for el in all.iter().filter(|el| is_separator(el)) {
        match container.delete_element(el.id) {
            Ok(()) => removed += 1,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => log::warn!("failed to delete separator '{}': {e}", el.name),
        }
    }
    Ok(removed)
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
    use crate::types::{ElementId, ElementKind, FontSpec};

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

    #[test]
    fn test_name_round_trip() {
        let test_cases = [0usize, 1, 7, 42];
        for index in test_cases {
            assert_eq!(parse_separator_index(&separator_name(index)), Some(index));
        }
        assert_eq!(parse_separator_index("gfsep_"), None);
        assert_eq!(parse_separator_index("gfsep_x"), None);
        assert_eq!(parse_separator_index("Shape 3"), None);
    }

    #[test]
    fn test_is_separator_requires_line_kind() {
        let mut el = shape(1, 0.0, 0.0, 100.0, 0.0);
        el.name = separator_name(0);
        assert!(!is_separator(&el)); // right name, wrong kind
        el.kind = ElementKind::Line;
        assert!(is_separator(&el));
    }

    #[test]
    fn test_recompute_positions_midpoints() {
        let grid = Grid::from_rows(vec![
            vec![shape(1, 0.0, 0.0, 100.0, 40.0), shape(2, 110.0, 0.0, 100.0, 40.0)],
            vec![shape(3, 0.0, 50.0, 100.0, 40.0), shape(4, 110.0, 50.0, 100.0, 40.0)],
            vec![shape(5, 0.0, 100.0, 100.0, 40.0)],
        ]);
        let positions = recompute_positions(&grid);
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0], SeparatorPosition { start_x: 0.0, end_x: 210.0, y: 45.0 });
        assert_eq!(positions[1].y, 95.0);
        assert_eq!(positions[1].start_x, 0.0);
        assert_eq!(positions[1].end_x, 210.0);
    }

    #[test]
    fn test_single_row_has_no_boundaries() {
        let grid = Grid::from_rows(vec![vec![shape(1, 0.0, 0.0, 100.0, 40.0)]]);
        assert!(recompute_positions(&grid).is_empty());
    }
}
