//! Adaptive grid detection.
//!
//! Clusters free elements into rows (or columns) from raw positions
//! using a tolerance derived from the average element size, and builds
//! structure-only grids from native tables. The grid is rederived from
//! live geometry on every operation; nothing here is cached.

use crate::error::{GridError, Result};
use crate::types::{Element, Grid};

/// Smallest clustering tolerance, in document units.
pub const MIN_TOLERANCE: f32 = 3.0;

/// Largest clustering tolerance, in document units.
pub const MAX_TOLERANCE: f32 = 25.0;

/// Fraction of the average element extent used as tolerance.
const TOLERANCE_RATIO: f32 = 0.3;

/// Vertical clustering tolerance: 30% of the average element height,
/// clamped to [`MIN_TOLERANCE`, `MAX_TOLERANCE`].
pub fn row_tolerance(elements: &[Element]) -> f32 {
    adaptive_tolerance(elements.iter().map(|el| el.frame.height))
}

/// Horizontal clustering tolerance, from average element width.
pub fn column_tolerance(elements: &[Element]) -> f32 {
    adaptive_tolerance(elements.iter().map(|el| el.frame.width))
}

fn adaptive_tolerance(extents: impl Iterator<Item = f32>) -> f32 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for e in extents {
        sum += e;
        n += 1;
    }
    let avg = if n == 0 { 0.0 } else { sum / n as f32 };
    (avg * TOLERANCE_RATIO).clamp(MIN_TOLERANCE, MAX_TOLERANCE)
}

/// Detect the row/column grid formed by a set of free elements.
///
/// Lines (separators) are excluded from the candidate set by kind.
/// Rows come back sorted by ascending top, each row by ascending left;
/// shorter rows are accepted as ragged. Errors with
/// [`GridError::GridNotDetected`] when no usable element remains.
pub fn detect_grid(elements: &[Element]) -> Result<Grid> {
    let candidates = candidates(elements);
    if candidates.is_empty() {
        return Err(GridError::GridNotDetected(
            "no grid candidates in selection".to_string(),
        ));
    }
    let tolerance = row_tolerance(&candidates);
    let mut rows = cluster(candidates, tolerance, |el| el.frame.top);
    for row in &mut rows {
        row.sort_by(|a, b| a.frame.left.total_cmp(&b.frame.left));
    }
    let grid = Grid::from_rows(rows);
    log::debug!(
        "detected {}x{} grid (tolerance {tolerance:.1})",
        grid.row_count(),
        grid.col_count()
    );
    Ok(grid)
}

/// Column-oriented variant of [`detect_grid`]: clusters by left edge
/// with a width-based tolerance. Clusters come back sorted by ascending
/// left, members by ascending top.
pub fn detect_columns(elements: &[Element]) -> Result<Vec<Vec<Element>>> {
    let candidates = candidates(elements);
    if candidates.is_empty() {
        return Err(GridError::GridNotDetected(
            "no grid candidates in selection".to_string(),
        ));
    }
    let tolerance = column_tolerance(&candidates);
    let mut cols = cluster(candidates, tolerance, |el| el.frame.left);
    for col in &mut cols {
        col.sort_by(|a, b| a.frame.top.total_cmp(&b.frame.top));
    }
    Ok(cols)
}

/// Build a structure-only grid from a native table element.
pub fn detect_table_grid(table: &Element) -> Result<Grid> {
    match table.kind {
        crate::types::ElementKind::Table { rows, cols } => {
            Ok(Grid::from_table(table.id, table.frame.origin(), rows, cols))
        }
        _ => Err(GridError::SelectionInvalid(format!(
            "element '{}' is not a native table",
            table.name
        ))),
    }
}

fn candidates(elements: &[Element]) -> Vec<Element> {
    elements
        .iter()
        .filter(|el| !el.is_line())
        .cloned()
        .collect()
}

/// Cluster elements along one axis. `key` reads the clustered edge;
/// an element joins the first cluster whose running average is within
/// `tolerance`, otherwise opens a new one. Clusters are returned sorted
/// by their average key.
fn cluster(
    mut elements: Vec<Element>,
    tolerance: f32,
    key: impl Fn(&Element) -> f32,
) -> Vec<Vec<Element>> {
    elements.sort_by(|a, b| key(a).total_cmp(&key(b)));

    // Running (sum, members) per cluster; average recomputed on the fly.
    let mut clusters: Vec<(f32, Vec<Element>)> = Vec::new();
    for el in elements {
        let k = key(&el);
        let found = clusters
            .iter()
            .position(|(sum, members)| (k - sum / members.len() as f32).abs() <= tolerance);
        if let Some((sum, members)) = found.and_then(|i| clusters.get_mut(i)) {
            *sum += k;
            members.push(el);
            continue;
        }
        clusters.push((k, vec![el]));
    }

    clusters.sort_by(|(sa, a), (sb, b)| {
        (sa / a.len() as f32).total_cmp(&(sb / b.len() as f32))
    });
    clusters.into_iter().map(|(_, members)| members).collect()
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

    fn sized(height: f32) -> Element {
        shape(1, 0.0, 0.0, 100.0, height)
    }

    #[test]
    fn test_tolerance_clamped() {
        let test_cases = [
            (0.0, 3.0),    // zero height clamps up
            (5.0, 3.0),    // 1.5 clamps up
            (40.0, 12.0),  // 30% inside range
            (500.0, 25.0), // clamps down
        ];
        for (height, expected) in test_cases {
            assert_eq!(row_tolerance(&[sized(height)]), expected);
        }
    }

    #[test]
    fn test_detects_rows_sorted_and_complete() {
        // 2x3 grid given out of order, with jitter below tolerance
        let elements = vec![
            shape(5, 220.0, 102.0, 100.0, 40.0),
            shape(1, 0.0, 0.0, 100.0, 40.0),
            shape(4, 110.0, 98.0, 100.0, 40.0),
            shape(2, 110.0, 3.0, 100.0, 40.0),
            shape(6, 0.0, 100.0, 100.0, 40.0),
            shape(3, 220.0, 1.0, 100.0, 40.0),
        ];
        let grid = detect_grid(&elements).unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.col_count(), 3);

        let rows = grid.rows().unwrap();
        // Every input element lands in exactly one cell
        let total: usize = rows.iter().map(Vec::len).sum();
        assert_eq!(total, 6);
        // Rows by ascending top, members by ascending left
        assert!(grid.row_top(0).unwrap() < grid.row_top(1).unwrap());
        for row in rows {
            for pair in row.windows(2) {
                assert!(pair[0].frame.left < pair[1].frame.left);
            }
        }
        assert_eq!(rows[1][2].id, ElementId(5));
    }

    #[test]
    fn test_gap_beyond_tolerance_opens_new_row() {
        // avg height 40 -> tolerance 12; tops 0 and 13 must split
        let elements = vec![
            shape(1, 0.0, 0.0, 100.0, 40.0),
            shape(2, 110.0, 13.0, 100.0, 40.0),
        ];
        let grid = detect_grid(&elements).unwrap();
        assert_eq!(grid.row_count(), 2);
    }

    #[test]
    fn test_ragged_rows_accepted() {
        let elements = vec![
            shape(1, 0.0, 0.0, 100.0, 40.0),
            shape(2, 110.0, 0.0, 100.0, 40.0),
            shape(3, 0.0, 100.0, 100.0, 40.0),
        ];
        let grid = detect_grid(&elements).unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.col_count(), 2);
        assert!(grid.cell(1, 1).is_none());
    }

    #[test]
    fn test_lines_excluded_from_candidates() {
        let mut line = shape(9, 0.0, 50.0, 300.0, 0.0);
        line.kind = ElementKind::Line;
        let elements = vec![shape(1, 0.0, 0.0, 100.0, 40.0), line];
        let grid = detect_grid(&elements).unwrap();
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.elements().count(), 1);
    }

    #[test]
    fn test_empty_selection_not_detected() {
        assert!(matches!(
            detect_grid(&[]),
            Err(GridError::GridNotDetected(_))
        ));
    }

    #[test]
    fn test_detect_columns() {
        let elements = vec![
            shape(1, 0.0, 0.0, 100.0, 40.0),
            shape(2, 200.0, 0.0, 100.0, 40.0),
            shape(3, 2.0, 50.0, 100.0, 40.0),
        ];
        let cols = detect_columns(&elements).unwrap();
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0].len(), 2);
        assert_eq!(cols[0][0].id, ElementId(1));
        assert_eq!(cols[0][1].id, ElementId(3));
    }

    #[test]
    fn test_detect_table_grid() {
        let mut table = shape(7, 10.0, 10.0, 400.0, 200.0);
        table.kind = ElementKind::Table { rows: 3, cols: 4 };
        let grid = detect_table_grid(&table).unwrap();
        assert_eq!(grid.table(), Some((ElementId(7), 3, 4)));

        let not_table = shape(8, 0.0, 0.0, 10.0, 10.0);
        assert!(matches!(
            detect_table_grid(&not_table),
            Err(GridError::SelectionInvalid(_))
        ));
    }
}
