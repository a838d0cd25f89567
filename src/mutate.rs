//! Structural mutation: appending trailing rows and columns.
//!
//! New rows/columns replicate neighbor sizing and copy formatting from
//! the nearest existing row/column. Callers must realign separators
//! afterwards, since the row/column count changed; the pipeline ops do
//! this automatically.

use crate::error::{GridError, Result};
use crate::host::Container;
use crate::reflow::DEFAULT_SPACING;
use crate::types::{BatchOutcome, Grid, Rect};

/// Row height used when a table has only one row to copy from.
pub const DEFAULT_NEW_ROW_HEIGHT: f32 = 25.0;

/// Append a trailing row to the grid.
///
/// Native table: appends a row sized to the previous trailing row (or
/// [`DEFAULT_NEW_ROW_HEIGHT`] when only one row existed), copying
/// fill/border/text formatting from the row above into each new cell.
///
/// Free grid: synthesizes one new element per column at y = previous
/// row's bottom + average existing row spacing, sized from that column's
/// average width and the last row's height, copying format from the
/// nearest existing element in the same column.
pub fn add_row<C: Container>(container: &mut C, grid: &Grid) -> Result<BatchOutcome> {
    if let Some((table, rows, _cols)) = grid.table() {
        let height = if rows > 1 {
            container.table_row_height(table, rows - 1)?
        } else {
            DEFAULT_NEW_ROW_HEIGHT
        };
        container.append_table_row(table, height, rows.saturating_sub(1))?;
        let mut outcome = BatchOutcome::default();
        outcome.record_ok();
        return Ok(outcome);
    }

    let last_row = grid.row_count().checked_sub(1).ok_or_else(|| {
        GridError::GridNotDetected("cannot add a row to an empty grid".to_string())
    })?;
    let bottom = grid.row_bottom(last_row).unwrap_or(grid.anchor.y);
    let top = bottom + average_row_spacing(grid);
    let height = grid.row_height(last_row);

    let mut outcome = BatchOutcome::default();
    for col in 0..grid.col_count() {
        let Some(template) = grid.column_last_element(col) else {
            continue;
        };
        let frame = Rect::new(
            template.frame.left,
            top,
            grid.column_average_width(col),
            height,
        );
        match container.create_shape_like(template.id, frame) {
            Ok(_) => outcome.record_ok(),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                log::warn!("failed to create row cell in column {col}: {e}");
                outcome.record_skip();
            }
        }
    }
    Ok(outcome)
}

/// Append a trailing column to the grid: the horizontal mirror of
/// [`add_row`].
///
/// New free elements reuse the rightmost column's width but each row's
/// own top/height — heterogeneity across rows is left for a subsequent
/// equalize pass to reconcile.
pub fn add_column<C: Container>(container: &mut C, grid: &Grid) -> Result<BatchOutcome> {
    if let Some((table, _rows, cols)) = grid.table() {
        let last = cols.checked_sub(1).ok_or_else(|| {
            GridError::GridNotDetected("cannot add a column to an empty table".to_string())
        })?;
        let width = container.table_col_width(table, last)?;
        container.append_table_col(table, width, last)?;
        let mut outcome = BatchOutcome::default();
        outcome.record_ok();
        return Ok(outcome);
    }

    let cols = grid.col_count();
    if cols == 0 {
        return Err(GridError::GridNotDetected(
            "cannot add a column to an empty grid".to_string(),
        ));
    }
    let width = grid.column_average_width(cols - 1);
    let spacing = average_column_spacing(grid);

    let mut outcome = BatchOutcome::default();
    for row in grid.rows().unwrap_or(&[]) {
        let Some(template) = row.last() else {
            continue;
        };
        let frame = Rect::new(
            template.frame.right() + spacing,
            template.frame.top,
            width,
            template.frame.height,
        );
        match container.create_shape_like(template.id, frame) {
            Ok(_) => outcome.record_ok(),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                log::warn!("failed to create column cell: {e}");
                outcome.record_skip();
            }
        }
    }
    Ok(outcome)
}

/// Average vertical gap between consecutive rows; [`DEFAULT_SPACING`]
/// for single-row grids.
fn average_row_spacing(grid: &Grid) -> f32 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for boundary in 1..grid.row_count() {
        if let (Some(above), Some(below)) =
            (grid.row_bottom(boundary - 1), grid.row_top(boundary))
        {
            sum += below - above;
            n += 1;
        }
    }
    if n == 0 {
        DEFAULT_SPACING
    } else {
        (sum / n as f32).max(0.0)
    }
}

/// Average horizontal gap between consecutive elements within rows;
/// [`DEFAULT_SPACING`] when no row has two elements.
fn average_column_spacing(grid: &Grid) -> f32 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for row in grid.rows().unwrap_or(&[]) {
        for pair in row.windows(2) {
            if let (Some(a), Some(b)) = (pair.first(), pair.get(1)) {
                sum += b.frame.left - a.frame.right();
                n += 1;
            }
        }
    }
    if n == 0 {
        DEFAULT_SPACING
    } else {
        (sum / n as f32).max(0.0)
    }
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
    use crate::types::{Element, ElementId, ElementKind, FontSpec};

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
    fn test_average_row_spacing() {
        let grid = Grid::from_rows(vec![
            vec![shape(1, 0.0, 0.0, 100.0, 40.0)],
            vec![shape(2, 0.0, 50.0, 100.0, 40.0)],
            vec![shape(3, 0.0, 110.0, 100.0, 40.0)],
        ]);
        // gaps 10 and 20
        assert_eq!(average_row_spacing(&grid), 15.0);
    }

    #[test]
    fn test_average_row_spacing_defaults_for_single_row() {
        let grid = Grid::from_rows(vec![vec![shape(1, 0.0, 0.0, 100.0, 40.0)]]);
        assert_eq!(average_row_spacing(&grid), DEFAULT_SPACING);
    }

    #[test]
    fn test_average_column_spacing() {
        let grid = Grid::from_rows(vec![vec![
            shape(1, 0.0, 0.0, 100.0, 40.0),
            shape(2, 110.0, 0.0, 100.0, 40.0),
            shape(3, 230.0, 0.0, 100.0, 40.0),
        ]]);
        // gaps 10 and 20
        assert_eq!(average_column_spacing(&grid), 15.0);
    }
}
