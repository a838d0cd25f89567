//! Tabular text paste contract.
//!
//! Writes a rows×cols text block into a detected grid. The destination
//! must be at least as large as the source in both dimensions; otherwise
//! the whole paste fails with SizeMismatch and nothing is written.
//! Extra destination rows/columns are left untouched.

use crate::error::{GridError, Result};
use crate::host::Container;
use crate::types::{BatchOutcome, Grid};

/// Paste `source[r][c]` into cell (r, c) of the grid.
///
/// Ragged source rows are allowed; the source column count is the
/// longest row. Per-cell write failures are logged and skipped, and the
/// aggregate outcome is returned ("pasted 18/20 cells").
pub fn paste_cells<C: Container>(
    container: &mut C,
    grid: &Grid,
    source: &[Vec<String>],
) -> Result<BatchOutcome> {
    let src_rows = source.len();
    let src_cols = source.iter().map(Vec::len).max().unwrap_or(0);
    let dest_rows = grid.row_count();
    let dest_cols = grid.col_count();
    if src_rows > dest_rows || src_cols > dest_cols {
        return Err(GridError::SizeMismatch {
            src_rows,
            src_cols,
            dest_rows,
            dest_cols,
        });
    }

    let mut outcome = BatchOutcome::default();
    let table = grid.table();
    for (r, row) in source.iter().enumerate() {
        for (c, text) in row.iter().enumerate() {
            let written = match table {
                Some((id, _, _)) => container.set_table_cell_text(id, r, c, text),
                None => match grid.cell(r, c) {
                    Some(el) => container.set_text(el.id, text),
                    None => Err(GridError::ElementMutationFailed(format!(
                        "no element at ({r}, {c})"
                    ))),
                },
            };
            match written {
                Ok(()) => outcome.record_ok(),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    log::warn!("failed to paste cell ({r}, {c}): {e}");
                    outcome.record_skip();
                }
            }
        }
    }
    log::info!("pasted {}/{} cells", outcome.applied, outcome.attempted);
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
    use crate::types::{Element, ElementId, ElementKind, FontSpec, Point, Rect};

    fn shape(id: u64, left: f32, top: f32) -> Element {
        Element {
            id: ElementId(id),
            name: format!("Shape {id}"),
            frame: Rect::new(left, top, 100.0, 40.0),
            text: None,
            font: FontSpec::default(),
            rotation: 0.0,
            kind: ElementKind::Shape,
        }
    }

    #[test]
    fn test_size_mismatch_detected_before_writes() {
        struct NeverWrite;
        impl Container for NeverWrite {
            fn elements(&self) -> crate::error::Result<Vec<Element>> {
                Ok(Vec::new())
            }
            fn create_line(
                &mut self,
                _: Point,
                _: Point,
                _: &str,
                _: &crate::types::SeparatorStyle,
            ) -> crate::error::Result<ElementId> {
                panic!("no writes expected")
            }
            fn create_shape_like(
                &mut self,
                _: ElementId,
                _: Rect,
            ) -> crate::error::Result<ElementId> {
                panic!("no writes expected")
            }
            fn delete_element(&mut self, _: ElementId) -> crate::error::Result<()> {
                panic!("no writes expected")
            }
            fn set_frame(&mut self, _: ElementId, _: Rect) -> crate::error::Result<()> {
                panic!("no writes expected")
            }
            fn set_text(&mut self, _: ElementId, _: &str) -> crate::error::Result<()> {
                panic!("no writes expected")
            }
            fn bring_to_front(&mut self, _: ElementId) -> crate::error::Result<()> {
                panic!("no writes expected")
            }
            fn line_style(&self, _: ElementId) -> Option<crate::types::SeparatorStyle> {
                None
            }
            fn table_row_height(&self, _: ElementId, _: usize) -> crate::error::Result<f32> {
                panic!("no reads expected")
            }
            fn table_col_width(&self, _: ElementId, _: usize) -> crate::error::Result<f32> {
                panic!("no reads expected")
            }
            fn append_table_row(
                &mut self,
                _: ElementId,
                _: f32,
                _: usize,
            ) -> crate::error::Result<()> {
                panic!("no writes expected")
            }
            fn append_table_col(
                &mut self,
                _: ElementId,
                _: f32,
                _: usize,
            ) -> crate::error::Result<()> {
                panic!("no writes expected")
            }
            fn set_table_row_height(
                &mut self,
                _: ElementId,
                _: usize,
                _: f32,
            ) -> crate::error::Result<()> {
                panic!("no writes expected")
            }
            fn set_table_col_width(
                &mut self,
                _: ElementId,
                _: usize,
                _: f32,
            ) -> crate::error::Result<()> {
                panic!("no writes expected")
            }
            fn set_table_cell_text(
                &mut self,
                _: ElementId,
                _: usize,
                _: usize,
                _: &str,
            ) -> crate::error::Result<()> {
                panic!("no writes expected")
            }
        }

        let grid = Grid::from_rows(vec![
            vec![shape(1, 0.0, 0.0), shape(2, 110.0, 0.0)],
            vec![shape(3, 0.0, 50.0), shape(4, 110.0, 50.0)],
        ]);
        let source: Vec<Vec<String>> = (0..3)
            .map(|r| (0..3).map(|c| format!("{r}:{c}")).collect())
            .collect();
        let result = paste_cells(&mut NeverWrite, &grid, &source);
        assert!(matches!(
            result,
            Err(GridError::SizeMismatch {
                src_rows: 3,
                src_cols: 3,
                dest_rows: 2,
                dest_cols: 2,
            })
        ));
    }
}
