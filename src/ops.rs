//! Host-facing pipeline operations.
//!
//! Each operation is one logical unit: detect the grid from the current
//! selection, compute final dimensions, reflow, and keep separators in
//! sync. Per-element failures are logged and skipped; only a missing
//! container/view aborts.

use crate::error::Result;
use crate::host::{Container, TextMeasurer};
use crate::reflow::Spacing;
use crate::types::{
    BatchOutcome, Element, ElementId, ElementKind, Grid, OptimizationTarget, SeparatorStyle,
};
use crate::{allocate, detect, estimate, reflow, separator};

/// Optimize cell dimensions from text content and reflow.
///
/// Column widths come from the widest text in each column, reconciled
/// against `target.target_width`; row heights from the tallest estimated
/// text in each row (typically no fixed total, so just floor-clamped).
/// Separators are realigned afterwards. Free-element grids only; native
/// tables size through [`equalize_rows`]/[`equalize_columns`].
pub fn optimize_layout<C: Container>(
    container: &mut C,
    selection: &[Element],
    target: &OptimizationTarget,
    separator_style: &SeparatorStyle,
    measurer: &dyn TextMeasurer,
) -> Result<BatchOutcome> {
    let grid = detect::detect_grid(selection)?;

    let optimal_widths: Vec<f32> = (0..grid.col_count())
        .map(|c| column_optimal_width(&grid, c))
        .collect();
    let col_widths = allocate::reconcile(
        &optimal_widths,
        target.target_width,
        target.min_cell_width,
    );

    let optimal_heights: Vec<f32> = (0..grid.row_count())
        .map(|r| row_optimal_height(&grid, r, &col_widths, measurer))
        .collect();
    let row_heights = allocate::reconcile(
        &optimal_heights,
        target.target_height,
        target.min_cell_height,
    );

    finish_reflow(container, &grid, &col_widths, &row_heights, separator_style)
}

/// Set every column to the grid's average column width and reflow.
pub fn equalize_columns<C: Container>(
    container: &mut C,
    selection: &[Element],
    target: &OptimizationTarget,
    separator_style: &SeparatorStyle,
) -> Result<BatchOutcome> {
    if let Some((table, _rows, cols)) = native_table(selection) {
        return equalize_table_columns(container, table, cols, target);
    }

    let grid = detect::detect_grid(selection)?;
    let averages = grid.column_average_widths();
    let avg = mean(&averages).max(target.min_cell_width);
    let col_widths = vec![avg; grid.col_count()];
    let row_heights =
        allocate::reconcile(&grid.row_heights(), None, target.min_cell_height);

    finish_reflow(container, &grid, &col_widths, &row_heights, separator_style)
}

/// Set every row to the grid's tallest row height and reflow.
pub fn equalize_rows<C: Container>(
    container: &mut C,
    selection: &[Element],
    target: &OptimizationTarget,
    separator_style: &SeparatorStyle,
) -> Result<BatchOutcome> {
    if let Some((table, rows, _cols)) = native_table(selection) {
        return equalize_table_rows(container, table, rows, target);
    }

    let grid = detect::detect_grid(selection)?;
    let tallest = grid
        .row_heights()
        .into_iter()
        .fold(0.0_f32, f32::max)
        .max(target.min_cell_height);
    let row_heights = vec![tallest; grid.row_count()];
    let col_widths = grid.column_average_widths();

    finish_reflow(container, &grid, &col_widths, &row_heights, separator_style)
}

fn finish_reflow<C: Container>(
    container: &mut C,
    grid: &Grid,
    col_widths: &[f32],
    row_heights: &[f32],
    separator_style: &SeparatorStyle,
) -> Result<BatchOutcome> {
    let spacing = Spacing::infer(grid);
    let placements = reflow::plan(grid, col_widths, row_heights, spacing);
    let outcome = reflow::apply(container, &placements)?;
    separator::realign(container, separator_style)?;
    if !outcome.is_complete() {
        log::warn!(
            "reflow applied {}/{} elements",
            outcome.applied,
            outcome.attempted
        );
    }
    Ok(outcome)
}

fn equalize_table_rows<C: Container>(
    container: &mut C,
    table: ElementId,
    rows: usize,
    target: &OptimizationTarget,
) -> Result<BatchOutcome> {
    let mut tallest = target.min_cell_height;
    for row in 0..rows {
        tallest = tallest.max(container.table_row_height(table, row)?);
    }
    let mut outcome = BatchOutcome::default();
    for row in 0..rows {
        match container.set_table_row_height(table, row, tallest) {
            Ok(()) => outcome.record_ok(),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                log::warn!("failed to resize table row {row}: {e}");
                outcome.record_skip();
            }
        }
    }
    Ok(outcome)
}

fn equalize_table_columns<C: Container>(
    container: &mut C,
    table: ElementId,
    cols: usize,
    target: &OptimizationTarget,
) -> Result<BatchOutcome> {
    let mut sum = 0.0;
    for col in 0..cols {
        sum += container.table_col_width(table, col)?;
    }
    let width = if cols == 0 { 0.0 } else { sum / cols as f32 };
    let width = width.max(target.min_cell_width);
    let mut outcome = BatchOutcome::default();
    for col in 0..cols {
        match container.set_table_col_width(table, col, width) {
            Ok(()) => outcome.record_ok(),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                log::warn!("failed to resize table column {col}: {e}");
                outcome.record_skip();
            }
        }
    }
    Ok(outcome)
}

/// When the selection is exactly one native table, its id and structure.
fn native_table(selection: &[Element]) -> Option<(ElementId, usize, usize)> {
    match selection {
        [only] => match only.kind {
            ElementKind::Table { rows, cols } => Some((only.id, rows, cols)),
            _ => None,
        },
        _ => None,
    }
}

fn column_optimal_width(grid: &Grid, col: usize) -> f32 {
    let mut best = 0.0_f32;
    for row in grid.rows().unwrap_or(&[]) {
        if let Some(el) = row.get(col) {
            let w = match el.text.as_deref().filter(|t| !t.is_empty()) {
                Some(text) => estimate::estimate_cell_width(text, &el.font),
                None => el.frame.width,
            };
            best = best.max(w);
        }
    }
    best
}

fn row_optimal_height(
    grid: &Grid,
    row: usize,
    col_widths: &[f32],
    measurer: &dyn TextMeasurer,
) -> f32 {
    let mut best = 0.0_f32;
    for (col, el) in grid.rows().unwrap_or(&[]).get(row).into_iter().flatten().enumerate() {
        let h = match el.text.as_deref().filter(|t| !t.is_empty()) {
            Some(text) => {
                let width = col_widths.get(col).copied().unwrap_or(el.frame.width);
                estimate::estimate_required_height(text, width, &el.font, measurer)
            }
            None => el.frame.height,
        };
        best = best.max(h);
    }
    best
}

fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f32>() / values.len() as f32
    }
}
