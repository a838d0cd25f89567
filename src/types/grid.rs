//! The rederived grid structure and its cell geometry accessors.
//!
//! A [`Grid`] is a value produced by detection and consumed by the
//! estimator, allocator, and reflow passes. It is never persisted; every
//! operation rebuilds it from live element geometry.

use super::{Element, ElementId, Point, Rect};

/// Row/column structure of a detected grid.
#[derive(Debug, Clone)]
pub enum GridBody {
    /// Free elements clustered into rows (ragged rows allowed).
    Rows(Vec<Vec<Element>>),
    /// A native table: structure only, no per-element list.
    Table {
        id: ElementId,
        rows: usize,
        cols: usize,
    },
}

/// A detected grid: anchor plus row/column structure.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Position of the first element (top-left of the grid).
    pub anchor: Point,
    body: GridBody,
}

/// One (row, col) slot of a grid with its bounding rectangle.
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
}

impl Cell {
    /// Center point of the cell rectangle.
    pub fn center(&self) -> Point {
        self.rect.center()
    }
}

impl Grid {
    /// Build a grid from detected rows. Rows must already be sorted by
    /// ascending top and each row by ascending left.
    pub fn from_rows(rows: Vec<Vec<Element>>) -> Self {
        let anchor = rows
            .first()
            .and_then(|r| r.first())
            .map(|el| el.frame.origin())
            .unwrap_or_default();
        Self {
            anchor,
            body: GridBody::Rows(rows),
        }
    }

    /// Build a grid from a native table's structure.
    pub fn from_table(id: ElementId, anchor: Point, rows: usize, cols: usize) -> Self {
        Self {
            anchor,
            body: GridBody::Table { id, rows, cols },
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        match &self.body {
            GridBody::Rows(rows) => rows.len(),
            GridBody::Table { rows, .. } => *rows,
        }
    }

    /// Number of columns: the longest row for free grids.
    pub fn col_count(&self) -> usize {
        match &self.body {
            GridBody::Rows(rows) => rows.iter().map(Vec::len).max().unwrap_or(0),
            GridBody::Table { cols, .. } => *cols,
        }
    }

    /// The element rows, if this is a free-element grid.
    pub fn rows(&self) -> Option<&[Vec<Element>]> {
        match &self.body {
            GridBody::Rows(rows) => Some(rows),
            GridBody::Table { .. } => None,
        }
    }

    /// The native table behind this grid, if any.
    pub fn table(&self) -> Option<(ElementId, usize, usize)> {
        match &self.body {
            GridBody::Rows(_) => None,
            GridBody::Table { id, rows, cols } => Some((*id, *rows, *cols)),
        }
    }

    /// The element at (row, col). None for table grids and ragged gaps.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Element> {
        self.rows()?.get(row)?.get(col)
    }

    /// Bounding rectangle of the cell at (row, col).
    pub fn cell_rect(&self, row: usize, col: usize) -> Option<Rect> {
        self.cell(row, col).map(|el| el.frame)
    }

    /// Iterate present cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows()
            .unwrap_or(&[])
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter().enumerate().map(move |(c, el)| Cell {
                    row: r,
                    col: c,
                    rect: el.frame,
                })
            })
    }

    /// Every element of a free grid in row-major order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.rows().unwrap_or(&[]).iter().flatten()
    }

    /// Horizontal extent (min left, max right) across all elements.
    pub fn extent_x(&self) -> (f32, f32) {
        let mut min_left = f32::MAX;
        let mut max_right = f32::MIN;
        for el in self.elements() {
            min_left = min_left.min(el.frame.left);
            max_right = max_right.max(el.frame.right());
        }
        if min_left > max_right {
            (self.anchor.x, self.anchor.x)
        } else {
            (min_left, max_right)
        }
    }

    /// Smallest top edge of row `row`.
    pub fn row_top(&self, row: usize) -> Option<f32> {
        let r = self.rows()?.get(row)?;
        r.iter().map(|el| el.frame.top).reduce(f32::min)
    }

    /// Largest bottom edge of row `row`.
    pub fn row_bottom(&self, row: usize) -> Option<f32> {
        let r = self.rows()?.get(row)?;
        r.iter().map(|el| el.frame.bottom()).reduce(f32::max)
    }

    /// Tallest element height in row `row` (0 for empty/absent rows).
    pub fn row_height(&self, row: usize) -> f32 {
        self.rows()
            .and_then(|rows| rows.get(row))
            .map(|r| r.iter().map(|el| el.frame.height).fold(0.0, f32::max))
            .unwrap_or(0.0)
    }

    /// Per-row tallest element heights.
    pub fn row_heights(&self) -> Vec<f32> {
        (0..self.row_count()).map(|r| self.row_height(r)).collect()
    }

    /// Average element width in column `col` (0 when the column is empty).
    pub fn column_average_width(&self, col: usize) -> f32 {
        let mut sum = 0.0;
        let mut n = 0usize;
        for row in self.rows().unwrap_or(&[]) {
            if let Some(el) = row.get(col) {
                sum += el.frame.width;
                n += 1;
            }
        }
        if n == 0 {
            0.0
        } else {
            sum / n as f32
        }
    }

    /// Per-column average element widths.
    pub fn column_average_widths(&self) -> Vec<f32> {
        (0..self.col_count())
            .map(|c| self.column_average_width(c))
            .collect()
    }

    /// The bottom-most element present in column `col`.
    pub fn column_last_element(&self, col: usize) -> Option<&Element> {
        self.rows()?
            .iter()
            .rev()
            .find_map(|row| row.get(col))
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
    use super::super::{ElementKind, FontSpec};
    use super::*;

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

    fn two_by_two() -> Grid {
        Grid::from_rows(vec![
            vec![shape(1, 0.0, 0.0, 100.0, 40.0), shape(2, 110.0, 0.0, 100.0, 40.0)],
            vec![shape(3, 0.0, 50.0, 100.0, 40.0), shape(4, 110.0, 50.0, 100.0, 40.0)],
        ])
    }

    #[test]
    fn test_counts_and_anchor() {
        let grid = two_by_two();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.col_count(), 2);
        assert_eq!(grid.anchor, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_ragged_col_count_is_longest_row() {
        let grid = Grid::from_rows(vec![
            vec![shape(1, 0.0, 0.0, 50.0, 20.0)],
            vec![
                shape(2, 0.0, 30.0, 50.0, 20.0),
                shape(3, 60.0, 30.0, 50.0, 20.0),
                shape(4, 120.0, 30.0, 50.0, 20.0),
            ],
        ]);
        assert_eq!(grid.col_count(), 3);
        assert!(grid.cell(0, 1).is_none());
        assert!(grid.cell(1, 2).is_some());
    }

    #[test]
    fn test_cells_row_major() {
        let grid = two_by_two();
        let coords: Vec<(usize, usize)> = grid.cells().map(|c| (c.row, c.col)).collect();
        assert_eq!(coords, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_extent_and_row_edges() {
        let grid = two_by_two();
        assert_eq!(grid.extent_x(), (0.0, 210.0));
        assert_eq!(grid.row_bottom(0), Some(40.0));
        assert_eq!(grid.row_top(1), Some(50.0));
    }

    #[test]
    fn test_column_average_width() {
        let grid = two_by_two();
        assert_eq!(grid.column_average_width(0), 100.0);
        assert_eq!(grid.column_average_width(9), 0.0);
    }

    #[test]
    fn test_table_grid_has_no_cells() {
        let grid = Grid::from_table(ElementId(7), Point::new(5.0, 5.0), 3, 4);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.col_count(), 4);
        assert!(grid.rows().is_none());
        assert!(grid.cell_rect(0, 0).is_none());
        assert_eq!(grid.table(), Some((ElementId(7), 3, 4)));
    }
}
