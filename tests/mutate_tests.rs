//! Structure mutation tests: trailing row/column insertion for free
//! grids and native tables, and the separator realign post-condition.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{build_grid, make_table, MockHost};
use gridflow::host::Container;
use gridflow::types::{ElementKind, SeparatorStyle};
use gridflow::{detect, mutate, separator};

#[test]
fn add_row_to_free_grid_extends_each_column() {
    let mut host = MockHost::new();
    build_grid(&mut host, 2, 3, 100.0, 40.0, 10.0);
    let before = host.elements.len();

    let selection = host.elements().unwrap();
    let grid = detect::detect_grid(&selection).unwrap();
    let outcome = mutate::add_row(&mut host, &grid).unwrap();
    assert!(outcome.is_complete());
    assert_eq!(outcome.applied, 3);
    assert_eq!(host.elements.len(), before + 3);

    // New row sits one average row-gap below the old last row
    let regrid = detect::detect_grid(&host.elements().unwrap()).unwrap();
    assert_eq!(regrid.row_count(), 3);
    assert_eq!(regrid.row_top(2), Some(100.0));
    assert_eq!(regrid.row_height(2), 40.0);
    // Columns keep their x positions and average widths
    for col in 0..3 {
        let new_el = regrid.cell(2, col).unwrap();
        let old_el = regrid.cell(1, col).unwrap();
        assert_eq!(new_el.frame.left, old_el.frame.left);
        assert_eq!(new_el.frame.width, 100.0);
    }
    // Format copied from the nearest element in the same column
    assert_eq!(host.shape_templates.len(), 3);
}

#[test]
fn add_row_to_table_copies_trailing_row() {
    let mut host = MockHost::new();
    let table = host.add_table(0.0, 0.0, make_table(&[30.0, 45.0], &[60.0, 60.0]));

    let selection = host.elements().unwrap();
    let grid = detect::detect_table_grid(&selection[0]).unwrap();
    mutate::add_row(&mut host, &grid).unwrap();

    let t = host.table(table);
    assert_eq!(t.row_heights, vec![30.0, 45.0, 45.0]);
    assert_eq!(t.format_copies, vec![1]); // row above the new one
    assert_eq!(
        host.element(table).kind,
        ElementKind::Table { rows: 3, cols: 2 }
    );
}

#[test]
fn add_row_to_single_row_table_uses_default_height() {
    let mut host = MockHost::new();
    let table = host.add_table(0.0, 0.0, make_table(&[40.0], &[60.0]));

    let selection = host.elements().unwrap();
    let grid = detect::detect_table_grid(&selection[0]).unwrap();
    mutate::add_row(&mut host, &grid).unwrap();

    assert_eq!(
        host.table(table).row_heights,
        vec![40.0, mutate::DEFAULT_NEW_ROW_HEIGHT]
    );
}

#[test]
fn add_column_reuses_rightmost_width_per_row_geometry() {
    let mut host = MockHost::new();
    // Two rows with different heights/tops
    host.add_shape(0.0, 0.0, 100.0, 40.0);
    host.add_shape(110.0, 0.0, 100.0, 40.0);
    host.add_shape(0.0, 50.0, 100.0, 60.0);
    host.add_shape(110.0, 50.0, 100.0, 60.0);

    let selection = host.elements().unwrap();
    let grid = detect::detect_grid(&selection).unwrap();
    let outcome = mutate::add_column(&mut host, &grid).unwrap();
    assert_eq!(outcome.applied, 2);

    let regrid = detect::detect_grid(&host.elements().unwrap()).unwrap();
    assert_eq!(regrid.col_count(), 3);
    let top_new = regrid.cell(0, 2).unwrap();
    let bottom_new = regrid.cell(1, 2).unwrap();
    // Rightmost column width reused; each row keeps its own top/height
    assert_eq!(top_new.frame.width, 100.0);
    assert_eq!(top_new.frame.left, 220.0);
    assert_eq!(top_new.frame.height, 40.0);
    assert_eq!(bottom_new.frame.height, 60.0);
    assert_eq!(bottom_new.frame.top, 50.0);
}

#[test]
fn add_column_to_table_appends_trailing_column() {
    let mut host = MockHost::new();
    let table = host.add_table(0.0, 0.0, make_table(&[30.0], &[50.0, 70.0]));

    let selection = host.elements().unwrap();
    let grid = detect::detect_table_grid(&selection[0]).unwrap();
    mutate::add_column(&mut host, &grid).unwrap();

    let t = host.table(table);
    assert_eq!(t.col_widths, vec![50.0, 70.0, 70.0]);
    assert_eq!(t.format_copies, vec![1]);
}

#[test]
fn separators_realign_after_add_row() {
    let mut host = MockHost::new();
    build_grid(&mut host, 2, 2, 100.0, 40.0, 10.0);
    separator::apply(&mut host, &SeparatorStyle::default()).unwrap();
    assert_eq!(host.elements.len(), 5); // 4 cells + 1 separator

    let selection = host.elements().unwrap();
    let grid = detect::detect_grid(&selection).unwrap();
    mutate::add_row(&mut host, &grid).unwrap();

    // Post-condition: realign after structural mutation
    let count = separator::realign(&mut host, &SeparatorStyle::default()).unwrap();
    let regrid = detect::detect_grid(&host.elements().unwrap()).unwrap();
    assert_eq!(count, regrid.row_count() - 1);
    assert_eq!(count, 2);
}
