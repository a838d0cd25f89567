//! Separator lifecycle tests: creation, realign (move vs recreate),
//! style sampling, and idempotent deletion.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{build_grid, MockHost};
use gridflow::host::Container;
use gridflow::separator::{self, is_separator, parse_separator_index, separator_name};
use gridflow::types::{DashStyle, ElementId, SeparatorStyle};

fn separators(host: &MockHost) -> Vec<gridflow::types::Element> {
    let mut seps: Vec<_> = host
        .elements
        .iter()
        .filter(|el| is_separator(el))
        .cloned()
        .collect();
    seps.sort_by_key(|el| parse_separator_index(&el.name));
    seps
}

#[test]
fn apply_creates_one_separator_per_boundary() {
    let mut host = MockHost::new();
    build_grid(&mut host, 3, 2, 100.0, 40.0, 10.0);

    let created = separator::apply(&mut host, &SeparatorStyle::default()).unwrap();
    assert_eq!(created, 2);

    let seps = separators(&host);
    assert_eq!(seps.len(), 2);
    assert_eq!(seps[0].name, separator_name(0));
    assert_eq!(seps[1].name, separator_name(1));
    // Between rows 0 (bottom 40) and 1 (top 50): midpoint 45
    assert_eq!(seps[0].frame.top, 45.0);
    assert_eq!(seps[0].frame.height, 0.0);
    // Spans the grid's horizontal extent
    assert_eq!(seps[0].frame.left, 0.0);
    assert_eq!(seps[0].frame.width, 210.0);
}

#[test]
fn realign_without_separators_is_a_no_op() {
    let mut host = MockHost::new();
    build_grid(&mut host, 3, 2, 100.0, 40.0, 10.0);

    let count = separator::realign(&mut host, &SeparatorStyle::default()).unwrap();
    assert_eq!(count, 0);
    assert!(separators(&host).is_empty());
}

#[test]
fn realign_moves_in_place_when_count_is_unchanged() {
    let mut host = MockHost::new();
    let ids = build_grid(&mut host, 2, 2, 100.0, 40.0, 10.0);
    separator::apply(&mut host, &SeparatorStyle::default()).unwrap();
    let original: Vec<ElementId> = separators(&host).iter().map(|el| el.id).collect();

    // Push the second row down, then realign
    for id in &ids[2..] {
        let mut frame = host.element(*id).frame;
        frame.top += 30.0;
        host.set_frame(*id, frame).unwrap();
    }
    let count = separator::realign(&mut host, &SeparatorStyle::default()).unwrap();
    assert_eq!(count, 1);

    let seps = separators(&host);
    // Identity preserved: same element moved, not recreated
    assert_eq!(seps.iter().map(|el| el.id).collect::<Vec<_>>(), original);
    // New midpoint between bottom 40 and top 80
    assert_eq!(seps[0].frame.top, 60.0);
}

#[test]
fn realign_recreates_when_row_count_changes() {
    let mut host = MockHost::new();
    build_grid(&mut host, 2, 2, 100.0, 40.0, 10.0);
    let custom = SeparatorStyle {
        weight: 2.5,
        dash: DashStyle::Dash,
        color: "#FF0000".to_string(),
    };
    separator::apply(&mut host, &custom).unwrap();
    let old_ids: Vec<ElementId> = separators(&host).iter().map(|el| el.id).collect();

    // A third row appears; boundary count 1 -> 2
    host.add_shape(0.0, 100.0, 100.0, 40.0);
    host.add_shape(110.0, 100.0, 100.0, 40.0);

    let count = separator::realign(&mut host, &SeparatorStyle::default()).unwrap();
    assert_eq!(count, 2);

    let seps = separators(&host);
    assert_eq!(seps.len(), 2);
    for sep in &seps {
        assert!(!old_ids.contains(&sep.id));
        // Style sampled from the surviving separator, not the default
        assert_eq!(host.line_style(sep.id), Some(custom.clone()));
    }
}

#[test]
fn realign_count_matches_fresh_grid() {
    let mut host = MockHost::new();
    build_grid(&mut host, 4, 3, 100.0, 40.0, 10.0);
    separator::apply(&mut host, &SeparatorStyle::default()).unwrap();

    let count = separator::realign(&mut host, &SeparatorStyle::default()).unwrap();
    assert_eq!(count, 3);
    assert_eq!(separators(&host).len(), 3);
}

#[test]
fn delete_all_is_idempotent_and_skips_failures() {
    common::init_logs();
    let mut host = MockHost::new();
    build_grid(&mut host, 3, 2, 100.0, 40.0, 10.0);
    separator::apply(&mut host, &SeparatorStyle::default()).unwrap();

    let seps = separators(&host);
    host.fail_ids.insert(seps[0].id);

    let removed = separator::delete_all(&mut host).unwrap();
    assert_eq!(removed, 1); // the failing one is skipped, not fatal
    assert_eq!(separators(&host).len(), 1);

    host.fail_ids.clear();
    assert_eq!(separator::delete_all(&mut host).unwrap(), 1);
    assert_eq!(separator::delete_all(&mut host).unwrap(), 0);
    assert!(separators(&host).is_empty());
}

#[test]
fn separators_do_not_disturb_detection() {
    let mut host = MockHost::new();
    build_grid(&mut host, 2, 2, 100.0, 40.0, 10.0);
    separator::apply(&mut host, &SeparatorStyle::default()).unwrap();

    // Re-running apply over the same geometry yields the same layout
    let created = separator::apply(&mut host, &SeparatorStyle::default()).unwrap();
    assert_eq!(created, 1);
    assert_eq!(separators(&host)[0].frame.top, 45.0);
}
