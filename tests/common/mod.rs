//! Shared in-memory host for integration tests.
//!
//! `MockHost` implements the `Container` trait over a plain element
//! vector (paint order, back-most first) plus a native-table model, and
//! can simulate per-element failures and a vanished container.
#![allow(dead_code)]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::collections::{HashMap, HashSet};

use gridflow::host::Container;
use gridflow::types::{
    Element, ElementId, ElementKind, FontSpec, Point, Rect, SeparatorStyle,
};
use gridflow::{GridError, Result};

/// Initialize test logging once; safe to call from every test.
pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Native-table state behind a table element.
#[derive(Debug, Clone, Default)]
pub struct MockTable {
    pub row_heights: Vec<f32>,
    pub col_widths: Vec<f32>,
    pub cells: Vec<Vec<String>>,
    /// `format_from` arguments recorded from append calls.
    pub format_copies: Vec<usize>,
}

/// In-memory document container.
#[derive(Debug, Default)]
pub struct MockHost {
    next_id: u64,
    /// Elements in paint order, back-most first.
    pub elements: Vec<Element>,
    pub line_styles: HashMap<ElementId, SeparatorStyle>,
    pub tables: HashMap<ElementId, MockTable>,
    /// Ids whose mutations fail with ElementMutationFailed.
    pub fail_ids: HashSet<ElementId>,
    /// Template ids recorded from create_shape_like calls.
    pub shape_templates: Vec<ElementId>,
    /// When set, every call fails fatally.
    pub unavailable: bool,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id(&mut self) -> ElementId {
        self.next_id += 1;
        ElementId(self.next_id)
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            Err(GridError::ContainerUnavailable("view closed".to_string()))
        } else {
            Ok(())
        }
    }

    fn check_mutable(&self, id: ElementId) -> Result<()> {
        self.check_available()?;
        if self.fail_ids.contains(&id) {
            Err(GridError::ElementMutationFailed(format!(
                "induced failure for {id:?}"
            )))
        } else {
            Ok(())
        }
    }

    pub fn add_shape(&mut self, left: f32, top: f32, width: f32, height: f32) -> ElementId {
        let id = self.fresh_id();
        self.elements.push(Element {
            id,
            name: format!("Shape {}", id.0),
            frame: Rect::new(left, top, width, height),
            text: None,
            font: FontSpec::default(),
            rotation: 0.0,
            kind: ElementKind::Shape,
        });
        id
    }

    pub fn add_text_shape(
        &mut self,
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        text: &str,
    ) -> ElementId {
        let id = self.add_shape(left, top, width, height);
        self.set_element_text(id, text);
        id
    }

    pub fn add_table(&mut self, left: f32, top: f32, table: MockTable) -> ElementId {
        let id = self.fresh_id();
        let width: f32 = table.col_widths.iter().sum();
        let height: f32 = table.row_heights.iter().sum();
        self.elements.push(Element {
            id,
            name: format!("Table {}", id.0),
            frame: Rect::new(left, top, width, height),
            text: None,
            font: FontSpec::default(),
            rotation: 0.0,
            kind: ElementKind::Table {
                rows: table.row_heights.len(),
                cols: table.col_widths.len(),
            },
        });
        self.tables.insert(id, table);
        id
    }

    pub fn element(&self, id: ElementId) -> &Element {
        self.elements
            .iter()
            .find(|el| el.id == id)
            .expect("element exists")
    }

    pub fn table(&self, id: ElementId) -> &MockTable {
        self.tables.get(&id).expect("table exists")
    }

    fn set_element_text(&mut self, id: ElementId, text: &str) {
        if let Some(el) = self.elements.iter_mut().find(|el| el.id == id) {
            el.text = Some(text.to_string());
        }
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element> {
        self.elements
            .iter_mut()
            .find(|el| el.id == id)
            .ok_or_else(|| GridError::ElementMutationFailed(format!("{id:?} not found")))
    }

    fn table_mut(&mut self, id: ElementId) -> Result<&mut MockTable> {
        self.tables
            .get_mut(&id)
            .ok_or_else(|| GridError::ElementMutationFailed(format!("{id:?} is not a table")))
    }

    /// Paint-order index of an element, front-most last.
    pub fn z_index(&self, id: ElementId) -> usize {
        self.elements
            .iter()
            .position(|el| el.id == id)
            .expect("element exists")
    }
}

impl Container for MockHost {
    fn elements(&self) -> Result<Vec<Element>> {
        self.check_available()?;
        Ok(self.elements.clone())
    }

    fn create_line(
        &mut self,
        start: Point,
        end: Point,
        name: &str,
        style: &SeparatorStyle,
    ) -> Result<ElementId> {
        self.check_available()?;
        let id = self.fresh_id();
        self.elements.push(Element {
            id,
            name: name.to_string(),
            frame: Rect::new(
                start.x.min(end.x),
                start.y.min(end.y),
                (end.x - start.x).abs(),
                (end.y - start.y).abs(),
            ),
            text: None,
            font: FontSpec::default(),
            rotation: 0.0,
            kind: ElementKind::Line,
        });
        self.line_styles.insert(id, style.clone());
        Ok(id)
    }

    fn create_shape_like(&mut self, template: ElementId, frame: Rect) -> Result<ElementId> {
        self.check_mutable(template)?;
        let source = self.element_mut(template)?.clone();
        self.shape_templates.push(template);
        let id = self.fresh_id();
        self.elements.push(Element {
            id,
            name: format!("Shape {}", id.0),
            frame,
            text: None,
            font: source.font,
            rotation: 0.0,
            kind: ElementKind::Shape,
        });
        Ok(id)
    }

    fn delete_element(&mut self, id: ElementId) -> Result<()> {
        self.check_mutable(id)?;
        let before = self.elements.len();
        self.elements.retain(|el| el.id != id);
        if self.elements.len() == before {
            return Err(GridError::ElementMutationFailed(format!(
                "{id:?} not found"
            )));
        }
        self.line_styles.remove(&id);
        Ok(())
    }

    fn set_frame(&mut self, id: ElementId, frame: Rect) -> Result<()> {
        self.check_mutable(id)?;
        self.element_mut(id)?.frame = frame;
        Ok(())
    }

    fn set_text(&mut self, id: ElementId, text: &str) -> Result<()> {
        self.check_mutable(id)?;
        self.element_mut(id)?.text = Some(text.to_string());
        Ok(())
    }

    fn bring_to_front(&mut self, id: ElementId) -> Result<()> {
        self.check_mutable(id)?;
        let pos = self
            .elements
            .iter()
            .position(|el| el.id == id)
            .ok_or_else(|| GridError::ElementMutationFailed(format!("{id:?} not found")))?;
        let el = self.elements.remove(pos);
        self.elements.push(el);
        Ok(())
    }

    fn line_style(&self, id: ElementId) -> Option<SeparatorStyle> {
        self.line_styles.get(&id).cloned()
    }

    fn table_row_height(&self, table: ElementId, row: usize) -> Result<f32> {
        self.check_available()?;
        let t = self
            .tables
            .get(&table)
            .ok_or_else(|| GridError::ElementMutationFailed(format!("{table:?} is not a table")))?;
        t.row_heights.get(row).copied().ok_or_else(|| {
            GridError::ElementMutationFailed(format!("row {row} out of range"))
        })
    }

    fn table_col_width(&self, table: ElementId, col: usize) -> Result<f32> {
        self.check_available()?;
        let t = self
            .tables
            .get(&table)
            .ok_or_else(|| GridError::ElementMutationFailed(format!("{table:?} is not a table")))?;
        t.col_widths.get(col).copied().ok_or_else(|| {
            GridError::ElementMutationFailed(format!("col {col} out of range"))
        })
    }

    fn append_table_row(&mut self, table: ElementId, height: f32, format_from: usize) -> Result<()> {
        self.check_mutable(table)?;
        {
            let t = self.table_mut(table)?;
            t.row_heights.push(height);
            t.format_copies.push(format_from);
            let cols = t.col_widths.len();
            t.cells.push(vec![String::new(); cols]);
        }
        let el = self.element_mut(table)?;
        el.frame.height += height;
        if let ElementKind::Table { rows, .. } = &mut el.kind {
            *rows += 1;
        }
        Ok(())
    }

    fn append_table_col(&mut self, table: ElementId, width: f32, format_from: usize) -> Result<()> {
        self.check_mutable(table)?;
        {
            let t = self.table_mut(table)?;
            t.col_widths.push(width);
            t.format_copies.push(format_from);
            for row in &mut t.cells {
                row.push(String::new());
            }
        }
        let el = self.element_mut(table)?;
        el.frame.width += width;
        if let ElementKind::Table { cols, .. } = &mut el.kind {
            *cols += 1;
        }
        Ok(())
    }

    fn set_table_row_height(&mut self, table: ElementId, row: usize, height: f32) -> Result<()> {
        self.check_mutable(table)?;
        let t = self.table_mut(table)?;
        let slot = t.row_heights.get_mut(row).ok_or_else(|| {
            GridError::ElementMutationFailed(format!("row {row} out of range"))
        })?;
        *slot = height;
        Ok(())
    }

    fn set_table_col_width(&mut self, table: ElementId, col: usize, width: f32) -> Result<()> {
        self.check_mutable(table)?;
        let t = self.table_mut(table)?;
        let slot = t.col_widths.get_mut(col).ok_or_else(|| {
            GridError::ElementMutationFailed(format!("col {col} out of range"))
        })?;
        *slot = width;
        Ok(())
    }

    fn set_table_cell_text(
        &mut self,
        table: ElementId,
        row: usize,
        col: usize,
        text: &str,
    ) -> Result<()> {
        self.check_mutable(table)?;
        let t = self.table_mut(table)?;
        let cell = t
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or_else(|| {
                GridError::ElementMutationFailed(format!("cell ({row}, {col}) out of range"))
            })?;
        *cell = text.to_string();
        Ok(())
    }
}

/// A grid-of-shapes builder: `rows` x `cols` of `width` x `height`
/// shapes spaced `gap` apart, anchored at (0, 0).
pub fn build_grid(
    host: &mut MockHost,
    rows: usize,
    cols: usize,
    width: f32,
    height: f32,
    gap: f32,
) -> Vec<ElementId> {
    let mut ids = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            ids.push(host.add_shape(
                c as f32 * (width + gap),
                r as f32 * (height + gap),
                width,
                height,
            ));
        }
    }
    ids
}

/// A MockTable with the given row heights and column widths, cells
/// initialized empty.
pub fn make_table(row_heights: &[f32], col_widths: &[f32]) -> MockTable {
    MockTable {
        row_heights: row_heights.to_vec(),
        col_widths: col_widths.to_vec(),
        cells: vec![vec![String::new(); col_widths.len()]; row_heights.len()],
        format_copies: Vec::new(),
    }
}
