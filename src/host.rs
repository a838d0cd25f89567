//! Host seam traits for pluggable document backends.
//!
//! This module defines the `Container` trait that abstracts the host
//! document (element enumeration, creation, deletion, geometry/text
//! writes, native table access), plus the optional `TextMeasurer`
//! collaborator for direct text-bound measurement.
//!
//! The engine assumes exclusive access to the container for the duration
//! of one operation. Any method may fail with
//! [`GridError::ContainerUnavailable`](crate::GridError::ContainerUnavailable)
//! when the underlying view is gone; that is the one fatal condition and
//! aborts the whole operation. Every other failure is treated as a
//! single-element failure: logged, counted, and skipped.

use crate::error::Result;
use crate::types::{Element, ElementId, FontSpec, Point, Rect, SeparatorStyle};

/// The host document holding the elements the engine works on.
pub trait Container {
    /// Snapshot every element in the container, in paint order
    /// (back-most first).
    fn elements(&self) -> Result<Vec<Element>>;

    /// Create a line element from `start` to `end` with the given name
    /// and style. Returns the new element's id.
    fn create_line(
        &mut self,
        start: Point,
        end: Point,
        name: &str,
        style: &SeparatorStyle,
    ) -> Result<ElementId>;

    /// Create a new shape at `frame`, copying fill/border/text formatting
    /// from `template`. Returns the new element's id.
    fn create_shape_like(&mut self, template: ElementId, frame: Rect) -> Result<ElementId>;

    /// Delete an element by reference.
    fn delete_element(&mut self, id: ElementId) -> Result<()>;

    /// Move/resize an element.
    fn set_frame(&mut self, id: ElementId, frame: Rect) -> Result<()>;

    /// Replace an element's text content.
    fn set_text(&mut self, id: ElementId, text: &str) -> Result<()>;

    /// Raise an element to the top of the paint order.
    fn bring_to_front(&mut self, id: ElementId) -> Result<()>;

    /// Read a line element's style, for sampling onto recreated
    /// separators. None when the element is gone or not a line.
    fn line_style(&self, id: ElementId) -> Option<SeparatorStyle>;

    /// Height of one row of a native table.
    fn table_row_height(&self, table: ElementId, row: usize) -> Result<f32>;

    /// Width of one column of a native table.
    fn table_col_width(&self, table: ElementId, col: usize) -> Result<f32>;

    /// Append a trailing row to a native table, `height` tall, copying
    /// fill/border/text formatting from row `format_from` into each new
    /// cell.
    fn append_table_row(&mut self, table: ElementId, height: f32, format_from: usize)
        -> Result<()>;

    /// Append a trailing column to a native table, `width` wide, copying
    /// formatting from column `format_from`.
    fn append_table_col(&mut self, table: ElementId, width: f32, format_from: usize)
        -> Result<()>;

    /// Resize one row of a native table.
    fn set_table_row_height(&mut self, table: ElementId, row: usize, height: f32) -> Result<()>;

    /// Resize one column of a native table.
    fn set_table_col_width(&mut self, table: ElementId, col: usize, width: f32) -> Result<()>;

    /// Write text into one native table cell.
    fn set_table_cell_text(
        &mut self,
        table: ElementId,
        row: usize,
        col: usize,
        text: &str,
    ) -> Result<()>;
}

/// Optional host-side text measurement.
///
/// When the host can measure laid-out text bounds directly, the height
/// estimator prefers that over its quantized line-count fallback.
pub trait TextMeasurer {
    /// Measured height of `text` laid out in `width`, or None when the
    /// host cannot measure this text.
    fn measure_height(&self, text: &str, font: &FontSpec, width: f32) -> Option<f32>;
}

/// A measurer that never measures; forces the estimator fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMeasurer;

impl TextMeasurer for NoMeasurer {
    fn measure_height(&self, _text: &str, _font: &FontSpec, _width: f32) -> Option<f32> {
        None
    }
}
