use serde::{Deserialize, Serialize};

use super::Rect;

/// Host-opaque element identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u64);

/// What kind of element the host reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    /// A free rectangular shape (text box, picture, plain shape).
    Shape,
    /// A drawn line. Lines never participate in grid detection.
    Line,
    /// A native table with its own row/column structure.
    Table { rows: usize, cols: usize },
}

/// Font descriptor for text measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    /// Font family name (e.g. "Arial").
    pub family: String,
    /// Font size in points.
    pub size: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Arial".to_string(),
            size: 12.0,
        }
    }
}

/// A rectangular element descriptor supplied by the host.
///
/// This is a snapshot: the engine rederives grid structure from element
/// geometry on every operation and never holds on to these across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    /// Host-visible name. The only metadata channel the host exposes for
    /// tagging; separator identity lives entirely in here.
    pub name: String,
    /// Position and size in document coordinates.
    pub frame: Rect,
    /// Text content, if the element carries any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub font: FontSpec,
    /// Rotation in degrees. Rotated elements still cluster by their
    /// unrotated frame.
    pub rotation: f32,
    pub kind: ElementKind,
}

impl Element {
    /// Whether the element carries non-empty text.
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Whether this is a native table element.
    pub fn is_table(&self) -> bool {
        matches!(self.kind, ElementKind::Table { .. })
    }

    /// Whether this is a drawn line.
    pub fn is_line(&self) -> bool {
        self.kind == ElementKind::Line
    }
}
