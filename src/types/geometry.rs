use serde::{Deserialize, Serialize};

/// A point in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle (left/top origin).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    /// X position (left edge)
    pub left: f32,
    /// Y position (top edge)
    pub top: f32,
    /// Width of the rectangle
    pub width: f32,
    /// Height of the rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// X of the right edge.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Y of the bottom edge.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }

    /// Whether a point lies inside the rectangle (edges inclusive).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    /// A copy of this rectangle centered on `c`, keeping its size.
    pub fn centered_on(&self, c: Point) -> Rect {
        Rect::new(
            c.x - self.width / 2.0,
            c.y - self.height / 2.0,
            self.width,
            self.height,
        )
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

/// Layout axis, used for spacing inference and column-oriented detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}
