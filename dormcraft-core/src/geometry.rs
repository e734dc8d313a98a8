//! Axis-aligned rectangles in room coordinates (feet, origin at the
//! lower-left corner of the room).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Rectangle with its lower-left corner at `(x, y)`.
    pub fn from_origin(x: f64, y: f64, width: f64, depth: f64) -> Self {
        Self::new(x, y, x + width, y + depth)
    }

    /// True if the interiors overlap.
    /// Touching (shared edge or corner) is NOT counted as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x_max > other.x_min
            && self.x_min < other.x_max
            && self.y_max > other.y_min
            && self.y_min < other.y_max
    }

    /// True if `inner` lies within (or on the edges of) `self`.
    ///
    /// NaN coordinates are never contained.
    pub fn contains(&self, inner: &Rect) -> bool {
        inner.x_min >= self.x_min
            && inner.y_min >= self.y_min
            && inner.x_max <= self.x_max
            && inner.y_max <= self.y_max
    }
}
