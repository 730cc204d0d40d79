// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

/// A position in device pixels, relative to the drawing surface's own
/// coordinate space (already offset-corrected). Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Midpoint of the segment between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Chebyshev gap: the larger of the per-axis distances. This is the
    /// unified "room left in either axis" measure the grid subdivision
    /// terminates on.
    pub fn gap(self, other: Point) -> f32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}
