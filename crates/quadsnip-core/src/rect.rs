// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::point::Point;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Axis-aligned bounding box of a point set, floor(min)/ceil(max).
    /// Derived on demand; never stored alongside the points.
    ///
    /// Returns `None` for an empty slice.
    pub fn bounding(points: &[Point]) -> Option<Rect> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);

        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        let x = min_x.floor() as i32;
        let y = min_y.floor() as i32;
        Some(Rect {
            x,
            y,
            w: max_x.ceil() as i32 - x,
            h: max_y.ceil() as i32 - y,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && py >= self.y && px < (self.x + self.w) && py < (self.y + self.h)
    }

    /// Intersection with another rect, clamped; `None` when disjoint.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.w).min(other.x + other.w);
        let y1 = (self.y + self.h).min(other.y + other.h);

        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some(Rect {
            x: x0,
            y: y0,
            w: x1 - x0,
            h: y1 - y0,
        })
    }
}
