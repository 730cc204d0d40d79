// Author: Dustin Pilgrim
// License: MIT

use crate::point::Point;

/// Render a point list for on-screen diagnostics.
///
/// Empty list formats as `[]`; otherwise each point becomes
/// `[X: <x>, Y: <y>]`, joined with `", "`. Total over any length, not
/// just completed (length 4) selections.
pub fn format_points(points: &[Point]) -> String {
    if points.is_empty() {
        return "[]".to_string();
    }

    points
        .iter()
        .map(|p| format!("[X: {}, Y: {}]", p.x, p.y))
        .collect::<Vec<_>>()
        .join(", ")
}
