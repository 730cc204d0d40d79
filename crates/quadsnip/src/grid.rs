// Author: Dustin Pilgrim
// License: MIT
//
// Guide grid over a completed selection: the 4 points define two pairs of
// opposing edges, (p0,p1)-(p3,p2) and (p0,p3)-(p1,p2). Each pair is bisected
// recursively, connecting the edge midpoints, which suggests perspective over
// an arbitrary quadrilateral without any projective mapping.

use quadsnip_core::Point;

use crate::surface::Surface;

/// Minimum Chebyshev gap between an edge endpoint and its midpoint before a
/// branch stops subdividing.
pub const DEFAULT_MIN_GAP: f32 = 80.0;

const GRID_STROKE_WIDTH: f32 = 1.0;

/// Compute the grid segments for a quadrilateral. Pure; rendering happens in
/// [`draw_grid`].
pub fn subdivide(points: &[Point; 4], min_gap: f32) -> Vec<(Point, Point)> {
    let mut segments = Vec::new();

    // Horizontal pair: top edge against bottom edge.
    bisect(points[0], points[1], points[3], points[2], min_gap, &mut segments);
    // Vertical pair: left edge against right edge.
    bisect(points[0], points[3], points[1], points[2], min_gap, &mut segments);

    segments
}

/// One bisection step over a pair of opposing edges (a1,a2) and (b1,b2):
/// connect the midpoints, then recurse into each half while both edges of
/// that half retain more than `min_gap` to their midpoint. The gap check is
/// a single unified distance (larger axis), so subdivision continues along
/// whichever axis still has room; each branch terminates independently.
fn bisect(
    a1: Point,
    a2: Point,
    b1: Point,
    b2: Point,
    min_gap: f32,
    segments: &mut Vec<(Point, Point)>,
) {
    let ma = a1.midpoint(a2);
    let mb = b1.midpoint(b2);
    segments.push((ma, mb));

    if a1.gap(ma) > min_gap && b1.gap(mb) > min_gap {
        bisect(a1, ma, b1, mb, min_gap, segments);
    }
    if a2.gap(ma) > min_gap && b2.gap(mb) > min_gap {
        bisect(a2, ma, b2, mb, min_gap, segments);
    }
}

/// Stroke the subdivision grid onto the surface.
pub fn draw_grid(surface: &mut Surface, points: &[Point; 4], min_gap: f32, argb: u32) {
    for (a, b) in subdivide(points, min_gap) {
        surface.stroke_segment(a, b, GRID_STROKE_WIDTH, argb);
    }
}
