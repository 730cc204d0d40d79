// Author: Dustin Pilgrim
// License: MIT
//
// Two-press axis-aligned rectangle picking. Emits the same 4-point contract
// as the quadrilateral engine so downstream consumers are mode-agnostic.

use quadsnip_core::Point;

use super::{EngineEvent, PointerEvent, PATH_STROKE_WIDTH};
use crate::grid;
use crate::surface::Surface;

pub struct BoxEngine {
    anchor: Option<Point>,
    stroke_argb: u32,
    grid_min_gap: f32,
}

impl BoxEngine {
    pub fn new(stroke_argb: u32, grid_min_gap: f32) -> Self {
        Self {
            anchor: None,
            stroke_argb,
            grid_min_gap,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Advance the state machine by one pointer event.
    ///
    /// - idle, press: record the anchor, emit `SelectionStarted`.
    /// - dragging, motion: repaint the live rectangle between anchor and
    ///   cursor (the surface is non-retained between moves).
    /// - dragging, press: normalize the corners, stroke the final
    ///   rectangle, overlay the guide grid, emit `RegionSelected`, reset.
    pub fn handle_event<F>(&mut self, surface: &mut Surface, event: PointerEvent, mut emit: F)
    where
        F: FnMut(EngineEvent),
    {
        match event {
            PointerEvent::Press { x, y } => {
                let p = Point::new(x, y);

                let Some(anchor) = self.anchor else {
                    self.anchor = Some(p);
                    surface.clear();
                    emit(EngineEvent::SelectionStarted);
                    return;
                };

                let points = corner_points(anchor, p);

                surface.clear();
                surface.stroke_polyline(&points, true, PATH_STROKE_WIDTH, self.stroke_argb);
                grid::draw_grid(surface, &points, self.grid_min_gap, self.stroke_argb);

                emit(EngineEvent::RegionSelected { points });
                self.anchor = None;
            }

            PointerEvent::Motion { x, y } => {
                let Some(anchor) = self.anchor else {
                    return;
                };

                surface.clear();
                surface.stroke_rect(
                    anchor,
                    x - anchor.x,
                    y - anchor.y,
                    PATH_STROKE_WIDTH,
                    self.stroke_argb,
                );
            }

            PointerEvent::Release { .. } => {}
        }
    }

    /// Drop the live rectangle and reset to idle without completing.
    /// Idempotent; `Cancelled` only fires when a drag was in progress.
    pub fn cancel<F>(&mut self, surface: &mut Surface, mut emit: F)
    where
        F: FnMut(EngineEvent),
    {
        let was_live = self.anchor.is_some();

        surface.clear();
        self.anchor = None;

        if was_live {
            emit(EngineEvent::Cancelled);
        }
    }
}

/// Corner list for an anchor/release pair, always expressed from the
/// top-left corner clockwise (top-left, top-right, bottom-right,
/// bottom-left) regardless of drag direction.
fn corner_points(anchor: Point, release: Point) -> [Point; 4] {
    let x1 = anchor.x.min(release.x);
    let y1 = anchor.y.min(release.y);
    let x2 = anchor.x.max(release.x);
    let y2 = anchor.y.max(release.y);

    [
        Point::new(x1, y1),
        Point::new(x2, y1),
        Point::new(x2, y2),
        Point::new(x1, y2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DEFAULT_MIN_GAP;

    const RED: u32 = 0xFFFF_0000;

    fn drag(e: &mut BoxEngine, surface: &mut Surface, from: (f32, f32), to: (f32, f32)) -> Option<[Point; 4]> {
        let mut selected = None;
        e.handle_event(surface, PointerEvent::Press { x: from.0, y: from.1 }, |_| {});
        e.handle_event(surface, PointerEvent::Motion { x: to.0, y: to.1 }, |_| {});
        e.handle_event(surface, PointerEvent::Press { x: to.0, y: to.1 }, |ev| {
            if let EngineEvent::RegionSelected { points } = ev {
                selected = Some(points);
            }
        });
        selected
    }

    #[test]
    fn corners_are_direction_independent() {
        let mut surface = Surface::new(100, 100).unwrap();
        let mut e = BoxEngine::new(RED, DEFAULT_MIN_GAP);

        let forward = drag(&mut e, &mut surface, (10.0, 10.0), (50.0, 50.0)).unwrap();
        let backward = drag(&mut e, &mut surface, (50.0, 50.0), (10.0, 10.0)).unwrap();

        assert_eq!(forward, backward);
        assert_eq!(
            forward,
            [
                Point::new(10.0, 10.0),
                Point::new(50.0, 10.0),
                Point::new(50.0, 50.0),
                Point::new(10.0, 50.0),
            ]
        );
    }

    #[test]
    fn cross_diagonal_drags_normalize_too() {
        let mut surface = Surface::new(100, 100).unwrap();
        let mut e = BoxEngine::new(RED, DEFAULT_MIN_GAP);

        // Anchor top-right, release bottom-left.
        let points = drag(&mut e, &mut surface, (50.0, 10.0), (10.0, 50.0)).unwrap();
        assert_eq!(points[0], Point::new(10.0, 10.0));
        assert_eq!(points[2], Point::new(50.0, 50.0));
    }

    #[test]
    fn first_press_emits_started_and_arms_the_drag() {
        let mut surface = Surface::new(100, 100).unwrap();
        let mut e = BoxEngine::new(RED, DEFAULT_MIN_GAP);
        let mut events = Vec::new();

        e.handle_event(&mut surface, PointerEvent::Press { x: 5.0, y: 5.0 }, |ev| {
            events.push(ev)
        });

        assert_eq!(events, vec![EngineEvent::SelectionStarted]);
        assert!(e.is_dragging());
    }

    #[test]
    fn cancel_drops_the_live_rectangle_without_callbacks() {
        let mut surface = Surface::new(100, 100).unwrap();
        let mut e = BoxEngine::new(RED, DEFAULT_MIN_GAP);

        e.handle_event(&mut surface, PointerEvent::Press { x: 5.0, y: 5.0 }, |_| {});
        e.handle_event(&mut surface, PointerEvent::Motion { x: 40.0, y: 40.0 }, |_| {});
        assert!(!surface.is_blank());

        let mut events = Vec::new();
        e.cancel(&mut surface, |ev| events.push(ev));

        assert_eq!(events, vec![EngineEvent::Cancelled]);
        assert!(!e.is_dragging());
        assert!(surface.is_blank());

        // Idempotent once idle.
        e.cancel(&mut surface, |_| panic!("no event while idle"));
    }

    #[test]
    fn completion_resets_for_the_next_gesture() {
        let mut surface = Surface::new(100, 100).unwrap();
        let mut e = BoxEngine::new(RED, DEFAULT_MIN_GAP);

        assert!(drag(&mut e, &mut surface, (10.0, 10.0), (30.0, 30.0)).is_some());
        assert!(!e.is_dragging());
        assert!(drag(&mut e, &mut surface, (20.0, 20.0), (60.0, 60.0)).is_some());
    }
}
