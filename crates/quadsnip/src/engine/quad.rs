// Author: Dustin Pilgrim
// License: MIT
//
// Four-point quadrilateral picking. The session (in-progress points and the
// drawing flag) lives on the engine instance; rendering treats the surface
// as non-retained and repaints the committed path on every event.

use quadsnip_core::Point;

use super::{EngineEvent, PointerEvent, PATH_STROKE_WIDTH};
use crate::grid;
use crate::surface::Surface;

pub struct QuadEngine {
    points: Vec<Point>,
    drawing: bool,
    stroke_argb: u32,
    grid_min_gap: f32,
}

impl QuadEngine {
    pub fn new(stroke_argb: u32, grid_min_gap: f32) -> Self {
        Self {
            points: Vec::new(),
            drawing: false,
            stroke_argb,
            grid_min_gap,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Advance the state machine by one pointer event.
    ///
    /// - idle, press: record the point, emit `SelectionStarted`.
    /// - drawing, press: append; at 4 points close the loop, overlay the
    ///   guide grid, emit `RegionSelected` and reset to idle.
    /// - drawing, motion: repaint the committed path plus a rubber-band
    ///   segment to the cursor (preview only, not committed).
    ///
    /// Rapid presses before any motion all commit; there is no gesture
    /// timeout. Completion and [`cancel`](Self::cancel) are the only exits.
    pub fn handle_event<F>(&mut self, surface: &mut Surface, event: PointerEvent, mut emit: F)
    where
        F: FnMut(EngineEvent),
    {
        match event {
            PointerEvent::Press { x, y } => {
                if self.points.is_empty() {
                    emit(EngineEvent::SelectionStarted);
                }

                self.points.push(Point::new(x, y));
                self.drawing = true;
                self.redraw_committed(surface);

                if self.points.len() == 4 {
                    let snapshot = [self.points[0], self.points[1], self.points[2], self.points[3]];

                    // Closing segment back to point 0, then the grid.
                    surface.stroke_segment(
                        snapshot[3],
                        snapshot[0],
                        PATH_STROKE_WIDTH,
                        self.stroke_argb,
                    );
                    grid::draw_grid(surface, &snapshot, self.grid_min_gap, self.stroke_argb);

                    emit(EngineEvent::RegionSelected { points: snapshot });

                    self.points.clear();
                    self.drawing = false;
                }
            }

            PointerEvent::Motion { x, y } => {
                if !self.drawing || self.points.is_empty() {
                    return;
                }

                self.redraw_committed(surface);
                let last = self.points[self.points.len() - 1];
                surface.stroke_segment(
                    last,
                    Point::new(x, y),
                    PATH_STROKE_WIDTH,
                    self.stroke_argb,
                );
            }

            PointerEvent::Release { .. } => {}
        }
    }

    /// Cancel the in-progress session: clear the surface, drop all
    /// accumulated points, back to idle. Idempotent; `Cancelled` is only
    /// emitted when a session was actually live.
    pub fn cancel<F>(&mut self, surface: &mut Surface, mut emit: F)
    where
        F: FnMut(EngineEvent),
    {
        let was_live = self.drawing || !self.points.is_empty();

        surface.clear();
        self.points.clear();
        self.drawing = false;

        if was_live {
            emit(EngineEvent::Cancelled);
        }
    }

    fn redraw_committed(&self, surface: &mut Surface) {
        surface.clear();
        surface.stroke_polyline(&self.points, false, PATH_STROKE_WIDTH, self.stroke_argb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DEFAULT_MIN_GAP;

    const RED: u32 = 0xFFFF_0000;

    fn engine() -> QuadEngine {
        QuadEngine::new(RED, DEFAULT_MIN_GAP)
    }

    fn press(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Press { x, y }
    }

    #[test]
    fn first_press_starts_the_session() {
        let mut surface = Surface::new(200, 200).unwrap();
        let mut e = engine();
        let mut events = Vec::new();

        e.handle_event(&mut surface, press(10.0, 10.0), |ev| events.push(ev));

        assert_eq!(events, vec![EngineEvent::SelectionStarted]);
        assert!(e.is_drawing());
        assert_eq!(e.points().len(), 1);
    }

    #[test]
    fn fourth_press_completes_and_resets() {
        let mut surface = Surface::new(200, 200).unwrap();
        let mut e = engine();
        let mut selected = None;

        let corners = [(10.0, 10.0), (110.0, 10.0), (110.0, 60.0), (10.0, 60.0)];
        for (x, y) in corners {
            e.handle_event(&mut surface, press(x, y), |ev| {
                if let EngineEvent::RegionSelected { points } = ev {
                    selected = Some(points);
                }
            });
        }

        let points = selected.expect("selection should complete on the 4th press");
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], Point::new(10.0, 10.0));
        assert_eq!(points[2], Point::new(110.0, 60.0));

        // Session resets immediately after the snapshot is handed out.
        assert!(!e.is_drawing());
        assert!(e.points().is_empty());
        // The closing segment and grid stay visible.
        assert!(!surface.is_blank());
    }

    #[test]
    fn motion_previews_without_committing() {
        let mut surface = Surface::new(200, 200).unwrap();
        let mut e = engine();

        e.handle_event(&mut surface, press(10.0, 10.0), |_| {});
        e.handle_event(&mut surface, PointerEvent::Motion { x: 50.0, y: 50.0 }, |_| {});

        assert_eq!(e.points().len(), 1);
        assert!(!surface.is_blank());
    }

    #[test]
    fn motion_while_idle_is_ignored() {
        let mut surface = Surface::new(200, 200).unwrap();
        let mut e = engine();

        e.handle_event(&mut surface, PointerEvent::Motion { x: 50.0, y: 50.0 }, |_| {});

        assert!(surface.is_blank());
        assert!(!e.is_drawing());
    }

    #[test]
    fn cancel_is_idempotent_from_any_accumulation_state() {
        for committed in 0..=3 {
            let mut surface = Surface::new(200, 200).unwrap();
            let mut e = engine();

            for i in 0..committed {
                e.handle_event(&mut surface, press(10.0 * (i + 1) as f32, 10.0), |_| {});
            }

            let mut cancels = 0;
            e.cancel(&mut surface, |ev| {
                assert_eq!(ev, EngineEvent::Cancelled);
                cancels += 1;
            });
            e.cancel(&mut surface, |_| cancels += 1);
            e.cancel(&mut surface, |_| cancels += 1);

            assert!(cancels <= 1, "cancel must not re-fire once idle");
            assert!(e.points().is_empty());
            assert!(!e.is_drawing());
            assert!(surface.is_blank());
        }
    }

    #[test]
    fn rapid_presses_all_commit() {
        let mut surface = Surface::new(200, 200).unwrap();
        let mut e = engine();

        // No interleaved motion events at all.
        e.handle_event(&mut surface, press(5.0, 5.0), |_| {});
        e.handle_event(&mut surface, press(6.0, 5.0), |_| {});
        e.handle_event(&mut surface, press(6.0, 6.0), |_| {});

        assert_eq!(e.points().len(), 3);
    }
}
