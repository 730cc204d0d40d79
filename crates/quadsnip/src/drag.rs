// Author: Dustin Pilgrim
// License: MIT
//
// Constrained free-drag for the repositionable handle shown in the default
// (non-selecting) state. Deltas are incremental per move sample, never
// relative to drag start, so a rejected proposal cannot accumulate drift.

/// Cursor affordance the host should show for the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Pointer,
    Grabbing,
}

#[derive(Debug)]
pub struct DragHandle {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    parent_w: i32,
    parent_h: i32,
    last_sample: Option<(i32, i32)>,
}

impl DragHandle {
    pub fn new(w: i32, h: i32, parent_w: i32, parent_h: i32) -> Self {
        Self {
            x: 0,
            y: 0,
            w,
            h,
            parent_w,
            parent_h,
            last_sample: None,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn is_dragging(&self) -> bool {
        self.last_sample.is_some()
    }

    pub fn cursor(&self) -> Cursor {
        if self.is_dragging() {
            Cursor::Grabbing
        } else {
            Cursor::Pointer
        }
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && py >= self.y && px < (self.x + self.w) && py < (self.y + self.h)
    }

    /// Start a drag if the press lands on the handle. Returns whether a
    /// drag began.
    pub fn press(&mut self, px: i32, py: i32) -> bool {
        if !self.contains(px, py) {
            return false;
        }
        self.last_sample = Some((px, py));
        true
    }

    /// Apply one move sample. The proposal is rejected outright (position
    /// kept) when the handle would exit the parent's content box on any
    /// edge; the pointer sample still advances either way.
    pub fn motion(&mut self, px: i32, py: i32) {
        let Some((lx, ly)) = self.last_sample else {
            return;
        };

        let dx = px - lx;
        let dy = py - ly;
        self.last_sample = Some((px, py));

        let nx = self.x + dx;
        let ny = self.y + dy;

        if nx < 0 || ny < 0 || nx + self.w > self.parent_w || ny + self.h > self.parent_h {
            return;
        }

        self.x = nx;
        self.y = ny;
    }

    pub fn release(&mut self) {
        self.last_sample = None;
    }

    /// Resize the bounding parent; used when the host rescales its display
    /// surface. When the handle no longer fits it is re-homed to (0,0).
    pub fn set_parent_size(&mut self, parent_w: i32, parent_h: i32) {
        self.parent_w = parent_w;
        self.parent_h = parent_h;

        if self.x + self.w > parent_w || self.y + self.h > parent_h {
            self.x = 0;
            self.y = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> DragHandle {
        DragHandle::new(50, 50, 200, 200)
    }

    #[test]
    fn press_outside_does_not_grab() {
        let mut h = handle();
        assert!(!h.press(100, 100));
        assert!(!h.is_dragging());
        assert_eq!(h.cursor(), Cursor::Pointer);
    }

    #[test]
    fn drag_moves_by_incremental_deltas() {
        let mut h = handle();
        assert!(h.press(10, 10));
        assert_eq!(h.cursor(), Cursor::Grabbing);

        h.motion(30, 25);
        assert_eq!(h.position(), (20, 15));

        h.motion(35, 25);
        assert_eq!(h.position(), (25, 15));

        h.release();
        assert_eq!(h.cursor(), Cursor::Pointer);
        h.motion(100, 100);
        assert_eq!(h.position(), (25, 15), "no movement without a drag");
    }

    #[test]
    fn out_of_bounds_proposals_are_rejected_not_clamped() {
        let mut h = handle();
        h.press(10, 10);

        // One huge jump past the right edge: rejected outright.
        h.motion(500, 10);
        assert_eq!(h.position(), (0, 0));

        // The sample advanced, so dragging back in works from the new
        // cursor position without drift.
        h.motion(460, 10);
        assert_eq!(h.position(), (0, 0), "delta of -40 would go negative");
    }

    #[test]
    fn handle_never_exits_the_parent_content_box() {
        let mut h = handle();
        h.press(10, 10);

        let deltas = [
            (17, -3),
            (-500, 0),
            (0, 911),
            (40, 40),
            (-1, -1),
            (300, -300),
            (5, 5),
        ];

        let (mut cx, mut cy) = (10, 10);
        for (dx, dy) in deltas {
            cx += dx;
            cy += dy;
            h.motion(cx, cy);

            let (x, y) = h.position();
            assert!(x >= 0 && y >= 0);
            assert!(x + 50 <= 200 && y + 50 <= 200);
        }
    }

    #[test]
    fn parent_resize_rehomes_an_out_of_bounds_handle() {
        let mut h = handle();
        h.press(10, 10);
        h.motion(160, 160);
        h.release();
        assert_eq!(h.position(), (150, 150));

        h.set_parent_size(180, 180);
        assert_eq!(h.position(), (0, 0));

        h.set_parent_size(400, 400);
        assert_eq!(h.position(), (0, 0), "re-home only shrinks, never restores");
    }
}
