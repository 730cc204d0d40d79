// Author: Dustin Pilgrim
// License: MIT
//
// Host view wiring: one drawing surface, one active engine at a time (or
// none, in which case the drag handle is live), the last completed point
// list, and the confirm/download path. Mode exclusivity is enforced here,
// not in the engines.

use std::path::{Path, PathBuf};

use eventline::debug;
use image::{DynamicImage, GenericImageView};

use quadsnip_core::{format_points, Mode, Point, SnipError};

use crate::drag::DragHandle;
use crate::engine::{BoxEngine, EngineEvent, PointerEvent, QuadEngine};
use crate::extract::{self, ExtractedRegion};
use crate::surface::Surface;

/// The display surface never goes below this edge length, whatever the
/// scale slider says.
pub const MIN_DISPLAY_SIZE: u32 = 512;

const HANDLE_SIZE: i32 = 96;

pub struct SelectArea {
    source: DynamicImage,
    base_w: u32,
    base_h: u32,
    percent: u32,

    surface: Surface,
    mode: Option<Mode>,
    quad: QuadEngine,
    boxsel: BoxEngine,
    handle: DragHandle,

    /// Snapshot of the last completed gesture; cleared on start/cancel.
    points: Vec<Point>,
    /// Inline preview of the last extraction.
    last_extracted: Option<ExtractedRegion>,

    accent_argb: u32,
    grid_min_gap: f32,
    output_dir: PathBuf,
}

impl SelectArea {
    pub fn new(
        source: DynamicImage,
        accent_argb: u32,
        grid_min_gap: f32,
        output_dir: PathBuf,
    ) -> Result<Self, SnipError> {
        let base_w = source.width();
        let base_h = source.height();
        let (w, h) = scaled_dims(base_w, base_h, 100);

        Ok(Self {
            source,
            base_w,
            base_h,
            percent: 100,
            surface: Surface::new(w, h)?,
            mode: None,
            quad: QuadEngine::new(accent_argb, grid_min_gap),
            boxsel: BoxEngine::new(accent_argb, grid_min_gap),
            handle: DragHandle::new(HANDLE_SIZE, HANDLE_SIZE, w as i32, h as i32),
            points: Vec::new(),
            last_extracted: None,
            accent_argb,
            grid_min_gap,
            output_dir,
        })
    }

    pub fn display_size(&self) -> (u32, u32) {
        (self.surface.width(), self.surface.height())
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn scale_percent(&self) -> u32 {
        self.percent
    }

    /// The drag handle only shows in the default (non-selecting) state.
    pub fn handle_visible(&self) -> bool {
        self.mode.is_none()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn last_extracted(&self) -> Option<&ExtractedRegion> {
        self.last_extracted.as_ref()
    }

    /// Switch between the drag-handle default state and a selection mode.
    /// Attaching is mode-exclusive: whatever was active is reset first, so
    /// a surface never has two live engines.
    pub fn set_mode(&mut self, mode: Option<Mode>) {
        if self.mode == mode {
            return;
        }

        self.quad.cancel(&mut self.surface, |_| {});
        self.boxsel.cancel(&mut self.surface, |_| {});
        self.handle.release();
        self.surface.clear();
        self.points.clear();

        self.mode = mode;
        debug!("select-area mode -> {:?}", mode);
    }

    /// Route one pointer event to whatever owns the surface right now.
    pub fn pointer(&mut self, event: PointerEvent) {
        match self.mode {
            Some(Mode::Quad) => {
                let points = &mut self.points;
                self.quad.handle_event(&mut self.surface, event, |ev| {
                    apply_engine_event(points, ev);
                });
            }
            Some(Mode::Box) => {
                let points = &mut self.points;
                self.boxsel.handle_event(&mut self.surface, event, |ev| {
                    apply_engine_event(points, ev);
                });
            }
            None => match event {
                PointerEvent::Press { x, y } => {
                    self.handle.press(x as i32, y as i32);
                }
                PointerEvent::Motion { x, y } => {
                    self.handle.motion(x as i32, y as i32);
                }
                PointerEvent::Release { .. } => {
                    self.handle.release();
                }
            },
        }
    }

    /// Escape: cancel the in-progress gesture of the active engine only.
    /// No-op in the default state and when the engine is already idle.
    pub fn cancel(&mut self) {
        match self.mode {
            Some(Mode::Quad) => {
                let points = &mut self.points;
                self.quad.cancel(&mut self.surface, |ev| {
                    apply_engine_event(points, ev);
                });
            }
            Some(Mode::Box) => {
                let points = &mut self.points;
                self.boxsel.cancel(&mut self.surface, |ev| {
                    apply_engine_event(points, ev);
                });
            }
            None => {}
        }
    }

    /// Rescale the display surface to `percent` of the natural size (with
    /// the 512px floor). Resets any selection and re-homes the handle when
    /// it no longer fits.
    pub fn set_scale(&mut self, percent: u32) -> Result<(), SnipError> {
        let percent = percent.min(100);
        let (w, h) = scaled_dims(self.base_w, self.base_h, percent);

        self.surface = Surface::new(w, h)?;
        self.percent = percent;
        self.points.clear();
        self.quad = QuadEngine::new(self.accent_argb, self.grid_min_gap);
        self.boxsel = BoxEngine::new(self.accent_argb, self.grid_min_gap);
        self.handle.set_parent_size(w as i32, h as i32);

        debug!("display rescaled to {}% ({}x{})", percent, w, h);
        Ok(())
    }

    /// Extract the selected region and write `selected.png`. Guarded: with
    /// anything other than exactly 4 points this is the advisory
    /// `SelectionIncomplete`, the "Select the region!" notice.
    pub fn confirm_download(&mut self) -> Result<PathBuf, SnipError> {
        let have = self.points.len();
        let &[p0, p1, p2, p3] = self.points.as_slice() else {
            return Err(SnipError::SelectionIncomplete { have });
        };

        let region = extract::extract_region(
            &self.source,
            &[p0, p1, p2, p3],
            self.surface.width(),
            self.surface.height(),
        )?;
        let path = extract::save_selected(&region, &self.output_dir)?;
        self.last_extracted = Some(region);
        Ok(path)
    }

    pub fn save_overlay(&self, path: &Path) -> Result<(), SnipError> {
        self.surface.save_png(path)
    }

    /// Diagnostics line: surface size, handle position, coordinates.
    pub fn status_line(&self) -> String {
        let (w, h) = self.display_size();
        let (hx, hy) = self.handle.position();
        format!(
            "Size: {w}x{h} | Handle top: {hy}, left: {hx} | Co-ordinates: {}",
            format_points(&self.points)
        )
    }
}

fn apply_engine_event(points: &mut Vec<Point>, ev: EngineEvent) {
    match ev {
        EngineEvent::SelectionStarted | EngineEvent::Cancelled => points.clear(),
        EngineEvent::RegionSelected { points: snapshot } => {
            *points = snapshot.to_vec();
        }
    }
}

fn scaled_dims(base_w: u32, base_h: u32, percent: u32) -> (u32, u32) {
    let w = (base_w as f64 * percent as f64 / 100.0) as u32;
    let h = (base_h as f64 * percent as f64 / 100.0) as u32;
    (w.max(MIN_DISPLAY_SIZE), h.max(MIN_DISPLAY_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn area() -> SelectArea {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            800,
            600,
            Rgba([200, 30, 30, 255]),
        ));
        SelectArea::new(img, 0xFFFF_0000, 80.0, std::env::temp_dir().join("quadsnip-test")).unwrap()
    }

    fn press(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Press { x, y }
    }

    #[test]
    fn default_state_shows_the_handle() {
        let a = area();
        assert!(a.handle_visible());
        assert_eq!(a.display_size(), (800, 600));
    }

    #[test]
    fn quad_mode_collects_a_selection() {
        let mut a = area();
        a.set_mode(Some(Mode::Quad));
        assert!(!a.handle_visible());

        for (x, y) in [(10.0, 10.0), (110.0, 10.0), (110.0, 60.0), (10.0, 60.0)] {
            a.pointer(press(x, y));
        }

        assert_eq!(a.points().len(), 4);
        assert_eq!(
            a.status_line(),
            "Size: 800x600 | Handle top: 0, left: 0 | Co-ordinates: \
             [X: 10, Y: 10], [X: 110, Y: 10], [X: 110, Y: 60], [X: 10, Y: 60]"
        );
    }

    #[test]
    fn mode_switch_resets_the_session() {
        let mut a = area();
        a.set_mode(Some(Mode::Quad));
        a.pointer(press(10.0, 10.0));
        a.pointer(press(20.0, 10.0));

        a.set_mode(Some(Mode::Box));
        assert!(a.points().is_empty());
        assert!(a.surface().is_blank());
    }

    #[test]
    fn confirm_without_four_points_is_advisory() {
        let mut a = area();
        a.set_mode(Some(Mode::Quad));
        a.pointer(press(10.0, 10.0));

        match a.confirm_download() {
            Err(SnipError::SelectionIncomplete { have }) => assert_eq!(have, 1),
            other => panic!("expected SelectionIncomplete, got {other:?}"),
        }
    }

    #[test]
    fn confirm_after_completion_extracts() {
        let mut a = area();
        a.set_mode(Some(Mode::Box));
        a.pointer(press(10.0, 10.0));
        a.pointer(press(110.0, 60.0));
        assert_eq!(a.points().len(), 4);

        let path = a.confirm_download().unwrap();
        assert!(path.ends_with("selected.png"));
        let region = a.last_extracted().unwrap();
        assert_eq!((region.bounds.w, region.bounds.h), (100, 50));
    }

    #[test]
    fn escape_only_reaches_the_active_engine() {
        let mut a = area();
        a.set_mode(Some(Mode::Quad));
        a.pointer(press(10.0, 10.0));
        a.cancel();
        assert!(a.points().is_empty());
        assert!(a.surface().is_blank());

        // Cancel in the default state is a no-op.
        a.set_mode(None);
        a.cancel();
    }

    #[test]
    fn rescale_applies_the_512px_floor_and_resets_points() {
        let mut a = area();
        a.set_mode(Some(Mode::Box));
        a.pointer(press(10.0, 10.0));
        a.pointer(press(60.0, 60.0));
        assert_eq!(a.points().len(), 4);

        a.set_scale(10).unwrap();
        assert_eq!(a.display_size(), (512, 512));
        assert!(a.points().is_empty());
    }
}
