// Author: Dustin Pilgrim
// License: MIT
//
// The raster target the selection engines paint on. Plays the role of the
// host-supplied canvas: non-retained, engines clear and repaint it on every
// press/move. Colours use the 0xAARRGGBB convention shared with the config.

use std::path::Path;

use tiny_skia::{Color, Paint, PathBuilder, Pixmap, Stroke, Transform};

use quadsnip_core::{Point, SnipError};

pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Result<Self, SnipError> {
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| SnipError::Surface(format!("allocate {width}x{height} surface")))?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Wipe the whole surface back to transparent.
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    pub fn stroke_segment(&mut self, a: Point, b: Point, width: f32, argb: u32) {
        let mut pb = PathBuilder::new();
        pb.move_to(a.x, a.y);
        pb.line_to(b.x, b.y);
        self.stroke(pb, width, argb);
    }

    /// Connected line segments from the first point through the newest.
    /// With `close`, a final segment back to the first point.
    pub fn stroke_polyline(&mut self, points: &[Point], close: bool, width: f32, argb: u32) {
        if points.len() < 2 {
            return;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(points[0].x, points[0].y);
        for p in &points[1..] {
            pb.line_to(p.x, p.y);
        }
        if close {
            pb.close();
        }
        self.stroke(pb, width, argb);
    }

    pub fn stroke_rect(&mut self, origin: Point, w: f32, h: f32, width: f32, argb: u32) {
        let mut pb = PathBuilder::new();
        pb.move_to(origin.x, origin.y);
        pb.line_to(origin.x + w, origin.y);
        pb.line_to(origin.x + w, origin.y + h);
        pb.line_to(origin.x, origin.y + h);
        pb.close();
        self.stroke(pb, width, argb);
    }

    fn stroke(&mut self, pb: PathBuilder, width: f32, argb: u32) {
        let Some(path) = pb.finish() else {
            return;
        };

        let mut paint = Paint::default();
        let (a, r, g, b) = split_argb(argb);
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let stroke = Stroke { width, ..Stroke::default() };

        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, SnipError> {
        self.pixmap
            .encode_png()
            .map_err(|e| SnipError::Encode(format!("surface png: {e}")))
    }

    pub fn save_png(&self, path: &Path) -> Result<(), SnipError> {
        let data = self.encode_png()?;
        std::fs::write(path, data).map_err(|e| SnipError::Io(format!("write {path:?}: {e}")))
    }

    /// True when any pixel is non-transparent. Diagnostics and tests only.
    pub fn is_blank(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }
}

pub fn split_argb(argb: u32) -> (u8, u8, u8, u8) {
    (
        (argb >> 24) as u8,
        (argb >> 16) as u8,
        (argb >> 8) as u8,
        argb as u8,
    )
}
