// Author: Dustin Pilgrim
// License: MIT
//
// Crop a bitmap to an arbitrary quadrilateral: rasterize the source at the
// canvas size, clip through the 4-point path, then cut out the axis-aligned
// bounding box of the points. Perspective-naive by design; no projective
// transform happens here.

use std::fs;
use std::path::{Path, PathBuf};

use image::{imageops, DynamicImage, GenericImageView, RgbaImage};
use tiny_skia::{FillRule, IntSize, Mask, PathBuilder, Pixmap, PixmapPaint, Transform};

use quadsnip_core::{Point, Rect, SnipError};

/// Fixed artifact name, same for every extraction.
pub const SELECTED_FILENAME: &str = "selected.png";

/// A completed extraction. `image` doubles as the inline preview the host
/// keeps around; `bounds` is the crop rectangle in canvas space.
pub struct ExtractedRegion {
    pub image: RgbaImage,
    pub bounds: Rect,
}

/// Extract the pixel content bounded by the quadrilateral.
///
/// `canvas_w`/`canvas_h` are the display dimensions the points were picked
/// against; the source is rasterized to exactly that size first, so the
/// points and the pixels line up. Everything outside the quadrilateral but
/// inside the bounding box comes out transparent.
///
/// Failures are explicit: an undecodable or zero-sized source is
/// `RasterizeFailed`, a selection that clamps to nothing is `EmptyRegion`.
pub fn extract_region(
    source: &DynamicImage,
    points: &[Point; 4],
    canvas_w: u32,
    canvas_h: u32,
) -> Result<ExtractedRegion, SnipError> {
    if canvas_w == 0 || canvas_h == 0 {
        return Err(SnipError::RasterizeFailed(format!(
            "canvas is {canvas_w}x{canvas_h}"
        )));
    }
    if source.width() == 0 || source.height() == 0 {
        return Err(SnipError::RasterizeFailed("source bitmap is empty".into()));
    }

    let canvas = Rect {
        x: 0,
        y: 0,
        w: canvas_w as i32,
        h: canvas_h as i32,
    };
    let bounds = Rect::bounding(points)
        .and_then(|b| b.intersect(&canvas))
        .ok_or(SnipError::EmptyRegion)?;

    // Rasterize the displayed bitmap at canvas size.
    let scaled = imageops::resize(
        &source.to_rgba8(),
        canvas_w,
        canvas_h,
        imageops::FilterType::Triangle,
    );
    let src = pixmap_from_rgba(&scaled)?;

    // Clip path: point 0, line-to through 1,2,3, back to 0.
    let mut pb = PathBuilder::new();
    pb.move_to(points[0].x, points[0].y);
    for p in &points[1..] {
        pb.line_to(p.x, p.y);
    }
    pb.close();
    let path = pb
        .finish()
        .ok_or_else(|| SnipError::RasterizeFailed("degenerate clip path".into()))?;

    let mut mask = Mask::new(canvas_w, canvas_h)
        .ok_or_else(|| SnipError::Surface(format!("allocate {canvas_w}x{canvas_h} mask")))?;
    mask.fill_path(&path, FillRule::Winding, true, Transform::identity());

    let mut clipped = Pixmap::new(canvas_w, canvas_h)
        .ok_or_else(|| SnipError::Surface(format!("allocate {canvas_w}x{canvas_h} target")))?;
    clipped.draw_pixmap(
        0,
        0,
        src.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        Some(&mask),
    );

    // Cut out exactly the bounding box.
    let full = rgba_from_pixmap(&clipped);
    let cropped = imageops::crop_imm(
        &full,
        bounds.x as u32,
        bounds.y as u32,
        bounds.w as u32,
        bounds.h as u32,
    )
    .to_image();

    Ok(ExtractedRegion {
        image: cropped,
        bounds,
    })
}

/// Write the extracted region as `selected.png` under `out_dir`, creating
/// the directory if needed. Returns the artifact path.
pub fn save_selected(region: &ExtractedRegion, out_dir: &Path) -> Result<PathBuf, SnipError> {
    fs::create_dir_all(out_dir)
        .map_err(|e| SnipError::Io(format!("create dir {out_dir:?}: {e}")))?;

    let path = out_dir.join(SELECTED_FILENAME);
    region
        .image
        .save(&path)
        .map_err(|e| SnipError::Encode(format!("save {path:?}: {e}")))?;

    Ok(path)
}

fn pixmap_from_rgba(img: &RgbaImage) -> Result<Pixmap, SnipError> {
    let (w, h) = img.dimensions();
    let size = IntSize::from_wh(w, h)
        .ok_or_else(|| SnipError::Surface(format!("bad pixmap size {w}x{h}")))?;

    // tiny-skia stores premultiplied RGBA.
    let mut data = Vec::with_capacity(rgba_len(w, h));
    for px in img.pixels() {
        let [r, g, b, a] = px.0;
        data.push(premul(r, a));
        data.push(premul(g, a));
        data.push(premul(b, a));
        data.push(a);
    }

    Pixmap::from_vec(data, size)
        .ok_or_else(|| SnipError::Surface(format!("build {w}x{h} pixmap")))
}

fn rgba_from_pixmap(pixmap: &Pixmap) -> RgbaImage {
    let (w, h) = (pixmap.width(), pixmap.height());
    let mut data = Vec::with_capacity(rgba_len(w, h));

    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    RgbaImage::from_raw(w, h, data).expect("pixmap dimensions match buffer")
}

fn premul(channel: u8, alpha: u8) -> u8 {
    ((channel as u16 * alpha as u16 + 127) / 255) as u8
}

/// RGBA byte length for a w x h buffer. Widened before multiplying so
/// large-but-valid dimensions cannot overflow u32.
fn rgba_len(w: u32, h: u32) -> usize {
    w as usize * h as usize * 4
}
