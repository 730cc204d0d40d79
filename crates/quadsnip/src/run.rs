// Author: Dustin Pilgrim
// License: MIT

use std::path::{Path, PathBuf};

use eventline::{debug, info, warn};
use image::GenericImageView;

use quadsnip_core::{Mode, Point, SnipError};

use crate::cli;
use crate::config::SnipConfig;
use crate::engine::PointerEvent;
use crate::extract;
use crate::select_area::SelectArea;

pub fn run_extract(
    image_path: &Path,
    points: Option<String>,
    rect: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    out_dir: &Path,
) -> Result<(), String> {
    let points: [Point; 4] = match (points, rect) {
        (Some(p), None) => cli::parse_points(&p)?,
        (None, Some(r)) => cli::parse_rect(&r)?,
        _ => return Err("pass exactly one of --points or --rect".into()),
    };

    let source = image::open(image_path).map_err(|e| format!("open {image_path:?}: {e}"))?;
    let canvas_w = width.unwrap_or(source.width());
    let canvas_h = height.unwrap_or(source.height());

    info!(
        "extracting from {} at {}x{}",
        image_path.display(),
        canvas_w,
        canvas_h
    );

    let region = extract::extract_region(&source, &points, canvas_w, canvas_h)
        .map_err(|e| e.to_string())?;
    let path = extract::save_selected(&region, out_dir).map_err(|e| e.to_string())?;

    info!(
        "selected region {}x{} -> {}",
        region.bounds.w,
        region.bounds.h,
        path.display()
    );
    println!("{}", path.display());

    Ok(())
}

pub fn run_replay(
    image_path: &Path,
    script_path: &Path,
    mode: Option<Mode>,
    overlay: Option<PathBuf>,
    cfg: &SnipConfig,
    out_dir: PathBuf,
) -> Result<(), String> {
    let source = image::open(image_path).map_err(|e| format!("open {image_path:?}: {e}"))?;

    let mut area = SelectArea::new(source, cfg.accent_colour, cfg.grid_min_gap, out_dir)
        .map_err(|e| e.to_string())?;
    area.set_mode(mode);

    let text = std::fs::read_to_string(script_path)
        .map_err(|e| format!("read {script_path:?}: {e}"))?;
    let commands = parse_script(&text)?;
    info!("replaying {} events from {}", commands.len(), script_path.display());

    for cmd in commands {
        debug!("replay: {:?}", cmd);
        match cmd {
            ScriptCmd::Mode(m) => area.set_mode(m),
            ScriptCmd::Scale(p) => area.set_scale(p).map_err(|e| e.to_string())?,
            ScriptCmd::Pointer(ev) => area.pointer(ev),
            ScriptCmd::Esc => area.cancel(),
            ScriptCmd::Confirm => match area.confirm_download() {
                Ok(path) => {
                    info!("saved {}", path.display());
                    println!("{}", path.display());
                }
                Err(SnipError::SelectionIncomplete { have }) => {
                    // Advisory, like the original's snackbar. The replay
                    // keeps going.
                    warn!("Select the region! ({have} of 4 points)");
                }
                Err(e) => return Err(e.to_string()),
            },
        }
    }

    info!("{}", area.status_line());

    if let Some(path) = overlay {
        area.save_overlay(&path).map_err(|e| e.to_string())?;
        info!("overlay -> {}", path.display());
    }

    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum ScriptCmd {
    Mode(Option<Mode>),
    Scale(u32),
    Pointer(PointerEvent),
    Esc,
    Confirm,
}

/// One command per line; `#` starts a comment; blank lines are skipped.
fn parse_script(text: &str) -> Result<Vec<ScriptCmd>, String> {
    let mut out = Vec::new();

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or("");
        let rest: Vec<&str> = words.collect();

        let at = |what: &str| format!("script line {}: {what}", lineno + 1);

        let cmd = match verb {
            "mode" => match rest.as_slice() {
                ["quad"] => ScriptCmd::Mode(Some(Mode::Quad)),
                ["box"] => ScriptCmd::Mode(Some(Mode::Box)),
                ["none"] => ScriptCmd::Mode(None),
                _ => return Err(at("expected mode quad|box|none")),
            },
            "scale" => match rest.as_slice() {
                [p] => ScriptCmd::Scale(
                    p.parse::<u32>().map_err(|_| at("bad scale percentage"))?,
                ),
                _ => return Err(at("expected scale <percent>")),
            },
            "press" | "move" | "release" => {
                let &[x, y] = rest.as_slice() else {
                    return Err(at("expected two coordinates"));
                };
                let x = x.parse::<f32>().map_err(|_| at("bad x coordinate"))?;
                let y = y.parse::<f32>().map_err(|_| at("bad y coordinate"))?;
                ScriptCmd::Pointer(match verb {
                    "press" => PointerEvent::Press { x, y },
                    "move" => PointerEvent::Motion { x, y },
                    _ => PointerEvent::Release { x, y },
                })
            }
            "esc" => ScriptCmd::Esc,
            "confirm" => ScriptCmd::Confirm,
            other => return Err(at(&format!("unknown command {other:?}"))),
        };

        out.push(cmd);
    }

    Ok(out)
}
