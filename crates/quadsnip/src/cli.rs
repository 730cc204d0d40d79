// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use quadsnip_core::{Mode, Point};

#[derive(Debug, Parser)]
#[command(name = "quadsnip", version, about = "Quadsnip — snip a quadrilateral region out of an image.")]
pub struct Args {
    /// Log to stderr (in addition to the log file)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Override log file path (default: $XDG_STATE_HOME/quadsnip/quadsnip.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Override the artifact output directory
    #[arg(long, short = 'o')]
    pub out_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Extract a quadrilateral region from an image and write selected.png
    Extract {
        /// Source image (png/jpeg)
        image: PathBuf,

        /// Four corners as "x,y x,y x,y x,y" (ordered, defines winding)
        #[arg(long)]
        points: Option<String>,

        /// Axis-aligned region as "x,y,w,h" (normalized to the 4-corner contract)
        #[arg(long)]
        rect: Option<String>,

        /// Canvas width the points were picked against (default: image width)
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height the points were picked against (default: image height)
        #[arg(long)]
        height: Option<u32>,
    },

    /// Drive a selection session headlessly from an event script
    Replay {
        /// Source image (png/jpeg)
        image: PathBuf,

        /// Event script: press/move/release/esc/mode/scale/confirm lines
        script: PathBuf,

        /// Initial selection mode (quad/box); scripts can switch later
        #[arg(long)]
        mode: Option<Mode>,

        /// Also write the final overlay surface to this path
        #[arg(long)]
        overlay: Option<PathBuf>,
    },
}

/// Parse "x,y x,y x,y x,y" into the 4-point contract.
pub fn parse_points(s: &str) -> Result<[Point; 4], String> {
    let points: Vec<Point> = s
        .split_whitespace()
        .map(parse_point)
        .collect::<Result<_, _>>()?;

    match points.as_slice() {
        &[p0, p1, p2, p3] => Ok([p0, p1, p2, p3]),
        other => Err(format!("expected 4 points, got {}", other.len())),
    }
}

/// Parse "x,y,w,h" into the same contract, top-left clockwise.
pub fn parse_rect(s: &str) -> Result<[Point; 4], String> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f32>()
                .map_err(|_| format!("bad rect component {v:?}"))
        })
        .collect::<Result<_, _>>()?;

    let &[x, y, w, h] = parts.as_slice() else {
        return Err(format!("expected x,y,w,h, got {} components", parts.len()));
    };

    if w <= 0.0 || h <= 0.0 {
        return Err(format!("rect must have positive size, got {w}x{h}"));
    }

    Ok([
        Point::new(x, y),
        Point::new(x + w, y),
        Point::new(x + w, y + h),
        Point::new(x, y + h),
    ])
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("bad point {s:?}, expected x,y"))?;

    Ok(Point::new(
        x.trim()
            .parse::<f32>()
            .map_err(|_| format!("bad x in {s:?}"))?,
        y.trim()
            .parse::<f32>()
            .map_err(|_| format!("bad y in {s:?}"))?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_flag_round_trips() {
        let pts = parse_points("10,10 110,10 110,60 10,60").unwrap();
        assert_eq!(pts[0], Point::new(10.0, 10.0));
        assert_eq!(pts[3], Point::new(10.0, 60.0));
    }

    #[test]
    fn wrong_point_count_is_rejected() {
        assert!(parse_points("10,10 20,20").is_err());
        assert!(parse_points("").is_err());
    }

    #[test]
    fn rect_flag_expands_top_left_clockwise() {
        let pts = parse_rect("10,10,100,50").unwrap();
        assert_eq!(
            pts,
            [
                Point::new(10.0, 10.0),
                Point::new(110.0, 10.0),
                Point::new(110.0, 60.0),
                Point::new(10.0, 60.0),
            ]
        );
    }

    #[test]
    fn degenerate_rect_is_rejected() {
        assert!(parse_rect("10,10,0,50").is_err());
        assert!(parse_rect("10,10,100").is_err());
    }
}
