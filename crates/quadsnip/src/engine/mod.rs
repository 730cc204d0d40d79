// Author: Dustin Pilgrim
// License: MIT

pub mod boxsel;
pub mod quad;

pub use boxsel::BoxEngine;
pub use quad::QuadEngine;

use quadsnip_core::Point;

/// Stroke width for the committed path and the rubber-band preview.
pub const PATH_STROKE_WIDTH: f32 = 3.0;

/// Pointer input in surface-local device pixels. Within one gesture the
/// stream is assumed strictly ordered and single-producer; engines do not
/// defend against concurrent multi-pointer input.
#[derive(Debug, Clone, Copy)]
pub enum PointerEvent {
    Press { x: f32, y: f32 },
    Motion { x: f32, y: f32 },
    Release { x: f32, y: f32 },
}

/// What an engine reports back to its host. `RegionSelected` carries a
/// snapshot; the engine resets its own session immediately after emitting
/// and never touches the points again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// First press of a gesture. Hosts clear stale UI state here.
    SelectionStarted,
    /// Exactly 4 ordered points, once per completed gesture.
    RegionSelected { points: [Point; 4] },
    /// The session was cancelled and the engine is back to idle.
    Cancelled,
}
