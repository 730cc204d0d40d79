// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnipError {
    /// Extraction was requested before a gesture completed. Hosts surface
    /// this as a transient advisory, not a hard failure.
    #[error("selection incomplete: expected 4 points, have {have}")]
    SelectionIncomplete { have: usize },

    /// The source bitmap could not be rasterized at the requested canvas
    /// size. The original design swallowed this; here it is explicit.
    #[error("rasterize failed: {0}")]
    RasterizeFailed(String),

    /// The bounding box of the selection is empty after clamping to the
    /// canvas.
    #[error("selected region is empty after clamping")]
    EmptyRegion,

    #[error("surface error: {0}")]
    Surface(String),

    #[error("encode failed: {0}")]
    Encode(String),

    #[error("io: {0}")]
    Io(String),
}
