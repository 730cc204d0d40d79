// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

#[cfg(feature = "clap")]
use clap::ValueEnum;

/// Which selection engine a surface is wired to. A surface has at most one
/// active engine at a time; both modes emit the same 4-point contract.
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mode {
    /// Four-press quadrilateral picking.
    Quad,
    /// Two-press axis-aligned rectangle picking.
    Box,
}
