// Author: Dustin Pilgrim
// License: MIT

pub mod coords;
pub mod error;
pub mod mode;
pub mod point;
pub mod rect;

pub use coords::format_points;
pub use error::SnipError;
pub use mode::Mode;
pub use point::Point;
pub use rect::Rect;
