//! Shape payloads and their `DrawList` push helpers, one file per shape.

pub mod circle;
pub mod line;
pub mod rect;
pub mod text;
pub mod triangle;

pub use circle::CircleCmd;
pub use line::LineCmd;
pub use rect::RectCmd;
pub use text::{GlyphCmd, TextAnchor, TextCmd};
pub use triangle::TriangleCmd;

/// End-cap style of a stroked segment.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LineCap {
    /// Flat end exactly at the endpoint.
    #[default]
    Butt,
    /// Semicircle of radius `width / 2` past the endpoint.
    Round,
}
