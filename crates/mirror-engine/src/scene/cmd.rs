use crate::scene::shapes::{CircleCmd, GlyphCmd, LineCmd, RectCmd, TextCmd, TriangleCmd};

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here and a matching [`DrawKind`]
/// - implement push helpers inside that shape module
/// - teach `render::SceneRenderer` which pipeline consumes it
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Circle(CircleCmd),
    Line(LineCmd),
    Triangle(TriangleCmd),
    Text(TextCmd),
    Glyph(GlyphCmd),
}

/// Pipeline family a command is drawn with.
///
/// Rects and triangles share the solid mesh pipeline; text and single glyphs
/// share the atlas pipeline.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DrawKind {
    Mesh,
    Circle,
    Line,
    Text,
}

impl DrawCmd {
    #[inline]
    pub fn kind(&self) -> DrawKind {
        match self {
            DrawCmd::Rect(_) | DrawCmd::Triangle(_) => DrawKind::Mesh,
            DrawCmd::Circle(_) => DrawKind::Circle,
            DrawCmd::Line(_) => DrawKind::Line,
            DrawCmd::Text(_) | DrawCmd::Glyph(_) => DrawKind::Text,
        }
    }
}
