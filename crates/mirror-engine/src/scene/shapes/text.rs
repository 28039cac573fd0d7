use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};
use crate::text::FontId;

/// Which point of the laid-out text block `origin` refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TextAnchor {
    #[default]
    TopLeft,
    /// Horizontal and vertical middle of the line box.
    Center,
}

/// Text draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    pub origin: Vec2,
    pub anchor: TextAnchor,
}

/// Single glyph without layout. `origin` is the top-left of its `size`-tall cell.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphCmd {
    pub ch: char,
    pub font: FontId,
    pub size: f32,
    pub color: Color,
    pub origin: Vec2,
}

impl DrawList {
    /// Records a text draw command.
    pub fn push_text(
        &mut self,
        z: ZIndex,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
        anchor: TextAnchor,
    ) {
        self.push(
            z,
            DrawCmd::Text(TextCmd { text: text.into(), font, size, color, origin, anchor }),
        );
    }

    #[inline]
    pub fn push_glyph(
        &mut self,
        z: ZIndex,
        ch: char,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
    ) {
        self.push(z, DrawCmd::Glyph(GlyphCmd { ch, font, size, color, origin }));
    }
}
