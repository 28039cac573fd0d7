//! Font loading and text measurement.
//!
//! Rasterization lives in the renderer's glyph atlas; this module only owns
//! parsed fonts and answers layout questions.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
