/// Viewport size in logical pixels plus the physical scale factor.
///
/// Renderers upload `width`/`height` to convert logical positions to NDC and use
/// `scale` when converting clip rects to physical scissor rects.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32, scale: f32) -> Self {
        Self { width, height, scale }
    }

    /// Physical pixel extent, never below 1×1.
    #[inline]
    pub fn physical_size(self) -> (u32, u32) {
        (
            (self.width * self.scale).max(1.0) as u32,
            (self.height * self.scale).max(1.0) as u32,
        )
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && self.scale > 0.0
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}
