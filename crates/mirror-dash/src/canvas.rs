use mirror_engine::coords::{Rect, Vec2};

/// Drawable area owned by one widget.
///
/// Integer pixel size, placed at `origin` inside the window. Everything a
/// widget records is clipped to this rect.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Canvas {
    pub origin: Vec2,
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Canvas covering `rect`, with the size floored to whole pixels.
    pub fn from_rect(rect: Rect) -> Self {
        let r = rect.normalized();
        Self {
            origin: r.origin,
            width: r.size.x.max(0.0).floor() as u32,
            height: r.size.y.max(0.0).floor() as u32,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, Vec2::new(self.width as f32, self.height as f32))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Base dial radius: 42% of the shorter side.
    #[inline]
    pub fn base_radius(&self) -> f32 {
        self.width.min(self.height) as f32 * 0.42
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Named container rectangles of the dashboard, in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct PanelLayout {
    /// Whole window; the rain background lives here.
    pub screen: Rect,
    /// Top strip with the digital readout.
    pub header: Rect,
    /// Main panel; shows the analog clock in the clock view.
    pub vision: Rect,
    /// Square slot for the compact clock.
    pub mini: Rect,
    /// Month grid under the compact clock.
    pub calendar: Rect,
}

impl PanelLayout {
    pub const SCREEN: &'static str = "screen";
    pub const HEADER: &'static str = "header";
    pub const VISION: &'static str = "vision";
    pub const MINI: &'static str = "mini";
    pub const CALENDAR: &'static str = "calendar";

    const MARGIN: f32 = 16.0;

    /// Splits a `width` × `height` window into panels.
    pub fn compute(width: f32, height: f32) -> Self {
        let screen = Rect::new(0.0, 0.0, width.max(0.0), height.max(0.0));
        let header_h = (screen.size.y * 0.14).clamp(56.0, 120.0).min(screen.size.y);
        let (header, body) = screen.split_top(header_h);
        let (main, side) = body.split_right(body.size.x * 0.3);

        let vision = main.inset(Self::MARGIN);
        let side = side.inset(Self::MARGIN);
        let mini_side = side.size.x.min(side.size.y);
        let mini = Rect::from_origin_size(side.origin, Vec2::new(mini_side, mini_side));
        let (_, calendar) = side.split_top(mini_side + Self::MARGIN);

        Self { screen, header: header.inset(Self::MARGIN * 0.5), vision, mini, calendar }
    }

    /// Looks up a container by id.
    pub fn panel(&self, id: &str) -> Option<Rect> {
        match id {
            Self::SCREEN => Some(self.screen),
            Self::HEADER => Some(self.header),
            Self::VISION => Some(self.vision),
            Self::MINI => Some(self.mini),
            Self::CALENDAR => Some(self.calendar),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── canvas ────────────────────────────────────────────────────────────

    #[test]
    fn canvas_floors_fractional_sizes() {
        let c = Canvas::from_rect(Rect::new(10.0, 20.0, 300.7, 199.2));
        assert_eq!((c.width, c.height), (300, 199));
        assert_eq!(c.origin, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn base_radius_uses_shorter_side() {
        let c = Canvas::from_rect(Rect::new(0.0, 0.0, 400.0, 300.0));
        assert!((c.base_radius() - 126.0).abs() < 1e-4);
        assert_eq!(c.center(), Vec2::new(200.0, 150.0));
    }

    #[test]
    fn empty_canvas_from_negative_rect() {
        assert!(Canvas::from_rect(Rect::new(0.0, 0.0, 0.0, 50.0)).is_empty());
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn panels_do_not_overlap() {
        let l = PanelLayout::compute(1280.0, 720.0);
        assert!(l.header.intersect(l.vision).is_none());
        assert!(l.vision.intersect(l.mini).is_none());
        assert!(l.mini.size.x > 0.0);
        assert_eq!(l.mini.size.x, l.mini.size.y);
        assert!(l.calendar.intersect(l.mini).is_none());
        assert!(l.calendar.intersect(l.vision).is_none());
        assert!(l.calendar.origin.y > l.mini.max().y);
    }

    #[test]
    fn panels_stay_inside_screen() {
        let l = PanelLayout::compute(800.0, 480.0);
        for r in [l.header, l.vision, l.mini, l.calendar] {
            assert!(r.origin.x >= 0.0 && r.origin.y >= 0.0);
            assert!(r.max().x <= 800.0 && r.max().y <= 480.0);
        }
    }

    #[test]
    fn lookup_by_id() {
        let l = PanelLayout::compute(1280.0, 720.0);
        assert_eq!(l.panel("vision"), Some(l.vision));
        assert_eq!(l.panel(PanelLayout::SCREEN), Some(l.screen));
        assert_eq!(l.panel("calendar"), Some(l.calendar));
        assert_eq!(l.panel("sidebar"), None);
    }

    #[test]
    fn tiny_window_degrades_to_empty_panels() {
        let l = PanelLayout::compute(20.0, 20.0);
        assert!(Canvas::from_rect(l.vision).is_empty());
    }
}
