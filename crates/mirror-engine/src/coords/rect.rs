use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x * 0.5, self.origin.y + self.size.y * 0.5)
    }

    /// Length of the shorter side.
    #[inline]
    pub fn min_side(self) -> f32 {
        self.size.x.min(self.size.y)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let (x, w) = if self.size.x < 0.0 {
            (self.origin.x + self.size.x, -self.size.x)
        } else {
            (self.origin.x, self.size.x)
        };
        let (y, h) = if self.size.y < 0.0 {
            (self.origin.y + self.size.y, -self.size.y)
        } else {
            (self.origin.y, self.size.y)
        };
        Rect::new(x, y, w, h)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        let max = r.max();
        p.x >= r.origin.x && p.y >= r.origin.y && p.x < max.x && p.y < max.y
    }

    /// Overlapping area of two rects; `None` when they only touch or are disjoint.
    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let x0 = a.origin.x.max(b.origin.x);
        let y0 = a.origin.y.max(b.origin.y);
        let x1 = a.max().x.min(b.max().x);
        let y1 = a.max().y.min(b.max().y);

        if x1 - x0 <= 0.0 || y1 - y0 <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        }
    }

    /// Shrinks every edge by `amount`, clamping the size at zero.
    #[inline]
    pub fn inset(self, amount: f32) -> Rect {
        Rect::new(
            self.origin.x + amount,
            self.origin.y + amount,
            (self.size.x - 2.0 * amount).max(0.0),
            (self.size.y - 2.0 * amount).max(0.0),
        )
    }

    /// Splits off a strip of `height` from the top. Returns `(top, rest)`.
    #[inline]
    pub fn split_top(self, height: f32) -> (Rect, Rect) {
        let h = height.clamp(0.0, self.size.y.max(0.0));
        (
            Rect::new(self.origin.x, self.origin.y, self.size.x, h),
            Rect::new(self.origin.x, self.origin.y + h, self.size.x, self.size.y - h),
        )
    }

    /// Splits off a strip of `width` from the right. Returns `(rest, right)`.
    #[inline]
    pub fn split_right(self, width: f32) -> (Rect, Rect) {
        let w = width.clamp(0.0, self.size.x.max(0.0));
        (
            Rect::new(self.origin.x, self.origin.y, self.size.x - w, self.size.y),
            Rect::new(self.origin.x + self.size.x - w, self.origin.y, w, self.size.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_positive_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_negative_extent() {
        let n = r(10.0, 10.0, -4.0, -3.0).normalized();
        assert_eq!(n, r(6.0, 7.0, 4.0, 3.0));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_is_half_open() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(5.0, 5.0)));
        assert!(!rect.contains(Vec2::new(10.0, 10.0)));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let i = r(0.0, 0.0, 10.0, 10.0).intersect(r(5.0, 5.0, 10.0, 10.0));
        assert_eq!(i, Some(r(5.0, 5.0, 5.0, 5.0)));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        assert!(r(0.0, 0.0, 10.0, 10.0).intersect(r(10.0, 0.0, 10.0, 10.0)).is_none());
    }

    // ── layout helpers ────────────────────────────────────────────────────

    #[test]
    fn center_and_min_side() {
        let rect = r(10.0, 20.0, 300.0, 200.0);
        assert_eq!(rect.center(), Vec2::new(160.0, 120.0));
        assert_eq!(rect.min_side(), 200.0);
    }

    #[test]
    fn inset_clamps_to_zero() {
        let inner = r(0.0, 0.0, 10.0, 10.0).inset(20.0);
        assert_eq!(inner.size, Vec2::zero());
    }

    #[test]
    fn split_top_partitions_height() {
        let (top, rest) = r(0.0, 0.0, 100.0, 80.0).split_top(30.0);
        assert_eq!(top, r(0.0, 0.0, 100.0, 30.0));
        assert_eq!(rest, r(0.0, 30.0, 100.0, 50.0));
    }

    #[test]
    fn split_right_clamps_to_width() {
        let (rest, right) = r(0.0, 0.0, 100.0, 80.0).split_right(150.0);
        assert_eq!(rest.size.x, 0.0);
        assert_eq!(right, r(0.0, 0.0, 100.0, 80.0));
    }
}
