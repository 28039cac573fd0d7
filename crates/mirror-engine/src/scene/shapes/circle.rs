use crate::coords::Vec2;
use crate::paint::{Color, Paint};
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Disc or annulus.
///
/// `inner_radius == 0` fills the whole disc; anything larger leaves a hole,
/// which is how stroked circles are drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub inner_radius: f32,
    pub paint: Paint,
}

impl CircleCmd {
    #[inline]
    pub fn new(center: Vec2, radius: f32, inner_radius: f32, paint: Paint) -> Self {
        Self { center, radius, inner_radius: inner_radius.clamp(0.0, radius.max(0.0)), paint }
    }

    #[inline]
    pub fn is_ring(&self) -> bool {
        self.inner_radius > 0.0
    }
}

impl DrawList {
    /// Records a filled disc with any paint.
    #[inline]
    pub fn push_circle(&mut self, z: ZIndex, center: Vec2, radius: f32, paint: Paint) {
        self.push(z, DrawCmd::Circle(CircleCmd::new(center, radius, 0.0, paint)));
    }

    /// Records a solid disc.
    #[inline]
    pub fn push_disc(&mut self, z: ZIndex, center: Vec2, radius: f32, color: Color) {
        self.push_circle(z, center, radius, Paint::Solid(color));
    }

    /// Records a circle stroke of `width` centred on `radius`.
    #[inline]
    pub fn push_ring(
        &mut self,
        z: ZIndex,
        center: Vec2,
        radius: f32,
        width: f32,
        paint: impl Into<Paint>,
    ) {
        let half = width.max(0.0) * 0.5;
        self.push(
            z,
            DrawCmd::Circle(CircleCmd::new(center, radius + half, (radius - half).max(0.0), paint.into())),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_straddles_its_radius() {
        let mut list = DrawList::new();
        list.push_ring(ZIndex(0), Vec2::zero(), 10.0, 4.0, Color::WHITE);
        let DrawCmd::Circle(c) = &list.items()[0].cmd else { panic!("expected circle") };
        assert_eq!((c.radius, c.inner_radius), (12.0, 8.0));
        assert!(c.is_ring());
    }

    #[test]
    fn inner_radius_never_exceeds_outer() {
        let c = CircleCmd::new(Vec2::zero(), 5.0, 9.0, Paint::Solid(Color::BLACK));
        assert_eq!(c.inner_radius, 5.0);
    }
}
