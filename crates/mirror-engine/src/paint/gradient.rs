use crate::coords::Vec2;

use super::Color;

/// Gradient spread behavior outside [0, 1] range.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SpreadMode {
    /// Clamp to edge stops.
    #[default]
    Pad,
    /// Repeat the gradient pattern.
    Repeat,
    /// Mirror-repeat the gradient pattern.
    Reflect,
}

impl SpreadMode {
    /// Maps an unbounded parameter into `[0, 1]`.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            SpreadMode::Pad => t.clamp(0.0, 1.0),
            SpreadMode::Repeat => t - t.floor(),
            SpreadMode::Reflect => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        }
    }

    /// Numeric code uploaded to shaders.
    #[inline]
    pub(crate) fn code(self) -> f32 {
        match self {
            SpreadMode::Pad => 0.0,
            SpreadMode::Repeat => 1.0,
            SpreadMode::Reflect => 2.0,
        }
    }
}

/// A single gradient stop.
///
/// `t` is expected in [0, 1]; stops must be supplied in ascending `t`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Samples a stop ramp at `t` (already spread-mapped), interpolating premultiplied colors.
pub fn sample_stops(stops: &[ColorStop], t: f32) -> Color {
    let Some(first) = stops.first() else {
        return Color::TRANSPARENT;
    };
    if t <= first.t {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.t {
            let span = (b.t - a.t).max(f32::EPSILON);
            let k = (t - a.t) / span;
            return Color::from_premul(
                a.color.r + (b.color.r - a.color.r) * k,
                a.color.g + (b.color.g - a.color.g) * k,
                a.color.b + (b.color.b - a.color.b) * k,
                a.color.a + (b.color.a - a.color.a) * k,
            );
        }
    }
    stops[stops.len() - 1].color
}

/// Linear gradient definition in logical pixel space.
///
/// `start` and `end` are positions in the same coordinate space as geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
    pub spread: SpreadMode,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, stops: Vec<ColorStop>) -> Self {
        Self { start, end, stops, spread: SpreadMode::Pad }
    }

    /// Returns true when the gradient definition is structurally usable.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
            && self.stops.len() >= 2
            && self.start != self.end
    }

    /// Color at logical position `p`.
    pub fn color_at(&self, p: Vec2) -> Color {
        let axis = self.end - self.start;
        let len_sq = axis.x * axis.x + axis.y * axis.y;
        if len_sq <= f32::EPSILON {
            return sample_stops(&self.stops, 0.0);
        }
        let rel = p - self.start;
        let t = (rel.x * axis.x + rel.y * axis.y) / len_sq;
        sample_stops(&self.stops, self.spread.apply(t))
    }
}

/// Concentric radial gradient: `t = 0` at `inner_radius`, `t = 1` at `outer_radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub stops: Vec<ColorStop>,
    pub spread: SpreadMode,
}

impl RadialGradient {
    pub fn new(center: Vec2, inner_radius: f32, outer_radius: f32, stops: Vec<ColorStop>) -> Self {
        Self { center, inner_radius, outer_radius, stops, spread: SpreadMode::Pad }
    }

    pub fn is_valid(&self) -> bool {
        self.center.is_finite()
            && self.inner_radius.is_finite()
            && self.outer_radius.is_finite()
            && self.outer_radius > self.inner_radius
            && self.stops.len() >= 2
    }

    /// Color at logical position `p`.
    pub fn color_at(&self, p: Vec2) -> Color {
        let span = (self.outer_radius - self.inner_radius).max(f32::EPSILON);
        let t = (self.center.distance(p) - self.inner_radius) / span;
        sample_stops(&self.stops, self.spread.apply(t))
    }
}
