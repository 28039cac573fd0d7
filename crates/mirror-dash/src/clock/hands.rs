use std::f32::consts::PI;

use mirror_engine::coords::Vec2;
use mirror_engine::paint::Color;
use mirror_engine::scene::shapes::LineCap;
use mirror_engine::scene::DrawList;

use super::angles::{direction, HandAngles};
use super::face::CLOCK_LAYER;
use super::palette::{fixed, ClockPalette};

/// Length and stroke width of one hand.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandSpec {
    pub length: f32,
    pub width: f32,
}

/// Geometry of a complete hand set, already resolved to pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandSet {
    pub hour: HandSpec,
    pub minute: HandSpec,
    pub second: HandSpec,
    /// Counterweight behind the center; zero for none.
    pub second_tail: f32,
    pub hub_outer: f32,
    /// Dark cap on the hub; zero for none.
    pub hub_inner: f32,
}

impl HandSet {
    /// Full face: everything scales with the base radius `r`.
    pub fn full(r: f32) -> Self {
        Self {
            hour: HandSpec { length: r * 0.45, width: r * 0.025 },
            minute: HandSpec { length: r * 0.68, width: r * 0.015 },
            second: HandSpec { length: r * 0.82, width: r * 0.0075 },
            second_tail: r * 0.125,
            hub_outer: r * 0.03,
            hub_inner: r * 0.015,
        }
    }

    /// Compact face: fixed pixel widths, no tail, single hub dot.
    pub fn compact(r: f32) -> Self {
        Self {
            hour: HandSpec { length: r * 0.4, width: 3.0 },
            minute: HandSpec { length: r * 0.6, width: 2.0 },
            second: HandSpec { length: r * 0.7, width: 1.0 },
            second_tail: 0.0,
            hub_outer: 3.0,
            hub_inner: 0.0,
        }
    }
}

/// Records hour, minute and second hands, then the hub on top.
pub fn draw_hands(list: &mut DrawList, center: Vec2, angles: HandAngles, hands: &HandSet, palette: &ClockPalette) {
    let z = CLOCK_LAYER;
    let color = palette.hand;

    for (angle, spec) in [(angles.hour, hands.hour), (angles.minute, hands.minute)] {
        let tip = center + direction(angle) * spec.length;
        list.push_line(z, center, tip, spec.width, color, LineCap::Round);
    }

    let tip = center + direction(angles.second) * hands.second.length;
    let tail = center + direction(angles.second + PI) * hands.second_tail;
    list.push_line(z, tail, tip, hands.second.width, color, LineCap::Round);

    list.push_disc(z, center, hands.hub_outer, Color::WHITE);
    if hands.hub_inner > 0.0 {
        list.push_disc(z, center, hands.hub_inner, fixed::hub_inner());
    }
}
