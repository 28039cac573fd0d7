//! Wall-clock time to hand angles.
//!
//! Turns are fractions of a revolution with 0 at 12 o'clock. Drawing angles
//! are screen-space radians (+Y down, clockwise positive) where 0 points at
//! 3 o'clock, so a turn `t` maps to `(t - 0.25) · 2π`.

use std::f32::consts::TAU;

use chrono::Timelike;
use mirror_engine::coords::Vec2;

/// Local wall-clock fields; no timezone handling happens past this point.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct WallTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl WallTime {
    pub const fn new(hour: u32, minute: u32, second: u32, millisecond: u32) -> Self {
        Self { hour, minute, second, millisecond }
    }

    /// Reads the fields of any chrono time value. Leap-second nanos clamp to 999 ms.
    pub fn from_timelike(t: &impl Timelike) -> Self {
        Self {
            hour: t.hour(),
            minute: t.minute(),
            second: t.second(),
            millisecond: (t.nanosecond() / 1_000_000).min(999),
        }
    }
}

/// Hand positions as fractions of a full turn, `[0, 1)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandTurns {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

impl HandTurns {
    pub fn at(t: WallTime) -> Self {
        let hour = ((t.hour % 12) as f32 + t.minute as f32 / 60.0) / 12.0;
        let minute = (t.minute as f32 + t.second as f32 / 60.0) / 60.0;
        let second = (t.second as f32 + t.millisecond as f32 / 1000.0) / 60.0;
        Self { hour: wrap_turn(hour), minute: wrap_turn(minute), second: wrap_turn(second) }
    }
}

/// Screen-space drawing angles in `[0, 2π)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

impl HandAngles {
    pub fn at(t: WallTime) -> Self {
        Self::from(HandTurns::at(t))
    }
}

impl From<HandTurns> for HandAngles {
    fn from(turns: HandTurns) -> Self {
        Self {
            hour: turn_to_angle(turns.hour),
            minute: turn_to_angle(turns.minute),
            second: turn_to_angle(turns.second),
        }
    }
}

#[inline]
fn wrap_turn(t: f32) -> f32 {
    let w = t.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if w >= 1.0 { 0.0 } else { w }
}

/// Maps a turn fraction (0 = 12 o'clock) to a screen angle in `[0, 2π)`.
#[inline]
pub fn turn_to_angle(turn: f32) -> f32 {
    let a = ((turn - 0.25) * TAU).rem_euclid(TAU);
    if a >= TAU { 0.0 } else { a }
}

/// Angle of marker `index` out of `divisions` evenly spaced around the dial.
#[inline]
pub fn marker_angle(index: u32, divisions: u32) -> f32 {
    turn_to_angle(index as f32 / divisions.max(1) as f32)
}

/// Unit vector for a drawing angle.
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::from_angle(angle)
}
