use mirror_engine::paint::Color;

use crate::mode::ModeSwitch;

/// Colors the clock faces are drawn with.
///
/// Two instances exist (day and night); the mode switch selects one and
/// never mutates either.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockPalette {
    pub accent: Color,
    pub accent_dim: Color,
    pub hand: Color,
    /// Dial tone for panels drawn behind the clock; the clock itself sits on black.
    pub face: Color,
    /// Fills of the three nested dial circles, outermost first.
    pub tints: [Color; 3],
}

impl ClockPalette {
    /// Green day palette.
    pub fn day() -> Self {
        Self {
            accent: Color::rgb(0x00, 0xff, 0x41),
            accent_dim: Color::rgb(0x00, 0xaa, 0x2a),
            hand: Color::WHITE,
            face: Color::rgb(0x05, 0x0a, 0x05),
            tints: [
                Color::rgba(0, 200, 60, 0.08),
                Color::rgba(0, 220, 80, 0.12),
                Color::rgba(0, 240, 100, 0.18),
            ],
        }
    }

    /// Electric-blue night palette.
    pub fn night() -> Self {
        Self {
            accent: Color::rgb(0x00, 0xf0, 0xff),
            accent_dim: Color::rgb(0x00, 0x88, 0xaa),
            hand: Color::WHITE,
            face: Color::rgb(0x05, 0x05, 0x0a),
            tints: [
                Color::rgba(0, 180, 255, 0.08),
                Color::rgba(0, 200, 255, 0.12),
                Color::rgba(0, 220, 255, 0.18),
            ],
        }
    }

    /// Day/night pair, starting in day mode.
    pub fn switch() -> ModeSwitch<ClockPalette> {
        ModeSwitch::new(Self::day(), Self::night())
    }
}

/// Palette-independent colors of the full face.
pub(crate) mod fixed {
    use mirror_engine::paint::Color;

    pub fn numeral() -> Color {
        Color::rgb(0x88, 0x88, 0x88)
    }

    pub fn minor_tick() -> Color {
        Color::rgb(0x55, 0x55, 0x55)
    }

    pub fn hub_inner() -> Color {
        Color::rgb(0x33, 0x33, 0x33)
    }

    /// Bezel gradient stops, top-left to bottom-right.
    pub fn bezel() -> [(f32, Color); 5] {
        [
            (0.0, Color::rgb(0x4a, 0x4a, 0x4a)),
            (0.3, Color::rgb(0x3a, 0x3a, 0x3a)),
            (0.5, Color::rgb(0x55, 0x55, 0x55)),
            (0.7, Color::rgb(0x3a, 0x3a, 0x3a)),
            (1.0, Color::rgb(0x2a, 0x2a, 0x2a)),
        ]
    }

    /// Dial glow stops, center outwards.
    pub fn dial() -> [(f32, Color); 3] {
        [
            (0.0, Color::rgba(0, 40, 0, 0.3)),
            (0.4, Color::rgba(0, 20, 0, 0.2)),
            (1.0, Color::BLACK),
        ]
    }
}
