//! Static geometry of the full dial and the compact dial.
//!
//! Every radius, offset and stroke width of the full face is a fraction of the
//! canvas base radius, so the face scales uniformly with its panel.

use std::f32::consts::PI;

use mirror_engine::coords::Vec2;
use mirror_engine::paint::{Color, ColorStop, LinearGradient, Paint, RadialGradient};
use mirror_engine::scene::shapes::{CircleCmd, LineCap, LineCmd, TextAnchor};
use mirror_engine::scene::{DrawCmd, DrawList, ZIndex};
use mirror_engine::text::FontId;

use super::angles::{direction, marker_angle};
use super::palette::{fixed, ClockPalette};
use crate::canvas::Canvas;

/// Layer all clock geometry is recorded on; paint order is insertion order.
pub(crate) const CLOCK_LAYER: ZIndex = ZIndex::CONTENT;

/// Full-face proportions, as fractions of the base radius.
mod full {
    pub const BEZEL_OUTER: f32 = 1.125;
    pub const BEZEL_INNER: f32 = 1.04;
    pub const NUMERAL_RADIUS: f32 = 1.085;
    pub const NUMERAL_SIZE: f32 = 0.05;
    pub const TICK_INNER: f32 = 1.05;
    pub const TICK_OUTER: f32 = 1.07;
    pub const TICK_WIDTH: f32 = 0.005;
    pub const ACCENT_RING: f32 = 1.025;
    pub const ACCENT_WIDTH: f32 = 0.01;
    pub const DIAL: f32 = 1.015;
    pub const TINTS: [f32; 3] = [0.45, 0.30, 0.16];
    pub const TRIANGLE_TOP: f32 = 0.95;
    pub const TRIANGLE_HEIGHT: f32 = 0.06;
    pub const TRIANGLE_HALF_WIDTH: f32 = 0.035;
    pub const MARK_RADIUS: f32 = 0.88;
    pub const MARK_HALF_LENGTH: f32 = 0.04;
    pub const MARK_WIDTH: f32 = 0.015;
    pub const DOT_RADIUS: f32 = 0.88;
    pub const DOT_CARDINAL: f32 = 0.02;
    pub const DOT_REGULAR: f32 = 0.015;
    pub const GLOW_INSET: f32 = 0.01;
    pub const GLOW_WIDTH: f32 = 0.03;
}

/// Peak opacity of the bezel glow.
const GLOW_ALPHA: f32 = 0x40 as f32 / 255.0;
const GLOW_SEGMENTS: usize = 32;

/// `(start, end, side)` of the two glow arcs; `side` is -1 for the left edge.
const GLOW_ARCS: [(f32, f32, f32); 2] = [(PI * 0.6, PI * 1.4, -1.0), (-PI * 0.4, PI * 0.4, 1.0)];

/// Compact-face sizes. Hand and dot sizes are absolute pixels.
mod compact {
    pub const DOT_RADIUS: f32 = 0.8;
    pub const DOT_SIZE: f32 = 3.0;
    pub const BORDER_WIDTH: f32 = 2.0;
}

const NUMERALS: [&str; 12] = ["12", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11"];

fn stops(raw: &[(f32, Color)]) -> Vec<ColorStop> {
    raw.iter().map(|&(t, c)| ColorStop::new(t, c)).collect()
}

/// Records the full dial, back to front.
///
/// Numerals are skipped when no font is bound.
pub fn draw_face(list: &mut DrawList, canvas: &Canvas, palette: &ClockPalette, font: Option<FontId>) {
    let z = CLOCK_LAYER;
    let c = canvas.center();
    let r = canvas.base_radius();

    list.push_rect(z, canvas.rect(), Color::BLACK);

    // Bezel
    let bezel = r * full::BEZEL_OUTER;
    let gradient = LinearGradient::new(
        c - Vec2::new(bezel, bezel),
        c + Vec2::new(bezel, bezel),
        stops(&fixed::bezel()),
    );
    list.push(
        z,
        DrawCmd::Circle(CircleCmd::new(c, bezel, r * full::BEZEL_INNER, Paint::LinearGradient(gradient))),
    );
    for seg in glow_arcs(c, r, palette.accent) {
        list.push(z, DrawCmd::Line(seg));
    }

    if let Some(font) = font {
        for (i, label) in NUMERALS.iter().enumerate() {
            let pos = c.polar(marker_angle(i as u32, 12), r * full::NUMERAL_RADIUS);
            list.push_text(z, *label, font, r * full::NUMERAL_SIZE, fixed::numeral(), pos, TextAnchor::Center);
        }
    }

    for i in (0..60).filter(|i| i % 5 != 0) {
        let d = direction(marker_angle(i, 60));
        list.push_line(
            z,
            c + d * (r * full::TICK_INNER),
            c + d * (r * full::TICK_OUTER),
            r * full::TICK_WIDTH,
            fixed::minor_tick(),
            LineCap::Butt,
        );
    }

    list.push_ring(z, c, r * full::ACCENT_RING, r * full::ACCENT_WIDTH, palette.accent);

    // Dial: opaque disc under the translucent glow
    let dial = r * full::DIAL;
    list.push_disc(z, c, dial, Color::BLACK);
    list.push_circle(z, c, dial, Paint::RadialGradient(RadialGradient::new(c, 0.0, r, stops(&fixed::dial()))));

    for (fraction, tint) in full::TINTS.iter().zip(palette.tints) {
        list.push_disc(z, c, r * fraction, tint);
    }

    draw_cardinal_marks(list, c, r, palette);

    for i in 0..12 {
        let size = if i % 3 == 0 { full::DOT_CARDINAL } else { full::DOT_REGULAR };
        let pos = c.polar(marker_angle(i, 12), r * full::DOT_RADIUS);
        list.push_disc(z, pos, r * size, palette.accent);
    }
}

/// Accent glow along the left and right edges of the bezel.
///
/// The stroke fades in and out across the bezel band horizontally, so only the
/// stretch of each arc that lies inside the band shows. Fully transparent
/// segments are not emitted.
pub(crate) fn glow_arcs(c: Vec2, r: f32, accent: Color) -> Vec<LineCmd> {
    let outer = r * full::BEZEL_OUTER;
    let inner = r * full::BEZEL_INNER;
    let radius = outer - r * full::GLOW_INSET;

    let mut segments = Vec::new();
    for (start, end, side) in GLOW_ARCS {
        let step = (end - start) / GLOW_SEGMENTS as f32;
        for k in 0..GLOW_SEGMENTS {
            let a0 = start + step * k as f32;
            let a1 = a0 + step;
            let mid = c.polar((a0 + a1) * 0.5, radius);
            let depth = (side * (mid.x - c.x) - inner) / (outer - inner);
            let weight = glow_weight(depth);
            if weight <= 0.0 {
                continue;
            }
            segments.push(LineCmd {
                from: c.polar(a0, radius),
                to: c.polar(a1, radius),
                width: r * full::GLOW_WIDTH,
                color: accent.with_alpha(GLOW_ALPHA * weight),
                cap: LineCap::Butt,
            });
        }
    }
    segments
}

/// Transparent at both edges of the band, peak in the middle.
fn glow_weight(t: f32) -> f32 {
    if (0.0..=1.0).contains(&t) { 1.0 - (2.0 * t - 1.0).abs() } else { 0.0 }
}

fn draw_cardinal_marks(list: &mut DrawList, c: Vec2, r: f32, palette: &ClockPalette) {
    let z = CLOCK_LAYER;

    // 12: triangle pointing at the center
    let top = c.y - r * full::TRIANGLE_TOP;
    let half = r * full::TRIANGLE_HALF_WIDTH;
    list.push_triangle(
        z,
        [
            Vec2::new(c.x, top + r * full::TRIANGLE_HEIGHT),
            Vec2::new(c.x - half, top),
            Vec2::new(c.x + half, top),
        ],
        palette.accent,
    );

    let len = r * full::MARK_HALF_LENGTH;
    let width = r * full::MARK_WIDTH;
    let mark = r * full::MARK_RADIUS;

    // 6: vertical
    let six = Vec2::new(c.x, c.y + mark);
    list.push_line(z, six - Vec2::new(0.0, len), six + Vec2::new(0.0, len), width, palette.accent, LineCap::Round);

    // 9 and 3: horizontal
    for x in [c.x - mark, c.x + mark] {
        let p = Vec2::new(x, c.y);
        list.push_line(z, p - Vec2::new(len, 0.0), p + Vec2::new(len, 0.0), width, palette.accent, LineCap::Round);
    }
}

/// Records the compact dial: background, border ring and four cardinal dots.
pub fn draw_compact_face(list: &mut DrawList, canvas: &Canvas, palette: &ClockPalette) {
    let z = CLOCK_LAYER;
    let c = canvas.center();
    let r = canvas.base_radius();

    list.push_rect(z, canvas.rect(), Color::BLACK);
    list.push_ring(z, c, r, compact::BORDER_WIDTH, palette.accent);
    for i in [0, 3, 6, 9] {
        let pos = c.polar(marker_angle(i, 12), r * compact::DOT_RADIUS);
        list.push_disc(z, pos, compact::DOT_SIZE, palette.accent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_engine::coords::Rect;

    fn canvas(w: f32, h: f32) -> Canvas {
        Canvas::from_rect(Rect::new(0.0, 0.0, w, h))
    }

    fn kinds(list: &DrawList) -> Vec<&'static str> {
        list.items()
            .iter()
            .map(|i| match &i.cmd {
                DrawCmd::Rect(_) => "rect",
                DrawCmd::Circle(_) => "circle",
                DrawCmd::Line(_) => "line",
                DrawCmd::Triangle(_) => "triangle",
                DrawCmd::Text(_) => "text",
                DrawCmd::Glyph(_) => "glyph",
            })
            .collect()
    }

    // ── full face ─────────────────────────────────────────────────────────

    #[test]
    fn full_face_draw_order() {
        let mut list = DrawList::new();
        draw_face(&mut list, &canvas(400.0, 400.0), &ClockPalette::day(), Some(FontId::from_index(0)));

        let k = kinds(&list);
        let glow = glow_arcs(Vec2::new(200.0, 200.0), 168.0, ClockPalette::day().accent).len();
        assert!(glow > 0);
        let mut expected = vec!["rect", "circle"];
        expected.extend(std::iter::repeat_n("line", glow));
        expected.extend(["text"; 12]);
        expected.extend(["line"; 48]);
        expected.push("circle"); // accent ring
        expected.extend(["circle"; 2]); // dial
        expected.extend(["circle"; 3]); // tints
        expected.push("triangle");
        expected.extend(["line"; 3]);
        expected.extend(["circle"; 12]);
        assert_eq!(k, expected);
    }

    #[test]
    fn numerals_start_at_twelve_on_top() {
        let mut list = DrawList::new();
        let cv = canvas(400.0, 400.0);
        draw_face(&mut list, &cv, &ClockPalette::day(), Some(FontId::from_index(0)));
        let texts: Vec<_> = list
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Text(t) => Some(t),
                _ => None,
            })
            .collect();
        assert_eq!(texts[0].text, "12");
        assert_eq!(texts[11].text, "11");
        assert!(texts[0].origin.y < cv.center().y);
        assert!((texts[0].origin.x - cv.center().x).abs() < 1e-3);
        assert!(texts.iter().all(|t| t.anchor == TextAnchor::Center));
    }

    #[test]
    fn face_without_font_skips_numerals() {
        let mut list = DrawList::new();
        let cv = canvas(300.0, 300.0);
        draw_face(&mut list, &cv, &ClockPalette::day(), None);
        assert!(!kinds(&list).contains(&"text"));
        let glow = glow_arcs(cv.center(), cv.base_radius(), ClockPalette::day().accent).len();
        assert_eq!(list.len(), 2 + glow + 48 + 1 + 2 + 3 + 1 + 3 + 12);
    }

    #[test]
    fn cardinal_dots_are_larger() {
        let mut list = DrawList::new();
        draw_face(&mut list, &canvas(400.0, 400.0), &ClockPalette::day(), None);
        let dots: Vec<f32> = list.items()[list.len() - 12..]
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Circle(c) => Some(c.radius),
                _ => None,
            })
            .collect();
        assert_eq!(dots.len(), 12);
        for (i, r) in dots.iter().enumerate() {
            if i % 3 == 0 {
                assert!(*r > dots[1], "dot {i}");
            } else {
                assert_eq!(*r, dots[1]);
            }
        }
    }

    #[test]
    fn tints_follow_palette() {
        let night = ClockPalette::night();
        let mut list = DrawList::new();
        draw_face(&mut list, &canvas(400.0, 400.0), &night, None);
        let tint_colors: Vec<Color> = list
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Circle(c) => match &c.paint {
                    Paint::Solid(col) if night.tints.contains(col) => Some(*col),
                    _ => None,
                },
                _ => None,
            })
            .collect();
        assert_eq!(tint_colors, night.tints.to_vec());
    }

    #[test]
    fn background_is_black_in_both_modes() {
        for palette in [ClockPalette::day(), ClockPalette::night()] {
            let mut list = DrawList::new();
            draw_face(&mut list, &canvas(200.0, 200.0), &palette, None);
            let DrawCmd::Rect(bg) = &list.items()[0].cmd else { panic!("expected background") };
            assert_eq!(bg.color, Color::BLACK);
        }
    }

    // ── glow ──────────────────────────────────────────────────────────────

    #[test]
    fn glow_sits_on_left_and_right_edges_only() {
        let c = Vec2::new(200.0, 200.0);
        let segs = glow_arcs(c, 168.0, ClockPalette::night().accent);
        let left = segs.iter().filter(|s| s.from.x < c.x).count();
        assert!(left > 0);
        assert_eq!(left * 2, segs.len(), "arcs are mirror images");
        for s in &segs {
            let mid = (s.from + s.to) * 0.5;
            let off_axis = (mid.y - c.y).abs() / (mid - c).length();
            assert!(off_axis < 0.4, "segment too far from the horizontal axis");
            assert!(s.color.a > 0.0 && s.color.a <= GLOW_ALPHA + 1e-6);
        }
    }

    #[test]
    fn glow_is_tinted_by_palette() {
        let c = Vec2::new(100.0, 100.0);
        let day = glow_arcs(c, 84.0, ClockPalette::day().accent);
        let night = glow_arcs(c, 84.0, ClockPalette::night().accent);
        assert_eq!(day.len(), night.len());
        assert_ne!(day[0].color, night[0].color);
    }

    #[test]
    fn glow_weight_fades_at_band_edges() {
        assert_eq!(glow_weight(-0.1), 0.0);
        assert_eq!(glow_weight(0.0), 0.0);
        assert_eq!(glow_weight(0.5), 1.0);
        assert_eq!(glow_weight(1.0), 0.0);
        assert_eq!(glow_weight(1.5), 0.0);
    }

    // ── compact face ──────────────────────────────────────────────────────

    #[test]
    fn compact_face_has_ring_and_four_dots() {
        let mut list = DrawList::new();
        let cv = canvas(120.0, 120.0);
        draw_compact_face(&mut list, &cv, &ClockPalette::day());
        assert_eq!(kinds(&list), vec!["rect", "circle", "circle", "circle", "circle", "circle"]);
        let DrawCmd::Rect(bg) = &list.items()[0].cmd else { panic!("expected background") };
        assert_eq!(bg.color, Color::BLACK);

        let DrawCmd::Circle(ring) = &list.items()[1].cmd else { panic!("expected ring") };
        assert!(ring.is_ring());
        let DrawCmd::Circle(top) = &list.items()[2].cmd else { panic!("expected dot") };
        assert!(top.center.y < cv.center().y);
        assert!((cv.center().y - top.center.y - cv.base_radius() * 0.8).abs() < 1e-3);
    }
}
