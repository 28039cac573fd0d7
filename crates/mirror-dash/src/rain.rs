//! Falling-glyph background.
//!
//! Each column has a head row that advances one row per accepted frame and
//! writes a random glyph where it lands. Trails fade geometrically behind
//! the head and are dropped once they fall under the visibility floor.

use std::collections::VecDeque;
use std::time::Duration;

use mirror_engine::coords::Vec2;
use mirror_engine::paint::Color;
use mirror_engine::scene::{DrawList, ZIndex};
use mirror_engine::text::FontId;
use mirror_engine::time::{FrameScheduler, FrameVerdict};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::canvas::{Canvas, PanelLayout};
use crate::error::ClockError;
use crate::mode::ModeSwitch;
use crate::state::DashboardState;
use crate::widget::Widget;

/// Katakana, digits and Latin capitals.
pub const DEFAULT_CHARSET: &str = "アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Trail glyphs dimmer than this are not drawn.
pub const VISIBILITY_FLOOR: f32 = 0.05;

/// Chance per frame that a column past the bottom edge starts over is `1 - RESET_THRESHOLD`.
const RESET_THRESHOLD: f32 = 0.975;

/// Glyph color and per-row trail fade.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RainStyle {
    pub color: Color,
    pub fade: f32,
}

impl RainStyle {
    pub fn day() -> Self {
        Self { color: Color::rgb(0x00, 0xff, 0x00), fade: 0.05 }
    }

    pub fn night() -> Self {
        Self { color: Color::rgb(0x00, 0xf0, 0xff), fade: 0.03 }
    }

    /// Opacity of the glyph `k` rows behind the head.
    #[inline]
    pub fn trail_alpha(&self, k: usize) -> f32 {
        (1.0 - self.fade).powi(k as i32)
    }

    /// Number of trail glyphs at or above the visibility floor.
    pub fn visible_trail_len(&self) -> usize {
        let keep = 1.0 - self.fade.clamp(0.001, 1.0);
        if keep <= 0.0 {
            return 1;
        }
        (VISIBILITY_FLOOR.ln() / keep.ln()).floor() as usize + 1
    }
}

#[derive(Debug, Clone)]
struct RainColumn {
    head: i32,
    /// Written glyphs, newest first, with the row they were written at.
    trail: VecDeque<(i32, char)>,
}

/// Matrix rain over the whole window.
pub struct MatrixRain {
    panel: String,
    canvas: Option<Canvas>,
    font: Option<FontId>,
    font_size: f32,
    charset: Vec<char>,
    columns: Vec<RainColumn>,
    rng: StdRng,
    styles: ModeSwitch<RainStyle>,
    scheduler: FrameScheduler,
    list: DrawList,
}

impl MatrixRain {
    /// Binds the rain to `panel`; a missing panel or font leaves it inert.
    pub fn new(
        layout: &PanelLayout,
        panel: &str,
        font: Option<FontId>,
        font_size: f32,
        frame_interval: Duration,
        rng: StdRng,
    ) -> Self {
        let mut rain = Self {
            panel: panel.to_string(),
            canvas: None,
            font,
            font_size: font_size.max(1.0),
            charset: DEFAULT_CHARSET.chars().collect(),
            columns: Vec::new(),
            rng,
            styles: ModeSwitch::new(RainStyle::day(), RainStyle::night()),
            scheduler: FrameScheduler::new(frame_interval),
            list: DrawList::new(),
        };

        let bound = match (layout.panel(panel), font) {
            (None, _) => Err(ClockError::PanelNotFound(panel.to_string())),
            (_, None) => Err(ClockError::MissingFont("matrix rain")),
            (Some(rect), Some(_)) => Ok(Canvas::from_rect(rect)),
        };
        match bound {
            Ok(canvas) => {
                rain.canvas = Some(canvas);
                rain.reset_columns();
            }
            Err(err) => {
                log::error!("matrix rain disabled: {err}");
                rain.scheduler.stop();
            }
        }
        rain
    }

    /// Seeds from the operating system.
    pub fn os_rng() -> StdRng {
        StdRng::from_rng(&mut rand::rng())
    }

    #[inline]
    pub fn is_inert(&self) -> bool {
        self.canvas.is_none()
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Drops glyphs `supports` rejects. An empty result leaves the rain blank.
    pub fn filter_charset(&mut self, supports: impl Fn(char) -> bool) {
        let before = self.charset.len();
        self.charset.retain(|&c| supports(c));
        if self.charset.len() != before {
            log::info!("rain charset: {} of {before} glyphs renderable", self.charset.len());
        }
        if self.charset.is_empty() {
            log::warn!("bound font renders none of the rain glyphs");
        }
    }

    pub fn set_night_mode(&mut self, enabled: bool) {
        self.styles.set_night_mode(enabled);
    }

    #[inline]
    pub fn style(&self) -> &RainStyle {
        self.styles.active()
    }

    /// Re-measures the bound panel and re-creates columns when it changed.
    pub fn resize(&mut self, layout: &PanelLayout) {
        let Some(old) = self.canvas else { return };
        let Some(rect) = layout.panel(&self.panel) else { return };
        let canvas = Canvas::from_rect(rect);
        if canvas != old {
            self.canvas = Some(canvas);
            self.reset_columns();
            log::debug!("rain resized to {} columns", self.columns.len());
        }
    }

    fn reset_columns(&mut self) {
        let width = self.canvas.map_or(0, |c| c.width) as f32;
        let count = (width / self.font_size).floor() as usize;
        let rng = &mut self.rng;
        self.columns = (0..count)
            .map(|_| RainColumn { head: rng.random_range(-100..0), trail: VecDeque::new() })
            .collect();
    }

    /// Advances every column by one row.
    fn step(&mut self) {
        let Some(canvas) = self.canvas else { return };
        let height = canvas.height as f32;
        let keep = self.styles.active().visible_trail_len();

        for col in &mut self.columns {
            if !self.charset.is_empty() {
                let ch = self.charset[self.rng.random_range(0..self.charset.len())];
                col.trail.push_front((col.head, ch));
                col.trail.truncate(keep);
            }

            let y = col.head as f32 * self.font_size;
            if y > height && self.rng.random::<f32>() > RESET_THRESHOLD {
                col.head = 0;
            }
            col.head += 1;
        }
    }

    fn redraw(&mut self) {
        self.list.clear();
        let (Some(canvas), Some(font)) = (self.canvas, self.font) else { return };
        let style = *self.styles.active();
        let fs = self.font_size;
        let bottom = canvas.height as f32 + fs;

        self.list.push_clip(canvas.rect());
        for (i, col) in self.columns.iter().enumerate() {
            let x = canvas.origin.x + i as f32 * fs;
            for (k, &(row, ch)) in col.trail.iter().enumerate() {
                let alpha = style.trail_alpha(k);
                if alpha < VISIBILITY_FLOOR {
                    break;
                }
                // `row` is the baseline row, so the glyph cell sits just above it.
                let y = row as f32 * fs;
                if y <= 0.0 || y > bottom {
                    continue;
                }
                let origin = Vec2::new(x, canvas.origin.y + y - fs);
                self.list.push_glyph(ZIndex::BACKGROUND, ch, font, fs, style.color.with_alpha(alpha), origin);
            }
        }
        self.list.pop_clip();
    }
}

impl Widget for MatrixRain {
    fn name(&self) -> &'static str {
        "matrix rain"
    }

    fn update(&mut self, state: &DashboardState) {
        self.set_night_mode(state.night_mode);
        if state.sleeping {
            self.scheduler.stop();
        } else if !self.is_inert() && !self.scheduler.is_running() {
            self.scheduler.start();
        }
    }

    fn resize(&mut self, layout: &PanelLayout) {
        MatrixRain::resize(self, layout);
    }

    fn on_animation_frame(&mut self, now: Duration) -> bool {
        match self.scheduler.on_frame(now) {
            FrameVerdict::Draw => {
                self.step();
                self.redraw();
                true
            }
            FrameVerdict::Skip | FrameVerdict::Stopped => false,
        }
    }

    fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    fn draw_list(&self) -> &DrawList {
        &self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_engine::coords::Rect;
    use mirror_engine::scene::DrawCmd;

    fn layout(w: f32, h: f32) -> PanelLayout {
        PanelLayout { screen: Rect::new(0.0, 0.0, w, h), ..PanelLayout::default() }
    }

    fn rain(w: f32, h: f32, seed: u64) -> MatrixRain {
        MatrixRain::new(
            &layout(w, h),
            PanelLayout::SCREEN,
            Some(FontId::from_index(0)),
            DEFAULT_FONT_SIZE,
            Duration::from_millis(33),
            StdRng::seed_from_u64(seed),
        )
    }

    // ── columns ───────────────────────────────────────────────────────────

    #[test]
    fn column_count_is_width_over_font_size() {
        assert_eq!(rain(1000.0, 500.0, 1).column_count(), 71);
        assert_eq!(rain(13.0, 500.0, 1).column_count(), 0);
    }

    #[test]
    fn heads_start_above_the_screen() {
        let r = rain(1400.0, 800.0, 7);
        assert!(r.columns.iter().all(|c| (-100..0).contains(&c.head)));
    }

    #[test]
    fn resize_recreates_columns() {
        let mut r = rain(700.0, 400.0, 3);
        assert_eq!(r.column_count(), 50);
        r.resize(&layout(1400.0, 400.0));
        assert_eq!(r.column_count(), 100);
        assert!(r.columns.iter().all(|c| c.trail.is_empty()));
    }

    #[test]
    fn resize_follows_the_bound_panel() {
        let bound = |vision_w: f32, screen_w: f32| PanelLayout {
            screen: Rect::new(0.0, 0.0, screen_w, 400.0),
            vision: Rect::new(0.0, 0.0, vision_w, 300.0),
            ..PanelLayout::default()
        };
        let mut r = MatrixRain::new(
            &bound(700.0, 1400.0),
            PanelLayout::VISION,
            Some(FontId::from_index(0)),
            DEFAULT_FONT_SIZE,
            Duration::from_millis(33),
            StdRng::seed_from_u64(5),
        );
        assert_eq!(r.column_count(), 50);

        r.resize(&bound(700.0, 2800.0));
        assert_eq!(r.column_count(), 50);

        r.resize(&bound(1400.0, 2800.0));
        assert_eq!(r.column_count(), 100);
    }

    // ── reset rule ────────────────────────────────────────────────────────

    #[test]
    fn head_on_screen_never_resets() {
        let mut r = rain(14.0, 140.0, 11);
        r.columns[0].head = 5;
        r.step();
        assert_eq!(r.columns[0].head, 6);
    }

    #[test]
    fn head_past_bottom_eventually_resets() {
        let mut r = rain(14.0, 140.0, 42);
        r.columns[0].head = 20;
        let mut reset = false;
        for _ in 0..2000 {
            r.step();
            if r.columns[0].head == 1 {
                reset = true;
                break;
            }
            assert!(r.columns[0].head > 20);
        }
        assert!(reset);
    }

    #[test]
    fn same_seed_same_rain() {
        let mut a = rain(280.0, 200.0, 99);
        let mut b = rain(280.0, 200.0, 99);
        for _ in 0..30 {
            a.step();
            b.step();
        }
        let heads = |r: &MatrixRain| r.columns.iter().map(|c| (c.head, c.trail.clone())).collect::<Vec<_>>();
        assert_eq!(heads(&a), heads(&b));
    }

    // ── trails ────────────────────────────────────────────────────────────

    #[test]
    fn trail_fades_geometrically() {
        let mut r = rain(14.0, 700.0, 5);
        r.columns[0].head = 10;
        for ms in [0u64, 40, 80] {
            assert!(r.on_animation_frame(Duration::from_millis(ms)));
        }
        let alphas: Vec<f32> = r
            .draw_list()
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Glyph(g) => Some(g.color.a),
                _ => None,
            })
            .collect();
        assert_eq!(alphas.len(), 3);
        assert!((alphas[0] - 1.0).abs() < 1e-5);
        assert!((alphas[1] - 0.95).abs() < 1e-5);
        assert!((alphas[2] - 0.9025).abs() < 1e-5);
    }

    #[test]
    fn trail_is_capped_at_visibility_floor() {
        let day = RainStyle::day();
        let n = day.visible_trail_len();
        assert!(day.trail_alpha(n - 1) >= VISIBILITY_FLOOR);
        assert!(day.trail_alpha(n) < VISIBILITY_FLOOR);
        assert!(RainStyle::night().visible_trail_len() > n);
    }

    #[test]
    fn night_mode_switches_color_and_fade() {
        let mut r = rain(140.0, 140.0, 1);
        r.update(&DashboardState { night_mode: true, ..DashboardState::default() });
        assert_eq!(*r.style(), RainStyle::night());
        r.set_night_mode(false);
        assert_eq!(*r.style(), RainStyle::day());
    }

    // ── charset ───────────────────────────────────────────────────────────

    #[test]
    fn charset_filter_drops_unsupported_glyphs() {
        let mut r = rain(140.0, 140.0, 1);
        r.filter_charset(|c| c.is_ascii());
        assert_eq!(r.charset.len(), 36);
        assert!(r.charset.iter().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn empty_charset_draws_nothing() {
        let mut r = rain(140.0, 700.0, 1);
        r.filter_charset(|_| false);
        for c in &mut r.columns {
            c.head = 5;
        }
        assert!(r.on_animation_frame(Duration::ZERO));
        assert!(r.draw_list().is_empty());
    }

    // ── isolation ─────────────────────────────────────────────────────────

    #[test]
    fn missing_font_leaves_rain_inert() {
        let mut r = MatrixRain::new(
            &layout(500.0, 500.0),
            PanelLayout::SCREEN,
            None,
            DEFAULT_FONT_SIZE,
            Duration::from_millis(33),
            StdRng::seed_from_u64(0),
        );
        assert!(r.is_inert());
        assert!(!r.on_animation_frame(Duration::ZERO));
        r.update(&DashboardState::default());
        assert!(!r.is_running());
    }
}
