//! Animated analog clocks.
//!
//! One [`AnalogClock`] type drives both dials: the full face in the vision
//! panel and the compact face in the mini slot. Each instance owns its canvas,
//! its frame scheduler and its draw list.

pub mod angles;
pub mod face;
pub mod hands;
pub mod palette;

use std::rc::Rc;
use std::time::Duration;

use mirror_engine::scene::DrawList;
use mirror_engine::text::FontId;
use mirror_engine::time::{FrameScheduler, FrameVerdict};

use crate::canvas::{Canvas, PanelLayout};
use crate::error::ClockError;
use crate::mode::ModeSwitch;
use crate::state::{DashboardState, VisionView};
use crate::time_source::TimeSource;
use crate::widget::Widget;

use angles::{HandAngles, WallTime};
use hands::HandSet;
use palette::ClockPalette;

/// Which dial an [`AnalogClock`] draws.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FaceStyle {
    /// Bezel, numerals, ticks, dial circles, cardinal marks.
    Full,
    /// Border ring, four dots, three hands.
    Compact,
}

/// Canvas-backed analog clock.
pub struct AnalogClock {
    panel: String,
    style: FaceStyle,
    /// `None` when the panel could not be resolved; the clock is then inert.
    canvas: Option<Canvas>,
    scheduler: FrameScheduler,
    palettes: ModeSwitch<ClockPalette>,
    font: Option<FontId>,
    time: Rc<dyn TimeSource>,
    list: DrawList,
}

impl AnalogClock {
    /// Binds a clock to `panel`.
    ///
    /// A missing panel is logged and yields an inert clock that never draws,
    /// so the rest of the dashboard keeps running.
    pub fn new(
        layout: &PanelLayout,
        panel: &str,
        style: FaceStyle,
        time: Rc<dyn TimeSource>,
        frame_interval: Duration,
    ) -> Self {
        match Self::try_new(layout, panel, style, time.clone(), frame_interval) {
            Ok(clock) => clock,
            Err(err) => {
                log::error!("analog clock disabled: {err}");
                let mut scheduler = FrameScheduler::new(frame_interval);
                scheduler.stop();
                Self {
                    panel: panel.to_string(),
                    style,
                    canvas: None,
                    scheduler,
                    palettes: ClockPalette::switch(),
                    font: None,
                    time,
                    list: DrawList::new(),
                }
            }
        }
    }

    pub fn try_new(
        layout: &PanelLayout,
        panel: &str,
        style: FaceStyle,
        time: Rc<dyn TimeSource>,
        frame_interval: Duration,
    ) -> Result<Self, ClockError> {
        let rect = layout.panel(panel).ok_or_else(|| ClockError::PanelNotFound(panel.to_string()))?;
        let canvas = Canvas::from_rect(rect);
        log::debug!("{style:?} clock bound to `{panel}` ({}x{})", canvas.width, canvas.height);

        Ok(Self {
            panel: panel.to_string(),
            style,
            canvas: Some(canvas),
            scheduler: FrameScheduler::new(frame_interval),
            palettes: ClockPalette::switch(),
            font: None,
            time,
            list: DrawList::new(),
        })
    }

    /// Font for the hour numerals. Without one the numerals are left out.
    pub fn with_font(mut self, font: Option<FontId>) -> Self {
        self.font = font;
        self
    }

    #[inline]
    pub fn is_inert(&self) -> bool {
        self.canvas.is_none()
    }

    #[inline]
    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    #[inline]
    pub fn style(&self) -> FaceStyle {
        self.style
    }

    /// Selects the night palette for the next draw. Does not redraw.
    pub fn set_night_mode(&mut self, enabled: bool) {
        self.palettes.set_night_mode(enabled);
    }

    #[inline]
    pub fn is_night(&self) -> bool {
        self.palettes.is_night()
    }

    #[inline]
    pub fn palette(&self) -> &ClockPalette {
        self.palettes.active()
    }

    /// Re-measures the container and applies the size to the canvas.
    ///
    /// A running clock redraws on the next offered frame.
    pub fn resize(&mut self, layout: &PanelLayout) {
        if self.canvas.is_none() {
            return;
        }
        if let Some(rect) = layout.panel(&self.panel) {
            let canvas = Canvas::from_rect(rect);
            if self.canvas != Some(canvas) {
                log::debug!("clock `{}` resized to {}x{}", self.panel, canvas.width, canvas.height);
                self.canvas = Some(canvas);
                if self.scheduler.is_running() {
                    self.scheduler.start();
                }
            }
        }
    }

    /// Same as [`resize`](Self::resize).
    pub fn refresh(&mut self, layout: &PanelLayout) {
        self.resize(layout);
    }

    /// Cancels future frames. Safe to call repeatedly.
    pub fn stop_animation(&mut self) {
        self.scheduler.stop();
    }

    /// Resumes a stopped clock; the next offered frame draws. No-op when inert.
    pub fn start_animation(&mut self) {
        if self.canvas.is_some() {
            self.scheduler.start();
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Offers one display frame. Returns `true` when the draw list was rebuilt.
    pub fn on_animation_frame(&mut self, now: Duration) -> bool {
        match self.scheduler.on_frame(now) {
            FrameVerdict::Draw => {
                self.redraw();
                true
            }
            FrameVerdict::Skip | FrameVerdict::Stopped => false,
        }
    }

    #[inline]
    pub fn draw_list(&self) -> &DrawList {
        &self.list
    }

    fn redraw(&mut self) {
        self.list.clear();
        let Some(canvas) = self.canvas else { return };
        if canvas.is_empty() {
            return;
        }

        let wall = WallTime::from_timelike(&self.time.now());
        let angles = HandAngles::at(wall);
        let palette = self.palettes.active();
        let r = canvas.base_radius();

        self.list.push_clip(canvas.rect());
        match self.style {
            FaceStyle::Full => {
                face::draw_face(&mut self.list, &canvas, palette, self.font);
                hands::draw_hands(&mut self.list, canvas.center(), angles, &HandSet::full(r), palette);
            }
            FaceStyle::Compact => {
                face::draw_compact_face(&mut self.list, &canvas, palette);
                hands::draw_hands(&mut self.list, canvas.center(), angles, &HandSet::compact(r), palette);
            }
        }
        self.list.pop_clip();
    }
}

impl Widget for AnalogClock {
    fn name(&self) -> &'static str {
        match self.style {
            FaceStyle::Full => "analog clock",
            FaceStyle::Compact => "mini clock",
        }
    }

    fn update(&mut self, state: &DashboardState) {
        self.set_night_mode(state.night_mode);

        // The compact clock is always on screen; the full one only in its view.
        let visible = !state.sleeping
            && (self.style == FaceStyle::Compact || state.view == VisionView::AnalogClock);
        // A running clock keeps its cadence; the palette shows on the next scheduled frame.
        if !visible {
            self.stop_animation();
        } else if !self.is_animating() {
            self.start_animation();
        }
    }

    fn resize(&mut self, layout: &PanelLayout) {
        AnalogClock::resize(self, layout);
    }

    fn on_animation_frame(&mut self, now: Duration) -> bool {
        AnalogClock::on_animation_frame(self, now)
    }

    fn is_running(&self) -> bool {
        self.is_animating()
    }

    fn draw_list(&self) -> &DrawList {
        &self.list
    }
}
