use std::rc::Rc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use mirror_engine::core::{App as EngineApp, AppControl, FrameCtx};
use mirror_engine::input::Key;
use mirror_engine::paint::Color;
use mirror_engine::render::SceneRenderer;
use mirror_engine::scene::DrawList;
use mirror_engine::text::{FontId, FontSystem};

use crate::bedtime::BedtimeMonitor;
use crate::calendar::Calendar;
use crate::canvas::PanelLayout;
use crate::clock::{AnalogClock, FaceStyle};
use crate::config::DashboardConfig;
use crate::rain::MatrixRain;
use crate::readout::Readout;
use crate::state::DashboardState;
use crate::time_source::{source_for_offset, LocalTime, TimeSource};
use crate::widget::Widget;

// ── Dashboard ─────────────────────────────────────────────────────────────

/// The mirror dashboard: owns the widgets, the shared state and the renderer.
///
/// Every widget is built independently; one that fails to bind logs an error
/// and stays inert while the others keep running.
pub struct Dashboard {
    state: DashboardState,
    layout: PanelLayout,
    size: (f32, f32),

    rain: MatrixRain,
    clock: AnalogClock,
    mini: AnalogClock,
    readout: Readout,
    calendar: Calendar,

    bedtime: BedtimeMonitor,
    wall: Rc<dyn TimeSource>,

    fonts: FontSystem,
    renderer: SceneRenderer,
    frame: DrawList,
    /// Composition changed without any widget redrawing (e.g. a view switch).
    dirty: bool,
}

impl Dashboard {
    /// Builds the dashboard for a window of the configured size.
    ///
    /// `font` is the face used for numerals, rain glyphs and the readout; it
    /// must come from `fonts`.
    pub fn new(config: &DashboardConfig, fonts: FontSystem, font: Option<FontId>) -> Self {
        let size = (config.window.width as f32, config.window.height as f32);
        let layout = PanelLayout::compute(size.0, size.1);
        let wall: Rc<dyn TimeSource> = Rc::new(LocalTime);
        let clock_interval = config.clock.frame_interval();

        let clock = AnalogClock::new(&layout, PanelLayout::VISION, FaceStyle::Full, wall.clone(), clock_interval)
            .with_font(font);
        let mini = AnalogClock::new(&layout, PanelLayout::MINI, FaceStyle::Compact, wall.clone(), clock_interval);

        let rng = match config.rain.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => MatrixRain::os_rng(),
        };
        let rain_font = if config.rain.enabled { font } else { None };
        let mut rain = MatrixRain::new(
            &layout,
            PanelLayout::SCREEN,
            rain_font,
            config.rain.font_size,
            config.rain.frame_interval(),
            rng,
        );
        if let Some(id) = rain_font {
            rain.filter_charset(|c| fonts.has_glyph(id, c));
        }

        let readout_time = source_for_offset(config.display.utc_offset.as_deref());
        let calendar = Calendar::new(&layout, font, readout_time.clone());
        let readout = Readout::new(&layout, font, readout_time);

        let bedtime = match config.bedtime.window() {
            Ok(window) => BedtimeMonitor::new(window),
            Err(err) => {
                log::warn!("bedtime disabled: {err}");
                BedtimeMonitor::new(None)
            }
        };

        let state = DashboardState { night_mode: config.display.night_mode, ..DashboardState::default() };

        let mut dashboard = Self {
            state,
            layout,
            size,
            rain,
            clock,
            mini,
            readout,
            calendar,
            bedtime,
            wall,
            fonts,
            renderer: SceneRenderer::new(),
            frame: DrawList::new(),
            dirty: true,
        };
        dashboard.apply_state();
        for w in dashboard.widgets() {
            log::debug!("{}: {}", w.name(), if w.is_running() { "running" } else { "idle" });
        }
        dashboard
    }

    #[inline]
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    #[inline]
    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    /// Composed draw list of the last presented frame.
    #[inline]
    pub fn frame(&self) -> &DrawList {
        &self.frame
    }

    fn widgets_mut(&mut self) -> [&mut dyn Widget; 5] {
        [&mut self.rain, &mut self.clock, &mut self.mini, &mut self.readout, &mut self.calendar]
    }

    fn widgets(&self) -> [&dyn Widget; 5] {
        [&self.rain, &self.clock, &self.mini, &self.readout, &self.calendar]
    }

    /// Pushes the current state into every widget.
    fn apply_state(&mut self) {
        let state = self.state;
        for w in self.widgets_mut() {
            w.update(&state);
        }
        self.dirty = true;
    }

    /// Reacts to one key press. Returns `Exit` for Escape.
    pub fn handle_key(&mut self, key: Key) -> AppControl {
        match key {
            Key::Escape => return AppControl::Exit,
            Key::Char('n') => {
                self.state.toggle_night_mode();
                log::info!("night mode {}", if self.state.night_mode { "on" } else { "off" });
            }
            Key::ArrowRight => self.state.next_view(),
            Key::ArrowLeft => self.state.previous_view(),
            _ => return AppControl::Continue,
        }
        if matches!(key, Key::ArrowLeft | Key::ArrowRight) {
            log::info!("vision view: {}", self.state.view.title());
        }
        self.apply_state();
        AppControl::Continue
    }

    /// Re-lays out the panels for a new window size.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.size == (width, height) {
            return;
        }
        self.size = (width, height);
        self.layout = PanelLayout::compute(width, height);
        let layout = self.layout;
        for w in self.widgets_mut() {
            w.resize(&layout);
        }
        self.dirty = true;
        log::debug!("layout recomputed for {width}x{height}");
    }

    /// Runs the bedtime check and offers the frame to every widget.
    ///
    /// Returns `true` when the composed frame changed and must be presented.
    pub fn tick(&mut self, now: Duration) -> bool {
        let wall = self.wall.clone();
        if let Some(sleeping) = self.bedtime.poll(now, || wall.now().time()) {
            if sleeping != self.state.sleeping {
                self.state.sleeping = sleeping;
                log::info!("{}", if sleeping { "bedtime: going to sleep" } else { "bedtime: waking up" });
                self.apply_state();
            }
        }

        let mut changed = std::mem::take(&mut self.dirty);
        for w in self.widgets_mut() {
            changed |= w.on_animation_frame(now);
        }
        if changed {
            self.compose();
        }
        changed
    }

    /// Rebuilds the frame list from the running widgets, back to front.
    fn compose(&mut self) {
        let mut frame = std::mem::take(&mut self.frame);
        frame.clear();
        if !self.state.sleeping {
            for w in self.widgets() {
                if w.is_running() {
                    frame.extend_from(w.draw_list());
                }
            }
        }
        self.frame = frame;
    }
}

impl EngineApp for Dashboard {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        for key in [Key::Escape, Key::Char('n'), Key::ArrowLeft, Key::ArrowRight] {
            if ctx.input_frame.pressed(key) && self.handle_key(key) == AppControl::Exit {
                log::info!("exit requested");
                return AppControl::Exit;
            }
        }

        let (w, h) = ctx.window.logical_size();
        self.resize(w, h);

        if !self.tick(ctx.time.elapsed) {
            return AppControl::Continue;
        }

        let Self { renderer, frame, fonts, .. } = self;
        ctx.render(Color::BLACK, |rctx, target| {
            renderer.render(rctx, target, frame, fonts);
        })
    }
}
