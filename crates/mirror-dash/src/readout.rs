use std::rc::Rc;
use std::time::Duration;

use chrono::NaiveDateTime;
use mirror_engine::coords::Vec2;
use mirror_engine::scene::shapes::TextAnchor;
use mirror_engine::scene::{DrawList, ZIndex};
use mirror_engine::text::FontId;
use mirror_engine::time::{FrameScheduler, FrameVerdict};

use crate::canvas::{Canvas, PanelLayout};
use crate::clock::palette::ClockPalette;
use crate::error::ClockError;
use crate::mode::ModeSwitch;
use crate::state::DashboardState;
use crate::time_source::TimeSource;
use crate::widget::Widget;

/// The header only changes once a minute; one check per second is plenty.
pub const READOUT_INTERVAL: Duration = Duration::from_secs(1);

/// `02:30 PM`
pub fn format_time(at: &NaiveDateTime) -> String {
    at.format("%I:%M %p").to_string()
}

/// `Tuesday, March 5, 2024`
pub fn format_date(at: &NaiveDateTime) -> String {
    at.format("%A, %B %-d, %Y").to_string()
}

/// Digital time, date and current view title in the header strip.
pub struct Readout {
    canvas: Option<Canvas>,
    font: Option<FontId>,
    time: Rc<dyn TimeSource>,
    palettes: ModeSwitch<ClockPalette>,
    title: &'static str,
    scheduler: FrameScheduler,
    list: DrawList,
}

impl Readout {
    pub fn new(layout: &PanelLayout, font: Option<FontId>, time: Rc<dyn TimeSource>) -> Self {
        let mut readout = Self {
            canvas: None,
            font,
            time,
            palettes: ClockPalette::switch(),
            title: DashboardState::default().view.title(),
            scheduler: FrameScheduler::new(READOUT_INTERVAL),
            list: DrawList::new(),
        };
        let bound = match (layout.panel(PanelLayout::HEADER), font) {
            (None, _) => Err(ClockError::PanelNotFound(PanelLayout::HEADER.to_string())),
            (_, None) => Err(ClockError::MissingFont("readout")),
            (Some(rect), Some(_)) => Ok(Canvas::from_rect(rect)),
        };
        match bound {
            Ok(canvas) => readout.canvas = Some(canvas),
            Err(err) => {
                log::error!("readout disabled: {err}");
                readout.scheduler.stop();
            }
        }
        readout
    }

    #[inline]
    pub fn is_inert(&self) -> bool {
        self.canvas.is_none()
    }

    #[inline]
    pub fn title(&self) -> &'static str {
        self.title
    }

    fn redraw(&mut self) {
        self.list.clear();
        let (Some(canvas), Some(font)) = (self.canvas, self.font) else { return };
        if canvas.is_empty() {
            return;
        }

        let now = self.time.now();
        let palette = self.palettes.active();
        let rect = canvas.rect();
        let h = rect.size.y;
        let pad = h * 0.12;
        let z = ZIndex::CONTENT;

        self.list.push_clip(rect);
        self.list.push_text(
            z,
            format_time(&now),
            font,
            h * 0.5,
            palette.accent,
            Vec2::new(rect.origin.x + pad, rect.origin.y + pad * 0.5),
            TextAnchor::TopLeft,
        );
        self.list.push_text(
            z,
            format_date(&now),
            font,
            h * 0.22,
            palette.accent_dim,
            Vec2::new(rect.origin.x + pad, rect.origin.y + h * 0.62),
            TextAnchor::TopLeft,
        );
        self.list.push_text(
            z,
            self.title,
            font,
            h * 0.28,
            palette.hand,
            Vec2::new(rect.origin.x + rect.size.x * 0.7, rect.center().y),
            TextAnchor::Center,
        );
        self.list.pop_clip();
    }
}

impl Widget for Readout {
    fn name(&self) -> &'static str {
        "readout"
    }

    fn update(&mut self, state: &DashboardState) {
        self.palettes.set_night_mode(state.night_mode);
        self.title = state.view.title();
        if self.is_inert() {
            return;
        }
        if state.sleeping {
            self.scheduler.stop();
        } else if !self.scheduler.is_running() {
            self.scheduler.start();
        }
    }

    fn resize(&mut self, layout: &PanelLayout) {
        if self.canvas.is_some() {
            self.canvas = Some(Canvas::from_rect(layout.header));
            if self.scheduler.is_running() {
                self.scheduler.start();
            }
        }
    }

    fn on_animation_frame(&mut self, now: Duration) -> bool {
        match self.scheduler.on_frame(now) {
            FrameVerdict::Draw => {
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
    use chrono::NaiveDate;
    use mirror_engine::scene::DrawCmd;

    use crate::state::VisionView;
    use crate::time_source::{source_for_offset, ManualTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn texts(list: &DrawList) -> Vec<String> {
        list.items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect()
    }

    // ── formatting ────────────────────────────────────────────────────────

    #[test]
    fn twelve_hour_time_with_leading_zero() {
        assert_eq!(format_time(&at(14, 30)), "02:30 PM");
        assert_eq!(format_time(&at(0, 5)), "12:05 AM");
        assert_eq!(format_time(&at(12, 0)), "12:00 PM");
    }

    #[test]
    fn long_date_without_day_padding() {
        assert_eq!(format_date(&at(9, 0)), "Tuesday, March 5, 2024");
    }

    #[test]
    fn bad_offset_falls_back_to_local_time() {
        // The fallback source must behave like local time, not panic or stall.
        let src = source_for_offset(Some("Mars/Olympus"));
        let local = chrono::Local::now().naive_local();
        assert!((src.now() - local).num_seconds().abs() <= 1);
    }

    // ── widget ────────────────────────────────────────────────────────────

    fn readout() -> Readout {
        let layout = PanelLayout::compute(1280.0, 720.0);
        Readout::new(&layout, Some(FontId::from_index(0)), Rc::new(ManualTime::new(at(14, 30))))
    }

    #[test]
    fn draws_time_date_and_title() {
        let mut r = readout();
        assert!(r.on_animation_frame(Duration::ZERO));
        assert_eq!(
            texts(r.draw_list()),
            vec!["02:30 PM".to_string(), "Tuesday, March 5, 2024".to_string(), "ANALOG CLOCK".to_string()],
        );
    }

    #[test]
    fn view_change_shows_on_next_scheduled_frame() {
        let mut r = readout();
        r.on_animation_frame(Duration::ZERO);
        r.update(&DashboardState { view: VisionView::Matrix, ..DashboardState::default() });
        assert!(!r.on_animation_frame(Duration::from_millis(5)));
        assert_eq!(texts(r.draw_list())[2], "ANALOG CLOCK");

        assert!(r.on_animation_frame(READOUT_INTERVAL));
        assert_eq!(texts(r.draw_list())[2], "MATRIX");
    }

    #[test]
    fn waking_restarts_readout() {
        let mut r = readout();
        r.update(&DashboardState { sleeping: true, ..DashboardState::default() });
        r.update(&DashboardState::default());
        assert!(r.is_running());
        assert!(r.on_animation_frame(Duration::from_secs(60)));
    }

    #[test]
    fn night_mode_uses_night_accent() {
        let mut r = readout();
        r.update(&DashboardState { night_mode: true, ..DashboardState::default() });
        r.on_animation_frame(Duration::ZERO);
        let DrawCmd::Text(t) = &r.draw_list().items()[0].cmd else { panic!("expected text") };
        assert_eq!(t.color, ClockPalette::night().accent);
    }

    #[test]
    fn missing_font_is_inert() {
        let layout = PanelLayout::compute(1280.0, 720.0);
        let mut r = Readout::new(&layout, None, Rc::new(ManualTime::new(at(1, 0))));
        assert!(r.is_inert());
        r.update(&DashboardState::default());
        assert!(!r.on_animation_frame(Duration::ZERO));
    }

    #[test]
    fn sleeping_stops_readout() {
        let mut r = readout();
        r.update(&DashboardState { sleeping: true, ..DashboardState::default() });
        assert!(!r.is_running());
    }
}
