use std::rc::Rc;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use mirror_engine::coords::Vec2;
use mirror_engine::paint::Color;
use mirror_engine::scene::shapes::TextAnchor;
use mirror_engine::scene::{DrawList, ZIndex};
use mirror_engine::text::FontId;
use mirror_engine::time::{FrameScheduler, FrameVerdict};

use crate::canvas::{Canvas, PanelLayout};
use crate::clock::palette::{fixed, ClockPalette};
use crate::error::ClockError;
use crate::mode::ModeSwitch;
use crate::state::DashboardState;
use crate::time_source::TimeSource;
use crate::widget::Widget;

/// The grid only changes at midnight.
pub const CALENDAR_INTERVAL: Duration = Duration::from_secs(60);

const COLUMNS: u32 = 7;

/// Number of days in `month` (1-based) of `year`; 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    match (NaiveDate::from_ymd_opt(year, month, 1), NaiveDate::from_ymd_opt(next_year, next_month, 1)) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 0,
    }
}

/// The current month as a grid of day cells, day 1 in the first cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MonthView {
    pub first: NaiveDate,
    pub days: u32,
    /// Day of the month to highlight.
    pub today: u32,
}

impl MonthView {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
            days: days_in_month(date.year(), date.month()),
            today: date.day(),
        }
    }

    /// `February 2024`
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    /// Zero-based cell of today.
    #[inline]
    pub fn today_index(&self) -> usize {
        self.today.saturating_sub(1) as usize
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.days.div_ceil(COLUMNS)
    }

    /// `(column, row)` of a zero-based cell.
    #[inline]
    pub fn cell(index: usize) -> (u32, u32) {
        let i = index as u32;
        (i % COLUMNS, i / COLUMNS)
    }
}

/// Month title and day grid with today highlighted.
pub struct Calendar {
    canvas: Option<Canvas>,
    font: Option<FontId>,
    time: Rc<dyn TimeSource>,
    palettes: ModeSwitch<ClockPalette>,
    scheduler: FrameScheduler,
    month: Option<MonthView>,
    list: DrawList,
}

impl Calendar {
    pub fn new(layout: &PanelLayout, font: Option<FontId>, time: Rc<dyn TimeSource>) -> Self {
        let mut calendar = Self {
            canvas: None,
            font,
            time,
            palettes: ClockPalette::switch(),
            scheduler: FrameScheduler::new(CALENDAR_INTERVAL),
            month: None,
            list: DrawList::new(),
        };
        let bound = match (layout.panel(PanelLayout::CALENDAR), font) {
            (None, _) => Err(ClockError::PanelNotFound(PanelLayout::CALENDAR.to_string())),
            (_, None) => Err(ClockError::MissingFont("calendar")),
            (Some(rect), Some(_)) => Ok(Canvas::from_rect(rect)),
        };
        match bound {
            Ok(canvas) => calendar.canvas = Some(canvas),
            Err(err) => {
                log::error!("calendar disabled: {err}");
                calendar.scheduler.stop();
            }
        }
        calendar
    }

    #[inline]
    pub fn is_inert(&self) -> bool {
        self.canvas.is_none()
    }

    /// Month shown by the last redraw.
    #[inline]
    pub fn month(&self) -> Option<MonthView> {
        self.month
    }

    fn redraw(&mut self) {
        self.list.clear();
        let month = MonthView::for_date(self.time.now().date());
        self.month = Some(month);

        let (Some(canvas), Some(font)) = (self.canvas, self.font) else { return };
        if canvas.is_empty() || month.days == 0 {
            return;
        }

        let palette = self.palettes.active();
        let rect = canvas.rect();
        let z = ZIndex::CONTENT;

        let title_h = rect.size.y * 0.18;
        let cell_w = rect.size.x / COLUMNS as f32;
        let cell_h = (rect.size.y - title_h) / month.rows() as f32;
        let size = cell_w.min(cell_h) * 0.45;

        self.list.push_clip(rect);
        self.list.push_text(
            z,
            month.title(),
            font,
            title_h * 0.6,
            palette.accent,
            Vec2::new(rect.center().x, rect.origin.y + title_h * 0.5),
            TextAnchor::Center,
        );

        for index in 0..month.days as usize {
            let (col, row) = MonthView::cell(index);
            let center = Vec2::new(
                rect.origin.x + (col as f32 + 0.5) * cell_w,
                rect.origin.y + title_h + (row as f32 + 0.5) * cell_h,
            );
            let color = if index == month.today_index() {
                self.list.push_disc(z, center, cell_w.min(cell_h) * 0.42, palette.accent);
                Color::BLACK
            } else {
                fixed::numeral()
            };
            self.list.push_text(z, (index + 1).to_string(), font, size, color, center, TextAnchor::Center);
        }
        self.list.pop_clip();
    }
}

impl Widget for Calendar {
    fn name(&self) -> &'static str {
        "calendar"
    }

    fn update(&mut self, state: &DashboardState) {
        self.palettes.set_night_mode(state.night_mode);
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
            self.canvas = Some(Canvas::from_rect(layout.calendar));
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
    use mirror_engine::scene::DrawCmd;

    use crate::time_source::ManualTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── month math ────────────────────────────────────────────────────────

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 13), 0);
    }

    #[test]
    fn leap_day_is_last_cell() {
        let m = MonthView::for_date(date(2024, 2, 29));
        assert_eq!(m.days, 29);
        assert_eq!(m.today_index(), 28);
        assert_eq!(MonthView::cell(m.today_index()), (0, 4));
        assert_eq!(m.rows(), 5);
        assert_eq!(m.title(), "February 2024");
    }

    #[test]
    fn today_index_is_zero_based() {
        let m = MonthView::for_date(date(2024, 3, 1));
        assert_eq!(m.today_index(), 0);
        assert_eq!(MonthView::cell(0), (0, 0));
        assert_eq!(MonthView::cell(13), (6, 1));
        assert_eq!(MonthView::for_date(date(2021, 2, 10)).rows(), 4);
    }

    // ── widget ────────────────────────────────────────────────────────────

    fn calendar(at: NaiveDate) -> (Calendar, Rc<ManualTime>) {
        let layout = PanelLayout::compute(1280.0, 720.0);
        let time = Rc::new(ManualTime::new(at.and_hms_opt(10, 0, 0).unwrap()));
        let cal = Calendar::new(&layout, Some(FontId::from_index(0)), time.clone());
        (cal, time)
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

    #[test]
    fn draws_title_every_day_and_one_highlight() {
        let (mut cal, _) = calendar(date(2024, 2, 14));
        assert!(cal.on_animation_frame(Duration::ZERO));

        let t = texts(cal.draw_list());
        assert_eq!(t.len(), 1 + 29);
        assert_eq!(t[0], "February 2024");
        assert_eq!(t[1], "1");
        assert_eq!(t[29], "29");

        let discs = cal.draw_list().items().iter().filter(|i| matches!(i.cmd, DrawCmd::Circle(_))).count();
        assert_eq!(discs, 1);
    }

    #[test]
    fn highlight_sits_under_today() {
        let (mut cal, _) = calendar(date(2024, 2, 14));
        cal.on_animation_frame(Duration::ZERO);
        let items = cal.draw_list().items();
        let disc = items.iter().position(|i| matches!(i.cmd, DrawCmd::Circle(_))).unwrap();
        let (DrawCmd::Circle(c), DrawCmd::Text(t)) = (&items[disc].cmd, &items[disc + 1].cmd) else {
            panic!("expected highlight followed by its number");
        };
        assert_eq!(t.text, "14");
        assert_eq!(t.color, Color::BLACK);
        assert_eq!(c.center, t.origin);
    }

    #[test]
    fn rolls_over_to_the_next_month() {
        let (mut cal, time) = calendar(date(2024, 1, 31));
        cal.on_animation_frame(Duration::ZERO);
        assert_eq!(cal.month().map(|m| m.days), Some(31));

        time.set(date(2024, 2, 1).and_hms_opt(0, 0, 30).unwrap());
        assert!(!cal.on_animation_frame(Duration::from_secs(30)));
        assert!(cal.on_animation_frame(CALENDAR_INTERVAL));
        assert_eq!(cal.month().map(|m| (m.days, m.today)), Some((29, 1)));
    }

    #[test]
    fn night_mode_tints_title() {
        let (mut cal, _) = calendar(date(2024, 2, 14));
        cal.update(&DashboardState { night_mode: true, ..DashboardState::default() });
        cal.on_animation_frame(Duration::ZERO);
        let DrawCmd::Text(title) = &cal.draw_list().items()[0].cmd else { panic!("expected title") };
        assert_eq!(title.color, ClockPalette::night().accent);
    }

    #[test]
    fn missing_font_is_inert() {
        let layout = PanelLayout::compute(1280.0, 720.0);
        let time = Rc::new(ManualTime::new(date(2024, 2, 14).and_hms_opt(0, 0, 0).unwrap()));
        let mut cal = Calendar::new(&layout, None, time);
        assert!(cal.is_inert());
        cal.update(&DashboardState::default());
        assert!(!cal.on_animation_frame(Duration::ZERO));
    }
}
