use std::time::Duration;

use chrono::NaiveTime;
use mirror_engine::time::{FrameScheduler, FrameVerdict};

use crate::error::TimeParseError;
use crate::time_source::parse_time_of_day;

/// How often the bedtime window is checked.
pub const BEDTIME_CHECK_INTERVAL: Duration = Duration::from_secs(30);

/// Daily `[sleep, wake)` interval; may wrap past midnight.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BedtimeWindow {
    pub sleep: NaiveTime,
    pub wake: NaiveTime,
}

impl BedtimeWindow {
    pub fn new(sleep: NaiveTime, wake: NaiveTime) -> Self {
        Self { sleep, wake }
    }

    /// Parses two `HH:MM` strings.
    pub fn parse(sleep: &str, wake: &str) -> Result<Self, TimeParseError> {
        Ok(Self::new(parse_time_of_day(sleep)?, parse_time_of_day(wake)?))
    }

    /// Whether `t` falls inside the window. Equal endpoints mean "never".
    pub fn contains(&self, t: NaiveTime) -> bool {
        if self.sleep == self.wake {
            false
        } else if self.sleep < self.wake {
            self.sleep <= t && t < self.wake
        } else {
            t >= self.sleep || t < self.wake
        }
    }
}

/// Periodic bedtime check driven by display frames.
#[derive(Debug)]
pub struct BedtimeMonitor {
    window: Option<BedtimeWindow>,
    scheduler: FrameScheduler,
}

impl BedtimeMonitor {
    /// `None` disables bedtime entirely.
    pub fn new(window: Option<BedtimeWindow>) -> Self {
        Self { window, scheduler: FrameScheduler::new(BEDTIME_CHECK_INTERVAL) }
    }

    pub fn window(&self) -> Option<BedtimeWindow> {
        self.window
    }

    /// Returns `Some(sleeping)` when a check ran at `now`, `None` between checks.
    ///
    /// `wall` is only read when a check runs.
    pub fn poll(&mut self, now: Duration, wall: impl FnOnce() -> NaiveTime) -> Option<bool> {
        let window = self.window?;
        match self.scheduler.on_frame(now) {
            FrameVerdict::Draw => Some(window.contains(wall())),
            FrameVerdict::Skip | FrameVerdict::Stopped => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // ── window ────────────────────────────────────────────────────────────

    #[test]
    fn same_day_window() {
        let w = BedtimeWindow::parse("01:00", "09:00").unwrap();
        assert!(w.contains(t(1, 0)));
        assert!(w.contains(t(8, 59)));
        assert!(!w.contains(t(9, 0)));
        assert!(!w.contains(t(0, 59)));
    }

    #[test]
    fn window_wrapping_midnight() {
        let w = BedtimeWindow::parse("23:00", "07:00").unwrap();
        assert!(w.contains(t(23, 30)));
        assert!(w.contains(t(0, 0)));
        assert!(w.contains(t(6, 59)));
        assert!(!w.contains(t(7, 0)));
        assert!(!w.contains(t(12, 0)));
    }

    #[test]
    fn equal_endpoints_never_sleep() {
        let w = BedtimeWindow::parse("05:00", "05:00").unwrap();
        assert!(!w.contains(t(5, 0)));
        assert!(!w.contains(t(17, 0)));
    }

    #[test]
    fn malformed_times_are_rejected() {
        assert!(BedtimeWindow::parse("1am", "09:00").is_err());
    }

    // ── monitor ───────────────────────────────────────────────────────────

    #[test]
    fn checks_every_thirty_seconds() {
        let mut m = BedtimeMonitor::new(Some(BedtimeWindow::new(t(1, 0), t(9, 0))));
        assert_eq!(m.poll(Duration::ZERO, || t(2, 0)), Some(true));
        assert_eq!(m.poll(Duration::from_secs(10), || t(10, 0)), None);
        assert_eq!(m.poll(Duration::from_secs(30), || t(10, 0)), Some(false));
    }

    #[test]
    fn disabled_monitor_never_reports() {
        let mut m = BedtimeMonitor::new(None);
        assert_eq!(m.poll(Duration::ZERO, || t(2, 0)), None);
    }
}
