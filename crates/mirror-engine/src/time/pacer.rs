use std::time::{Duration, Instant};

/// Paces the runtime's redraw requests at a fixed display interval.
///
/// The event loop sleeps with `ControlFlow::WaitUntil(next_deadline)` and asks
/// for one redraw per deadline, standing in for a vsync-driven animation
/// callback. Missed deadlines are not replayed; the next one is scheduled from
/// the current time.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    next: Option<Instant>,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval: interval.max(Duration::from_millis(1)), next: None }
    }

    /// Interval for a display refresh rate in millihertz, as reported by winit.
    pub fn interval_for_refresh(millihertz: u32) -> Duration {
        if millihertz == 0 {
            return Duration::from_secs(1) / 60;
        }
        Duration::from_nanos(1_000_000_000_000 / u64::from(millihertz))
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(Duration::from_millis(1));
    }

    /// Returns true when a redraw is due at `now`, and schedules the next deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next {
            Some(deadline) if now < deadline => false,
            Some(deadline) => {
                let mut next = deadline + self.interval;
                if next <= now {
                    next = now + self.interval;
                }
                self.next = Some(next);
                true
            }
            None => {
                self.next = Some(now + self.interval);
                true
            }
        }
    }

    /// Deadline of the next redraw, if one is scheduled.
    #[inline]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next
    }
}
