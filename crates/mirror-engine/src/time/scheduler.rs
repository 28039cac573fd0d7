use std::time::Duration;

/// Default repaint throttle, roughly 30 frames per second.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Throttle bookkeeping owned by one animated widget.
///
/// Reset on construction and on every restart; never persisted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AnimationState {
    /// Timestamp of the last accepted frame. `None` until the first draw.
    pub last_frame: Option<Duration>,
    pub frame_interval: Duration,
}

impl AnimationState {
    pub fn new(frame_interval: Duration) -> Self {
        Self { last_frame: None, frame_interval }
    }
}

/// Outcome of offering one display frame to a [`FrameScheduler`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameVerdict {
    /// Enough time has passed; draw now.
    Draw,
    /// Too soon since the last draw. Keep the previous pixels.
    Skip,
    /// The animation has been stopped. Nothing will be drawn until `start()`.
    Stopped,
}

/// Throttles a per-display-frame callback down to a target interval.
///
/// The runtime offers every display frame through [`on_frame`]; the scheduler
/// accepts one when at least `frame_interval` has passed since the previously
/// accepted frame. The first frame after construction or [`start`] always draws.
///
/// [`on_frame`]: FrameScheduler::on_frame
/// [`start`]: FrameScheduler::start
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    state: AnimationState,
    running: bool,
}

impl FrameScheduler {
    /// A running scheduler with the given interval.
    pub fn new(frame_interval: Duration) -> Self {
        Self { state: AnimationState::new(frame_interval), running: true }
    }

    /// A running scheduler targeting `fps` frames per second (at least 1).
    pub fn with_fps(fps: u32) -> Self {
        Self::new(Duration::from_secs(1) / fps.max(1))
    }

    #[inline]
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    #[inline]
    pub fn frame_interval(&self) -> Duration {
        self.state.frame_interval
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Decides whether the frame at `now` should be drawn and records it if so.
    pub fn on_frame(&mut self, now: Duration) -> FrameVerdict {
        if !self.running {
            return FrameVerdict::Stopped;
        }
        if let Some(last) = self.state.last_frame {
            if now.saturating_sub(last) < self.state.frame_interval {
                return FrameVerdict::Skip;
            }
        }
        self.state.last_frame = Some(now);
        FrameVerdict::Draw
    }

    /// Stops scheduling future frames. Calling it again is a no-op.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::debug!("frame scheduler stopped");
        }
    }

    /// Re-arms a stopped scheduler; the next offered frame draws immediately.
    pub fn start(&mut self) {
        self.state.last_frame = None;
        if !self.running {
            self.running = true;
            log::debug!("frame scheduler started");
        }
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    // ── throttling ────────────────────────────────────────────────────────

    #[test]
    fn first_frame_always_draws() {
        let mut s = FrameScheduler::default();
        assert_eq!(s.on_frame(ms(123_456)), FrameVerdict::Draw);
    }

    #[test]
    fn frames_inside_interval_are_skipped() {
        let mut s = FrameScheduler::default();
        assert_eq!(s.on_frame(ms(0)), FrameVerdict::Draw);
        assert_eq!(s.on_frame(ms(16)), FrameVerdict::Skip);
        assert_eq!(s.on_frame(ms(32)), FrameVerdict::Skip);
        assert_eq!(s.on_frame(ms(33)), FrameVerdict::Draw);
        assert_eq!(s.state().last_frame, Some(ms(33)));
    }

    #[test]
    fn ten_ms_callbacks_for_one_second_draw_about_thirty_times() {
        let mut s = FrameScheduler::default();
        let draws = (0..=100)
            .map(|i| s.on_frame(ms(i * 10)))
            .filter(|v| *v == FrameVerdict::Draw)
            .count();
        // Accepted at 0, 40, 80, ... because callbacks land on 10 ms boundaries.
        assert!(draws <= 31, "drew {draws} times");
        assert!(draws >= 25, "drew {draws} times");
    }

    #[test]
    fn with_fps_derives_interval() {
        assert_eq!(FrameScheduler::with_fps(50).frame_interval(), ms(20));
        assert_eq!(FrameScheduler::with_fps(0).frame_interval(), Duration::from_secs(1));
    }

    // ── stop / start ──────────────────────────────────────────────────────

    #[test]
    fn stop_is_idempotent_and_blocks_draws() {
        let mut s = FrameScheduler::default();
        s.stop();
        s.stop();
        assert!(!s.is_running());
        for i in 0..10 {
            assert_eq!(s.on_frame(ms(i * 100)), FrameVerdict::Stopped);
        }
    }

    #[test]
    fn restart_draws_immediately() {
        let mut s = FrameScheduler::default();
        assert_eq!(s.on_frame(ms(1000)), FrameVerdict::Draw);
        s.stop();
        s.start();
        assert!(s.is_running());
        assert_eq!(s.on_frame(ms(1001)), FrameVerdict::Draw);
    }
}
