use std::time::Duration;

use mirror_engine::scene::DrawList;

use crate::canvas::PanelLayout;
use crate::state::DashboardState;

// ── Widget trait ──────────────────────────────────────────────────────────

/// An animated dashboard panel.
///
/// Each widget owns its canvas, its frame scheduler and one [`DrawList`] that
/// it rebuilds whole on every accepted frame. The dashboard composes the lists
/// of running widgets into the frame it presents.
pub trait Widget {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Applies dashboard-level flags. Must not draw.
    fn update(&mut self, state: &DashboardState);

    /// Re-measures the widget's container after a window resize.
    fn resize(&mut self, layout: &PanelLayout);

    /// Offers one display frame at monotonic time `now`.
    ///
    /// Returns `true` when the draw list was rebuilt.
    fn on_animation_frame(&mut self, now: Duration) -> bool;

    /// Whether the widget is scheduling frames and should be composed.
    fn is_running(&self) -> bool;

    /// Commands recorded by the last accepted frame.
    fn draw_list(&self) -> &DrawList;
}
