//! Mirror dashboard: smart-mirror widgets on top of `mirror-engine`.
//!
//! The centerpiece is an animated analog clock drawn into a named panel.
//! Around it sit a compact clock, a month calendar, a matrix-rain backdrop and
//! a header readout with the digital time, the date and the current view title.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use mirror_dash::prelude::*;
//!
//! let config = DashboardConfig::default();
//! let mut fonts = FontSystem::new();
//! let font = fonts.load_font(include_bytes!("my_font.ttf")).ok();
//! let dashboard = Dashboard::new(&config, fonts, font);
//! Runtime::run(RuntimeConfig::default(), GpuInit::default(), dashboard)?;
//! ```
//!
//! Every widget binds to its panel on its own. A widget that cannot bind
//! (missing panel, missing font) logs an error and stays inert; the rest of
//! the dashboard keeps running.

pub mod app;
pub mod bedtime;
pub mod calendar;
pub mod canvas;
pub mod clock;
pub mod config;
pub mod error;
pub mod mode;
pub mod rain;
pub mod readout;
pub mod state;
pub mod time_source;
pub mod widget;

pub use app::Dashboard;
pub use config::{ConfigError, DashboardConfig, LoadedConfig};

/// Everything needed to assemble a dashboard or a custom widget.
pub mod prelude {
    pub use crate::app::Dashboard;
    pub use crate::bedtime::{BedtimeMonitor, BedtimeWindow};
    pub use crate::calendar::{Calendar, MonthView};
    pub use crate::canvas::{Canvas, PanelLayout};
    pub use crate::clock::angles::{HandAngles, WallTime};
    pub use crate::clock::palette::ClockPalette;
    pub use crate::clock::{AnalogClock, FaceStyle};
    pub use crate::config::{ConfigError, DashboardConfig, LoadedConfig};
    pub use crate::error::{ClockError, TimeParseError};
    pub use crate::mode::ModeSwitch;
    pub use crate::rain::{MatrixRain, RainStyle};
    pub use crate::readout::Readout;
    pub use crate::state::{DashboardState, VisionView};
    pub use crate::time_source::{LocalTime, ManualTime, OffsetTime, TimeSource};
    pub use crate::widget::Widget;

    pub use mirror_engine::device::GpuInit;
    pub use mirror_engine::text::{FontId, FontSystem};
    pub use mirror_engine::window::{Runtime, RuntimeConfig};
}
