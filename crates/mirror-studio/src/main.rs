//! Mirror launcher
//!
//! Loads the dashboard configuration, applies command-line overrides and
//! opens the fullscreen-ready mirror window.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use winit::dpi::LogicalSize;

use mirror_dash::{Dashboard, DashboardConfig};
use mirror_engine::device::GpuInit;
use mirror_engine::logging::{init_logging, LoggingConfig};
use mirror_engine::text::{FontId, FontSystem};
use mirror_engine::window::{Runtime, RuntimeConfig};

/// Fonts tried when the configuration does not name one.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

#[derive(Parser)]
#[command(name = "mirror")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Smart-mirror dashboard with an animated analog clock")]
struct Cli {
    /// Configuration file (default: <config dir>/mirror/config.toml, then ./mirror.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start in night mode
    #[arg(long)]
    night: bool,

    /// UTC offset for the header readout, e.g. "+02:00"
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<String>,

    /// Log filter, e.g. "info,mirror_dash=debug" (overrides MIRROR_LOG)
    #[arg(long)]
    log: Option<String>,

    /// Clock animation rate
    #[arg(long)]
    fps: Option<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = DashboardConfig::load_or_default(cli.config.as_deref())
        .context("failed to load dashboard configuration")?;
    let mut config = loaded.config;
    apply_overrides(&mut config, &cli);

    // --log wins over the config file; both win over MIRROR_LOG and RUST_LOG.
    init_logging(LoggingConfig {
        env_filter: cli.log.clone().or_else(|| config.logging.filter.clone()),
        env_var: Some("MIRROR_LOG".to_string()),
        ..LoggingConfig::default()
    });
    for err in &loaded.skipped {
        log::warn!("{err}; skipped");
    }
    match &loaded.source {
        Some(path) => log::info!("config: {}", path.display()),
        None => log::info!("config: defaults"),
    }

    let mut fonts = FontSystem::new();
    let font = load_font(&mut fonts, config.display.font_path.as_deref());

    let runtime = RuntimeConfig {
        title: config.window.title.clone(),
        initial_size: LogicalSize::new(config.window.width, config.window.height),
        frame_interval: config.window.display_fps.map(|fps| Duration::from_secs(1) / fps.max(1)),
    };

    log::info!(
        "starting mirror: {}x{}, clock {} fps, night mode {}",
        config.window.width,
        config.window.height,
        config.clock.fps,
        config.display.night_mode,
    );

    let dashboard = Dashboard::new(&config, fonts, font);
    Runtime::run(runtime, GpuInit::default(), dashboard)
}

fn apply_overrides(config: &mut DashboardConfig, cli: &Cli) {
    if cli.night {
        config.display.night_mode = true;
    }
    if let Some(offset) = &cli.utc_offset {
        config.display.utc_offset = Some(offset.clone());
    }
    if let Some(fps) = cli.fps {
        config.clock.fps = fps;
    }
}

/// Loads the configured font, falling back to common system fonts.
///
/// Returns `None` when nothing loads; text widgets then stay inert.
fn load_font(fonts: &mut FontSystem, configured: Option<&Path>) -> Option<FontId> {
    if let Some(path) = configured {
        match fonts.load_font_file(path) {
            Ok(id) => return Some(id),
            Err(err) => log::warn!("{err}; trying system fonts"),
        }
    }

    let found = SYSTEM_FONTS
        .iter()
        .map(Path::new)
        .find_map(|p| fonts.load_font_file(p).ok());
    if found.is_none() {
        log::error!("no usable font found; numerals, rain and readout are disabled");
    }
    found
}
