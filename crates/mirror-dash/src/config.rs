//! Dashboard configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file
//! at all) gives a working dashboard. Search order when no explicit path is
//! given: `<config dir>/mirror/config.toml`, then `./mirror.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::bedtime::BedtimeWindow;
use crate::error::TimeParseError;
use crate::rain::DEFAULT_FONT_SIZE;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub clock: ClockConfig,

    #[serde(default)]
    pub rain: RainConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub bedtime: BedtimeConfig,

    #[serde(default)]
    pub logging: LoggingSection,
}

/// Window title and initial size.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_width")]
    pub width: f64,

    #[serde(default = "default_height")]
    pub height: f64,

    /// Display pacing; unset follows the monitor refresh rate.
    #[serde(default)]
    pub display_fps: Option<u32>,
}

fn default_title() -> String {
    "mirror".to_string()
}

fn default_width() -> f64 {
    1280.0
}

fn default_height() -> f64 {
    720.0
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { title: default_title(), width: default_width(), height: default_height(), display_fps: None }
    }
}

/// Analog clock animation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClockConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,
}

fn default_fps() -> u32 {
    30
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { fps: default_fps() }
    }
}

impl ClockConfig {
    pub fn frame_interval(&self) -> Duration {
        fps_interval(self.fps)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RainConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_font_size")]
    pub font_size: f32,

    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Fixed seed for reproducible rain; random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_true() -> bool {
    true
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

impl Default for RainConfig {
    fn default() -> Self {
        Self { enabled: true, font_size: default_font_size(), fps: default_fps(), seed: None }
    }
}

impl RainConfig {
    pub fn frame_interval(&self) -> Duration {
        fps_interval(self.fps)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub night_mode: bool,

    /// `±HH:MM` offset for the header readout; local time when unset.
    #[serde(default)]
    pub utc_offset: Option<String>,

    /// TrueType/OpenType font; common system fonts are tried when unset.
    #[serde(default)]
    pub font_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BedtimeConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_sleep")]
    pub sleep: String,

    #[serde(default = "default_wake")]
    pub wake: String,
}

fn default_sleep() -> String {
    "01:00".to_string()
}

fn default_wake() -> String {
    "09:00".to_string()
}

impl Default for BedtimeConfig {
    fn default() -> Self {
        Self { enabled: false, sleep: default_sleep(), wake: default_wake() }
    }
}

impl BedtimeConfig {
    /// The configured window, or `None` when bedtime is disabled.
    pub fn window(&self) -> Result<Option<BedtimeWindow>, TimeParseError> {
        if !self.enabled {
            return Ok(None);
        }
        BedtimeWindow::parse(&self.sleep, &self.wake).map(Some)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LoggingSection {
    /// `env_logger` filter, e.g. `"info,mirror_dash=debug"`.
    #[serde(default)]
    pub filter: Option<String>,
}

fn fps_interval(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.max(1)
}

impl DashboardConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Default locations, most specific first.
    pub fn default_locations() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("mirror").join("config.toml")),
            Some(PathBuf::from("./mirror.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Loads `explicit` if given, otherwise the first usable default location.
    ///
    /// An explicit path must load. Broken files in default locations are
    /// skipped and handed back in [`LoadedConfig::skipped`]; this runs before
    /// logging is set up, so the caller reports them.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
        match explicit {
            Some(path) => Self::load(path).map(|config| LoadedConfig {
                config,
                source: Some(path.to_path_buf()),
                skipped: Vec::new(),
            }),
            None => Ok(Self::load_first(&Self::default_locations())),
        }
    }

    /// First candidate that exists and parses; defaults when none does.
    pub fn load_first(candidates: &[PathBuf]) -> LoadedConfig {
        let mut skipped = Vec::new();
        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load(path) {
                Ok(config) => return LoadedConfig { config, source: Some(path.clone()), skipped },
                Err(e) => skipped.push(e),
            }
        }
        LoadedConfig { config: Self::default(), source: None, skipped }
    }
}

/// Outcome of a configuration search.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: DashboardConfig,
    /// File the configuration came from; `None` for built-in defaults.
    pub source: Option<PathBuf>,
    /// Files that existed but could not be read or parsed.
    pub skipped: Vec<ConfigError>,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── defaults ──────────────────────────────────────────────────────────

    #[test]
    fn empty_file_gives_defaults() {
        let c = DashboardConfig::from_toml_str("").unwrap();
        assert_eq!(c, DashboardConfig::default());
        assert_eq!(c.clock.fps, 30);
        assert_eq!(c.rain.font_size, 14.0);
        assert!(c.rain.enabled);
        assert!(!c.display.night_mode);
        assert_eq!(c.window.title, "mirror");
        assert_eq!(c.bedtime.window().unwrap(), None);
    }

    #[test]
    fn clock_interval_from_fps() {
        let c = ClockConfig { fps: 30 };
        assert_eq!(c.frame_interval(), Duration::from_nanos(33_333_333));
        assert_eq!(ClockConfig { fps: 0 }.frame_interval(), Duration::from_secs(1));
    }

    // ── parsing ───────────────────────────────────────────────────────────

    #[test]
    fn partial_sections_keep_other_defaults() {
        let c = DashboardConfig::from_toml_str(
            r#"
            [display]
            night_mode = true
            utc_offset = "+02:00"

            [rain]
            seed = 7
            "#,
        )
        .unwrap();
        assert!(c.display.night_mode);
        assert_eq!(c.display.utc_offset.as_deref(), Some("+02:00"));
        assert_eq!(c.rain.seed, Some(7));
        assert_eq!(c.rain.fps, 30);
        assert_eq!(c.window, WindowConfig::default());
    }

    #[test]
    fn bedtime_window_when_enabled() {
        let c = DashboardConfig::from_toml_str(
            r#"
            [bedtime]
            enabled = true
            sleep = "23:30"
            wake = "06:45"
            "#,
        )
        .unwrap();
        let w = c.bedtime.window().unwrap().unwrap();
        assert_eq!(w, BedtimeWindow::parse("23:30", "06:45").unwrap());
    }

    #[test]
    fn bad_bedtime_is_an_error() {
        let c = BedtimeConfig { enabled: true, sleep: "midnight".into(), wake: "09:00".into() };
        assert!(c.window().is_err());
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        assert!(DashboardConfig::from_toml_str("[clock]\nfps = \"fast\"").is_err());
    }

    // ── loading ───────────────────────────────────────────────────────────

    #[test]
    fn explicit_missing_file_is_io_error() {
        let err = DashboardConfig::load_or_default(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn broken_candidates_are_skipped_and_reported() {
        let dir = std::env::temp_dir();
        let bad = dir.join(format!("mirror-config-skip-bad-{}.toml", std::process::id()));
        let good = dir.join(format!("mirror-config-skip-good-{}.toml", std::process::id()));
        let missing = dir.join("mirror-config-skip-missing.toml");
        std::fs::write(&bad, "[clock\n").unwrap();
        std::fs::write(&good, "[clock]\nfps = 12\n").unwrap();

        let loaded = DashboardConfig::load_first(&[missing, bad.clone(), good.clone()]);
        std::fs::remove_file(&bad).ok();
        std::fs::remove_file(&good).ok();

        assert_eq!(loaded.config.clock.fps, 12);
        assert_eq!(loaded.source.as_deref(), Some(good.as_path()));
        assert_eq!(loaded.skipped.len(), 1);
        assert!(matches!(&loaded.skipped[0], ConfigError::Parse { path, .. } if *path == bad));
    }

    #[test]
    fn no_candidates_give_defaults() {
        let loaded = DashboardConfig::load_first(&[]);
        assert_eq!(loaded.config, DashboardConfig::default());
        assert!(loaded.source.is_none());
        assert!(loaded.skipped.is_empty());
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join(format!("mirror-config-test-{}.toml", std::process::id()));
        std::fs::write(&path, "[window]\ntitle = \"hall mirror\"\n").unwrap();
        let c = DashboardConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(c.window.title, "hall mirror");
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let path = std::env::temp_dir().join(format!("mirror-config-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[window\n").unwrap();
        let err = DashboardConfig::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("mirror-config-bad"));
    }
}
