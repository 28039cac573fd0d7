use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "mirror_dash=debug,wgpu=warn"). When `None`, `env_var` is consulted, then
/// `RUST_LOG`, then the `info` default.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    /// Application-specific environment variable checked before `RUST_LOG`.
    pub env_var: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { env_filter: None, env_var: None, write_style: env_logger::WriteStyle::Auto }
    }
}

impl LoggingConfig {
    /// Resolves the filter string by precedence. `None` means "use the default level".
    ///
    /// A blank candidate counts as unset and falls through to the next one.
    pub fn resolve_filter(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        let usable = |f: Option<String>| f.filter(|f| !f.trim().is_empty());
        usable(self.env_filter.clone())
            .or_else(|| usable(self.env_var.as_deref().and_then(&lookup)))
            .or_else(|| usable(lookup("RUST_LOG")))
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Idempotent; subsequent calls are ignored. Call early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.resolve_filter(|name| std::env::var(name).ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                // wgpu is chatty at info level.
                builder.filter_level(log::LevelFilter::Info);
                builder.filter_module("wgpu_core", log::LevelFilter::Warn);
                builder.filter_module("wgpu_hal", log::LevelFilter::Warn);
            }
        }

        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized");
    });
}
