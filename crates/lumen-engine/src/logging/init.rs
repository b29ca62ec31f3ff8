use std::sync::Once;

use log::LevelFilter;

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax, e.g.
/// `"lumen_engine=debug,lumen::gl=warn"`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Takes precedence over `RUST_LOG`.
    pub env_filter: Option<String>,
    /// Level used when neither `env_filter` nor `RUST_LOG` is set.
    pub default_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Platform crates are chatty at info level.
const QUIET_DEPENDENCIES: &str = "winit=warn,glutin=warn,glutin_winit=warn";

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(&config, std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized ({filter})");
    });
}

fn resolve_filter(config: &LoggingConfig, rust_log: Option<String>) -> String {
    config
        .env_filter
        .clone()
        .or(rust_log)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| format!("{},{QUIET_DEPENDENCIES}", config.default_level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_beats_rust_log() {
        let config = LoggingConfig {
            env_filter: Some("lumen_engine=trace".into()),
            ..Default::default()
        };
        assert_eq!(resolve_filter(&config, Some("warn".into())), "lumen_engine=trace");
    }

    #[test]
    fn rust_log_is_used_when_no_filter_is_configured() {
        let config = LoggingConfig::default();
        assert_eq!(resolve_filter(&config, Some("debug".into())), "debug");
    }

    #[test]
    fn default_level_quiets_platform_crates() {
        let config = LoggingConfig {
            default_level: LevelFilter::Debug,
            ..Default::default()
        };
        let filter = resolve_filter(&config, None);
        assert!(filter.starts_with("DEBUG,"));
        assert!(filter.contains("winit=warn"));
    }
}
