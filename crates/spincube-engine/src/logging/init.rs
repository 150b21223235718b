use std::sync::Once;

/// Filter applied when neither `LoggingConfig::env_filter` nor `RUST_LOG` is set.
///
/// The wgpu stack is chatty at `info`; keep it at `warn` unless asked otherwise.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "spincube_engine=debug,wgpu_core=warn").
///
/// `write_style` controls ANSI coloring behavior.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Picks the filter string: explicit config, then `RUST_LOG`, then [`DEFAULT_FILTER`].
pub(crate) fn resolve_filter(config: &LoggingConfig, rust_log: Option<String>) -> String {
    config
        .env_filter
        .clone()
        .or(rust_log)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(&config, std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);

        // `try_init` so a test harness that already installed a logger is not fatal.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized ({filter})");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let cfg = LoggingConfig {
            env_filter: Some("debug".into()),
            ..Default::default()
        };
        assert_eq!(resolve_filter(&cfg, Some("trace".into())), "debug");
    }

    #[test]
    fn rust_log_used_when_no_explicit_filter() {
        let cfg = LoggingConfig::default();
        assert_eq!(resolve_filter(&cfg, Some("warn".into())), "warn");
    }

    #[test]
    fn blank_filter_falls_back_to_default() {
        let cfg = LoggingConfig::default();
        assert_eq!(resolve_filter(&cfg, Some("  ".into())), DEFAULT_FILTER);
        assert_eq!(resolve_filter(&cfg, None), DEFAULT_FILTER);
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::default());
    }
}
