use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer};

/// Configuration for log output.
#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    /// Default log level. Overridden by RUST_LOG env var.
    pub log_level: Level,
    /// Per-module level overrides (e.g. "todos_store" => DEBUG).
    pub module_levels: Vec<(String, Level)>,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
            module_levels: Vec::new(),
            json: false,
        }
    }
}

impl TelemetryConfig {
    /// Build a config from a textual level such as `"debug"`.
    /// Unknown levels fall back to INFO.
    pub fn from_level_str(level: &str, json: bool) -> Self {
        Self {
            log_level: Level::from_str(level).unwrap_or(Level::INFO),
            module_levels: Vec::new(),
            json,
        }
    }

    pub fn with_module_level(mut self, module: impl Into<String>, level: Level) -> Self {
        self.module_levels.push((module.into(), level));
        self
    }

    /// Directive string handed to `EnvFilter` when RUST_LOG is unset.
    pub fn filter_directives(&self) -> String {
        let mut filter_str = self.log_level.to_string().to_lowercase();
        for (module, level) in &self.module_levels {
            filter_str.push_str(&format!(",{}={}", module, level.to_string().to_lowercase()));
        }
        filter_str
    }
}

/// Install the global subscriber. Call once at startup; a second call
/// returns an error and leaves the first subscriber in place.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directives()));

    let fmt_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_span_list(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().with_target(true).boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(env_filter))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_info_plain() {
        let cfg = TelemetryConfig::default();
        assert_eq!(cfg.log_level, Level::INFO);
        assert!(!cfg.json);
        assert_eq!(cfg.filter_directives(), "info");
    }

    #[test]
    fn module_levels_in_directives() {
        let cfg = TelemetryConfig::default()
            .with_module_level("todos_store", Level::DEBUG)
            .with_module_level("tower_http", Level::WARN);
        assert_eq!(cfg.filter_directives(), "info,todos_store=debug,tower_http=warn");
    }

    #[test]
    fn level_parsing() {
        assert_eq!(TelemetryConfig::from_level_str("debug", false).log_level, Level::DEBUG);
        assert_eq!(TelemetryConfig::from_level_str("WARN", true).log_level, Level::WARN);
        assert_eq!(TelemetryConfig::from_level_str("loud", false).log_level, Level::INFO);
    }

    #[test]
    fn second_init_fails_without_panicking() {
        let cfg = TelemetryConfig::default();
        let _ = init_telemetry(&cfg);
        assert!(init_telemetry(&cfg).is_err());
    }
}
