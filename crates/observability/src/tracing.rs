//! Tracing/logging initialization.
//!
//! The ledger crates only emit `tracing` events; this module decides where
//! they go.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Output encoding for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub default_filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl LogConfig {
    /// Defaults, with `PEGBANK_LOG_FORMAT` (`json` | `pretty`) and
    /// `PEGBANK_LOG_DEFAULT_FILTER` applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup("PEGBANK_LOG_FORMAT") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "json" => config.format = LogFormat::Json,
                "pretty" => config.format = LogFormat::Pretty,
                // Subscriber is not up yet, so there is nowhere to report this.
                _ => {}
            }
        }
        if let Some(filter) = lookup("PEGBANK_LOG_DEFAULT_FILTER") {
            config.default_filter = filter;
        }
        config
    }
}

/// Initialize tracing/logging for the process from the environment.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with(&LogConfig::from_env());
}

/// Initialize tracing/logging with explicit settings.
///
/// `RUST_LOG` still wins over `config.default_filter`.
pub fn init_with(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_selects_pretty_format() {
        let config = LogConfig::from_lookup(|k| {
            (k == "PEGBANK_LOG_FORMAT").then(|| "Pretty".to_string())
        });
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.default_filter, "info");
    }

    #[test]
    fn lookup_applies_format_and_filter_together() {
        let config = LogConfig::from_lookup(|k| match k {
            "PEGBANK_LOG_FORMAT" => Some("pretty".to_string()),
            "PEGBANK_LOG_DEFAULT_FILTER" => Some("pegbank_bank=debug".to_string()),
            _ => None,
        });
        assert_eq!(
            config,
            LogConfig {
                default_filter: "pegbank_bank=debug".to_string(),
                format: LogFormat::Pretty,
            }
        );
    }

    #[test]
    fn unknown_format_keeps_default() {
        let config = LogConfig::from_lookup(|k| {
            (k == "PEGBANK_LOG_FORMAT").then(|| "xml".to_string())
        });
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: LogConfig = serde_json::from_str(r#"{ "format": "pretty" }"#).unwrap();
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.default_filter, "info");
    }

    #[test]
    fn repeated_init_is_harmless() {
        init();
        crate::init();
        init_with(&LogConfig {
            format: LogFormat::Pretty,
            ..LogConfig::default()
        });
    }
}
