//! Structured logging initialization and configuration
//!
//! Builds a `tracing-subscriber` registry with an [`EnvFilter`] and a JSON or
//! pretty `fmt` layer. Output goes to stderr so command output on stdout
//! stays machine-readable. With async logging enabled the layer writes
//! through a `tracing-appender` non-blocking worker; keep the returned
//! [`WorkerGuard`] alive until exit so buffered events are flushed.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `ADMIN_ROUTER_LOG_LEVEL` | `warn` | trace/debug/info/warn/error |
//! | `ADMIN_ROUTER_LOG_FORMAT` | `pretty` | `json` or `pretty` |
//! | `ADMIN_ROUTER_LOG_ASYNC` | `false` | buffer events on a worker thread |
//! | `ADMIN_ROUTER_LOG_TARGET_FILTER` | unset | extra comma-separated directives |
//! | `ADMIN_ROUTER_LOG_INCLUDE_LOCATION` | `false` | add file:line to events |
//!
//! `RUST_LOG`, when set, takes precedence over the level.

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for collectors, pretty-print for terminals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// Write through a non-blocking worker
    pub async_logging: bool,
    /// Extra filter directives (comma-separated)
    pub target_filter: Option<String>,
    /// Include file:line location
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            format: LogFormat::Pretty,
            async_logging: false,
            target_filter: None,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: lookup("ADMIN_ROUTER_LOG_LEVEL").unwrap_or(defaults.log_level),
            format: lookup("ADMIN_ROUTER_LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or(defaults.format),
            async_logging: lookup("ADMIN_ROUTER_LOG_ASYNC")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.async_logging),
            target_filter: lookup("ADMIN_ROUTER_LOG_TARGET_FILTER").filter(|s| !s.trim().is_empty()),
            include_location: lookup("ADMIN_ROUTER_LOG_INCLUDE_LOCATION")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.include_location),
        }
    }

    /// Verbose pretty configuration for local debugging
    #[must_use]
    pub fn default_dev() -> Self {
        Self {
            log_level: "debug".to_string(),
            format: LogFormat::Pretty,
            async_logging: false,
            target_filter: None,
            include_location: true,
        }
    }

    fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "error" => Level::ERROR,
            _ => Level::WARN,
        }
    }

    /// The filter this configuration installs, ignoring `RUST_LOG`.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        self.add_target_directives(EnvFilter::new(self.level().as_str()))
    }

    fn add_target_directives(&self, mut env_filter: EnvFilter) -> EnvFilter {
        let Some(target_filter) = &self.target_filter else {
            return env_filter;
        };
        for filter in target_filter.split(',') {
            let filter = filter.trim();
            if filter.is_empty() {
                continue;
            }
            match filter.parse() {
                Ok(directive) => env_filter = env_filter.add_directive(directive),
                Err(_) => eprintln!("Warning: Invalid log filter directive: {}", filter),
            }
        }
        env_filter
    }
}

/// Initialize logging from the environment.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_logging() -> Result<Option<WorkerGuard>> {
    init_logging_with_config(&LogConfig::from_env())
}

/// Initialize logging with an explicit configuration.
///
/// Returns the non-blocking worker's guard when `async_logging` is set.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_logging_with_config(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = config.add_target_directives(
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level().as_str())),
    );

    let (writer, guard) = if config.async_logging {
        let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
        (tracing_subscriber::fmt::writer::BoxMakeWriter::new(non_blocking), Some(guard))
    } else {
        (tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::io::stderr), None)
    };

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> LogConfig {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        LogConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_log_config_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, LogConfig::default());
        assert_eq!(config.level(), Level::WARN);
        assert!(!config.async_logging);
    }

    #[test]
    fn test_log_config_from_vars() {
        let config = config_from(&[
            ("ADMIN_ROUTER_LOG_LEVEL", "DEBUG"),
            ("ADMIN_ROUTER_LOG_FORMAT", "json"),
            ("ADMIN_ROUTER_LOG_ASYNC", "true"),
            ("ADMIN_ROUTER_LOG_TARGET_FILTER", "admin_router::router=trace"),
        ]);
        assert_eq!(config.level(), Level::DEBUG);
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.async_logging);
        assert_eq!(
            config.target_filter.as_deref(),
            Some("admin_router::router=trace")
        );
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("invalid"), LogFormat::Pretty);
    }

    #[test]
    fn test_env_filter_includes_target_directives() {
        let config = LogConfig {
            target_filter: Some("admin_router::router=trace, ,notify=off".to_string()),
            ..LogConfig::default()
        };
        let rendered = config.env_filter().to_string();
        assert!(rendered.contains("admin_router::router=trace"));
        assert!(rendered.contains("notify=off"));
    }
}
