//! Structured logging configuration.
//!
//! Log output goes through `tracing-subscriber`, either as JSON objects (one per
//! line) or as pretty text for development:
//!
//! ```json
//! {"timestamp":"2024-01-15T10:30:00.000Z","level":"DEBUG","target":"featctl_domain::generator","fields":{"message":"emitting toggle batch","feature":"active_checks_enabled","enabled":true,"objects":1000}}
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use featctl_server::config::FormConfig;
//! use featctl_server::observability::{init_logging, LoggingConfig};
//!
//! let config = FormConfig::from_env()?;
//! init_logging(LoggingConfig::from(&config.logging));
//! ```

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::config::LoggingSettings;

/// Configuration for structured logging.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Whether to use JSON format (true) or text format (false)
    pub json_format: bool,
    /// The default log level if RUST_LOG is not set
    pub default_level: Level,
    /// Whether to include span events (enter/exit)
    pub include_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json_format: false,
            default_level: Level::INFO,
            include_spans: false,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration for JSON output.
    pub fn json() -> Self {
        Self {
            json_format: true,
            ..Default::default()
        }
    }

    /// Create a new logging configuration for text output (development).
    pub fn text() -> Self {
        Self {
            json_format: false,
            ..Default::default()
        }
    }

    /// Set the default log level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    /// Include span events in the output.
    pub fn with_spans(mut self) -> Self {
        self.include_spans = true;
        self
    }
}

impl From<&LoggingSettings> for LoggingConfig {
    /// Unparseable levels fall back to INFO; `FormConfig::validate` rejects them earlier.
    fn from(settings: &LoggingSettings) -> Self {
        let level = Level::from_str(&settings.level).unwrap_or(Level::INFO);
        Self {
            json_format: settings.json,
            default_level: level,
            include_spans: false,
        }
    }
}

/// Initialize the logging subsystem with the given configuration.
///
/// This should be called once by the host at startup. Later calls have no
/// effect since the subscriber is global.
pub fn init_logging(config: LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_level.to_string()));

    let span_events = if config.include_spans {
        FmtSpan::ENTER | FmtSpan::EXIT
    } else {
        FmtSpan::NONE
    };

    if config.json_format {
        let subscriber = tracing_subscriber::registry().with(filter).with(
            fmt::layer()
                .json()
                .with_span_events(span_events)
                .with_current_span(true)
                .with_target(true)
                .with_file(false)
                .with_line_number(false),
        );

        // Ignore if a subscriber is already installed
        let _ = tracing::subscriber::set_global_default(subscriber);
    } else {
        let subscriber = tracing_subscriber::registry().with(filter).with(
            fmt::layer()
                .pretty()
                .with_span_events(span_events)
                .with_target(true),
        );

        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

/// Creates a JSON subscriber writing to `writer`, for capturing log output in tests.
pub fn create_json_layer<W>(writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(EnvFilter::new("trace"))
        .with(
            fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(true)
                .with_current_span(true),
        )
}
