//! Subscriber setup for the `wire` binary.
//!
//! Reads two environment variables:
//!
//! - `GRAFT_LOG` - an `EnvFilter` directive string (default
//!   `info,graft_inject=debug`).
//! - `GRAFT_LOG_FORMAT` - `pretty`, `compact` or `json` (default `pretty`).

use tracing::Subscriber;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Environment variable holding the filter directives.
pub const FILTER_VAR: &str = "GRAFT_LOG";

/// Environment variable holding the output format.
pub const FORMAT_VAR: &str = "GRAFT_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info,graft_inject=debug";

// ─────────────────────────────────────────────────────────────────────────────
// LogFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line output (default).
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON structured output.
    Json,
}

impl LogFormat {
    /// Parses a format name, ignoring ASCII case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LogSettings
// ─────────────────────────────────────────────────────────────────────────────

/// Subscriber settings.
#[derive(Debug, Clone)]
pub struct LogSettings {
    filter: String,
    format: LogFormat,
    span_events: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::Pretty,
            span_events: false,
        }
    }
}

impl LogSettings {
    /// Reads the settings from [`FILTER_VAR`] and [`FORMAT_VAR`].
    ///
    /// Unset variables keep their defaults; an unknown format falls back to
    /// [`LogFormat::Pretty`].
    #[must_use]
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(filter) = std::env::var(FILTER_VAR) {
            settings = settings.with_filter(filter);
        }
        if let Some(format) = std::env::var(FORMAT_VAR)
            .ok()
            .as_deref()
            .and_then(LogFormat::parse)
        {
            settings = settings.with_format(format);
        }
        settings
    }

    /// Sets the filter directives.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Enables span enter/exit events, e.g. to see each `resolve` span.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    /// Returns the output format.
    #[must_use]
    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// Installs the global subscriber. Does nothing if one is already set.
    pub fn init(&self) {
        let env_filter =
            EnvFilter::try_new(&self.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let installed = tracing_subscriber::registry()
            .with(env_filter)
            .with(self.fmt_layer())
            .try_init()
            .is_ok();

        tracing::debug!(
            filter = %self.filter,
            format = ?self.format,
            installed,
            "logging initialized"
        );
    }

    /// Builds the formatting layer for the configured format.
    fn fmt_layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'span> LookupSpan<'span> + 'static,
    {
        let span_events = if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        };

        let layer = fmt::layer().with_span_events(span_events);
        match self.format {
            LogFormat::Pretty => layer.pretty().boxed(),
            LogFormat::Compact => layer.compact().boxed(),
            LogFormat::Json => layer.json().boxed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_are_case_insensitive() {
        assert_eq!(LogFormat::parse("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse(" compact "), Some(LogFormat::Compact));
        assert_eq!(LogFormat::parse("yaml"), None);
    }

    #[test]
    fn builder_overrides_defaults() {
        let settings = LogSettings::default()
            .with_format(LogFormat::Compact)
            .with_span_events(true);
        assert_eq!(settings.format(), LogFormat::Compact);
        assert!(settings.span_events);
    }

    #[test]
    fn every_format_builds_a_layer() {
        for format in [LogFormat::Pretty, LogFormat::Compact, LogFormat::Json] {
            let settings = LogSettings::default()
                .with_format(format)
                .with_span_events(true);
            let layer: Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync> =
                settings.fmt_layer();
            let _subscriber = tracing_subscriber::registry().with(layer);
        }
    }
}
