//! Tracing configuration for the tagship CLI.
//!
//! Logs go to stderr in one of several formats. The `actions` format also
//! turns WARN and ERROR events into GitHub workflow annotations.

use crate::annotations::ActionsAnnotationLayer;
use std::io;
pub use tracing::Level;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Tracing output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TracingFormat {
    /// Pretty-printed human-readable format
    Pretty,
    /// Compact single-line format
    Compact,
    /// Structured JSON format
    Json,
    /// Compact format plus `::warning::` / `::error::` annotations on stdout
    Actions,
}

impl TracingFormat {
    /// Default format for the current process: `actions` inside a GitHub
    /// Actions runner, `compact` elsewhere.
    #[must_use]
    pub fn detect() -> Self {
        if std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true") {
            Self::Actions
        } else {
            Self::Compact
        }
    }
}

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogLevel {
    /// Show all logs (trace level)
    Trace,
    /// Show debug and above
    Debug,
    /// Show info and above (default)
    #[default]
    Info,
    /// Show warnings and above
    Warn,
    /// Show errors only
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

/// Tracing configuration
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Output format
    pub format: TracingFormat,
    /// Level used when `RUST_LOG` is not set
    pub level: Level,
    /// Emit workflow annotations (only honored by [`TracingFormat::Actions`])
    pub annotations: bool,
}

/// Crates whose events are shown at the configured level.
const CRATES: [&str; 4] = [
    "tagship",
    "tagship_release",
    "tagship_github",
    "tagship_homebrew",
];

/// Filter directive enabling `level` for every tagship crate.
#[must_use]
pub fn default_directive(level: Level) -> String {
    let level_str = level.as_str().to_ascii_lowercase();
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level_str}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Global correlation ID for the current run
static CORRELATION_ID: std::sync::OnceLock<Uuid> = std::sync::OnceLock::new();

/// Get or create the correlation ID for the current run
pub fn correlation_id() -> Uuid {
    *CORRELATION_ID.get_or_init(Uuid::new_v4)
}

/// Initialize tracing with the given configuration
///
/// # Errors
///
/// Returns an error if the filter directive is invalid.
pub fn init_tracing(config: TracingConfig) -> miette::Result<()> {
    let correlation_id = correlation_id();

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(config.level)))
        .map_err(|e| miette::miette!("Failed to create tracing filter: {e}"))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format {
        TracingFormat::Pretty => {
            let layer = tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(io::stderr)
                .with_target(true);

            registry.with(layer).init();
        }
        TracingFormat::Compact => {
            let layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_target(false);

            registry.with(layer).init();
        }
        TracingFormat::Json => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_current_span(true)
                .with_span_list(true);

            registry.with(layer).init();
        }
        TracingFormat::Actions => {
            let layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_target(false)
                .with_ansi(false);
            let annotations = config
                .annotations
                .then(|| ActionsAnnotationLayer::new(io::stdout));

            registry.with(layer).with(annotations).init();
        }
    }

    tracing::info!(
        correlation_id = %correlation_id,
        version = env!("CARGO_PKG_VERSION"),
        format = ?config.format,
        "Tracing initialized for tagship"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        use clap::ValueEnum;

        assert_eq!(
            TracingFormat::from_str("pretty", false).unwrap(),
            TracingFormat::Pretty
        );
        assert_eq!(
            TracingFormat::from_str("ACTIONS", true).unwrap(),
            TracingFormat::Actions
        );
        assert!(TracingFormat::from_str("dev", true).is_err());
    }

    #[test]
    fn test_detect_inside_actions() {
        temp_env::with_var("GITHUB_ACTIONS", Some("true"), || {
            assert_eq!(TracingFormat::detect(), TracingFormat::Actions);
        });
    }

    #[test]
    fn test_detect_outside_actions() {
        temp_env::with_var_unset("GITHUB_ACTIONS", || {
            assert_eq!(TracingFormat::detect(), TracingFormat::Compact);
        });
        temp_env::with_var("GITHUB_ACTIONS", Some("false"), || {
            assert_eq!(TracingFormat::detect(), TracingFormat::Compact);
        });
    }

    #[test]
    fn test_default_directive() {
        assert_eq!(
            default_directive(Level::DEBUG),
            "tagship=debug,tagship_release=debug,tagship_github=debug,tagship_homebrew=debug"
        );
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(Level::from(LogLevel::Info), Level::INFO);
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
    }

    #[test]
    fn test_correlation_id_consistency() {
        assert_eq!(correlation_id(), correlation_id());
    }
}
