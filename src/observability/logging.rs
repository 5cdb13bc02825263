//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Map the `--log-level` / `--log-format` startup options onto it
//!
//! # Design Decisions
//! - `RUST_LOG`, when set, overrides `--log-level`
//! - Unknown levels fall back to `info` instead of failing startup

use clap::ValueEnum;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Normalize a level name, falling back to `info`.
pub fn level_or_default(level: &str) -> &'static str {
    let wanted = level.trim().to_ascii_lowercase();
    LEVELS
        .iter()
        .copied()
        .find(|known| *known == wanted)
        .unwrap_or("info")
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_or_default(level)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_or_default() {
        assert_eq!(level_or_default("debug"), "debug");
        assert_eq!(level_or_default(" WARN "), "warn");
        assert_eq!(level_or_default("verbose"), "info");
        assert_eq!(level_or_default(""), "info");
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        init_logging("debug", LogFormat::Text);
        init_logging("info", LogFormat::Json);
    }
}
