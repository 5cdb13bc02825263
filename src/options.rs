//! Startup options for the `kqueuey` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::config::SourceLocator;
use crate::observability::logging::LogFormat;

#[derive(Debug, Clone, Parser)]
#[command(name = "kqueuey")]
#[command(about = "Raft-coordinated key-value queue server", long_about = None)]
pub struct Options {
    /// Configuration file, or a directory containing kqueuey-config.yaml.
    /// Takes precedence over KQUEUEY_CONFIG_PATH and the default directories.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log line format.
    #[arg(long, value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,

    /// Reload the configuration when the file changes.
    #[arg(long)]
    pub watch: bool,
}

impl Options {
    pub fn locator(&self) -> SourceLocator {
        SourceLocator::from_env(self.config.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::parse_from(["kqueuey"]);
        assert!(options.config.is_none());
        assert_eq!(options.log_level, "info");
        assert_eq!(options.log_format, LogFormat::Json);
        assert!(!options.watch);
    }

    #[test]
    fn test_flags() {
        let options = Options::parse_from([
            "kqueuey",
            "--config",
            "/etc/kqueuey",
            "--log-level",
            "debug",
            "--log-format",
            "text",
            "--watch",
        ]);
        assert_eq!(options.config, Some(PathBuf::from("/etc/kqueuey")));
        assert_eq!(options.log_level, "debug");
        assert_eq!(options.log_format, LogFormat::Text);
        assert!(options.watch);
    }
}
