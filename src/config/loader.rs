//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::decoder::{decode, DecodeError};
use crate::config::locator::SourceLocator;
use crate::config::schema::Configuration;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config not found, searched: {}", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode configuration: {0}")]
    Decode(#[from] DecodeError),

    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A validated configuration together with the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub source: PathBuf,
    pub config: Configuration,
}

/// Runs the full locate → decode → validate pipeline.
///
/// Cheap to clone; the reload watcher keeps its own copy.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    locator: SourceLocator,
}

impl ConfigLoader {
    pub fn new(locator: SourceLocator) -> Self {
        Self { locator }
    }

    pub fn locator(&self) -> &SourceLocator {
        &self.locator
    }

    /// Locate, decode and validate the configuration.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let source = self.locator.locate()?;
        let config = load_config(&source)?;
        Ok(LoadedConfig { source, config })
    }
}

/// Decode and validate the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<Configuration, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Decode and validate an in-memory document.
pub fn parse_config(content: &str) -> Result<Configuration, ConfigError> {
    let config = decode(content)?;
    Ok(validate_config(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_normalizes() {
        let config = parse_config(
            "storage:\n  num_compactors: 2\n  compression_type: lz4\nraft:\n  cluster_id: c\n",
        )
        .unwrap();
        assert_eq!(config.storage.num_compactors, 4);
        assert_eq!(config.storage.compression_type.as_str(), "snappy");
    }

    #[test]
    fn test_parse_config_surfaces_validation_error() {
        let err = parse_config("storage: {}\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Validation(ValidationError::ClusterIdMissing)
        ));
    }

    #[test]
    fn test_load_config_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_not_found_message_lists_paths() {
        let err = ConfigError::NotFound {
            searched: vec![PathBuf::from("/a/x.yaml"), PathBuf::from("/b/x.yaml")],
        };
        assert_eq!(err.to_string(), "config not found, searched: /a/x.yaml, /b/x.yaml");
    }
}
