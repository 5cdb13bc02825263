//! Configuration schema definitions.
//!
//! This module defines the typed model a configuration document decodes into.
//! Decoding lives in `decoder.rs`; these types only derive `Serialize` so a
//! normalized configuration can be written back out.

use std::fmt;

use serde::{Serialize, Serializer};

/// Root configuration for a kqueuey node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Configuration {
    /// Storage engine tuning.
    pub storage: StorageConfig,

    /// Cluster topology. Encoded under the `raft` key.
    #[serde(rename = "raft")]
    pub cluster: ClusterConfig,
}

/// Storage engine tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageConfig {
    /// Number of background compactors. Raised to the minimum during validation.
    pub num_compactors: i64,

    /// Block compression used by the storage engine.
    pub compression_type: CompressionType,

    /// Fsync every write before acknowledging it.
    pub sync_writes: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            num_compactors: 4,
            compression_type: CompressionType::Snappy,
            sync_writes: false,
        }
    }
}

/// Block compression supported by the storage engine.
///
/// `Unrecognized` only exists between decoding and validation; the storage
/// normalization pass always replaces it with [`CompressionType::Snappy`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CompressionType {
    None,
    #[default]
    Snappy,
    Zstd,
    Unrecognized(String),
}

impl CompressionType {
    /// Parse a compression name, case-insensitively.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => CompressionType::None,
            "snappy" => CompressionType::Snappy,
            "zstd" => CompressionType::Zstd,
            _ => CompressionType::Unrecognized(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CompressionType::None => "none",
            CompressionType::Snappy => "snappy",
            CompressionType::Zstd => "zstd",
            CompressionType::Unrecognized(raw) => raw,
        }
    }

    /// Ordinal understood by the storage engine (none=0, snappy=1, zstd=2).
    pub fn ordinal(&self) -> u8 {
        match self {
            CompressionType::None => 0,
            CompressionType::Snappy | CompressionType::Unrecognized(_) => 1,
            CompressionType::Zstd => 2,
        }
    }
}

impl fmt::Display for CompressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CompressionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Cluster topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ClusterConfig {
    /// Identifier shared by every node of the deployment.
    pub cluster_id: String,

    /// Member nodes, in declared order.
    pub nodes: Vec<NodeConfig>,
}

/// A single cluster member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct NodeConfig {
    /// Unique node identifier.
    pub id: String,

    /// Address the node binds to (e.g., "127.0.0.1:1111").
    pub bind_addr: String,

    /// On-disk data directory. The storage engine locks it exclusively.
    pub storage_dir: String,
}

impl NodeConfig {
    pub fn new(
        id: impl Into<String>,
        bind_addr: impl Into<String>,
        storage_dir: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            bind_addr: bind_addr.into(),
            storage_dir: storage_dir.into(),
        }
    }

    /// Port segment of `bind_addr`, if the address has exactly one colon.
    pub fn port(&self) -> Option<&str> {
        let mut segments = self.bind_addr.split(':');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(port), None) => Some(port),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_parse_is_case_insensitive() {
        assert_eq!(CompressionType::parse("ZSTD"), CompressionType::Zstd);
        assert_eq!(CompressionType::parse("Snappy"), CompressionType::Snappy);
        assert_eq!(CompressionType::parse("none"), CompressionType::None);
        assert_eq!(
            CompressionType::parse("lz4"),
            CompressionType::Unrecognized("lz4".into())
        );
    }

    #[test]
    fn test_compression_ordinal() {
        assert_eq!(CompressionType::None.ordinal(), 0);
        assert_eq!(CompressionType::Snappy.ordinal(), 1);
        assert_eq!(CompressionType::Zstd.ordinal(), 2);
        assert_eq!(CompressionType::Unrecognized("lz4".into()).ordinal(), 1);
    }

    #[test]
    fn test_node_port() {
        assert_eq!(NodeConfig::new("1", "127.0.0.1:1111", "a").port(), Some("1111"));
        assert_eq!(NodeConfig::new("1", "127.0.0.1:", "a").port(), Some(""));
        assert_eq!(NodeConfig::new("1", "localhost", "a").port(), None);
        assert_eq!(NodeConfig::new("1", "::1:1111", "a").port(), None);
    }
}
