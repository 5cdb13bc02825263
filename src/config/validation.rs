//! Configuration validation.
//!
//! # Responsibilities
//! - Normalize storage tuning (clamp compactors, default compression)
//! - Check cluster topology: ids, storage directories and ports are unique
//! - Coarse bind address well-formedness
//!
//! # Design Decisions
//! - Storage normalization never fails; it runs before topology checks
//! - Topology checks stop at the first violation, in node order, and in
//!   the fixed per-node check order below. Error identity is part of the
//!   contract, so this is not an exhaustive linter
//! - Validation consumes a decoded configuration and hands back the
//!   normalized one; nothing is exposed until both passes complete

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use thiserror::Error;

use crate::config::defaults::MIN_COMPACTORS;
use crate::config::schema::{ClusterConfig, CompressionType, Configuration, StorageConfig};

/// Minimum length, in bytes, of the port segment of a bind address.
pub const MIN_PORT_LEN: usize = 4;

/// A topology invariant violated by the configuration.
///
/// `index` is the 0-based position of the offending node in `nodes`;
/// `first_index` is the earlier node already holding the same value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("cluster id was not found")]
    ClusterIdMissing,

    #[error("nodes[{index}]: node id not found")]
    NodeIdMissing { index: usize },

    #[error("nodes[{index}] (id {id}): node storage directory not found")]
    StorageDirMissing { index: usize, id: String },

    #[error(
        "nodes[{index}] (id {id}): storage path {storage_dir:?} already used by nodes[{first_index}]; \
         storage path must be unique per node to avoid file locking conflicts"
    )]
    StorageDirDuplicate {
        index: usize,
        id: String,
        storage_dir: String,
        first_index: usize,
    },

    #[error(
        "nodes[{index}]: node id {id:?} already used by nodes[{first_index}]; \
         node id must be unique per node to conform to raft consensus"
    )]
    NodeIdDuplicate {
        index: usize,
        id: String,
        first_index: usize,
    },

    #[error("nodes[{index}] (id {id}): malformed bind address {bind_addr:?}, expected host:port")]
    AddressMalformed {
        index: usize,
        id: String,
        bind_addr: String,
    },

    #[error(
        "nodes[{index}] (id {id}): port {port} already used by nodes[{first_index}]; \
         node port must be unique to allow communication between nodes"
    )]
    PortDuplicate {
        index: usize,
        id: String,
        port: String,
        first_index: usize,
    },
}

impl ValidationError {
    /// Index of the node that triggered the error, if any.
    pub fn node_index(&self) -> Option<usize> {
        match self {
            ValidationError::ClusterIdMissing => None,
            ValidationError::NodeIdMissing { index }
            | ValidationError::StorageDirMissing { index, .. }
            | ValidationError::StorageDirDuplicate { index, .. }
            | ValidationError::NodeIdDuplicate { index, .. }
            | ValidationError::AddressMalformed { index, .. }
            | ValidationError::PortDuplicate { index, .. } => Some(*index),
        }
    }
}

/// Normalize storage, then validate the cluster topology.
pub fn validate_config(mut config: Configuration) -> Result<Configuration, ValidationError> {
    normalize_storage(&mut config.storage);
    validate_cluster(&config.cluster)?;
    Ok(config)
}

/// Clamp out-of-range storage values. Never fails.
pub fn normalize_storage(storage: &mut StorageConfig) {
    if storage.num_compactors < MIN_COMPACTORS {
        tracing::warn!(
            configured = storage.num_compactors,
            applied = MIN_COMPACTORS,
            "num_compactors below minimum, raising"
        );
        storage.num_compactors = MIN_COMPACTORS;
    }

    if let CompressionType::Unrecognized(raw) = &storage.compression_type {
        tracing::warn!(
            configured = %raw,
            applied = %CompressionType::Snappy,
            "Unknown compression_type, falling back"
        );
        storage.compression_type = CompressionType::Snappy;
    }
}

/// Check cluster topology invariants, returning the first violation.
pub fn validate_cluster(cluster: &ClusterConfig) -> Result<(), ValidationError> {
    if cluster.cluster_id.is_empty() {
        return Err(ValidationError::ClusterIdMissing);
    }

    let mut seen_ids: HashMap<&str, usize> = HashMap::new();
    let mut seen_dirs: HashMap<&str, usize> = HashMap::new();
    let mut seen_ports: HashMap<&str, usize> = HashMap::new();

    for (index, node) in cluster.nodes.iter().enumerate() {
        if node.id.is_empty() {
            return Err(ValidationError::NodeIdMissing { index });
        }

        if node.storage_dir.is_empty() {
            return Err(ValidationError::StorageDirMissing {
                index,
                id: node.id.clone(),
            });
        }

        if let Some(first_index) = register(&mut seen_dirs, &node.storage_dir, index) {
            return Err(ValidationError::StorageDirDuplicate {
                index,
                id: node.id.clone(),
                storage_dir: node.storage_dir.clone(),
                first_index,
            });
        }

        if let Some(first_index) = register(&mut seen_ids, &node.id, index) {
            return Err(ValidationError::NodeIdDuplicate {
                index,
                id: node.id.clone(),
                first_index,
            });
        }

        let port = match node.port() {
            Some(port) if port.len() >= MIN_PORT_LEN => port,
            _ => {
                return Err(ValidationError::AddressMalformed {
                    index,
                    id: node.id.clone(),
                    bind_addr: node.bind_addr.clone(),
                })
            }
        };

        if let Some(first_index) = register(&mut seen_ports, port, index) {
            return Err(ValidationError::PortDuplicate {
                index,
                id: node.id.clone(),
                port: port.to_string(),
                first_index,
            });
        }
    }

    Ok(())
}

/// Record `value` at `index`; returns the earlier index if already present.
fn register<'a>(seen: &mut HashMap<&'a str, usize>, value: &'a str, index: usize) -> Option<usize> {
    match seen.entry(value) {
        Entry::Occupied(entry) => Some(*entry.get()),
        Entry::Vacant(entry) => {
            entry.insert(index);
            None
        }
    }
}
