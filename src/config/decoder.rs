//! Raw document → typed [`Configuration`].
//!
//! # Algorithm
//! 1. Parse YAML into a generic mapping.
//! 2. Inject defaults for absent keys (`defaults.rs`).
//! 3. Decode field by field. Unknown keys are ignored; a type mismatch is
//!    reported with the dotted path of the offending field.
//!
//! Decoding performs no semantic checks. An empty cluster id or a duplicate
//! port decodes fine and is rejected later by `validation.rs`.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::config::defaults::apply_defaults;
use crate::config::schema::{
    ClusterConfig, CompressionType, Configuration, NodeConfig, StorageConfig,
};

/// Errors produced while decoding a configuration document.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The document is not valid YAML.
    #[error("malformed YAML: {0}")]
    Syntax(#[from] serde_yaml::Error),

    /// The document root is a scalar or sequence.
    #[error("configuration root must be a mapping, found {found}")]
    NotAMapping { found: &'static str },

    /// Two keys name the same section.
    #[error("keys `{first}` and `{second}` both define the cluster section; keep only one")]
    ConflictingKeys {
        first: &'static str,
        second: &'static str,
    },

    /// A field holds a value of the wrong type.
    #[error("field `{path}`: expected {expected}, found {found}")]
    Field {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

const CLUSTER_KEY: &str = "raft";
const CLUSTER_ALIAS: &str = "cluster";

/// Decode a raw YAML document into a [`Configuration`], applying defaults.
pub fn decode(raw: &str) -> Result<Configuration, DecodeError> {
    let document: Value = if raw.trim().is_empty() {
        Value::Null
    } else {
        serde_yaml::from_str(raw)?
    };

    let mut root = match document {
        Value::Null => Mapping::new(),
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(DecodeError::NotAMapping {
                found: kind(&other),
            })
        }
    };

    apply_defaults(&mut root);
    decode_root(&root)
}

/// Render a configuration as YAML using the canonical keys.
pub fn encode(config: &Configuration) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(config)
}

fn decode_root(root: &Mapping) -> Result<Configuration, DecodeError> {
    let storage = match section(root, "", "storage")? {
        Some(storage) => decode_storage(storage)?,
        None => StorageConfig::default(),
    };

    let primary = section(root, "", CLUSTER_KEY)?;
    let alias = section(root, "", CLUSTER_ALIAS)?;
    let cluster = match (primary, alias) {
        (Some(_), Some(_)) => {
            return Err(DecodeError::ConflictingKeys {
                first: CLUSTER_KEY,
                second: CLUSTER_ALIAS,
            })
        }
        (Some(raft), None) => decode_cluster(raft, CLUSTER_KEY)?,
        (None, Some(cluster)) => decode_cluster(cluster, CLUSTER_ALIAS)?,
        (None, None) => ClusterConfig::default(),
    };

    Ok(Configuration { storage, cluster })
}

fn decode_storage(storage: &Mapping) -> Result<StorageConfig, DecodeError> {
    let defaults = StorageConfig::default();
    let path = "storage";

    let num_compactors = match field(storage, path, "num_compactors") {
        None => defaults.num_compactors,
        Some((path, value)) => value
            .as_i64()
            .ok_or_else(|| mismatch(path, "an integer", value))?,
    };

    let compression_type = match field(storage, path, "compression_type") {
        None => defaults.compression_type,
        Some((path, value)) => value
            .as_str()
            .map(CompressionType::parse)
            .ok_or_else(|| mismatch(path, "a string", value))?,
    };

    let sync_writes = match field(storage, path, "sync_writes") {
        None => defaults.sync_writes,
        Some((path, value)) => value
            .as_bool()
            .ok_or_else(|| mismatch(path, "a boolean", value))?,
    };

    Ok(StorageConfig {
        num_compactors,
        compression_type,
        sync_writes,
    })
}

fn decode_cluster(cluster: &Mapping, path: &str) -> Result<ClusterConfig, DecodeError> {
    let cluster_id = text(cluster, path, "cluster_id")?;

    let nodes = match field(cluster, path, "nodes") {
        None => Vec::new(),
        Some((nodes_path, Value::Sequence(entries))) => entries
            .iter()
            .enumerate()
            .map(|(index, entry)| decode_node(entry, &format!("{nodes_path}[{index}]")))
            .collect::<Result<Vec<_>, _>>()?,
        Some((nodes_path, other)) => return Err(mismatch(nodes_path, "a sequence", other)),
    };

    Ok(ClusterConfig { cluster_id, nodes })
}

fn decode_node(entry: &Value, path: &str) -> Result<NodeConfig, DecodeError> {
    let node = entry
        .as_mapping()
        .ok_or_else(|| mismatch(path.to_string(), "a mapping", entry))?;

    Ok(NodeConfig {
        id: text(node, path, "id")?,
        bind_addr: text(node, path, "bind_addr")?,
        storage_dir: text(node, path, "storage_dir")?,
    })
}

/// Nested mapping under `key`; `null` or absent yields `None`.
fn section<'a>(
    parent: &'a Mapping,
    parent_path: &str,
    key: &str,
) -> Result<Option<&'a Mapping>, DecodeError> {
    match field(parent, parent_path, key) {
        None => Ok(None),
        Some((_, Value::Mapping(mapping))) => Ok(Some(mapping)),
        Some((path, other)) => Err(mismatch(path, "a mapping", other)),
    }
}

/// String field that also accepts numbers (`id: 1` reads as "1").
fn text(parent: &Mapping, parent_path: &str, key: &str) -> Result<String, DecodeError> {
    match field(parent, parent_path, key) {
        None => Ok(String::new()),
        Some((_, Value::String(s))) => Ok(s.clone()),
        Some((_, Value::Number(n))) => Ok(n.to_string()),
        Some((path, other)) => Err(mismatch(path, "a string", other)),
    }
}

/// Non-null value under `key`, paired with its dotted path.
fn field<'a>(parent: &'a Mapping, parent_path: &str, key: &str) -> Option<(String, &'a Value)> {
    let value = parent.get(key).filter(|value| !value.is_null())?;
    let path = if parent_path.is_empty() {
        key.to_string()
    } else {
        format!("{parent_path}.{key}")
    };
    Some((path, value))
}

fn mismatch(path: String, expected: &'static str, found: &Value) -> DecodeError {
    DecodeError::Field {
        path,
        expected,
        found: kind(found),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_i64() => "an integer",
        Value::Number(n) if n.is_u64() => "an integer outside the i64 range",
        Value::Number(_) => "a float",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
storage:
  num_compactors: 1
  compression_type: snappy
raft:
  cluster_id: "1000"
  nodes:
    - id: 1
      bind_addr: 127.0.0.1:1111
      storage_dir: a
    - id: "2"
      bind_addr: 127.0.0.1:1211
      storage_dir: b
"#;

    #[test]
    fn test_decode_full_document() {
        let config = decode(SCENARIO).unwrap();

        assert_eq!(config.storage.num_compactors, 1);
        assert_eq!(config.storage.compression_type, CompressionType::Snappy);
        assert!(!config.storage.sync_writes);
        assert_eq!(config.cluster.cluster_id, "1000");
        assert_eq!(config.cluster.nodes.len(), 2);
        assert_eq!(config.cluster.nodes[0], NodeConfig::new("1", "127.0.0.1:1111", "a"));
        assert_eq!(config.cluster.nodes[1].id, "2");
    }

    #[test]
    fn test_empty_document_decodes_to_defaults() {
        let config = decode("").unwrap();
        assert_eq!(config, Configuration::default());

        let config = decode("~").unwrap();
        assert_eq!(config.storage, StorageConfig::default());
        assert!(config.cluster.cluster_id.is_empty());
    }

    #[test]
    fn test_cluster_alias_accepted() {
        let config = decode("cluster:\n  cluster_id: abc\n").unwrap();
        assert_eq!(config.cluster.cluster_id, "abc");
    }

    #[test]
    fn test_conflicting_cluster_keys_rejected() {
        let err = decode("raft:\n  cluster_id: a\ncluster:\n  cluster_id: b\n").unwrap_err();
        assert!(matches!(err, DecodeError::ConflictingKeys { .. }));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let config = decode("storage:\n  block_cache_mb: 64\nextra: true\n").unwrap();
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_type_mismatch_names_field_path() {
        let err = decode("storage:\n  num_compactors: many\n").unwrap_err();
        match err {
            DecodeError::Field { path, expected, found } => {
                assert_eq!(path, "storage.num_compactors");
                assert_eq!(expected, "an integer");
                assert_eq!(found, "a string");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = decode("raft:\n  nodes:\n    - id: 1\n      bind_addr: [a, b]\n").unwrap_err();
        match err {
            DecodeError::Field { path, .. } => assert_eq!(path, "raft.nodes[0].bind_addr"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_oversized_integer_reported_as_out_of_range() {
        let err = decode("storage:\n  num_compactors: 18446744073709551615\n").unwrap_err();
        match err {
            DecodeError::Field { path, expected, found } => {
                assert_eq!(path, "storage.num_compactors");
                assert_eq!(expected, "an integer");
                assert_eq!(found, "an integer outside the i64 range");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_mapping_root_rejected() {
        let err = decode("- a\n- b\n").unwrap_err();
        assert!(matches!(err, DecodeError::NotAMapping { found: "a sequence" }));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = decode("storage: [unclosed\n").unwrap_err();
        assert!(matches!(err, DecodeError::Syntax(_)));
    }

    #[test]
    fn test_unrecognized_compression_kept_for_validation() {
        let config = decode("storage:\n  compression_type: lz4\n").unwrap();
        assert_eq!(
            config.storage.compression_type,
            CompressionType::Unrecognized("lz4".into())
        );
    }

    #[test]
    fn test_encode_then_decode_is_stable() {
        let config = decode(SCENARIO).unwrap();
        let encoded = encode(&config).unwrap();
        assert!(encoded.contains("raft:"));
        assert_eq!(decode(&encoded).unwrap(), config);
    }
}
