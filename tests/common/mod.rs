//! Shared fixtures for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use kqueuey::config::{ConfigLoader, SourceLocator};

/// A node entry as written into a fixture document.
pub struct Node {
    pub id: &'static str,
    pub bind_addr: &'static str,
    pub storage_dir: &'static str,
}

pub const fn node(id: &'static str, bind_addr: &'static str, storage_dir: &'static str) -> Node {
    Node {
        id,
        bind_addr,
        storage_dir,
    }
}

/// The three-node cluster from the reference scenario.
pub fn three_nodes() -> Vec<Node> {
    vec![
        node("1", "127.0.0.1:1111", "a"),
        node("2", "127.0.0.1:1211", "b"),
        node("3", "127.0.0.1:1311", "c"),
    ]
}

/// Render a configuration document.
pub fn document(cluster_id: &str, num_compactors: i64, nodes: &[Node]) -> String {
    let mut doc = format!(
        "storage:\n  num_compactors: {num_compactors}\n  compression_type: snappy\n  sync_writes: false\nraft:\n  cluster_id: \"{cluster_id}\"\n  nodes:\n"
    );
    if nodes.is_empty() {
        doc.push_str("    []\n");
    }
    for n in nodes {
        doc.push_str(&format!(
            "    - id: \"{}\"\n      bind_addr: \"{}\"\n      storage_dir: \"{}\"\n",
            n.id, n.bind_addr, n.storage_dir
        ));
    }
    doc
}

/// Write `kqueuey-config.yaml` into `dir`.
pub fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("kqueuey-config.yaml");
    fs::write(&path, content).unwrap();
    path
}

/// Loader that only searches `dir`.
#[allow(dead_code)]
pub fn loader_for(dir: &Path) -> ConfigLoader {
    ConfigLoader::new(SourceLocator::new(Some(dir.to_path_buf()), None, Vec::new()))
}
