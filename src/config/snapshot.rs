//! Versioned configuration snapshots with lock-free reads.
//!
//! The active snapshot lives in an `ArcSwap`. Readers call [`ConfigHandle::load`]
//! and keep a consistent `Arc<Snapshot>` for as long as they need it; a reload
//! publishes a brand new snapshot instead of touching the old one.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use arc_swap::ArcSwap;

use crate::config::schema::{Configuration, NodeConfig};

/// One validated configuration, immutable once published.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Starts at 1; each publish increments it by one.
    pub generation: u64,
    pub source: PathBuf,
    pub loaded_at: SystemTime,
    pub config: Configuration,
}

impl Snapshot {
    /// Node membership changes relative to `previous`, keyed by node id.
    pub fn membership_changes(&self, previous: &Snapshot) -> MembershipDiff {
        let before: HashMap<&str, &NodeConfig> = previous
            .config
            .cluster
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), node))
            .collect();
        let after: HashMap<&str, &NodeConfig> = self
            .config
            .cluster
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), node))
            .collect();

        let mut diff = MembershipDiff::default();
        for node in &self.config.cluster.nodes {
            match before.get(node.id.as_str()) {
                None => diff.added.push(node.clone()),
                Some(old) if *old != node => diff.changed.push(node.clone()),
                Some(_) => {}
            }
        }
        for node in &previous.config.cluster.nodes {
            if !after.contains_key(node.id.as_str()) {
                diff.removed.push(node.clone());
            }
        }
        diff
    }
}

/// Nodes added, removed or re-addressed between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipDiff {
    pub added: Vec<NodeConfig>,
    pub removed: Vec<NodeConfig>,
    pub changed: Vec<NodeConfig>,
}

impl MembershipDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Shared handle to the active snapshot. Clones point at the same cell.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    inner: Arc<ArcSwap<Snapshot>>,
}

impl ConfigHandle {
    /// Create a handle holding generation 1.
    pub fn new(source: PathBuf, config: Configuration) -> Self {
        let snapshot = Snapshot {
            generation: 1,
            source,
            loaded_at: SystemTime::now(),
            config,
        };
        Self {
            inner: Arc::new(ArcSwap::from_pointee(snapshot)),
        }
    }

    /// Current snapshot.
    pub fn load(&self) -> Arc<Snapshot> {
        self.inner.load_full()
    }

    pub fn generation(&self) -> u64 {
        self.inner.load().generation
    }

    /// Atomically replace the active snapshot with a new generation.
    pub fn publish(&self, source: PathBuf, config: Configuration) -> Arc<Snapshot> {
        let mut published = None;
        self.inner.rcu(|current| {
            let next = Arc::new(Snapshot {
                generation: current.generation + 1,
                source: source.clone(),
                loaded_at: SystemTime::now(),
                config: config.clone(),
            });
            published = Some(Arc::clone(&next));
            next
        });
        // rcu runs the closure at least once
        published.unwrap_or_else(|| self.load())
    }
}
