//! Startup orchestration.
//!
//! # Responsibilities
//! - Locate, decode and validate the configuration
//! - Publish it as the first snapshot
//! - Optionally start the reload watcher
//!
//! # Design Decisions
//! - Fail fast: any configuration error is returned before the caller
//!   starts networking, consensus or storage
//! - The initial load is synchronous and has no timeout of its own

use std::sync::Arc;

use notify::RecommendedWatcher;
use tokio::sync::mpsc;

use crate::config::{ConfigError, ConfigHandle, ConfigLoader, ConfigWatcher, Snapshot};
use crate::options::Options;

/// A node whose configuration passed validation.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    pub loader: ConfigLoader,
    pub handle: ConfigHandle,
}

/// Run the initial configuration load.
pub fn bootstrap(options: &Options) -> Result<Bootstrap, ConfigError> {
    bootstrap_with(ConfigLoader::new(options.locator()))
}

/// Run the initial load with an explicit loader.
pub fn bootstrap_with(loader: ConfigLoader) -> Result<Bootstrap, ConfigError> {
    let loaded = loader.load()?;
    let handle = ConfigHandle::new(loaded.source, loaded.config);
    log_summary(&handle.load());
    crate::observability::metrics::record_generation(handle.generation());

    Ok(Bootstrap { loader, handle })
}

impl Bootstrap {
    /// Start reloading on file changes. Dropping the watcher stops it.
    pub fn watch(
        &self,
    ) -> Result<(RecommendedWatcher, mpsc::UnboundedReceiver<Arc<Snapshot>>), notify::Error> {
        let (watcher, updates) = ConfigWatcher::new(self.loader.clone(), self.handle.clone());
        Ok((watcher.run()?, updates))
    }
}

fn log_summary(snapshot: &Snapshot) {
    let config = &snapshot.config;
    tracing::info!(
        source = %snapshot.source.display(),
        generation = snapshot.generation,
        cluster_id = %config.cluster.cluster_id,
        nodes = config.cluster.nodes.len(),
        num_compactors = config.storage.num_compactors,
        compression_type = %config.storage.compression_type,
        compression_ordinal = config.storage.compression_type.ordinal(),
        sync_writes = config.storage.sync_writes,
        "Configuration loaded"
    );
    for node in &config.cluster.nodes {
        tracing::debug!(
            id = %node.id,
            bind_addr = %node.bind_addr,
            storage_dir = %node.storage_dir,
            "Cluster member"
        );
    }
}
