//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::{ConfigError, ConfigLoader};
use crate::config::snapshot::{ConfigHandle, Snapshot};
use crate::observability::metrics::{self, ReloadOutcome};

/// A watcher that monitors the configuration file for changes.
///
/// Every change re-runs the full loader pipeline. Only a configuration that
/// passes validation replaces the active snapshot; anything else is logged
/// and the running cluster keeps its previous topology.
pub struct ConfigWatcher {
    path: PathBuf,
    loader: ConfigLoader,
    handle: ConfigHandle,
    update_tx: mpsc::UnboundedSender<Arc<Snapshot>>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher for the file the active snapshot came from.
    ///
    /// Returns the watcher and a receiver for published snapshots.
    pub fn new(
        loader: ConfigLoader,
        handle: ConfigHandle,
    ) -> (Self, mpsc::UnboundedReceiver<Arc<Snapshot>>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let path = handle.load().source.clone();

        (
            Self {
                path,
                loader,
                handle,
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching in notify's background thread.
    ///
    /// Every existing directory the locator searches is watched, not just
    /// the one holding the active file: a reload may resolve to a
    /// higher-priority candidate, and later edits to that file must still
    /// be seen. Watching directories also catches editors that replace the
    /// file (write to temp, rename over). Dropping the returned watcher
    /// stops reloads.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self {
            path,
            loader,
            handle,
            update_tx: tx,
        } = self;

        let mut files = loader.locator().candidates();
        if !files.iter().any(|f| same_file(f, &path)) {
            files.push(path.clone());
        }
        let active_dir = parent_dir(&path);
        let dirs = watch_dirs(&files, &active_dir);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !(event.kind.is_modify() || event.kind.is_create()) {
                        return;
                    }
                    let Some(changed) = event
                        .paths
                        .iter()
                        .find(|p| files.iter().any(|f| same_file(f, p)))
                    else {
                        return;
                    };
                    tracing::info!(path = %changed.display(), "Config file change detected, reloading...");
                    match reload(&loader, &handle) {
                        Ok(Some(snapshot)) => {
                            let _ = tx.send(snapshot);
                        }
                        Ok(None) => {}
                        Err(e) => {
                            tracing::error!(
                                error = %e,
                                generation = handle.generation(),
                                "Failed to reload config. Keeping current configuration."
                            );
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        for dir in &dirs {
            match watcher.watch(dir, RecursiveMode::NonRecursive) {
                Ok(()) => tracing::info!(path = %dir.display(), "Config watcher started"),
                Err(e) if *dir == active_dir => return Err(e),
                Err(e) => tracing::warn!(path = %dir.display(), error = %e, "Cannot watch config directory"),
            }
        }

        Ok(watcher)
    }
}

/// Re-run the pipeline and publish the result if it differs from the
/// active snapshot.
///
/// Returns `Ok(None)` when the file still validates to the same
/// configuration. On error the active snapshot is left untouched.
pub fn reload(
    loader: &ConfigLoader,
    handle: &ConfigHandle,
) -> Result<Option<Arc<Snapshot>>, ConfigError> {
    let loaded = match loader.load() {
        Ok(loaded) => loaded,
        Err(e) => {
            metrics::record_reload(ReloadOutcome::Rejected);
            return Err(e);
        }
    };

    let current = handle.load();
    if current.source == loaded.source && current.config == loaded.config {
        tracing::debug!(generation = current.generation, "Configuration unchanged");
        metrics::record_reload(ReloadOutcome::Unchanged);
        return Ok(None);
    }

    let snapshot = handle.publish(loaded.source, loaded.config);
    let diff = snapshot.membership_changes(&current);
    tracing::info!(
        generation = snapshot.generation,
        nodes = snapshot.config.cluster.nodes.len(),
        added = diff.added.len(),
        removed = diff.removed.len(),
        changed = diff.changed.len(),
        "Configuration reloaded"
    );
    metrics::record_reload(ReloadOutcome::Applied);
    metrics::record_generation(snapshot.generation);

    Ok(Some(snapshot))
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Existing parent directories of `files`, deduplicated, active one first.
fn watch_dirs(files: &[PathBuf], active_dir: &Path) -> Vec<PathBuf> {
    let mut dirs = vec![active_dir.to_path_buf()];
    for dir in files.iter().map(|f| parent_dir(f)) {
        if dir.is_dir() && !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    dirs
}

/// Same file name in the same directory; `x` and `./x` compare equal.
fn same_file(a: &Path, b: &Path) -> bool {
    a.file_name() == b.file_name() && parent_dir(a) == parent_dir(b)
}
