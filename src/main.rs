//! kqueuey server bootstrap.
//!
//! # Architecture Overview
//!
//! ```text
//!   --config / KQUEUEY_CONFIG_PATH / default dirs
//!                  │
//!                  ▼
//!        ┌──────────────────┐    ┌──────────┐    ┌────────────┐
//!        │  source locator  │───▶│ decoder  │───▶│ validator  │
//!        └──────────────────┘    └──────────┘    └─────┬──────┘
//!                  ▲                                   │
//!                  │ file change                       ▼
//!        ┌──────────────────┐               ┌────────────────────┐
//!        │  reload watcher  │──────────────▶│  ConfigHandle      │──▶ consensus, storage
//!        └──────────────────┘   on success  │  (versioned swap)  │
//!                                           └────────────────────┘
//! ```
//!
//! The consensus and storage engines consume the validated snapshot; they
//! are not part of this binary yet. An invalid configuration terminates the
//! process before anything else starts.

use std::process::ExitCode;

use clap::Parser;

use kqueuey::lifecycle::{bootstrap, signals, Shutdown};
use kqueuey::observability::logging::init_logging;
use kqueuey::options::Options;

#[tokio::main]
async fn main() -> ExitCode {
    let options = Options::parse();
    init_logging(&options.log_level, options.log_format);

    tracing::info!("kqueuey v{} starting", env!("CARGO_PKG_VERSION"));

    let node = match bootstrap(&options) {
        Ok(node) => node,
        Err(e) => {
            tracing::error!(error = %e, "Configuration rejected, refusing to start");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();

    // Keep the watcher alive for the lifetime of the process.
    let _watcher = if options.watch {
        match node.watch() {
            Ok((watcher, mut updates)) => {
                let mut stop = shutdown.subscribe();
                tokio::spawn(async move {
                    loop {
                        tokio::select! {
                            _ = stop.recv() => break,
                            update = updates.recv() => match update {
                                Some(snapshot) => tracing::info!(
                                    generation = snapshot.generation,
                                    cluster_id = %snapshot.config.cluster.cluster_id,
                                    "Active configuration replaced"
                                ),
                                None => break,
                            },
                        }
                    }
                });
                Some(watcher)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to start config watcher");
                return ExitCode::FAILURE;
            }
        }
    } else {
        None
    };

    if let Err(e) = signals::wait_for_shutdown_signal().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }

    tracing::info!(generation = node.handle.generation(), "Shutting down");
    shutdown.trigger();

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
