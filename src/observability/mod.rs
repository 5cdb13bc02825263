//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config pipeline, watcher, lifecycle
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (reload counters, active generation)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) by default, plain text for development
//! - Metrics go through the `metrics` facade; the embedding process
//!   decides whether to install an exporter

pub mod logging;
pub mod metrics;
