//! kqueuey: startup configuration for a Raft-coordinated key-value queue server.
//!
//! Locates the configuration document, applies defaults, decodes it into a
//! typed model and validates the declared cluster topology before any
//! networking, consensus or storage starts.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod options;

pub use config::{ConfigError, ConfigHandle, ConfigLoader, Configuration, Snapshot};
pub use lifecycle::Shutdown;
