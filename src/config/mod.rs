//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! locator.rs (explicit path → KQUEUEY_CONFIG_PATH → fallback dirs)
//!     → decoder.rs (parse YAML, apply defaults.rs, typed decode)
//!     → validation.rs (normalize storage, check topology)
//!     → Snapshot (validated, immutable, versioned)
//!     → shared via ConfigHandle to all subsystems
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs re-runs the whole pipeline
//!     → on success: atomic swap, generation + 1
//!     → on failure: log, keep the previous snapshot
//! ```
//!
//! # Design Decisions
//! - Config is immutable once validated; changes require full reload
//! - Defaults are applied to the raw document, never over present keys
//! - Validation separates normalization (never fails) from topology
//!   checks (fail on the first violation)

pub mod decoder;
pub mod defaults;
pub mod loader;
pub mod locator;
pub mod schema;
pub mod snapshot;
pub mod validation;
pub mod watcher;

pub use decoder::{decode, encode, DecodeError};
pub use loader::{load_config, parse_config, ConfigError, ConfigLoader, LoadedConfig};
pub use locator::SourceLocator;
pub use schema::{ClusterConfig, CompressionType, Configuration, NodeConfig, StorageConfig};
pub use snapshot::{ConfigHandle, MembershipDiff, Snapshot};
pub use validation::ValidationError;
pub use watcher::ConfigWatcher;
