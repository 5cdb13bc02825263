//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Locate config → Decode → Validate → publish generation 1
//!     → optional reload watcher
//!
//! Shutdown (shutdown.rs):
//!     Signal received → notify subscribers → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: an invalid configuration aborts startup before anything
//!   binds a port or opens a data directory
//! - Reload failures never stop a running node

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{bootstrap, Bootstrap};
