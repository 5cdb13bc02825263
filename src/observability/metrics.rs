//! Metrics collection.
//!
//! # Metrics
//! - `kqueuey_config_reloads_total` (counter): reload attempts by outcome
//! - `kqueuey_config_generation` (gauge): generation of the active snapshot
//!
//! Without an installed recorder these calls are no-ops.

/// Result of a reload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// A new snapshot was published.
    Applied,
    /// The file validated to the active configuration.
    Unchanged,
    /// Locate, decode or validation failed; previous snapshot kept.
    Rejected,
}

impl ReloadOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            ReloadOutcome::Applied => "applied",
            ReloadOutcome::Unchanged => "unchanged",
            ReloadOutcome::Rejected => "rejected",
        }
    }
}

pub fn record_reload(outcome: ReloadOutcome) {
    metrics::counter!("kqueuey_config_reloads_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_generation(generation: u64) {
    metrics::gauge!("kqueuey_config_generation").set(generation as f64);
}
