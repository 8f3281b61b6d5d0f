//! Core domain logic for the task tracker.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod snapshot;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use snapshot::{
    JsonSnapshotGateway, SnapshotError, SnapshotGateway, SnapshotResult,
    DEFAULT_SNAPSHOT_FILENAME, SNAPSHOT_FORMAT_VERSION,
};
pub use store::task_store::{StoreError, StoreResult, TaskCounts, TaskStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
