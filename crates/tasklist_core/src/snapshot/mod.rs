//! Durable snapshotting of the task collection.
//!
//! # Responsibility
//! - Define the save/load contract between the store and durable storage.
//! - Keep the on-disk representation opaque to everything else in the crate.
//!
//! # Invariants
//! - A snapshot is always the whole collection; there is no incremental or
//!   append path.
//! - Read paths reject invalid persisted state instead of masking it.
//! - A missing snapshot file is a first run, not an error.

use crate::model::task::{Task, TaskValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_gateway;

pub use json_gateway::{JsonSnapshotGateway, SNAPSHOT_FORMAT_VERSION};

/// Fixed file name for the durable snapshot. The core takes no flags or
/// environment variables; callers that want another location pass an
/// explicit path to [`JsonSnapshotGateway::new`].
pub const DEFAULT_SNAPSHOT_FILENAME: &str = "tasklist.json";

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Persistence failure while saving or loading the task collection.
#[derive(Debug)]
pub enum SnapshotError {
    /// Reading or writing the snapshot file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The in-memory collection could not be serialized.
    Serialize(serde_json::Error),
    /// The snapshot file exists but is not a parseable document.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The document parsed but one record fails task validation.
    InvalidRecord {
        index: usize,
        source: TaskValidationError,
    },
    /// The document declares a format version this build does not read.
    UnsupportedVersion { found: u32, supported: u32 },
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "snapshot I/O failed at `{}`: {source}", path.display())
            }
            Self::Serialize(source) => write!(f, "failed to serialize task collection: {source}"),
            Self::Parse { path, source } => {
                write!(f, "unparseable snapshot at `{}`: {source}", path.display())
            }
            Self::InvalidRecord { index, source } => {
                write!(f, "invalid persisted task at index {index}: {source}")
            }
            Self::UnsupportedVersion { found, supported } => write!(
                f,
                "snapshot format version {found} is newer than supported {supported}"
            ),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(source) => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::InvalidRecord { source, .. } => Some(source),
            Self::UnsupportedVersion { .. } => None,
        }
    }
}

/// Durable storage boundary for the whole task collection.
///
/// The store calls [`save`](SnapshotGateway::save) after every successful
/// mutation and [`load`](SnapshotGateway::load) once at startup; both are
/// blocking and are the only I/O points in the core.
pub trait SnapshotGateway {
    /// Replaces any prior snapshot with the given collection.
    fn save(&self, tasks: &[Task]) -> SnapshotResult<()>;

    /// Reads the persisted collection in its stored order.
    ///
    /// Returns an empty collection when no snapshot exists yet.
    fn load(&self) -> SnapshotResult<Vec<Task>>;
}
