//! JSON file implementation of the snapshot gateway.
//!
//! # Responsibility
//! - Map tasks to the portable exchange document and back.
//! - Replace the snapshot file atomically on every save.
//!
//! # Invariants
//! - Writes go through a temp file and a rename; a crash mid-write never
//!   leaves a torn snapshot behind.
//! - The exchange document is versioned; a missing `version` key reads as
//!   version 1, anything else is rejected (no migration path exists).

use super::{SnapshotError, SnapshotGateway, SnapshotResult};
use crate::model::task::Task;
use chrono::{DateTime, Utc};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Exchange format version written by this build.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// On-disk document shape.
///
/// Timestamps serialize as RFC 3339 strings. Task handles are process-local
/// and deliberately absent from the document.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    #[serde(default = "default_version")]
    version: u32,
    tasks: Vec<TaskRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    title: String,
    description: String,
    completed: bool,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

fn default_version() -> u32 {
    SNAPSHOT_FORMAT_VERSION
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
            created_at: task.created_at,
            completed_at: task.completed_at,
        }
    }
}

impl TaskRecord {
    fn into_task(self, index: usize) -> SnapshotResult<Task> {
        Task::from_parts(
            self.title,
            self.description,
            self.completed,
            self.created_at,
            self.completed_at,
        )
        .map_err(|source| SnapshotError::InvalidRecord { index, source })
    }
}

/// Snapshot gateway storing the collection as one JSON document.
#[derive(Debug)]
pub struct JsonSnapshotGateway {
    path: PathBuf,
}

impl JsonSnapshotGateway {
    /// Creates a gateway over the given snapshot file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SnapshotError {
        SnapshotError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SnapshotGateway for JsonSnapshotGateway {
    fn save(&self, tasks: &[Task]) -> SnapshotResult<()> {
        let started_at = Instant::now();

        let document = SnapshotDocument {
            version: SNAPSHOT_FORMAT_VERSION,
            tasks: tasks.iter().map(TaskRecord::from).collect(),
        };
        let payload =
            serde_json::to_string_pretty(&document).map_err(SnapshotError::Serialize)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
            }
        }

        // Temp file + rename keeps the previous snapshot intact until the
        // replacement is fully on disk.
        let temp_path = self.path.with_extension("tmp");
        let result = std::fs::write(&temp_path, payload)
            .and_then(|()| std::fs::rename(&temp_path, &self.path));

        match result {
            Ok(()) => {
                info!(
                    "event=snapshot_save module=snapshot status=ok count={} duration_ms={}",
                    tasks.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=snapshot_save module=snapshot status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(self.io_error(err))
            }
        }
    }

    fn load(&self) -> SnapshotResult<Vec<Task>> {
        let started_at = Instant::now();

        if !self.path.exists() {
            info!("event=snapshot_load module=snapshot status=ok mode=first_run count=0");
            return Ok(Vec::new());
        }

        let payload = std::fs::read_to_string(&self.path).map_err(|err| {
            error!(
                "event=snapshot_load module=snapshot status=error error_code=read_failed error={}",
                err
            );
            self.io_error(err)
        })?;

        let document: SnapshotDocument = serde_json::from_str(&payload).map_err(|err| {
            error!(
                "event=snapshot_load module=snapshot status=error error_code=parse_failed error={}",
                err
            );
            SnapshotError::Parse {
                path: self.path.clone(),
                source: err,
            }
        })?;

        if document.version != SNAPSHOT_FORMAT_VERSION {
            error!(
                "event=snapshot_load module=snapshot status=error error_code=unsupported_version found={}",
                document.version
            );
            return Err(SnapshotError::UnsupportedVersion {
                found: document.version,
                supported: SNAPSHOT_FORMAT_VERSION,
            });
        }

        let mut tasks = Vec::with_capacity(document.tasks.len());
        for (index, record) in document.tasks.into_iter().enumerate() {
            tasks.push(record.into_task(index)?);
        }

        info!(
            "event=snapshot_load module=snapshot status=ok count={} duration_ms={}",
            tasks.len(),
            started_at.elapsed().as_millis()
        );
        Ok(tasks)
    }
}
