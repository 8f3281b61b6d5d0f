//! Task store and aggregate counts.
//!
//! # Responsibility
//! - Provide the only mutation entry points for the task collection.
//! - Trigger durable snapshotting as a side effect of every mutation.
//!
//! # Invariants
//! - A snapshot failure never rolls back the in-memory mutation that
//!   triggered it; the running process keeps the store as source of truth
//!   and only durability is at risk.
//! - Absent handles are an expected race with stale UI selections and are
//!   reported as `false`, never as errors.

use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::snapshot::{SnapshotError, SnapshotGateway, SnapshotResult};
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a store mutation.
#[derive(Debug)]
pub enum StoreError {
    /// The requested mutation was rejected; nothing changed.
    Validation(TaskValidationError),
    /// The mutation was applied in memory but could not be made durable.
    Snapshot(SnapshotError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Snapshot(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Snapshot(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<SnapshotError> for StoreError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

/// Aggregate counts over a task collection.
///
/// Recomputed by linear scan on demand, never cached; collections are small
/// and correctness wins over speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskCounts {
    /// Tallies `{total, completed, pending}` for any task slice.
    ///
    /// `total == completed + pending` holds for every input.
    pub fn tally(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total,
            completed,
            pending: total - completed,
        }
    }
}

/// The authoritative in-memory task collection.
///
/// Mutations take `&mut self`, so one store instance has a single writer by
/// construction. A store shared across threads must sit behind one
/// mutual-exclusion scope covering the mutation and its paired snapshot;
/// there is no internal locking.
///
/// Dropping the store attempts one final best-effort snapshot, mirroring a
/// shutdown hook: failures are logged and never panic or block teardown.
pub struct TaskStore<G: SnapshotGateway> {
    gateway: G,
    tasks: Vec<Task>,
}

impl<G: SnapshotGateway> TaskStore<G> {
    /// Creates an empty store over the given gateway.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            tasks: Vec::new(),
        }
    }

    /// Replaces the in-memory collection from the gateway.
    ///
    /// Called once at startup to seed the store. On failure the store is
    /// left empty and the error is surfaced; the caller decides whether to
    /// continue with the empty collection or abort.
    pub fn reload(&mut self) -> SnapshotResult<usize> {
        match self.gateway.load() {
            Ok(tasks) => {
                self.tasks = tasks;
                Ok(self.tasks.len())
            }
            Err(err) => {
                self.tasks.clear();
                Err(err)
            }
        }
    }

    /// Creates a task and appends it to the end of the collection.
    ///
    /// Returns the handle of the stored task. On a `Snapshot` error the task
    /// is already in the store and reachable through [`all`](Self::all).
    ///
    /// # Errors
    /// - `Validation` when the title trims to nothing; nothing is added.
    /// - `Snapshot` when persisting the grown collection fails.
    pub fn add(&mut self, title: &str, description: &str) -> StoreResult<TaskId> {
        let task = Task::new(title, description)?;
        let id = task.id;
        self.tasks.push(task);
        self.snapshot()?;
        Ok(id)
    }

    /// Removes the first task with the given handle.
    ///
    /// Returns `Ok(false)` when the handle is not present (stale selection);
    /// no snapshot is written in that case.
    pub fn remove(&mut self, id: TaskId) -> StoreResult<bool> {
        let Some(position) = self.tasks.iter().position(|task| task.id == id) else {
            return Ok(false);
        };
        self.tasks.remove(position);
        self.snapshot()?;
        Ok(true)
    }

    /// Flips the completion state of the task with the given handle.
    ///
    /// Returns `Ok(false)` when the handle is not present.
    pub fn toggle(&mut self, id: TaskId) -> StoreResult<bool> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(false);
        };
        let next = !task.completed;
        task.set_completed(next);
        self.snapshot()?;
        Ok(true)
    }

    /// Replaces title and description of the task with the given handle.
    ///
    /// Returns `Ok(false)` when the handle is not present.
    ///
    /// # Errors
    /// - `Validation` when the new title trims to nothing; the task keeps
    ///   its previous title and description.
    pub fn edit(&mut self, id: TaskId, title: &str, description: &str) -> StoreResult<bool> {
        let Some(position) = self.tasks.iter().position(|task| task.id == id) else {
            return Ok(false);
        };
        self.tasks[position].rename(title)?;
        self.tasks[position].set_description(description);
        self.snapshot()?;
        Ok(true)
    }

    /// Read-only view of the collection in insertion order.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up one task by handle.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Current aggregate counts, recomputed on every call.
    pub fn counts(&self) -> TaskCounts {
        TaskCounts::tally(&self.tasks)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn snapshot(&self) -> StoreResult<()> {
        self.gateway.save(&self.tasks)?;
        Ok(())
    }
}

impl<G: SnapshotGateway> Drop for TaskStore<G> {
    fn drop(&mut self) {
        if let Err(err) = self.gateway.save(&self.tasks) {
            error!("event=shutdown_save module=store status=error error={err}");
        }
    }
}
