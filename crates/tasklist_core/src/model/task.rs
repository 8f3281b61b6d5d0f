//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record owned by the store.
//! - Provide lifecycle helpers for completion state transitions.
//!
//! # Invariants
//! - `title` is never empty after trimming surrounding whitespace.
//! - `completed_at.is_some() == completed` after every operation.
//! - `created_at` is set once at construction and never changes.

use chrono::{DateTime, Local, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable in-process handle for one task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Handles are generated at creation and are not part of the snapshot
/// exchange format; a fresh process assigns fresh handles on load.
pub type TaskId = Uuid;

/// Display pattern for timestamp accessors shown next to a selected task.
const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Validation failure for task construction and mediated edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty after trimming surrounding whitespace.
    EmptyTitle,
    /// `completed` and `completed_at` disagree (only reachable from
    /// persisted state; in-memory transitions keep the pair in step).
    CompletionTimestampMismatch { completed: bool },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty or whitespace-only"),
            Self::CompletionTimestampMismatch { completed } => write!(
                f,
                "completed_at must be present exactly when completed is true (completed={completed})"
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// One to-do entry.
///
/// Tasks are created through [`Task::new`] (normally via the store) and
/// mutated through the helpers below so the completion-timestamp pairing
/// can never drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Process-local handle used by store operations.
    pub id: TaskId,
    /// Short label, non-empty after trimming.
    pub title: String,
    /// Free-form detail text, may be empty.
    pub description: String,
    /// Completion flag; `Pending` when false, `Completed` when true.
    pub completed: bool,
    /// Wall-clock creation time, immutable after construction.
    pub created_at: DateTime<Utc>,
    /// Present iff `completed` is true.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a pending task stamped with the current wall-clock time.
    ///
    /// Surrounding whitespace is trimmed from the title before validation,
    /// so `" Buy milk "` is stored as `"Buy milk"`.
    ///
    /// # Errors
    /// - `EmptyTitle` when nothing remains of the title after trimming.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            title: trimmed.to_string(),
            description: description.into(),
            completed: false,
            created_at: Utc::now(),
            completed_at: None,
        })
    }

    /// Reconstructs a task from persisted field values.
    ///
    /// Used by snapshot read paths where the field set already exists on
    /// disk. The title is kept verbatim; a fresh handle is assigned.
    ///
    /// # Errors
    /// - Any [`TaskValidationError`] the persisted field set fails.
    pub fn from_parts(
        title: impl Into<String>,
        description: impl Into<String>,
        completed: bool,
        created_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            completed,
            created_at,
            completed_at,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks the field-level invariants.
    ///
    /// In-memory construction and mutation cannot violate them; read paths
    /// over persisted state must call this instead of masking bad data.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if self.completed_at.is_some() != self.completed {
            return Err(TaskValidationError::CompletionTimestampMismatch {
                completed: self.completed,
            });
        }
        Ok(())
    }

    /// Sets the completion flag, stamping or clearing `completed_at`.
    ///
    /// Idempotent: setting the current value again changes nothing, so an
    /// already-stamped completion time is not rewritten.
    pub fn set_completed(&mut self, value: bool) {
        if self.completed == value {
            return;
        }
        self.completed = value;
        self.completed_at = value.then(Utc::now);
    }

    /// Replaces the title, applying the same trimming and validation as
    /// construction.
    ///
    /// # Errors
    /// - `EmptyTitle` when the replacement trims to nothing; the current
    ///   title is left unchanged.
    pub fn rename(&mut self, title: impl Into<String>) -> Result<(), TaskValidationError> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        self.title = trimmed.to_string();
        Ok(())
    }

    /// Replaces the detail text.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Returns the title suffixed with a completion marker, for list display
    /// only — never for identity comparison.
    pub fn render_summary(&self) -> String {
        let marker = if self.completed { "done" } else { "pending" };
        format!("{} ({marker})", self.title)
    }

    /// Creation time formatted in local time for the detail view.
    pub fn created_at_display(&self) -> String {
        format_local(self.created_at)
    }

    /// Completion time formatted in local time, or an empty string while
    /// the task is pending.
    pub fn completed_at_display(&self) -> String {
        self.completed_at.map(format_local).unwrap_or_default()
    }
}

fn format_local(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format(DISPLAY_TIMESTAMP_FORMAT)
        .to_string()
}
