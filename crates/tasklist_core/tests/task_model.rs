use chrono::Utc;
use tasklist_core::{Task, TaskValidationError};

#[test]
fn new_task_starts_pending_with_creation_timestamp() {
    let before = Utc::now();
    let task = Task::new("Buy milk", "2 liters").unwrap();

    assert!(!task.id.is_nil());
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.description, "2 liters");
    assert!(!task.completed);
    assert_eq!(task.completed_at, None);
    assert!(task.created_at >= before);
    assert!(task.created_at <= Utc::now());
}

#[test]
fn new_trims_surrounding_whitespace_from_title() {
    let task = Task::new(" Buy milk ", "").unwrap();
    assert_eq!(task.title, "Buy milk");
}

#[test]
fn new_rejects_empty_and_whitespace_only_titles() {
    assert_eq!(
        Task::new("", "x").unwrap_err(),
        TaskValidationError::EmptyTitle
    );
    assert_eq!(
        Task::new("   ", "x").unwrap_err(),
        TaskValidationError::EmptyTitle
    );
}

#[test]
fn set_completed_keeps_timestamp_paired_with_flag() {
    let mut task = Task::new("Water plants", "").unwrap();

    task.set_completed(true);
    assert!(task.completed);
    assert!(task.completed_at.is_some());

    task.set_completed(false);
    assert!(!task.completed);
    assert_eq!(task.completed_at, None);
}

#[test]
fn set_completed_is_idempotent() {
    let mut task = Task::new("Water plants", "").unwrap();

    task.set_completed(false);
    assert_eq!(task.completed_at, None);

    task.set_completed(true);
    let stamped_at = task.completed_at.unwrap();
    task.set_completed(true);
    assert_eq!(task.completed_at, Some(stamped_at));
}

#[test]
fn completion_invariant_holds_across_toggle_sequences() {
    let mut task = Task::new("Recheck", "").unwrap();
    for _ in 0..5 {
        let next = !task.completed;
        task.set_completed(next);
        assert_eq!(task.completed_at.is_some(), task.completed);
        task.validate().unwrap();
    }
}

#[test]
fn rename_trims_and_rejects_empty_replacement() {
    let mut task = Task::new("Old title", "").unwrap();

    task.rename("  New title  ").unwrap();
    assert_eq!(task.title, "New title");

    let err = task.rename("   ").unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);
    assert_eq!(task.title, "New title");
}

#[test]
fn render_summary_marks_completion_state() {
    let mut task = Task::new("Buy milk", "").unwrap();
    assert_eq!(task.render_summary(), "Buy milk (pending)");

    task.set_completed(true);
    assert_eq!(task.render_summary(), "Buy milk (done)");
}

#[test]
fn from_parts_rejects_mismatched_completion_timestamp() {
    let now = Utc::now();

    let err = Task::from_parts("Broken", "", true, now, None).unwrap_err();
    assert_eq!(
        err,
        TaskValidationError::CompletionTimestampMismatch { completed: true }
    );

    let err = Task::from_parts("Broken", "", false, now, Some(now)).unwrap_err();
    assert_eq!(
        err,
        TaskValidationError::CompletionTimestampMismatch { completed: false }
    );
}

#[test]
fn from_parts_accepts_valid_persisted_fields() {
    let now = Utc::now();
    let task = Task::from_parts("Restored", "from disk", true, now, Some(now)).unwrap();

    assert_eq!(task.title, "Restored");
    assert!(task.completed);
    assert_eq!(task.completed_at, Some(now));
    task.validate().unwrap();
}

#[test]
fn timestamp_display_accessors_follow_completion_state() {
    let mut task = Task::new("Display", "").unwrap();
    assert!(!task.created_at_display().is_empty());
    assert!(task.completed_at_display().is_empty());

    task.set_completed(true);
    assert!(!task.completed_at_display().is_empty());
    assert!(task.completed_at_display().contains('/'));
}
