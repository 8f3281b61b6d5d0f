//! Domain model for the task tracker core.
//!
//! # Responsibility
//! - Define the canonical data structures used by store and snapshot logic.
//!
//! # Invariants
//! - Every task keeps `completed_at.is_some() == completed`.
//! - Deletion is real removal from the owning store; there is no tombstone
//!   state.

pub mod task;
