//! CLI smoke entry point.
//!
//! # Responsibility
//! - Seed a store from the default snapshot path and print aggregate counts.
//! - Keep output deterministic for quick local sanity checks.

use tasklist_core::{JsonSnapshotGateway, TaskStore, DEFAULT_SNAPSHOT_FILENAME};

fn main() {
    println!("tasklist_core ping={}", tasklist_core::ping());
    println!("tasklist_core version={}", tasklist_core::core_version());

    let gateway = JsonSnapshotGateway::new(DEFAULT_SNAPSHOT_FILENAME);
    let mut store = TaskStore::new(gateway);
    if let Err(err) = store.reload() {
        eprintln!("snapshot load failed, starting with an empty store: {err}");
    }

    let counts = store.counts();
    println!(
        "tasks total={} completed={} pending={}",
        counts.total, counts.completed, counts.pending
    );
    // Dropping the store performs the best-effort shutdown snapshot.
}
