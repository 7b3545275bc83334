//! The single repeating tick source for the live workout.
//!
//! One process-owned task watches the store's active flag: when a workout
//! begins it ticks immediately (so the duration is never visibly stale)
//! and then once per second until the workout ends or the process shuts
//! down. However many surfaces observe the session, there is exactly one
//! underlying timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::store::WorkoutStore;

pub fn spawn(store: Arc<WorkoutStore>) -> JoinHandle<()> {
    let mut active_rx = store.subscribe_active();

    tokio::spawn(async move {
        loop {
            // Park until a workout becomes active.
            while !*active_rx.borrow_and_update() {
                if active_rx.changed().await.is_err() {
                    return;
                }
            }

            // The first interval tick completes immediately.
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        store.tick();
                    }
                    changed = active_rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                        if !*active_rx.borrow_and_update() {
                            break;
                        }
                    }
                }
            }
        }
    })
}
