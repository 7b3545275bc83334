//! Startup reconciliation of a persisted workout against the current
//! identity, plus the post-login cache warm.

use crate::repositories::{HistoryRepository, RoutineRepository};
use crate::store::WorkoutStore;

/// Decide once per process whether the persisted snapshot may be restored.
///
/// Runs when the identity collaborator first reports its state; later
/// calls are no-ops. An active in-memory session always wins over any
/// snapshot, and a snapshot belonging to a different identity (or to no
/// signed-in identity at all) is discarded, never restored.
pub fn reconcile(store: &WorkoutStore, identity: Option<&str>) {
    if store.restore_attempted() {
        return;
    }

    if store.is_active() {
        store.mark_restore_attempted();
        return;
    }

    let Some(snapshot) = store.snapshots().load() else {
        store.mark_restore_attempted();
        return;
    };

    match identity {
        Some(user_id) if snapshot.owner_id.as_deref() == Some(user_id) => {
            store.restore(snapshot);
        }
        Some(user_id) => {
            tracing::info!(
                user_id,
                snapshot_owner = ?snapshot.owner_id,
                "Discarding workout snapshot for a different owner"
            );
            store.snapshots().clear();
            store.mark_restore_attempted();
        }
        None => {
            tracing::info!("Discarding orphaned workout snapshot: no signed-in identity");
            store.snapshots().clear();
            store.mark_restore_attempted();
        }
    }
}

/// Preload the owner's routines and recent history after sign-in. Purely
/// a cache warm: failures are logged and never surfaced.
pub async fn warm_cache(
    routines: &RoutineRepository,
    history: &HistoryRepository,
    user_id: &str,
) {
    match routines.find_by_user(user_id).await {
        Ok(routines) => tracing::debug!(user_id, count = routines.len(), "Preloaded routines"),
        Err(e) => tracing::warn!(user_id, "Routine preload failed: {}", e),
    }

    match history.find_recent(user_id, 5).await {
        Ok(records) => {
            tracing::debug!(user_id, count = records.len(), "Preloaded recent history")
        }
        Err(e) => tracing::warn!(user_id, "History preload failed: {}", e),
    }
}
