//! Durable mirror of the live workout.
//!
//! The active workout is mirrored to a single JSON file after every
//! mutation so an interrupted process can pick the session back up. The
//! file is a best-effort recovery aid, not a transactional log: a write
//! that races process teardown may lose the last mutation, and every
//! failure path here degrades to "no snapshot" rather than an error.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ActiveWorkout;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct SnapshotEnvelope {
    version: u32,
    data: ActiveWorkout,
    written_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mirror the workout to disk: write when active, delete when idle.
    /// Never fails outward; a failed write only costs recoverability.
    pub fn save(&self, workout: &ActiveWorkout) {
        if !workout.is_active {
            self.clear();
            return;
        }

        let envelope = SnapshotEnvelope {
            version: SNAPSHOT_VERSION,
            data: workout.clone(),
            written_at: Utc::now(),
        };

        match serde_json::to_vec(&envelope) {
            Ok(bytes) => {
                if let Err(e) = std::fs::write(&self.path, bytes) {
                    tracing::warn!("Failed to write workout snapshot: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize workout snapshot: {}", e),
        }
    }

    /// Load a previously mirrored workout. Returns `None` when the file is
    /// absent, unparseable, of a different version, or holds an idle
    /// payload; every discard also removes the file.
    pub fn load(&self) -> Option<ActiveWorkout> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read workout snapshot: {}", e);
                return None;
            }
        };

        let envelope: SnapshotEnvelope = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::debug!("Discarding unparseable workout snapshot: {}", e);
                self.clear();
                return None;
            }
        };

        if envelope.version != SNAPSHOT_VERSION {
            tracing::debug!(
                "Discarding workout snapshot with version {} (expected {})",
                envelope.version,
                SNAPSHOT_VERSION
            );
            self.clear();
            return None;
        }

        // An idle snapshot should never have been written; do not restore
        // one if found.
        if !envelope.data.is_active {
            self.clear();
            return None;
        }

        Some(envelope.data)
    }

    /// Delete the snapshot unconditionally. Never fails outward.
    pub fn clear(&self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to clear workout snapshot: {}", e);
            }
        }
    }
}
