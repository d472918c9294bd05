//! Error taxonomy shared by every component.
//!
//! None of these are fatal. Callers either log and carry on (`PrefabNotFound`,
//! `DuplicatePrefabKey`, `DegenerateGesture`) or abort the one operation that
//! failed while keeping the live scene intact (`Io`, `SnapshotMissing`,
//! `Snapshot`).

/// Errors raised by placement, persistence and registry operations.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("No surface or entity under the touch point")]
    HitTestMiss,

    #[error("Prefab '{0}' is not registered")]
    PrefabNotFound(String),

    #[error("Duplicate prefab key '{0}', keeping the first registration")]
    DuplicatePrefabKey(String),

    #[error("Pinch distance {0} is too small to derive a scale factor")]
    DegenerateGesture(f32),

    #[error("No saved scene found")]
    SnapshotMissing,

    #[error("Saved scene could not be parsed: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Storage failure: {0}")]
    Io(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SceneError>;
