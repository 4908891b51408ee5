//! Typed update operations emitted by builder-mode interactions.
//!
//! The core constructs these payloads; an external reducer applies them.
//! Every operation carries the snapshot id of the task group it was computed
//! against, so a stale operation can be detected instead of silently applying
//! to newer state.

use crate::model::{PipelineTask, TaskReference};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of one immutable task-group snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(Uuid);

impl SnapshotId {
    /// Generates a fresh snapshot id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An update operation produced by a builder-mode node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum UpdateOp {
    /// Add a task to the group.
    AddTask {
        /// Snapshot the operation was computed against.
        snapshot: SnapshotId,
        /// The task to add.
        task: PipelineTask,
    },
    /// Remove a task by name.
    RemoveTask {
        /// Snapshot the operation was computed against.
        snapshot: SnapshotId,
        /// Name of the task to remove.
        name: String,
    },
    /// Replace a placeholder with a chosen task.
    ConvertPlaceholder {
        /// Snapshot the operation was computed against.
        snapshot: SnapshotId,
        /// Name of the placeholder being replaced.
        placeholder: String,
        /// The chosen task.
        task: PipelineTask,
    },
    /// Move a task into the finally section.
    ConvertToFinally {
        /// Snapshot the operation was computed against.
        snapshot: SnapshotId,
        /// Name of the task to move.
        name: String,
    },
    /// Repoint an unresolved task reference at a known task resource.
    FixInvalidReference {
        /// Snapshot the operation was computed against.
        snapshot: SnapshotId,
        /// Name of the task holding the bad reference.
        name: String,
        /// The corrected reference.
        task_ref: TaskReference,
    },
}

impl UpdateOp {
    /// Returns the snapshot id the operation was computed against.
    #[must_use]
    pub fn snapshot(&self) -> SnapshotId {
        match self {
            Self::AddTask { snapshot, .. }
            | Self::RemoveTask { snapshot, .. }
            | Self::ConvertPlaceholder { snapshot, .. }
            | Self::ConvertToFinally { snapshot, .. }
            | Self::FixInvalidReference { snapshot, .. } => *snapshot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_ids_are_unique() {
        assert_ne!(SnapshotId::new(), SnapshotId::new());
    }

    #[test]
    fn test_op_carries_snapshot() {
        let snapshot = SnapshotId::new();
        let op = UpdateOp::RemoveTask {
            snapshot,
            name: "build".to_string(),
        };
        assert_eq!(op.snapshot(), snapshot);
    }

    #[test]
    fn test_op_serialize_tagged() {
        let op = UpdateOp::ConvertToFinally {
            snapshot: SnapshotId::new(),
            name: "cleanup".to_string(),
        };
        let json = serde_json::to_value(&op).unwrap();

        assert_eq!(json["op"], "convert_to_finally");
        assert_eq!(json["name"], "cleanup");
    }

    #[test]
    fn test_op_roundtrip() {
        let op = UpdateOp::FixInvalidReference {
            snapshot: SnapshotId::new(),
            name: "deploy".to_string(),
            task_ref: TaskReference::cluster("kubectl-deploy"),
        };
        let json = serde_json::to_string(&op).unwrap();
        let decoded: UpdateOp = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, op);
    }
}
