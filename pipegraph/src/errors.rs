//! Error types for pipegraph.
//!
//! The transformation stages themselves are total functions and never fail;
//! errors here come from the opt-in integrity check and from serialization at
//! the output boundary.

use thiserror::Error;

/// The main error type for pipegraph operations.
#[derive(Debug, Error)]
pub enum PipelineGraphError {
    /// The task list violated a structural invariant.
    #[error("{0}")]
    Integrity(#[from] DataIntegrityError),

    /// Serialization of the node/edge set failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error raised by [`verify_integrity`](crate::graph::verify_integrity) when
/// a task list is malformed.
///
/// The graph stages tolerate these conditions (dangling references produce
/// edges with unresolved targets); callers that want strictness run the
/// integrity check before building.
#[derive(Debug, Clone, Error)]
pub enum DataIntegrityError {
    /// Two tasks share the same name.
    #[error("Duplicate task name: '{name}'")]
    DuplicateTaskName {
        /// The duplicated name.
        name: String,
    },

    /// A task's `run_after` references a name that is not a task.
    #[error("Task '{task}' runs after unknown task '{reference}'")]
    DanglingReference {
        /// The task holding the reference.
        task: String,
        /// The unresolved reference.
        reference: String,
    },
}
