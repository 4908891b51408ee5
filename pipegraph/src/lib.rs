//! # Pipegraph
//!
//! Converts CI/CD pipeline definitions into a node/edge topology for an
//! external graph-layout engine.
//!
//! The transformation is a pure, synchronous function of its inputs and runs
//! in five stages:
//!
//! - **Task extraction**: flatten a pipeline (and optional run overlay) into
//!   an ordered task descriptor list
//! - **Node synthesis**: map each descriptor to a typed graph node
//! - **Parallel normalization**: rewire nodes sharing an identical
//!   multi-predecessor set through a synthetic spacer node
//! - **Finally aggregation**: append one aggregate node for the finally
//!   section, wired after the sinks of the main DAG
//! - **Edge derivation**: one edge per resolved (predecessor, node) pair
//!
//! ## Quick Start
//!
//! ```rust
//! use pipegraph::prelude::*;
//!
//! let pipeline = PipelineDefinition::new("release")
//!     .with_task(PipelineTask::new("build"))
//!     .with_task(PipelineTask::new("test").with_run_after(["build"]))
//!     .with_task(PipelineTask::new("deploy").with_run_after(["test"]));
//!
//! let topology = build_graph(&pipeline, None);
//! assert_eq!(topology.node_count(), 3);
//! assert_eq!(topology.edge_count(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod builder;
pub mod catalog;
pub mod errors;
pub mod graph;
pub mod layout;
pub mod model;
pub mod validation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::builder::{build_builder_graph, SnapshotId, TaskGroup, UpdateOp};
    pub use crate::catalog::{InMemoryTaskCatalog, ResolvedTask, TaskCatalog};
    pub use crate::errors::{DataIntegrityError, PipelineGraphError};
    pub use crate::graph::{
        build_graph, verify_integrity, GraphEdge, GraphNode, GraphTopology, NodeKind,
    };
    pub use crate::layout::LayoutPreset;
    pub use crate::model::{
        PipelineDefinition, PipelineRun, PipelineTask, TaskDescriptor, TaskReference,
        TaskRunStatus, TaskScope,
    };
    pub use crate::validation::{
        diff_errors, validate_bindings, ErrorDelta, TaskErrorMap, TaskErrorTag,
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn prelude_builds_a_graph() {
        let pipeline = PipelineDefinition::new("smoke").with_task(PipelineTask::new("build"));
        assert_eq!(build_graph(&pipeline, None).node_count(), 1);
    }
}
