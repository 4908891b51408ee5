//! Pipeline-to-graph transformation.
//!
//! This module provides:
//! - Task extraction from pipeline definitions and run overlays
//! - Node synthesis with kind dispatch
//! - Parallel-dependency normalization through spacer nodes
//! - Finally-task aggregation
//! - Edge derivation
//!
//! The stages compose in [`build_graph`], a pure function of its inputs:
//! the same pipeline and run snapshot always produce the same node and edge
//! lists, synthetic ids included.

mod edge;
mod extract;
mod finally;
#[cfg(test)]
mod graph_tests;
mod node;
mod normalize;

pub use edge::{derive_edges, edge_id, GraphEdge};
pub use extract::extract_tasks;
pub use finally::{
    append_finally_group, finally_group_height, find_last_tasks, FINALLY_NODE_ID,
};
pub use node::{
    synthesize_node, synthesize_node_sized, GraphNode, NodeData, NodeKind, BUILDER_NODE_WIDTH,
    FINALLY_NODE_PADDING, FINALLY_NODE_VERTICAL_SPACING, NODE_HEIGHT, NODE_WIDTH,
};
pub use normalize::normalize_parallel_dependencies;

use crate::errors::DataIntegrityError;
use crate::model::{PipelineDefinition, PipelineRun, TaskDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// The node and edge set handed to an external layout engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphTopology {
    /// All nodes, synthetic ones included.
    pub nodes: Vec<GraphNode>,
    /// One directed edge per resolved (predecessor, node) pair.
    pub edges: Vec<GraphEdge>,
}

impl GraphTopology {
    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Returns true when the topology holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builds the full pipeline topology from a definition and optional run.
///
/// Runs all five transformation stages: extraction, node synthesis,
/// parallel-dependency normalization, finally aggregation, and edge
/// derivation. Pure and synchronous; call it on every input change.
#[must_use]
pub fn build_graph(pipeline: &PipelineDefinition, run: Option<&PipelineRun>) -> GraphTopology {
    let descriptors = extract_tasks(pipeline, run);
    build_graph_from_descriptors(descriptors, false)
}

/// Builds a topology directly from an extracted descriptor list.
///
/// The builder-mode variant reuses this entry point with its own node
/// synthesis; `builder_row` selects the builder finally aggregate.
#[must_use]
pub fn build_graph_from_descriptors(
    descriptors: Vec<TaskDescriptor>,
    builder_row: bool,
) -> GraphTopology {
    let (finally, main): (Vec<_>, Vec<_>) =
        descriptors.into_iter().partition(|d| d.is_finally_task);

    let nodes: Vec<GraphNode> = main
        .into_iter()
        .map(|descriptor| synthesize_node(descriptor, None))
        .collect();

    let nodes = normalize_parallel_dependencies(nodes);
    let nodes = append_finally_group(nodes, finally, builder_row);
    let edges = derive_edges(&nodes);

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        "built pipeline topology"
    );
    GraphTopology { nodes, edges }
}

/// Verifies structural invariants of a descriptor list.
///
/// The transformation stages tolerate malformed input; this opt-in check
/// lets callers reject duplicate task names and dangling `run_after`
/// references upstream instead.
///
/// # Errors
///
/// Returns the first [`DataIntegrityError`] encountered.
pub fn verify_integrity(descriptors: &[TaskDescriptor]) -> Result<(), DataIntegrityError> {
    let mut names = HashSet::new();
    for descriptor in descriptors {
        if !names.insert(descriptor.name.as_str()) {
            return Err(DataIntegrityError::DuplicateTaskName {
                name: descriptor.name.clone(),
            });
        }
    }

    for descriptor in descriptors {
        for reference in &descriptor.run_after {
            if !names.contains(reference.as_str()) {
                return Err(DataIntegrityError::DanglingReference {
                    task: descriptor.name.clone(),
                    reference: reference.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PipelineTask;

    fn descriptor(name: &str, run_after: &[&str]) -> TaskDescriptor {
        TaskDescriptor::from_task(
            PipelineTask::new(name).with_run_after(run_after.iter().copied()),
        )
    }

    #[test]
    fn test_verify_integrity_ok() {
        let descriptors = vec![descriptor("a", &[]), descriptor("b", &["a"])];
        assert!(verify_integrity(&descriptors).is_ok());
    }

    #[test]
    fn test_verify_integrity_duplicate_name() {
        let descriptors = vec![descriptor("a", &[]), descriptor("a", &[])];
        let err = verify_integrity(&descriptors).unwrap_err();
        assert!(matches!(
            err,
            DataIntegrityError::DuplicateTaskName { name } if name == "a"
        ));
    }

    #[test]
    fn test_verify_integrity_dangling_reference() {
        let descriptors = vec![descriptor("b", &["missing"])];
        let err = verify_integrity(&descriptors).unwrap_err();
        assert!(matches!(
            err,
            DataIntegrityError::DanglingReference { task, reference }
                if task == "b" && reference == "missing"
        ));
    }

    #[test]
    fn test_topology_lookup() {
        let pipeline = PipelineDefinition::new("p").with_task(PipelineTask::new("build"));
        let topology = build_graph(&pipeline, None);

        assert_eq!(topology.node_count(), 1);
        assert_eq!(topology.edge_count(), 0);
        assert!(topology.node("build").is_some());
        assert!(topology.node("missing").is_none());
        assert!(!topology.is_empty());
    }
}
