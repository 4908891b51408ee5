//! Edge derivation from resolved predecessor lists.

use super::node::GraphNode;
use serde::{Deserialize, Serialize};

/// A directed edge in the pipeline topology graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Deterministic edge id: `<source>~to~<target>`.
    pub id: String,
    /// The predecessor node id.
    pub source: String,
    /// The dependent node id.
    pub target: String,
}

impl GraphEdge {
    /// Creates an edge from a predecessor to a dependent node.
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: edge_id(&source, &target),
            source,
            target,
        }
    }
}

/// Builds the deterministic edge id for a (source, target) pair.
#[must_use]
pub fn edge_id(source: &str, target: &str) -> String {
    format!("{source}~to~{target}")
}

/// Derives one edge per (predecessor, node) pair across all nodes.
///
/// Nodes with an empty `run_after` contribute no edges. No validation that
/// a source resolves to a real node id happens here; dangling references
/// are a caller responsibility.
#[must_use]
pub fn derive_edges(nodes: &[GraphNode]) -> Vec<GraphEdge> {
    nodes
        .iter()
        .flat_map(|node| {
            node.run_after
                .iter()
                .map(|source| GraphEdge::new(source, &node.id))
        })
        .collect()
}
