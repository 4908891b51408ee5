//! Finally-task aggregation.
//!
//! All finally tasks render inside one visual group, so the graph carries a
//! single aggregate node wired after the sinks of the main DAG. With no
//! finally tasks the node list is returned unchanged.

use super::node::{
    synthesize_node_sized, GraphNode, NodeKind, FINALLY_NODE_PADDING,
    FINALLY_NODE_VERTICAL_SPACING, NODE_HEIGHT,
};
use crate::model::TaskDescriptor;
use std::collections::HashSet;
use tracing::debug;

/// Id of the single finally aggregate node.
pub const FINALLY_NODE_ID: &str = "finally-node";

/// Returns the ids of the sinks of the main DAG: nodes not referenced as a
/// predecessor by any other node, deduplicated, in node-list order.
#[must_use]
pub fn find_last_tasks(nodes: &[GraphNode]) -> Vec<String> {
    let referenced: HashSet<&str> = nodes
        .iter()
        .flat_map(|node| node.run_after.iter().map(String::as_str))
        .collect();

    let mut seen = HashSet::new();
    nodes
        .iter()
        .filter(|node| !referenced.contains(node.id.as_str()))
        .filter(|node| seen.insert(node.id.clone()))
        .map(|node| node.id.clone())
        .collect()
}

/// Computes the height of the finally aggregate node from its row count.
#[must_use]
pub fn finally_group_height(count: usize, builder_row: bool) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let rows = count as f64 * NODE_HEIGHT;
    #[allow(clippy::cast_precision_loss)]
    let spacing = count.saturating_sub(1) as f64 * FINALLY_NODE_VERTICAL_SPACING;
    let builder = if builder_row { NODE_HEIGHT } else { 0.0 };

    rows + spacing + builder + 2.0 * FINALLY_NODE_PADDING
}

/// Appends the finally aggregate node to the node list.
///
/// Identity transform when `finally_tasks` is empty. Otherwise exactly one
/// node of kind [`NodeKind::Finally`] (or [`NodeKind::BuilderFinally`] when
/// `builder_row` is set) is appended, running after every sink of the main
/// DAG. Edges from the sinks are produced by the normal edge-derivation
/// stage; nothing special happens there.
#[must_use]
pub fn append_finally_group(
    mut nodes: Vec<GraphNode>,
    finally_tasks: Vec<TaskDescriptor>,
    builder_row: bool,
) -> Vec<GraphNode> {
    if finally_tasks.is_empty() {
        return nodes;
    }

    let last_tasks = find_last_tasks(&nodes);
    debug!(
        finally_tasks = finally_tasks.len(),
        sinks = last_tasks.len(),
        "appending finally aggregate"
    );

    let kind = if builder_row {
        NodeKind::BuilderFinally
    } else {
        NodeKind::Finally
    };
    let height = finally_group_height(finally_tasks.len(), builder_row);

    let mut node = synthesize_node_sized(
        TaskDescriptor::synthetic(FINALLY_NODE_ID, last_tasks),
        Some(kind),
        None,
        Some(height),
    );
    node.data.finally_tasks = finally_tasks;

    nodes.push(node);
    nodes
}
