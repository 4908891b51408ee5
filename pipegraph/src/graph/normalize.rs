//! Parallel-to-parallel dependency normalization.
//!
//! Nodes that share an identical multi-element `run_after` set form a
//! fan-in/fan-out joint that naive edge derivation renders as crossing
//! edges. Each such group is rewired through a single synthetic spacer
//! node: the spacer inherits the shared dependency set and the group
//! members depend only on the spacer.

use super::node::{synthesize_node, GraphNode, NodeKind};
use crate::model::TaskDescriptor;
use std::collections::BTreeMap;
use tracing::debug;

/// Rewrites groups of nodes sharing an identical multi-predecessor set
/// through synthetic spacer nodes.
///
/// Grouping is order-insensitive over the `run_after` set, and both the
/// group key and the spacer id are derived from sorted name lists, so
/// equivalent input always yields identical synthetic ids. Nodes outside a
/// qualifying group pass through unchanged; the output holds every input
/// node plus one spacer per group of size two or more.
#[must_use]
pub fn normalize_parallel_dependencies(mut nodes: Vec<GraphNode>) -> Vec<GraphNode> {
    // Canonical key: sorted, pipe-joined run_after set. Only nodes with two
    // or more predecessors can form a joint.
    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (idx, node) in nodes.iter().enumerate() {
        if node.run_after.len() < 2 {
            continue;
        }
        let mut deps = node.run_after.clone();
        deps.sort_unstable();
        groups.entry(deps.join("|")).or_default().push(idx);
    }

    let mut spacers = Vec::new();
    for (key, members) in &groups {
        if members.len() < 2 {
            continue;
        }

        let mut member_ids: Vec<&str> =
            members.iter().map(|&idx| nodes[idx].id.as_str()).collect();
        member_ids.sort_unstable();
        let spacer_id = format!("parallel-{}", member_ids.join("-"));

        let shared_deps: Vec<String> = key.split('|').map(str::to_string).collect();
        debug!(
            spacer = %spacer_id,
            members = members.len(),
            "inserting spacer for shared dependency set"
        );

        for &idx in members {
            nodes[idx].run_after = vec![spacer_id.clone()];
        }
        spacers.push(synthesize_node(
            TaskDescriptor::synthetic(spacer_id, shared_deps),
            Some(NodeKind::Spacer),
        ));
    }

    nodes.extend(spacers);
    nodes
}
