//! End-to-end tests for the full transformation pipeline.

use super::*;
use crate::model::{PipelineDefinition, PipelineRun, PipelineTask, TaskRunStatus};
use pretty_assertions::assert_eq;

fn task(name: &str, run_after: &[&str]) -> PipelineTask {
    PipelineTask::new(name).with_run_after(run_after.iter().copied())
}

fn linear_pipeline() -> PipelineDefinition {
    PipelineDefinition::new("release")
        .with_task(task("build", &[]))
        .with_task(task("test", &["build"]))
        .with_task(task("deploy", &["test"]))
}

#[test]
fn test_linear_pipeline_scenario() {
    let topology = build_graph(&linear_pipeline(), None);

    assert_eq!(topology.node_count(), 3);
    assert_eq!(topology.edge_count(), 2);

    let edge_ids: Vec<&str> = topology.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(edge_ids, vec!["build~to~test", "test~to~deploy"]);

    assert!(topology.nodes.iter().all(|n| n.kind == NodeKind::Task));
}

#[test]
fn test_transform_is_idempotent() {
    let pipeline = PipelineDefinition::new("wide")
        .with_task(task("x", &[]))
        .with_task(task("y", &[]))
        .with_task(task("a", &["x", "y"]))
        .with_task(task("b", &["y", "x"]))
        .with_finally_task(task("cleanup", &[]));

    let first = build_graph(&pipeline, None);
    let second = build_graph(&pipeline, None);

    assert_eq!(first, second);
}

#[test]
fn test_no_finally_identity() {
    let topology = build_graph(&linear_pipeline(), None);

    assert!(topology.node(FINALLY_NODE_ID).is_none());
    assert!(topology
        .nodes
        .iter()
        .all(|n| n.kind != NodeKind::Finally && n.kind != NodeKind::BuilderFinally));
}

#[test]
fn test_parallel_normalization_end_to_end() {
    let pipeline = PipelineDefinition::new("fan")
        .with_task(task("x", &[]))
        .with_task(task("y", &[]))
        .with_task(task("a", &["x", "y"]))
        .with_task(task("b", &["x", "y"]))
        .with_task(task("c", &["x"]));

    let topology = build_graph(&pipeline, None);

    // One spacer joins the group; c is untouched.
    assert_eq!(topology.node_count(), 6);
    let spacer = topology.node("parallel-a-b").unwrap();
    assert_eq!(spacer.kind, NodeKind::Spacer);
    assert_eq!(spacer.run_after, vec!["x", "y"]);
    assert_eq!(topology.node("a").unwrap().run_after, vec!["parallel-a-b"]);
    assert_eq!(topology.node("b").unwrap().run_after, vec!["parallel-a-b"]);
    assert_eq!(topology.node("c").unwrap().run_after, vec!["x"]);

    // x and y each reach a and b through exactly one extra hop.
    assert!(topology.edges.iter().any(|e| e.id == "x~to~parallel-a-b"));
    assert!(topology.edges.iter().any(|e| e.id == "y~to~parallel-a-b"));
    assert!(topology.edges.iter().any(|e| e.id == "parallel-a-b~to~a"));
    assert!(topology.edges.iter().any(|e| e.id == "parallel-a-b~to~b"));
}

#[test]
fn test_edge_cardinality_matches_reference_count() {
    let pipeline = PipelineDefinition::new("counts")
        .with_task(task("a", &[]))
        .with_task(task("b", &["a"]))
        .with_task(task("c", &["a", "b"]))
        .with_task(task("d", &["c"]));

    let topology = build_graph(&pipeline, None);

    let reference_count: usize = topology.nodes.iter().map(|n| n.run_after.len()).sum();
    assert_eq!(topology.edge_count(), reference_count);
    assert_eq!(topology.edge_count(), 4);
}

#[test]
fn test_finally_aggregate_targets_sinks() {
    let pipeline = PipelineDefinition::new("sinks")
        .with_task(task("a", &[]))
        .with_task(task("b", &["a"]))
        .with_task(task("c", &["a"]))
        .with_finally_task(task("cleanup", &[]));

    let topology = build_graph(&pipeline, None);

    let aggregate = topology.node(FINALLY_NODE_ID).unwrap();
    assert_eq!(aggregate.kind, NodeKind::Finally);
    assert_eq!(aggregate.run_after, vec!["b", "c"]);

    // Sinks wire into the aggregate through the normal edge stage.
    assert!(topology.edges.iter().any(|e| e.id == "b~to~finally-node"));
    assert!(topology.edges.iter().any(|e| e.id == "c~to~finally-node"));
    assert!(!topology.edges.iter().any(|e| e.id == "a~to~finally-node"));
}

#[test]
fn test_finally_aggregate_holds_all_finally_tasks() {
    let pipeline = PipelineDefinition::new("multi-finally")
        .with_task(task("build", &[]))
        .with_finally_task(task("notify", &[]))
        .with_finally_task(task("cleanup", &[]));

    let topology = build_graph(&pipeline, None);

    let aggregate = topology.node(FINALLY_NODE_ID).unwrap();
    assert_eq!(aggregate.data.finally_tasks.len(), 2);
    assert!(aggregate.data.finally_tasks.iter().all(|d| d.is_finally_task));

    let expected = finally_group_height(2, false);
    assert!((aggregate.height - expected).abs() < f64::EPSILON);
}

#[test]
fn test_run_overlay_reaches_node_payload() {
    let run = PipelineRun::new("release")
        .with_status("build", TaskRunStatus::Succeeded)
        .with_status("test", TaskRunStatus::Running);

    let topology = build_graph(&linear_pipeline(), Some(&run));

    assert_eq!(
        topology.node("build").unwrap().data.task.status,
        Some(TaskRunStatus::Succeeded)
    );
    assert_eq!(
        topology.node("test").unwrap().data.task.status,
        Some(TaskRunStatus::Running)
    );
    assert_eq!(topology.node("deploy").unwrap().data.task.status, None);
}

#[test]
fn test_node_ids_are_unique() {
    let pipeline = PipelineDefinition::new("unique")
        .with_task(task("x", &[]))
        .with_task(task("y", &[]))
        .with_task(task("a", &["x", "y"]))
        .with_task(task("b", &["x", "y"]))
        .with_finally_task(task("cleanup", &[]));

    let topology = build_graph(&pipeline, None);

    let mut ids: Vec<&str> = topology.nodes.iter().map(|n| n.id.as_str()).collect();
    let before = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), before);
}

#[test]
fn test_empty_pipeline_builds_empty_topology() {
    let topology = build_graph(&PipelineDefinition::new("empty"), None);

    assert!(topology.is_empty());
    assert_eq!(topology.edge_count(), 0);
}
