//! Builder-mode graph construction.
//!
//! The builder renders an editable pipeline: real tasks become editable
//! nodes, unresolved task references become invalid placeholders, and
//! not-yet-chosen tasks render as task-list placeholders. Normalization and
//! finally aggregation are the same algorithms as viewer mode; only the node
//! payloads and the implicit-placeholder policy differ.

mod ops;

pub use ops::{SnapshotId, UpdateOp};

use crate::catalog::TaskCatalog;
use crate::graph::{
    append_finally_group, derive_edges, normalize_parallel_dependencies, synthesize_node,
    GraphTopology, NodeKind,
};
use crate::model::{PipelineTask, TaskDescriptor, TaskReference};
use crate::validation::TaskErrorMap;
use tracing::debug;

/// Id of the implicit placeholder shown for an empty task group.
pub const INITIAL_LIST_NODE_ID: &str = "initial-node";

/// An immutable snapshot of the pipeline being edited.
///
/// Every graph build and every emitted [`UpdateOp`] references the snapshot
/// id, so the external reducer can reject operations computed against stale
/// state instead of applying them to whatever is latest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskGroup {
    /// Identity of this snapshot.
    pub snapshot: SnapshotId,
    /// Real tasks in the group.
    pub tasks: Vec<PipelineTask>,
    /// Tasks in the finally section.
    pub finally_tasks: Vec<PipelineTask>,
    /// Placeholder entries for tasks not yet chosen.
    pub list_tasks: Vec<PipelineTask>,
}

impl TaskGroup {
    /// Creates an empty task group with a fresh snapshot id.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a real task.
    #[must_use]
    pub fn with_task(mut self, task: PipelineTask) -> Self {
        self.tasks.push(task);
        self
    }

    /// Adds a finally task.
    #[must_use]
    pub fn with_finally_task(mut self, task: PipelineTask) -> Self {
        self.finally_tasks.push(task);
        self
    }

    /// Adds a task-list placeholder.
    #[must_use]
    pub fn with_list_task(mut self, task: PipelineTask) -> Self {
        self.list_tasks.push(task);
        self
    }

    /// Constructs an add-task operation against this snapshot.
    #[must_use]
    pub fn add_task_op(&self, task: PipelineTask) -> UpdateOp {
        UpdateOp::AddTask {
            snapshot: self.snapshot,
            task,
        }
    }

    /// Constructs a remove-task operation against this snapshot.
    #[must_use]
    pub fn remove_task_op(&self, name: impl Into<String>) -> UpdateOp {
        UpdateOp::RemoveTask {
            snapshot: self.snapshot,
            name: name.into(),
        }
    }

    /// Constructs a convert-placeholder operation against this snapshot.
    #[must_use]
    pub fn convert_placeholder_op(
        &self,
        placeholder: impl Into<String>,
        task: PipelineTask,
    ) -> UpdateOp {
        UpdateOp::ConvertPlaceholder {
            snapshot: self.snapshot,
            placeholder: placeholder.into(),
            task,
        }
    }

    /// Constructs a convert-to-finally operation against this snapshot.
    #[must_use]
    pub fn convert_to_finally_op(&self, name: impl Into<String>) -> UpdateOp {
        UpdateOp::ConvertToFinally {
            snapshot: self.snapshot,
            name: name.into(),
        }
    }

    /// Constructs a fix-reference operation against this snapshot.
    #[must_use]
    pub fn fix_invalid_reference_op(
        &self,
        name: impl Into<String>,
        task_ref: TaskReference,
    ) -> UpdateOp {
        UpdateOp::FixInvalidReference {
            snapshot: self.snapshot,
            name: name.into(),
            task_ref,
        }
    }
}

/// Builds the editable topology for a task group.
///
/// Tasks whose reference resolves in the catalog become `Builder` nodes;
/// unresolved references become `InvalidTaskList` placeholders so the graph
/// stays renderable. Validation error tags from `errors` are attached to the
/// matching nodes. When the group holds zero real tasks and at most one list
/// placeholder, exactly one task-list placeholder is rendered.
#[must_use]
pub fn build_builder_graph(
    group: &TaskGroup,
    catalog: &dyn TaskCatalog,
    errors: &TaskErrorMap,
) -> GraphTopology {
    let mut nodes = Vec::with_capacity(group.tasks.len() + group.list_tasks.len());

    for task in &group.tasks {
        let kind = match &task.task_ref {
            Some(reference) if catalog.resolve(reference).is_none() => NodeKind::InvalidTaskList,
            _ => NodeKind::Builder,
        };
        let node = synthesize_node(TaskDescriptor::from_task(task.clone()), Some(kind))
            .with_error_tags(errors.get(&task.name).cloned().unwrap_or_default());
        nodes.push(node);
    }

    if group.tasks.is_empty() && group.list_tasks.len() <= 1 {
        let placeholder = group
            .list_tasks
            .first()
            .cloned()
            .unwrap_or_else(|| PipelineTask::new(INITIAL_LIST_NODE_ID));
        nodes.push(synthesize_node(
            TaskDescriptor::from_task(placeholder),
            Some(NodeKind::TaskList),
        ));
    } else {
        for task in &group.list_tasks {
            nodes.push(synthesize_node(
                TaskDescriptor::from_task(task.clone()),
                Some(NodeKind::TaskList),
            ));
        }
    }

    let nodes = normalize_parallel_dependencies(nodes);
    let finally: Vec<TaskDescriptor> = group
        .finally_tasks
        .iter()
        .map(|task| TaskDescriptor::from_task(task.clone()).finally_task())
        .collect();
    let nodes = append_finally_group(nodes, finally, true);
    let edges = derive_edges(&nodes);

    debug!(
        snapshot = %group.snapshot,
        nodes = nodes.len(),
        edges = edges.len(),
        "built builder topology"
    );
    GraphTopology { nodes, edges }
}
