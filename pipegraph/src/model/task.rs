//! Task-level model types: references, bindings, and the task descriptor
//! consumed by the graph transformation.

use super::TaskRunStatus;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The scope a task reference resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskScope {
    /// A task defined in the pipeline's namespace.
    Namespaced,
    /// A cluster-wide task.
    Cluster,
}

impl Default for TaskScope {
    fn default() -> Self {
        Self::Namespaced
    }
}

impl fmt::Display for TaskScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Namespaced => write!(f, "namespaced"),
            Self::Cluster => write!(f, "cluster"),
        }
    }
}

/// A reference from a pipeline task to a task resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskReference {
    /// The name of the referenced task resource.
    pub name: String,
    /// The scope the reference resolves against.
    #[serde(default)]
    pub scope: TaskScope,
}

impl TaskReference {
    /// Creates a namespaced task reference.
    #[must_use]
    pub fn namespaced(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: TaskScope::Namespaced,
        }
    }

    /// Creates a cluster-scoped task reference.
    #[must_use]
    pub fn cluster(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: TaskScope::Cluster,
        }
    }
}

/// A binding from a task's declared resource to a pipeline-level resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBinding {
    /// The name the task declares for this resource.
    pub name: String,
    /// The pipeline-level resource this binding points at.
    pub resource: String,
}

/// Declared resource inputs and outputs of a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResources {
    /// Input resource bindings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<ResourceBinding>,
    /// Output resource bindings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<ResourceBinding>,
}

/// A binding from a task workspace to a pipeline-level workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceBinding {
    /// The name the task declares for this workspace.
    pub name: String,
    /// The pipeline-level workspace this binding points at.
    pub workspace: String,
}

/// A single task entry in a pipeline definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineTask {
    /// The task name, unique within the pipeline.
    pub name: String,
    /// Reference to the task resource backing this entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_ref: Option<TaskReference>,
    /// Names of tasks this task depends on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub run_after: Vec<String>,
    /// Declared resource bindings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<TaskResources>,
    /// Declared workspace bindings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workspaces: Vec<WorkspaceBinding>,
    /// Free-form task parameters.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, serde_json::Value>,
}

impl PipelineTask {
    /// Creates a new pipeline task.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the task reference.
    #[must_use]
    pub fn with_task_ref(mut self, task_ref: TaskReference) -> Self {
        self.task_ref = Some(task_ref);
        self
    }

    /// Sets the predecessor task names.
    #[must_use]
    pub fn with_run_after(
        mut self,
        deps: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.run_after = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the resource bindings.
    #[must_use]
    pub fn with_resources(mut self, resources: TaskResources) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Adds a workspace binding.
    #[must_use]
    pub fn with_workspace(
        mut self,
        name: impl Into<String>,
        workspace: impl Into<String>,
    ) -> Self {
        self.workspaces.push(WorkspaceBinding {
            name: name.into(),
            workspace: workspace.into(),
        });
        self
    }
}

/// A flattened task descriptor, the unit of input to the graph transformation.
///
/// Descriptors are produced by task extraction and never mutated by the
/// transformation stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    /// The task name, unique within the pipeline.
    pub name: String,
    /// Names of tasks this task depends on. May be empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub run_after: Vec<String>,
    /// Whether this task runs in the finally section.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_finally_task: bool,
    /// Observed run status, if a run overlay was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskRunStatus>,
    /// The originating pipeline task entry.
    pub task: PipelineTask,
}

impl TaskDescriptor {
    /// Creates a descriptor from a pipeline task entry.
    #[must_use]
    pub fn from_task(task: PipelineTask) -> Self {
        Self {
            name: task.name.clone(),
            run_after: task.run_after.clone(),
            is_finally_task: false,
            status: None,
            task,
        }
    }

    /// Creates a synthetic descriptor for nodes that have no originating
    /// task, such as spacer and finally-aggregate nodes.
    #[must_use]
    pub fn synthetic(name: impl Into<String>, run_after: Vec<String>) -> Self {
        let name = name.into();
        Self {
            name: name.clone(),
            run_after,
            is_finally_task: false,
            status: None,
            task: PipelineTask::new(name),
        }
    }

    /// Marks the descriptor as a finally task.
    #[must_use]
    pub fn finally_task(mut self) -> Self {
        self.is_finally_task = true;
        self
    }

    /// Sets the observed run status.
    #[must_use]
    pub fn with_status(mut self, status: TaskRunStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_reference_scopes() {
        let namespaced = TaskReference::namespaced("build-task");
        assert_eq!(namespaced.scope, TaskScope::Namespaced);

        let cluster = TaskReference::cluster("git-clone");
        assert_eq!(cluster.scope, TaskScope::Cluster);
        assert_eq!(cluster.scope.to_string(), "cluster");
    }

    #[test]
    fn test_pipeline_task_builder() {
        let task = PipelineTask::new("deploy")
            .with_task_ref(TaskReference::namespaced("deploy-task"))
            .with_run_after(["build", "test"])
            .with_workspace("source", "shared-workspace");

        assert_eq!(task.name, "deploy");
        assert_eq!(task.run_after, vec!["build", "test"]);
        assert_eq!(task.workspaces.len(), 1);
        assert_eq!(task.workspaces[0].workspace, "shared-workspace");
    }

    #[test]
    fn test_descriptor_from_task() {
        let task = PipelineTask::new("test").with_run_after(["build"]);
        let descriptor = TaskDescriptor::from_task(task);

        assert_eq!(descriptor.name, "test");
        assert_eq!(descriptor.run_after, vec!["build"]);
        assert!(!descriptor.is_finally_task);
        assert!(descriptor.status.is_none());
    }

    #[test]
    fn test_descriptor_finally_task() {
        let descriptor = TaskDescriptor::from_task(PipelineTask::new("cleanup")).finally_task();
        assert!(descriptor.is_finally_task);
    }

    #[test]
    fn test_synthetic_descriptor() {
        let descriptor =
            TaskDescriptor::synthetic("parallel-a-b", vec!["x".to_string(), "y".to_string()]);

        assert_eq!(descriptor.name, "parallel-a-b");
        assert_eq!(descriptor.run_after.len(), 2);
        assert_eq!(descriptor.task.name, "parallel-a-b");
    }

    #[test]
    fn test_descriptor_serialize_skips_empty() {
        let descriptor = TaskDescriptor::from_task(PipelineTask::new("build"));
        let json = serde_json::to_value(&descriptor).unwrap();

        assert!(json.get("run_after").is_none());
        assert!(json.get("is_finally_task").is_none());
        assert!(json.get("status").is_none());
    }
}
