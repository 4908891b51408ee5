//! Binding validation: resource and workspace error tags.
//!
//! A separate pass over the pipeline definition compares each task's
//! declared resource and workspace bindings against the pipeline-level name
//! sets. Problems become per-task error tags, never errors; the graph stays
//! renderable. Consumers diff successive tag maps so they are only notified
//! of tags that were actually added or cleared.

use crate::model::PipelineDefinition;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// The category of a binding problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// A resource binding points at an undeclared pipeline resource.
    Resource,
    /// A workspace binding points at an undeclared pipeline workspace.
    Workspace,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resource => write!(f, "resource"),
            Self::Workspace => write!(f, "workspace"),
        }
    }
}

/// A single validation problem attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskErrorTag {
    /// The problem category.
    pub category: ErrorCategory,
    /// Human-readable description of the problem.
    pub message: String,
}

impl TaskErrorTag {
    /// Creates a resource-category tag.
    #[must_use]
    pub fn resource(message: impl Into<String>) -> Self {
        Self {
            category: ErrorCategory::Resource,
            message: message.into(),
        }
    }

    /// Creates a workspace-category tag.
    #[must_use]
    pub fn workspace(message: impl Into<String>) -> Self {
        Self {
            category: ErrorCategory::Workspace,
            message: message.into(),
        }
    }
}

/// Validation error tags keyed by task name, in stable name order.
pub type TaskErrorMap = BTreeMap<String, Vec<TaskErrorTag>>;

/// Validates every task's bindings against the pipeline-level declarations.
///
/// Tasks with no problems do not appear in the returned map.
#[must_use]
pub fn validate_bindings(pipeline: &PipelineDefinition) -> TaskErrorMap {
    let resources: HashSet<&str> = pipeline.resources.iter().map(String::as_str).collect();
    let workspaces: HashSet<&str> = pipeline.workspaces.iter().map(String::as_str).collect();

    let mut errors = TaskErrorMap::new();
    for task in pipeline.tasks.iter().chain(&pipeline.finally_tasks) {
        let mut tags = Vec::new();

        if let Some(task_resources) = &task.resources {
            for binding in task_resources.inputs.iter().chain(&task_resources.outputs) {
                if !resources.contains(binding.resource.as_str()) {
                    tags.push(TaskErrorTag::resource(format!(
                        "Resource '{}' is not declared by the pipeline",
                        binding.resource
                    )));
                }
            }
        }
        for binding in &task.workspaces {
            if !workspaces.contains(binding.workspace.as_str()) {
                tags.push(TaskErrorTag::workspace(format!(
                    "Workspace '{}' is not declared by the pipeline",
                    binding.workspace
                )));
            }
        }

        if !tags.is_empty() {
            errors.insert(task.name.clone(), tags);
        }
    }

    errors
}

/// The change between two successive validation passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDelta {
    /// Tasks whose tag set is new or changed since the previous pass.
    pub added: TaskErrorMap,
    /// Tasks whose previously reported tags are now gone.
    pub cleared: Vec<String>,
}

impl ErrorDelta {
    /// Returns true when nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.cleared.is_empty()
    }
}

/// Diffs the current tag map against the previously reported one.
///
/// Unchanged error states are not re-reported.
#[must_use]
pub fn diff_errors(previous: &TaskErrorMap, current: &TaskErrorMap) -> ErrorDelta {
    let mut delta = ErrorDelta::default();

    for (task, tags) in current {
        if tags.is_empty() {
            continue;
        }
        if previous.get(task) != Some(tags) {
            delta.added.insert(task.clone(), tags.clone());
        }
    }
    for (task, tags) in previous {
        if tags.is_empty() {
            continue;
        }
        if current.get(task).map_or(true, Vec::is_empty) {
            delta.cleared.push(task.clone());
        }
    }

    delta
}
