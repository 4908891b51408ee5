//! Pipeline and run snapshot types.

use super::{PipelineTask, TaskRunStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A pipeline definition: the ordered main task list, the finally section,
/// and the pipeline-level resource and workspace declarations that task
/// bindings must resolve against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineDefinition {
    /// The pipeline name.
    pub name: String,
    /// The main task list, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<PipelineTask>,
    /// Tasks that always run after the main DAG completes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub finally_tasks: Vec<PipelineTask>,
    /// Names of resources declared at the pipeline level.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    /// Names of workspaces declared at the pipeline level.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workspaces: Vec<String>,
}

impl PipelineDefinition {
    /// Creates a new empty pipeline definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a task to the main task list.
    #[must_use]
    pub fn with_task(mut self, task: PipelineTask) -> Self {
        self.tasks.push(task);
        self
    }

    /// Adds a task to the finally section.
    #[must_use]
    pub fn with_finally_task(mut self, task: PipelineTask) -> Self {
        self.finally_tasks.push(task);
        self
    }

    /// Declares a pipeline-level resource.
    #[must_use]
    pub fn with_resource(mut self, name: impl Into<String>) -> Self {
        self.resources.push(name.into());
        self
    }

    /// Declares a pipeline-level workspace.
    #[must_use]
    pub fn with_workspace(mut self, name: impl Into<String>) -> Self {
        self.workspaces.push(name.into());
        self
    }

    /// Returns the total number of tasks including the finally section.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.len() + self.finally_tasks.len()
    }
}

/// A read-only snapshot of a pipeline run, overlaying per-task execution
/// status onto a pipeline definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineRun {
    /// The name of the pipeline this run executes.
    pub pipeline_name: String,
    /// Observed status per task name.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub task_statuses: HashMap<String, TaskRunStatus>,
    /// When the run started, if it has.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

impl PipelineRun {
    /// Creates a new run snapshot for a pipeline.
    #[must_use]
    pub fn new(pipeline_name: impl Into<String>) -> Self {
        Self {
            pipeline_name: pipeline_name.into(),
            ..Self::default()
        }
    }

    /// Records a task status.
    #[must_use]
    pub fn with_status(mut self, task: impl Into<String>, status: TaskRunStatus) -> Self {
        self.task_statuses.insert(task.into(), status);
        self
    }

    /// Sets the run start time.
    #[must_use]
    pub fn with_started_at(mut self, at: DateTime<Utc>) -> Self {
        self.started_at = Some(at);
        self
    }

    /// Looks up the status for a task name.
    #[must_use]
    pub fn status_of(&self, task: &str) -> Option<TaskRunStatus> {
        self.task_statuses.get(task).copied()
    }
}
