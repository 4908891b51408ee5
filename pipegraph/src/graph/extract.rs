//! Task extraction: flattening a pipeline definition and optional run
//! overlay into an ordered task descriptor list.

use crate::model::{PipelineDefinition, PipelineRun, TaskDescriptor};

/// Flattens a pipeline definition into an ordered descriptor list.
///
/// Main tasks come first in declaration order, then the finally section.
/// When a run overlay is supplied, each descriptor carries the status
/// recorded for its task name.
#[must_use]
pub fn extract_tasks(
    pipeline: &PipelineDefinition,
    run: Option<&PipelineRun>,
) -> Vec<TaskDescriptor> {
    let mut descriptors = Vec::with_capacity(pipeline.task_count());

    for task in &pipeline.tasks {
        descriptors.push(overlay_status(TaskDescriptor::from_task(task.clone()), run));
    }
    for task in &pipeline.finally_tasks {
        descriptors.push(overlay_status(
            TaskDescriptor::from_task(task.clone()).finally_task(),
            run,
        ));
    }

    descriptors
}

fn overlay_status(descriptor: TaskDescriptor, run: Option<&PipelineRun>) -> TaskDescriptor {
    match run.and_then(|r| r.status_of(&descriptor.name)) {
        Some(status) => descriptor.with_status(status),
        None => descriptor,
    }
}
