//! Graph node types and node synthesis.
//!
//! Node synthesis maps a task descriptor plus an optional kind selector to a
//! typed graph node. The kind-to-dimensions dispatch is a total mapping; an
//! absent kind falls back to a plain task node.

use crate::model::TaskDescriptor;
use crate::validation::TaskErrorTag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default width of a task node.
pub const NODE_WIDTH: f64 = 120.0;
/// Default height of a task node.
pub const NODE_HEIGHT: f64 = 32.0;
/// Width of builder-mode nodes, which carry inline controls.
pub const BUILDER_NODE_WIDTH: f64 = 180.0;
/// Vertical spacing between rows inside the finally aggregate node.
pub const FINALLY_NODE_VERTICAL_SPACING: f64 = 20.0;
/// Padding above and below the rows of the finally aggregate node.
pub const FINALLY_NODE_PADDING: f64 = 24.0;

/// The kind of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A regular pipeline task.
    Task,
    /// A synthetic pass-through join point, never displayed as a task.
    Spacer,
    /// A builder-mode placeholder for a task not yet chosen.
    TaskList,
    /// A builder-mode placeholder for a reference that does not resolve.
    InvalidTaskList,
    /// An editable task in builder mode.
    Builder,
    /// The aggregate node holding all finally tasks.
    Finally,
    /// The finally aggregate in builder mode, with an editable row.
    BuilderFinally,
}

impl Default for NodeKind {
    fn default() -> Self {
        Self::Task
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task => write!(f, "task"),
            Self::Spacer => write!(f, "spacer"),
            Self::TaskList => write!(f, "task_list"),
            Self::InvalidTaskList => write!(f, "invalid_task_list"),
            Self::Builder => write!(f, "builder"),
            Self::Finally => write!(f, "finally"),
            Self::BuilderFinally => write!(f, "builder_finally"),
        }
    }
}

impl NodeKind {
    /// Returns the default width for nodes of this kind.
    #[must_use]
    pub fn default_width(&self) -> f64 {
        match self {
            Self::Task | Self::Finally => NODE_WIDTH,
            Self::Spacer => 0.0,
            Self::TaskList | Self::InvalidTaskList | Self::Builder | Self::BuilderFinally => {
                BUILDER_NODE_WIDTH
            }
        }
    }

    /// Returns the default height for nodes of this kind.
    ///
    /// Finally aggregates compute their height from their task count and
    /// override this default.
    #[must_use]
    pub fn default_height(&self) -> f64 {
        NODE_HEIGHT
    }

    /// Returns true for kinds synthesized by the transformation rather than
    /// originating from a task entry.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Spacer | Self::Finally | Self::BuilderFinally)
    }
}

/// Kind-specific payload carried by every node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// The originating task descriptor, or a synthetic stand-in for spacer
    /// and finally nodes.
    pub task: TaskDescriptor,
    /// The finally-task descriptors aggregated into this node. Empty for
    /// every kind except `Finally` and `BuilderFinally`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub finally_tasks: Vec<TaskDescriptor>,
    /// Validation error tags attached to this node in builder mode.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub error_tags: Vec<TaskErrorTag>,
}

impl NodeData {
    /// Creates a payload for a descriptor with no extras.
    #[must_use]
    pub fn new(task: TaskDescriptor) -> Self {
        Self {
            task,
            finally_tasks: Vec::new(),
            error_tags: Vec::new(),
        }
    }
}

/// A node in the pipeline topology graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique node id; equals the task name or a synthetic name.
    pub id: String,
    /// The node kind.
    pub kind: NodeKind,
    /// Node width handed to layout.
    pub width: f64,
    /// Node height handed to layout.
    pub height: f64,
    /// Resolved predecessor node ids. Edge derivation reads this list;
    /// normalization may rewrite it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub run_after: Vec<String>,
    /// Kind-specific payload.
    pub data: NodeData,
}

impl GraphNode {
    /// Attaches validation error tags to the node payload.
    #[must_use]
    pub fn with_error_tags(mut self, tags: Vec<TaskErrorTag>) -> Self {
        self.data.error_tags = tags;
        self
    }
}

/// Synthesizes a graph node from a task descriptor.
///
/// An absent kind selects [`NodeKind::Task`]. Dimensions default from the
/// kind unless explicit values are supplied.
#[must_use]
pub fn synthesize_node(descriptor: TaskDescriptor, kind: Option<NodeKind>) -> GraphNode {
    synthesize_node_sized(descriptor, kind, None, None)
}

/// Synthesizes a graph node with explicit dimensions.
#[must_use]
pub fn synthesize_node_sized(
    descriptor: TaskDescriptor,
    kind: Option<NodeKind>,
    width: Option<f64>,
    height: Option<f64>,
) -> GraphNode {
    let kind = kind.unwrap_or_default();
    GraphNode {
        id: descriptor.name.clone(),
        kind,
        width: width.unwrap_or_else(|| kind.default_width()),
        height: height.unwrap_or_else(|| kind.default_height()),
        run_after: descriptor.run_after.clone(),
        data: NodeData::new(descriptor),
    }
}
