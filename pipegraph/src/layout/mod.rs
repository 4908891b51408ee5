//! Layout boundary.
//!
//! The external graph-layout engine consumes a
//! [`GraphTopology`](crate::graph::GraphTopology) plus one of two fixed
//! spacing presets. Layout itself happens outside this crate.

use serde::{Deserialize, Serialize};

/// Spacing configuration handed to the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPreset {
    /// Horizontal spacing between adjacent node ranks.
    pub node_horizontal_spacing: f64,
    /// Vertical spacing between nodes in the same rank.
    pub node_vertical_spacing: f64,
}

impl LayoutPreset {
    /// Spacing for the read-only pipeline view.
    #[must_use]
    pub const fn viewer() -> Self {
        Self {
            node_horizontal_spacing: 25.0,
            node_vertical_spacing: 20.0,
        }
    }

    /// Spacing for the editing view; builder nodes carry inline controls
    /// and need more room.
    #[must_use]
    pub const fn builder() -> Self {
        Self {
            node_horizontal_spacing: 35.0,
            node_vertical_spacing: 32.0,
        }
    }
}

impl Default for LayoutPreset {
    fn default() -> Self {
        Self::viewer()
    }
}
