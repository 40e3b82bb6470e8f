// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for snapshots: node handles, flags, and per-node attributes.

use alloc::string::String;
use kurbo::Rect;

/// Handle of a node inside one [`Snapshot`](crate::Snapshot) pass.
///
/// The first field is the slot index, the second the pass (generation) of the
/// snapshot that produced it. A handle from an older pass never resolves against
/// a newer snapshot, even when the slot index happens to exist.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, pass: u32) -> Self {
        Self(idx, pass)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Slot index of this handle inside its snapshot.
    ///
    /// Hosts use this to map a handle back to their own node reference.
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Pass (generation) of the snapshot this handle belongs to.
    pub const fn pass(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Interaction flags reported by the host for a foreign node.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node accepts click actions.
        const CLICKABLE = 0b0000_0001;
        /// Node accepts text replacement.
        const EDITABLE  = 0b0000_0010;
        /// Node is enabled. Disabled nodes are still resolvable; hosts refuse actions on them.
        const ENABLED   = 0b0000_0100;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::ENABLED
    }
}

/// Attributes of one foreign node as captured for a single pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeInfo {
    /// Fully qualified widget class name (for example `android.widget.ImageButton`).
    pub class_name: String,
    /// View resource identifier (for example `com.android.dialer:id/one`).
    pub resource_id: Option<String>,
    /// Visible text.
    pub text: Option<String>,
    /// Accessibility description.
    pub description: Option<String>,
    /// Interaction flags.
    pub flags: NodeFlags,
    /// Bounds in screen coordinates.
    pub bounds: Rect,
}

impl NodeInfo {
    /// Create a node of the given class with default flags and empty bounds.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    /// Set the resource identifier.
    pub fn with_resource_id(mut self, id: impl Into<String>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    /// Set the visible text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the accessibility description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add flags on top of the current ones.
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Set bounds from the host's integer screen rectangle.
    pub fn with_bounds(mut self, left: i32, top: i32, right: i32, bottom: i32) -> Self {
        self.bounds = Rect::new(left.into(), top.into(), right.into(), bottom.into());
        self
    }

    /// Returns true if the node accepts clicks.
    pub fn is_clickable(&self) -> bool {
        self.flags.contains(NodeFlags::CLICKABLE)
    }

    /// Returns true if the node accepts text replacement.
    pub fn is_editable(&self) -> bool {
        self.flags.contains(NodeFlags::EDITABLE)
    }

    /// Returns true if the node is enabled.
    pub fn is_enabled(&self) -> bool {
        self.flags.contains(NodeFlags::ENABLED)
    }

    /// Resource identifier, or `""` when absent.
    pub fn resource_id_or_empty(&self) -> &str {
        self.resource_id.as_deref().unwrap_or("")
    }

    /// Text, or `""` when absent.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Description, or `""` when absent.
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}
