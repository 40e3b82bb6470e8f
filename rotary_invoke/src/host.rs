// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host seam: live probing and actions on foreign nodes.

use alloc::string::String;
use core::fmt;

use rotary_tree::{NodeId, TreeSource};

/// An action the host performs on a foreign node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeAction {
    /// Activate the node as if tapped.
    Click,
    /// Replace the node's text content.
    SetText(String),
}

impl NodeAction {
    /// Payload-free kind, for errors and logs.
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Click => ActionKind::Click,
            Self::SetText(_) => ActionKind::SetText,
        }
    }
}

/// Kind of a [`NodeAction`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// [`NodeAction::Click`].
    Click,
    /// [`NodeAction::SetText`].
    SetText,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Click => "click",
            Self::SetText => "set text",
        })
    }
}

/// Why the host did not perform an action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HostRejection {
    /// The handle no longer refers to a live foreign node.
    Stale,
    /// The node is live but the foreign application refused the action.
    Refused,
}

/// Platform side of action invocation.
///
/// Handles passed in always come from a [`Snapshot`](rotary_tree::Snapshot)
/// produced by this host's [`TreeSource::snapshot`]. Hosts answer for handles
/// of older passes as if the node were gone.
pub trait ActionHost: TreeSource {
    /// Read one harmless attribute of the live node; false if it is gone.
    fn probe(&self, node: NodeId) -> bool;

    /// Current text of the live node, if it exposes any.
    fn live_text(&self, node: NodeId) -> Option<String>;

    /// Perform `action` on the live node.
    fn perform(&mut self, node: NodeId, action: &NodeAction) -> Result<(), HostRejection>;
}
