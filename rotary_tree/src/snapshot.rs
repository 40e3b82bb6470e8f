// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot arena: structure, liveness, and read-only accessors.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::Rect;

use crate::types::{NodeId, NodeInfo};

/// Read-only copy of a foreign UI tree taken for one resolution pass.
///
/// Nodes live in a flat arena and refer to each other by [`NodeId`]. Every id
/// carries the pass number of the snapshot that minted it, so an id retained
/// from an earlier pass is reported as stale by [`Snapshot::is_alive`] and
/// every accessor returns `None` or an empty slice for it.
///
/// Snapshots are built by the host (see [`TreeSource`]) and discarded at the
/// end of the pass. Nothing in this crate mutates a snapshot after it has been
/// handed to a consumer.
///
/// ## Example
///
/// ```rust
/// use rotary_tree::{NodeFlags, NodeInfo, Snapshot};
///
/// let mut snapshot = Snapshot::new(1).with_package("com.android.dialer");
/// let root = snapshot.insert(None, NodeInfo::new("android.widget.FrameLayout"));
/// let key = snapshot.insert(
///     Some(root),
///     NodeInfo::new("android.widget.Button")
///         .with_text("5")
///         .with_flags(NodeFlags::CLICKABLE),
/// );
///
/// assert_eq!(snapshot.root(), Some(root));
/// assert_eq!(snapshot.parent_of(key), Some(root));
/// assert_eq!(snapshot.children_of(root), &[key]);
/// ```
#[derive(Clone, Debug)]
pub struct Snapshot {
    pass: u32,
    package: Option<String>,
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    info: NodeInfo,
}

impl Snapshot {
    /// Create an empty snapshot for the given pass number.
    ///
    /// Hosts are expected to use a fresh pass number for every snapshot so
    /// handles from different passes never compare equal.
    pub fn new(pass: u32) -> Self {
        Self {
            pass,
            package: None,
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Record the package identifier of the application owning the tree.
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Insert a node as the last child of `parent`, or as a root if `None`.
    ///
    /// The first parentless node becomes [`Snapshot::root`]. A stale `parent`
    /// is ignored and the node is stored detached.
    pub fn insert(&mut self, parent: Option<NodeId>, info: NodeInfo) -> NodeId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices."
        )]
        let id = NodeId::new(self.nodes.len() as u32, self.pass);
        let parent = parent.filter(|p| self.is_alive(*p));
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            info,
        });
        match parent {
            Some(p) => self.nodes[p.idx()].children.push(id),
            None => {
                if self.root.is_none() {
                    self.root = Some(id);
                }
            }
        }
        id
    }

    /// Pass number of this snapshot.
    pub fn pass(&self) -> u32 {
        self.pass
    }

    /// Package identifier of the owning application, or `""` when unknown.
    pub fn package_name(&self) -> &str {
        self.package.as_deref().unwrap_or("")
    }

    /// Root node, if any node was inserted.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of nodes in the snapshot.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the snapshot holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `id` was minted by this snapshot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        id.pass() == self.pass && id.idx() < self.nodes.len()
    }

    /// Attributes of a live node.
    pub fn get(&self, id: NodeId) -> Option<&NodeInfo> {
        if !self.is_alive(id) {
            return None;
        }
        self.nodes.get(id.idx()).map(|n| &n.info)
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    ///
    /// This is a lookup only; ownership always flows from parent to child.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        self.nodes[id.idx()].parent
    }

    /// Get the children of a node, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        if !self.is_alive(id) {
            return &[];
        }
        &self.nodes[id.idx()].children
    }

    /// Screen bounds of a live node.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.get(id).map(|info| info.bounds)
    }
}

/// Supplier of fresh snapshots, implemented by the host platform.
///
/// Each call returns a new snapshot with a pass number that differs from every
/// snapshot handed out before, or `None` when the foreign tree is currently
/// unavailable (for example while the window is being replaced).
pub trait TreeSource {
    /// Capture the foreign tree as it is right now.
    fn snapshot(&mut self) -> Option<Snapshot>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeFlags;

    fn sample() -> (Snapshot, NodeId, NodeId, NodeId) {
        let mut snapshot = Snapshot::new(7).with_package("com.google.android.dialer");
        let root = snapshot.insert(None, NodeInfo::new("FrameLayout"));
        let a = snapshot.insert(Some(root), NodeInfo::new("LinearLayout"));
        let b = snapshot.insert(
            Some(a),
            NodeInfo::new("Button")
                .with_text("1")
                .with_flags(NodeFlags::CLICKABLE)
                .with_bounds(0, 0, 10, 10),
        );
        (snapshot, root, a, b)
    }

    #[test]
    fn insert_links_parent_and_children() {
        let (snapshot, root, a, b) = sample();
        assert_eq!(snapshot.root(), Some(root));
        assert_eq!(snapshot.children_of(root), &[a]);
        assert_eq!(snapshot.children_of(a), &[b]);
        assert_eq!(snapshot.parent_of(b), Some(a));
        assert_eq!(snapshot.parent_of(root), None);
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.package_name(), "com.google.android.dialer");
    }

    #[test]
    fn ids_from_another_pass_are_stale() {
        let (snapshot, _, _, b) = sample();
        let mut next = Snapshot::new(8);
        let other_root = next.insert(None, NodeInfo::new("FrameLayout"));
        next.insert(Some(other_root), NodeInfo::new("LinearLayout"));
        next.insert(Some(other_root), NodeInfo::new("LinearLayout"));

        assert!(snapshot.is_alive(b));
        // Same slot index, different pass.
        assert!(!next.is_alive(b));
        assert!(next.get(b).is_none());
        assert!(next.children_of(b).is_empty());
        assert!(next.parent_of(b).is_none());
        assert!(!snapshot.is_alive(other_root));
    }

    #[test]
    fn stale_parent_is_ignored_on_insert() {
        let (snapshot, root, _, _) = sample();
        let mut next = Snapshot::new(snapshot.pass() + 1);
        let first = next.insert(Some(root), NodeInfo::new("FrameLayout"));
        assert_eq!(next.root(), Some(first));
        assert_eq!(next.parent_of(first), None);
    }

    #[test]
    fn bounds_come_from_integer_rect() {
        let (snapshot, _, _, b) = sample();
        assert_eq!(snapshot.bounds(b), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(snapshot.get(b).unwrap().is_clickable());
        assert!(snapshot.get(b).unwrap().is_enabled());
        assert!(!snapshot.get(b).unwrap().is_editable());
    }

    #[test]
    fn missing_package_reads_as_empty() {
        let snapshot = Snapshot::new(1);
        assert_eq!(snapshot.package_name(), "");
        assert!(snapshot.is_empty());
        assert!(snapshot.root().is_none());
    }
}
