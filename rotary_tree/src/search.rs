// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded depth-first search over a [`Snapshot`].
//!
//! All traversals are pre-order (a node before its children, children in the
//! order the host reported them) and stop descending below `max_depth`, with
//! the root at depth 0. The bound guarantees termination against trees that are
//! deeper than anything a dial pad needs, and the iterators report through
//! `truncated()` whether any node was cut off by it.
//!
//! ## Exclusion zones
//!
//! [`descend`] tracks an "inside exclusion zone" flag while walking. A node is
//! inside the zone if it, or any ancestor on the current descent path, matched
//! the `exclude` predicate. The flag is stored next to each pending node on the
//! traversal stack and inherited by its children, so ancestors are never
//! revisited to answer the question.
//!
//! ```rust
//! use rotary_tree::{NodeInfo, Snapshot, search};
//!
//! let mut snapshot = Snapshot::new(1);
//! let root = snapshot.insert(None, NodeInfo::new("FrameLayout"));
//! let list = snapshot.insert(Some(root), NodeInfo::new("RecyclerView"));
//! let row = snapshot.insert(Some(list), NodeInfo::new("Button"));
//! let fab = snapshot.insert(Some(root), NodeInfo::new("FloatingActionButton"));
//!
//! let visits: Vec<_> = search::descend(&snapshot, root, 8, |info| {
//!     info.class_name.contains("RecyclerView")
//! })
//! .map(|v| (v.node, v.excluded))
//! .collect();
//!
//! assert_eq!(visits, vec![(root, false), (list, true), (row, true), (fab, false)]);
//! ```

use smallvec::SmallVec;

use crate::snapshot::Snapshot;
use crate::types::{NodeId, NodeInfo};

/// Default traversal depth bound.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// One step of a [`Descent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Visit {
    /// The visited node.
    pub node: NodeId,
    /// Depth below the traversal root (the root is 0).
    pub depth: usize,
    /// True if this node or one of its ancestors matched the exclusion predicate.
    pub excluded: bool,
}

/// Pre-order iterator with exclusion tracking. Created by [`descend`].
pub struct Descent<'a, F> {
    snapshot: &'a Snapshot,
    stack: SmallVec<[(NodeId, usize, bool); 16]>,
    max_depth: usize,
    exclude: F,
    truncated: bool,
}

impl<F> core::fmt::Debug for Descent<'_, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Descent")
            .field("pending", &self.stack.len())
            .field("max_depth", &self.max_depth)
            .field("truncated", &self.truncated)
            .finish_non_exhaustive()
    }
}

impl<F> Descent<'_, F> {
    /// Returns true if any node was skipped because it lay below `max_depth`.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

impl<F: FnMut(&NodeInfo) -> bool> Iterator for Descent<'_, F> {
    type Item = Visit;

    fn next(&mut self) -> Option<Visit> {
        while let Some((node, depth, inherited)) = self.stack.pop() {
            let Some(info) = self.snapshot.get(node) else {
                continue;
            };
            let excluded = inherited || (self.exclude)(info);
            let children = self.snapshot.children_of(node);
            if !children.is_empty() {
                if depth >= self.max_depth {
                    self.truncated = true;
                } else {
                    // Reversed so children pop in host order.
                    for &child in children.iter().rev() {
                        self.stack.push((child, depth + 1, excluded));
                    }
                }
            }
            return Some(Visit {
                node,
                depth,
                excluded,
            });
        }
        None
    }
}

/// Walk the subtree under `root` in pre-order, tracking exclusion zones.
///
/// A stale `root` yields nothing.
pub fn descend<F>(snapshot: &Snapshot, root: NodeId, max_depth: usize, exclude: F) -> Descent<'_, F>
where
    F: FnMut(&NodeInfo) -> bool,
{
    let mut stack = SmallVec::new();
    if snapshot.is_alive(root) {
        stack.push((root, 0, false));
    }
    Descent {
        snapshot,
        stack,
        max_depth,
        exclude,
        truncated: false,
    }
}

/// Lazy pre-order iterator over nodes matching a predicate. Created by [`collect_all`].
pub struct CollectAll<'a, P> {
    inner: Descent<'a, fn(&NodeInfo) -> bool>,
    predicate: P,
}

impl<P> core::fmt::Debug for CollectAll<'_, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CollectAll")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<P> CollectAll<'_, P> {
    /// Returns true if the walk so far skipped nodes below the depth bound.
    pub fn truncated(&self) -> bool {
        self.inner.truncated()
    }
}

impl<P: FnMut(&NodeInfo) -> bool> Iterator for CollectAll<'_, P> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let snapshot = self.inner.snapshot;
        for visit in self.inner.by_ref() {
            if let Some(info) = snapshot.get(visit.node)
                && (self.predicate)(info)
            {
                return Some(visit.node);
            }
        }
        None
    }
}

fn never(_: &NodeInfo) -> bool {
    false
}

/// Every node under `root` (inclusive) matching `predicate`, lazily, in pre-order.
pub fn collect_all<P>(
    snapshot: &Snapshot,
    root: NodeId,
    max_depth: usize,
    predicate: P,
) -> CollectAll<'_, P>
where
    P: FnMut(&NodeInfo) -> bool,
{
    CollectAll {
        inner: descend(snapshot, root, max_depth, never as fn(&NodeInfo) -> bool),
        predicate,
    }
}

/// First node under `root` (inclusive) matching `predicate`, in pre-order.
pub fn find_first<P>(
    snapshot: &Snapshot,
    root: NodeId,
    max_depth: usize,
    predicate: P,
) -> Option<NodeId>
where
    P: FnMut(&NodeInfo) -> bool,
{
    collect_all(snapshot, root, max_depth, predicate).next()
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if haystack.is_ascii() && needle.is_ascii() {
        return haystack
            .as_bytes()
            .windows(needle.len())
            .any(|w| w.eq_ignore_ascii_case(needle.as_bytes()));
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive suffix test.
pub fn ends_with_ignore_case(haystack: &str, needle: &str) -> bool {
    if haystack.is_ascii() && needle.is_ascii() {
        let (h, n) = (haystack.as_bytes(), needle.as_bytes());
        return h.len() >= n.len() && h[h.len() - n.len()..].eq_ignore_ascii_case(n);
    }
    haystack.to_lowercase().ends_with(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeFlags;
    use alloc::vec::Vec;

    // root -> [a -> [c, d], b]
    fn tree() -> (Snapshot, [NodeId; 5]) {
        let mut s = Snapshot::new(3);
        let root = s.insert(None, NodeInfo::new("FrameLayout"));
        let a = s.insert(Some(root), NodeInfo::new("RecyclerView"));
        let b = s.insert(
            Some(root),
            NodeInfo::new("Button").with_flags(NodeFlags::CLICKABLE),
        );
        let c = s.insert(
            Some(a),
            NodeInfo::new("Button").with_flags(NodeFlags::CLICKABLE),
        );
        let d = s.insert(Some(a), NodeInfo::new("TextView"));
        (s, [root, a, b, c, d])
    }

    #[test]
    fn collect_all_is_preorder() {
        let (s, [root, a, b, c, d]) = tree();
        let all: Vec<_> = collect_all(&s, root, DEFAULT_MAX_DEPTH, |_| true).collect();
        assert_eq!(all, [root, a, c, d, b]);
    }

    #[test]
    fn find_first_respects_document_order() {
        let (s, [root, _, b, c, _]) = tree();
        assert_eq!(
            find_first(&s, root, DEFAULT_MAX_DEPTH, NodeInfo::is_clickable),
            Some(c)
        );
        assert_eq!(
            find_first(&s, b, DEFAULT_MAX_DEPTH, NodeInfo::is_clickable),
            Some(b)
        );
        assert_eq!(
            find_first(&s, root, DEFAULT_MAX_DEPTH, |i| i.class_name == "Switch"),
            None
        );
    }

    #[test]
    fn collect_all_is_lazy() {
        let (s, [root, ..]) = tree();
        let mut calls = 0;
        let first = collect_all(&s, root, DEFAULT_MAX_DEPTH, |_| {
            calls += 1;
            true
        })
        .next();
        assert_eq!(first, Some(root));
        assert_eq!(calls, 1);
    }

    #[test]
    fn exclusion_propagates_to_descendants_only() {
        let (s, [root, a, b, c, d]) = tree();
        let visits: Vec<_> = descend(&s, root, DEFAULT_MAX_DEPTH, |i| {
            i.class_name.contains("RecyclerView")
        })
        .map(|v| (v.node, v.depth, v.excluded))
        .collect();
        assert_eq!(
            visits,
            [
                (root, 0, false),
                (a, 1, true),
                (c, 2, true),
                (d, 2, true),
                (b, 1, false),
            ]
        );
    }

    #[test]
    fn depth_bound_truncates() {
        let mut s = Snapshot::new(1);
        let mut parent = s.insert(None, NodeInfo::new("FrameLayout"));
        let root = parent;
        for _ in 0..20 {
            parent = s.insert(Some(parent), NodeInfo::new("FrameLayout"));
        }
        let mut walk = descend(&s, root, 6, |_| false);
        let depths: Vec<_> = walk.by_ref().map(|v| v.depth).collect();
        assert_eq!(depths, [0, 1, 2, 3, 4, 5, 6]);
        assert!(walk.truncated());

        let mut shallow = collect_all(&s, root, 30, |_| false);
        assert!(shallow.next().is_none());
        assert!(!shallow.truncated());
    }

    #[test]
    fn stale_root_yields_nothing() {
        let (s, [root, ..]) = tree();
        let other = Snapshot::new(s.pass() + 1);
        assert_eq!(descend(&other, root, 8, |_| false).count(), 0);
    }

    #[test]
    fn case_insensitive_helpers() {
        assert!(contains_ignore_case("com.android.dialer:id/Dialpad_Zero", "dialpad_zero"));
        assert!(!contains_ignore_case("digits", "phone"));
        assert!(contains_ignore_case("anything", ""));
        assert!(ends_with_ignore_case("com.x:id/CALL_FAB", "id/call_fab"));
        assert!(!ends_with_ignore_case("fab", "id/call_fab"));
        assert!(contains_ignore_case("Anruf ÄNDERN", "änd"));
    }
}
