// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Indented, depth-bounded text rendering of a snapshot for diagnostics.

use core::fmt;

use crate::search::descend;
use crate::snapshot::Snapshot;
use crate::types::NodeId;

/// Depth bound used when logging hierarchies.
pub const DUMP_MAX_DEPTH: usize = 6;

/// [`Display`](fmt::Display) adapter that prints one line per node.
///
/// Each line is indented two spaces per level and lists class, resource id,
/// text, description, and a `clickable`/`editable` marker when set:
///
/// ```text
/// [0] FrameLayout
///   [1] ImageButton id="com.android.dialer:id/one" desc="1" clickable
/// ```
#[derive(Debug)]
pub struct HierarchyDump<'a> {
    snapshot: &'a Snapshot,
    root: Option<NodeId>,
    max_depth: usize,
}

impl<'a> HierarchyDump<'a> {
    /// Dump the whole snapshot down to [`DUMP_MAX_DEPTH`].
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            root: snapshot.root(),
            max_depth: DUMP_MAX_DEPTH,
        }
    }

    /// Override the depth bound.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl fmt::Display for HierarchyDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root else {
            return writeln!(f, "<empty>");
        };
        for visit in descend(self.snapshot, root, self.max_depth, |_| false) {
            let Some(info) = self.snapshot.get(visit.node) else {
                continue;
            };
            for _ in 0..visit.depth {
                f.write_str("  ")?;
            }
            write!(f, "[{}] {}", visit.depth, info.class_name)?;
            if let Some(id) = &info.resource_id {
                write!(f, " id={id:?}")?;
            }
            if let Some(text) = &info.text {
                write!(f, " text={text:?}")?;
            }
            if let Some(desc) = &info.description {
                write!(f, " desc={desc:?}")?;
            }
            if info.is_clickable() {
                f.write_str(" clickable")?;
            }
            if info.is_editable() {
                f.write_str(" editable")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NodeFlags, NodeInfo};
    use alloc::string::ToString;

    #[test]
    fn renders_indented_lines() {
        let mut s = Snapshot::new(1);
        let root = s.insert(None, NodeInfo::new("FrameLayout"));
        s.insert(
            Some(root),
            NodeInfo::new("ImageButton")
                .with_resource_id("com.android.dialer:id/one")
                .with_description("1")
                .with_flags(NodeFlags::CLICKABLE),
        );
        let out = HierarchyDump::new(&s).to_string();
        assert_eq!(
            out,
            "[0] FrameLayout\n  [1] ImageButton id=\"com.android.dialer:id/one\" desc=\"1\" clickable\n"
        );
    }

    #[test]
    fn empty_snapshot() {
        let s = Snapshot::new(1);
        assert_eq!(HierarchyDump::new(&s).to_string(), "<empty>\n");
    }

    #[test]
    fn depth_bound_applies() {
        let mut s = Snapshot::new(1);
        let root = s.insert(None, NodeInfo::new("A"));
        let child = s.insert(Some(root), NodeInfo::new("B"));
        s.insert(Some(child), NodeInfo::new("C"));
        let out = HierarchyDump::new(&s).max_depth(1).to_string();
        assert_eq!(out, "[0] A\n  [1] B\n");
    }
}
