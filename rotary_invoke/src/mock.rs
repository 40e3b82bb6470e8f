// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory foreign dialer for tests and demos.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use rotary_tree::{NodeFlags, NodeId, NodeInfo, Snapshot, TreeSource};

use crate::host::{ActionHost, HostRejection, NodeAction};

/// What a click on a scripted node does to the scripted tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickEffect {
    /// Append text to another node, like a dial-pad key feeding its field.
    Append {
        /// Host index of the field.
        field: usize,
        /// Text appended per click.
        text: String,
    },
    /// Drop the last character of another node's text.
    Backspace {
        /// Host index of the field.
        field: usize,
    },
}

/// Host indices of the nodes created by [`ScriptedHost::dialer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DialerLayout {
    /// Window root.
    pub root: usize,
    /// Editable number field.
    pub field: usize,
    /// Key grid container.
    pub grid: usize,
    /// Digit keys, indexed by digit value.
    pub keys: [usize; 10],
    /// Backspace key.
    pub delete: usize,
    /// Floating call button.
    pub call: usize,
}

#[derive(Clone, Debug)]
struct ScriptedNode {
    parent: Option<usize>,
    info: NodeInfo,
}

/// A foreign UI tree kept in memory that behaves like a live host.
///
/// Nodes are addressed by host index (the value returned from
/// [`ScriptedHost::add`]). Every [`TreeSource::snapshot`] starts a new pass, and
/// handles from earlier passes are reported stale, as on a real platform where
/// the foreign window has been re-laid out.
#[derive(Clone, Debug)]
pub struct ScriptedHost {
    package: String,
    nodes: Vec<ScriptedNode>,
    pass: u32,
    // Snapshot slot index to host index and handle, for the current pass.
    slots: Vec<usize>,
    ids: Vec<NodeId>,
    removed: HashSet<usize>,
    refused: HashSet<usize>,
    effects: HashMap<usize, ClickEffect>,
    expire_next: usize,
    available: bool,
    performed: Vec<(usize, NodeAction)>,
}

impl ScriptedHost {
    /// Empty tree owned by `package`.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            nodes: Vec::new(),
            pass: 0,
            slots: Vec::new(),
            ids: Vec::new(),
            removed: HashSet::new(),
            refused: HashSet::new(),
            effects: HashMap::new(),
            expire_next: 0,
            available: true,
            performed: Vec::new(),
        }
    }

    /// A stock dial pad: number field, twelve-key grid, backspace, and call button.
    ///
    /// Key and backspace clicks edit the field the way a real dialer does.
    pub fn dialer(package: &str) -> (Self, DialerLayout) {
        const WORDS: [&str; 10] = [
            "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
        ];
        let mut host = Self::new(package);
        let root = host.add(None, NodeInfo::new("android.widget.FrameLayout").with_bounds(0, 0, 1080, 2340));
        let field = host.add(
            Some(root),
            NodeInfo::new("android.widget.EditText")
                .with_resource_id(alloc::format!("{package}:id/digits"))
                .with_flags(NodeFlags::EDITABLE)
                .with_bounds(0, 400, 1080, 560),
        );
        let grid = host.add(
            Some(root),
            NodeInfo::new("android.widget.TableLayout")
                .with_resource_id(alloc::format!("{package}:id/dialpad"))
                .with_bounds(0, 700, 1080, 1900),
        );
        let mut keys = [0; 10];
        for label in ["1", "2", "3", "4", "5", "6", "7", "8", "9", "*", "0", "#"] {
            let (id, digit) = match label.parse::<usize>() {
                Ok(d) => (WORDS[d], Some(d)),
                Err(_) if label == "*" => ("star", None),
                Err(_) => ("pound", None),
            };
            let key = host.add(
                Some(grid),
                NodeInfo::new("android.widget.ImageButton")
                    .with_resource_id(alloc::format!("{package}:id/{id}"))
                    .with_description(label)
                    .with_flags(NodeFlags::CLICKABLE),
            );
            host.on_click(key, ClickEffect::Append { field, text: label.into() });
            if let Some(d) = digit {
                keys[d] = key;
            }
        }
        let delete = host.add(
            Some(root),
            NodeInfo::new("android.widget.ImageButton")
                .with_resource_id(alloc::format!("{package}:id/deleteButton"))
                .with_description("backspace")
                .with_flags(NodeFlags::CLICKABLE),
        );
        host.on_click(delete, ClickEffect::Backspace { field });
        let call = host.add(
            Some(root),
            NodeInfo::new("com.google.android.material.floatingactionbutton.FloatingActionButton")
                .with_resource_id(alloc::format!("{package}:id/dialpad_floating_action_button"))
                .with_description("dial")
                .with_flags(NodeFlags::CLICKABLE),
        );
        let layout = DialerLayout { root, field, grid, keys, delete, call };
        (host, layout)
    }

    /// Add a node under `parent` (or as the root) and return its host index.
    ///
    /// A `parent` that has not been added yet is ignored.
    pub fn add(&mut self, parent: Option<usize>, info: NodeInfo) -> usize {
        let parent = parent.filter(|&p| p < self.nodes.len());
        self.nodes.push(ScriptedNode { parent, info });
        self.nodes.len() - 1
    }

    /// Make clicks on `node` apply `effect`.
    pub fn on_click(&mut self, node: usize, effect: ClickEffect) {
        self.effects.insert(node, effect);
    }

    /// Make every action on `node` fail with [`HostRejection::Refused`].
    pub fn refuse(&mut self, node: usize) {
        self.refused.insert(node);
    }

    /// Remove `node` and its subtree from the tree.
    pub fn remove(&mut self, node: usize) {
        self.removed.insert(node);
    }

    /// Change the owning package.
    pub fn set_package(&mut self, package: impl Into<String>) {
        self.package = package.into();
    }

    /// Make [`TreeSource::snapshot`] return `None` while `false`.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Report the next `count` actions as stale, as if the foreign window
    /// changed between resolution and action.
    pub fn expire_next_actions(&mut self, count: usize) {
        self.expire_next = count;
    }

    /// Current text of a node.
    pub fn text(&self, node: usize) -> Option<&str> {
        self.nodes.get(node).and_then(|n| n.info.text.as_deref())
    }

    /// Handle of a node in the most recent snapshot.
    pub fn node_id(&self, node: usize) -> Option<NodeId> {
        let slot = self.slots.iter().position(|&i| i == node)?;
        self.ids.get(slot).copied()
    }

    /// Actions performed so far, by host index.
    pub fn performed(&self) -> &[(usize, NodeAction)] {
        &self.performed
    }

    /// Number of snapshots taken.
    pub fn pass(&self) -> u32 {
        self.pass
    }

    fn is_present(&self, node: usize) -> bool {
        let mut cursor = Some(node);
        while let Some(i) = cursor {
            if self.removed.contains(&i) {
                return false;
            }
            cursor = self.nodes.get(i).and_then(|n| n.parent);
        }
        node < self.nodes.len()
    }

    fn build(&self, pass: u32) -> (Snapshot, Vec<NodeId>, Vec<usize>) {
        let mut snapshot = Snapshot::new(pass).with_package(self.package.clone());
        let mut ids: Vec<Option<NodeId>> = Vec::with_capacity(self.nodes.len());
        let mut out_ids = Vec::new();
        let mut slots = Vec::new();
        for (index, node) in self.nodes.iter().enumerate() {
            if !self.is_present(index) {
                ids.push(None);
                continue;
            }
            let parent = node.parent.and_then(|p| ids.get(p).copied().flatten());
            let id = snapshot.insert(parent, node.info.clone());
            ids.push(Some(id));
            out_ids.push(id);
            slots.push(index);
        }
        (snapshot, out_ids, slots)
    }

    fn host_index(&self, node: NodeId) -> Option<usize> {
        if node.pass() != self.pass {
            return None;
        }
        let index = *self.slots.get(node.index() as usize)?;
        self.is_present(index).then_some(index)
    }

    fn apply_click(&mut self, node: usize) {
        match self.effects.get(&node).cloned() {
            Some(ClickEffect::Append { field, text }) => {
                if let Some(n) = self.nodes.get_mut(field) {
                    n.info.text.get_or_insert_with(String::new).push_str(&text);
                }
            }
            Some(ClickEffect::Backspace { field }) => {
                if let Some(text) = self.nodes.get_mut(field).and_then(|n| n.info.text.as_mut()) {
                    text.pop();
                }
            }
            None => {}
        }
    }
}

impl TreeSource for ScriptedHost {
    fn snapshot(&mut self) -> Option<Snapshot> {
        if !self.available {
            return None;
        }
        self.pass += 1;
        let (snapshot, ids, slots) = self.build(self.pass);
        self.ids = ids;
        self.slots = slots;
        Some(snapshot)
    }
}

impl ActionHost for ScriptedHost {
    fn probe(&self, node: NodeId) -> bool {
        self.host_index(node).is_some()
    }

    fn live_text(&self, node: NodeId) -> Option<String> {
        let index = self.host_index(node)?;
        self.nodes[index].info.text.clone()
    }

    fn perform(&mut self, node: NodeId, action: &NodeAction) -> Result<(), HostRejection> {
        if self.expire_next > 0 {
            self.expire_next -= 1;
            return Err(HostRejection::Stale);
        }
        let index = self.host_index(node).ok_or(HostRejection::Stale)?;
        if self.refused.contains(&index) {
            return Err(HostRejection::Refused);
        }
        match action {
            NodeAction::Click => self.apply_click(index),
            NodeAction::SetText(text) => self.nodes[index].info.text = Some(text.clone()),
        }
        self.performed.push((index, action.clone()));
        Ok(())
    }
}
