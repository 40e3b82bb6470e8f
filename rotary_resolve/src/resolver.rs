// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered strategy search.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::ControlFlow;

use rotary_tree::search::{Visit, contains_ignore_case, descend, ends_with_ignore_case};
use rotary_tree::{HierarchyDump, NodeId, NodeInfo, Snapshot};

use crate::config::{PatternConfig, expand};
use crate::target::{Digit, Found, Resolution, ResolveError, SemanticTarget, Strategy};

/// Maps a [`SemanticTarget`] to at most one node of a snapshot.
///
/// Strategies for a target are tried in a fixed order and the first hit wins.
/// Every strategy that selects a node to be clicked requires the node to be
/// clickable; a matching label on a non-clickable node is skipped and the
/// search continues.
#[derive(Clone, Debug, Default)]
pub struct Resolver {
    config: PatternConfig,
}

impl Resolver {
    /// Create a resolver with the given patterns.
    pub fn new(config: PatternConfig) -> Self {
        Self { config }
    }

    /// Pattern configuration in use.
    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    /// Resolve `target` in `snapshot`.
    pub fn resolve(&self, snapshot: &Snapshot, target: SemanticTarget) -> Resolution {
        match self.resolve_checked(snapshot, target) {
            Ok(found) => found.into(),
            Err(_) => Resolution::NotFound,
        }
    }

    /// Resolve `target`, reporting whether a miss happened on a depth-truncated tree.
    pub fn resolve_checked(
        &self,
        snapshot: &Snapshot,
        target: SemanticTarget,
    ) -> Result<Found, ResolveError> {
        let mut scan = Scan {
            snapshot,
            root: snapshot.root(),
            max_depth: self.config.max_depth,
            truncated: false,
        };
        let found = match target {
            SemanticTarget::Digit(digit) => {
                tracing::trace!(
                    "foreign tree before resolving {target}:\n{}",
                    HierarchyDump::new(snapshot)
                );
                self.digit(&mut scan, digit)
            }
            SemanticTarget::DialPadContainer => self.dial_pad(&mut scan),
            SemanticTarget::NumberField => self.number_field(&mut scan),
            SemanticTarget::Delete => self.delete(&mut scan),
            SemanticTarget::Call => self.call(&mut scan),
        };
        match found {
            Some(found) => {
                tracing::debug!(semantic = %target, strategy = ?found.strategy, node = ?found.node, "target resolved");
                Ok(found)
            }
            None if scan.truncated => {
                tracing::debug!(semantic = %target, max_depth = scan.max_depth, "target not found in truncated tree");
                Err(ResolveError::MalformedTree {
                    target,
                    max_depth: scan.max_depth,
                })
            }
            None => {
                tracing::debug!(semantic = %target, "target not found");
                Err(ResolveError::NotFound(target))
            }
        }
    }

    fn is_button(&self, info: &NodeInfo) -> bool {
        self.config
            .button_classes
            .iter()
            .any(|c| contains_ignore_case(&info.class_name, c))
    }

    fn is_text_input(&self, info: &NodeInfo) -> bool {
        self.config
            .text_input_classes
            .iter()
            .any(|c| contains_ignore_case(&info.class_name, c))
    }

    fn digit(&self, scan: &mut Scan<'_>, digit: Digit) -> Option<Found> {
        let mut glyph_buf = [0_u8; 4];
        let glyph: &str = digit.glyph().encode_utf8(&mut glyph_buf);

        if let Some(node) = scan.first(|_, info| {
            info.is_clickable() && (info.text_or_empty() == glyph || info.description_or_empty() == glyph)
        }) {
            return Some(Found { node, strategy: Strategy::ExactLabel });
        }

        let contains: Vec<String> = self
            .config
            .digit_id_contains
            .iter()
            .map(|t| expand(t, digit))
            .collect();
        let suffixes: Vec<String> = self
            .config
            .digit_id_suffixes
            .iter()
            .map(|t| expand(t, digit))
            .collect();
        if let Some(node) = scan.first(|_, info| {
            let id = info.resource_id_or_empty();
            info.is_clickable()
                && !id.is_empty()
                && (contains.iter().any(|p| contains_ignore_case(id, p))
                    || suffixes.iter().any(|p| ends_with_ignore_case(id, p)))
        }) {
            return Some(Found { node, strategy: Strategy::ResourceIdPattern });
        }

        scan.first(|_, info| {
            info.is_clickable()
                && self.is_button(info)
                && (info.text_or_empty().contains(glyph) || info.description_or_empty().contains(glyph))
        })
        .map(|node| Found { node, strategy: Strategy::ButtonClassLabel })
    }

    fn dial_pad(&self, scan: &mut Scan<'_>) -> Option<Found> {
        let snapshot = scan.snapshot;
        let marker = self.config.grid_button_marker.as_str();
        scan.first(|node, _| {
            let children = snapshot.children_of(node);
            children.len() >= self.config.grid_min_children
                && children
                    .iter()
                    .filter_map(|&c| snapshot.get(c))
                    .filter(|c| contains_ignore_case(&c.class_name, marker))
                    .count()
                    >= self.config.grid_min_buttons
        })
        .map(|node| Found { node, strategy: Strategy::ButtonGrid })
    }

    fn number_field(&self, scan: &mut Scan<'_>) -> Option<Found> {
        for fragment in &self.config.field_id_fragments {
            if let Some(node) =
                scan.first(|_, info| contains_ignore_case(info.resource_id_or_empty(), fragment))
            {
                return Some(Found { node, strategy: Strategy::FieldResourceId });
            }
        }
        scan.first(|_, info| info.is_editable() && self.is_text_input(info))
            .map(|node| Found { node, strategy: Strategy::EditableClass })
    }

    fn delete(&self, scan: &mut Scan<'_>) -> Option<Found> {
        scan.first(|_, info| {
            info.is_clickable()
                && self.config.delete_keywords.iter().any(|k| {
                    contains_ignore_case(info.resource_id_or_empty(), k)
                        || contains_ignore_case(info.description_or_empty(), k)
                        || contains_ignore_case(info.text_or_empty(), k)
                })
        })
        .map(|node| Found { node, strategy: Strategy::DeleteKeyword })
    }

    fn call(&self, scan: &mut Scan<'_>) -> Option<Found> {
        // Lowest preference rank wins; document order breaks ties.
        let mut best: Option<(usize, NodeId)> = None;
        scan.walk(
            |_| false,
            |visit, info| {
                if info.is_clickable()
                    && self
                        .config
                        .call_id_suffixes
                        .iter()
                        .any(|s| ends_with_ignore_case(info.resource_id_or_empty(), s))
                {
                    match self.call_rank(info) {
                        Some(rank) if best.is_none_or(|(b, _)| rank < b) => {
                            best = Some((rank, visit.node));
                        }
                        Some(_) => {}
                        None => tracing::trace!(
                            class = %info.class_name,
                            "call id on a non-button node rejected"
                        ),
                    }
                }
                ControlFlow::Continue(())
            },
        );
        if let Some((_, node)) = best {
            return Some(Found { node, strategy: Strategy::CallResourceId });
        }

        let mut hit = None;
        scan.walk(
            |info| self.is_contact_list(info),
            |visit, info| {
                if !visit.excluded
                    && info.is_clickable()
                    && self.is_button(info)
                    && (contains_ignore_case(info.description_or_empty(), &self.config.call_keyword)
                        || contains_ignore_case(info.text_or_empty(), &self.config.call_keyword))
                {
                    hit = Some(visit.node);
                    return ControlFlow::Break(());
                }
                ControlFlow::Continue(())
            },
        );
        hit.map(|node| Found { node, strategy: Strategy::CallLabel })
    }

    fn call_rank(&self, info: &NodeInfo) -> Option<usize> {
        self.config
            .call_class_preference
            .iter()
            .position(|c| contains_ignore_case(&info.class_name, c))
    }

    fn is_contact_list(&self, info: &NodeInfo) -> bool {
        self.config
            .contact_list_classes
            .iter()
            .any(|c| contains_ignore_case(&info.class_name, c))
            || self
                .config
                .contact_list_ids
                .iter()
                .any(|m| contains_ignore_case(info.resource_id_or_empty(), m))
    }
}

/// One resolution pass over a snapshot, accumulating depth truncation.
struct Scan<'a> {
    snapshot: &'a Snapshot,
    root: Option<NodeId>,
    max_depth: usize,
    truncated: bool,
}

impl Scan<'_> {
    fn walk<E, V>(&mut self, exclude: E, mut visit: V)
    where
        E: FnMut(&NodeInfo) -> bool,
        V: FnMut(Visit, &NodeInfo) -> ControlFlow<()>,
    {
        let Some(root) = self.root else {
            return;
        };
        let mut descent = descend(self.snapshot, root, self.max_depth, exclude);
        for step in descent.by_ref() {
            let Some(info) = self.snapshot.get(step.node) else {
                continue;
            };
            if visit(step, info).is_break() {
                return;
            }
        }
        self.truncated |= descent.truncated();
    }

    fn first(&mut self, mut accept: impl FnMut(NodeId, &NodeInfo) -> bool) -> Option<NodeId> {
        let mut hit = None;
        self.walk(
            |_| false,
            |step, info| {
                if accept(step.node, info) {
                    hit = Some(step.node);
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            },
        );
        hit
    }
}
