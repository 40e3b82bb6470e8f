// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use rotary_resolve::{ResolveError, SemanticTarget};
use rotary_tree::NodeId;

use crate::host::ActionKind;

/// Failure of an action or policy. None of these are fatal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The target is not present in the foreign tree.
    #[error("{0} not found")]
    NotFound(SemanticTarget),
    /// The node disappeared between resolution and action.
    #[error("node {0:?} is stale")]
    StaleHandle(NodeId),
    /// The foreign application refused the action.
    #[error("{action} rejected by node {node:?}")]
    ActionRejected {
        /// Node the action was sent to.
        node: NodeId,
        /// What was attempted.
        action: ActionKind,
    },
    /// The target was not found and the tree was deeper than the search bound.
    #[error("{0} not found; foreign tree exceeds the search depth")]
    MalformedTree(SemanticTarget),
    /// The host could not provide a snapshot of the foreign tree.
    #[error("foreign tree unavailable")]
    NoSnapshot,
    /// A digit request carried something other than `0`–`9`.
    #[error("{0:?} is not a dialable digit")]
    InvalidDigit(char),
}

impl ActionError {
    /// Returns true if a fresh snapshot may succeed where this attempt failed.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleHandle(_))
    }
}

impl From<ResolveError> for ActionError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound(target) => Self::NotFound(target),
            ResolveError::MalformedTree { target, .. } => Self::MalformedTree(target),
        }
    }
}
