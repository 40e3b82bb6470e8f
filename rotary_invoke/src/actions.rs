// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive actions on one resolved node.
//!
//! Every primitive probes the node first, so a handle whose foreign node went
//! away between resolution and action fails as [`ActionError::StaleHandle`]
//! instead of reaching the host's action path.

use alloc::string::String;

use rotary_tree::NodeId;

use crate::error::ActionError;
use crate::host::{ActionHost, HostRejection, NodeAction};

fn ensure_live<H: ActionHost + ?Sized>(host: &H, node: NodeId) -> Result<(), ActionError> {
    if host.probe(node) {
        Ok(())
    } else {
        tracing::warn!(?node, "probe failed; node is stale");
        Err(ActionError::StaleHandle(node))
    }
}

fn perform<H: ActionHost + ?Sized>(
    host: &mut H,
    node: NodeId,
    action: NodeAction,
) -> Result<(), ActionError> {
    let kind = action.kind();
    host.perform(node, &action).map_err(|rejection| {
        tracing::warn!(?node, action = %kind, ?rejection, "host did not perform action");
        match rejection {
            HostRejection::Stale => ActionError::StaleHandle(node),
            HostRejection::Refused => ActionError::ActionRejected { node, action: kind },
        }
    })
}

/// Click `node`.
pub fn activate<H: ActionHost + ?Sized>(host: &mut H, node: NodeId) -> Result<(), ActionError> {
    ensure_live(host, node)?;
    perform(host, node, NodeAction::Click)
}

/// Append `ch` to the live text of `node`. Missing text reads as empty.
pub fn append_text<H: ActionHost + ?Sized>(
    host: &mut H,
    node: NodeId,
    ch: char,
) -> Result<(), ActionError> {
    ensure_live(host, node)?;
    let mut text = host.live_text(node).unwrap_or_default();
    text.push(ch);
    perform(host, node, NodeAction::SetText(text))
}

/// Replace the text of `node` with nothing.
pub fn clear_text<H: ActionHost + ?Sized>(host: &mut H, node: NodeId) -> Result<(), ActionError> {
    ensure_live(host, node)?;
    perform(host, node, NodeAction::SetText(String::new()))
}

/// Drop the last character of the live text of `node`.
///
/// Succeeds without acting when the text is already empty.
pub fn delete_last_char<H: ActionHost + ?Sized>(
    host: &mut H,
    node: NodeId,
) -> Result<(), ActionError> {
    ensure_live(host, node)?;
    let mut text = host.live_text(node).unwrap_or_default();
    if text.pop().is_none() {
        tracing::debug!(?node, "text already empty");
        return Ok(());
    }
    perform(host, node, NodeAction::SetText(text))
}
