// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotary Tree: per-pass snapshots of a foreign UI tree.
//!
//! The dialer core drives a screen that belongs to another application. That
//! screen is only ever seen through short-lived copies: the host captures the
//! foreign hierarchy into a [`Snapshot`], the core searches it, acts, and drops
//! it. The next notification produces a new snapshot with a new pass number.
//!
//! - [`Snapshot`]: flat arena of [`NodeInfo`] records linked by [`NodeId`].
//! - [`NodeId`]: `(index, pass)` handle. Ids from another pass are stale and
//!   every accessor treats them as absent.
//! - [`NodeFlags`]: clickable, editable, and enabled bits reported by the host.
//! - [`TreeSource`]: the host seam that produces snapshots.
//! - [`search`]: bounded pre-order traversals (`find_first`, `collect_all`,
//!   `descend` with exclusion zones).
//! - [`HierarchyDump`]: text rendering for trace logs.
//!
//! ## Not a live view
//!
//! A snapshot is never refreshed in place. Anything that needs the current
//! state of the foreign screen takes a new snapshot; anything that needs to act
//! on a node hands the [`NodeId`] back to the host, which is expected to refuse
//! ids from a pass that is no longer current.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod dump;
pub mod search;
mod snapshot;
mod types;

pub use dump::{DUMP_MAX_DEPTH, HierarchyDump};
pub use snapshot::{Snapshot, TreeSource};
pub use types::{NodeFlags, NodeId, NodeInfo};
