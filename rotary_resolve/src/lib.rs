// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotary Resolve: find dial-pad elements in a foreign UI snapshot.
//!
//! The dialer screen belongs to another application, so there is no API to
//! press "5" or "call". Instead, a [`Resolver`] searches a
//! [`Snapshot`](rotary_tree::Snapshot) for the node that most likely plays a
//! given [`SemanticTarget`] role, using an ordered list of structural
//! heuristics per target:
//!
//! | Target | Strategies, in order |
//! |---|---|
//! | `Digit(d)` | exact text/description, resource-id dictionary, button class with label |
//! | `DialPadContainer` | node with a grid of button children |
//! | `NumberField` | resource-id fragments, then first editable text input |
//! | `Delete` | delete keywords in id, description, or text |
//! | `Call` | call-button resource ids by class preference, then a "call" label outside any contact list |
//!
//! Strategies short-circuit: the first hit wins, and a hit is always a node the
//! host can act on. A miss is [`Resolution::NotFound`], which is a normal
//! answer. The call target in particular never falls back to a guess, because
//! the nearest "Call …" button on screen usually belongs to a contact row.
//!
//! All identifiers, keywords, and thresholds are data in [`PatternConfig`].
//! With the `serde` feature the configuration can be loaded from a file.
//!
//! ## Example
//!
//! ```rust
//! use rotary_resolve::{Digit, Resolution, Resolver, SemanticTarget, Strategy};
//! use rotary_tree::{NodeFlags, NodeInfo, Snapshot};
//!
//! let mut snapshot = Snapshot::new(1).with_package("com.android.dialer");
//! let root = snapshot.insert(None, NodeInfo::new("android.widget.FrameLayout"));
//! let zero = snapshot.insert(
//!     Some(root),
//!     NodeInfo::new("android.widget.FrameLayout")
//!         .with_resource_id("com.android.dialer:id/dialpad_zero")
//!         .with_flags(NodeFlags::CLICKABLE),
//! );
//!
//! let resolver = Resolver::default();
//! let target = SemanticTarget::Digit(Digit::new(0).unwrap());
//! assert_eq!(
//!     resolver.resolve(&snapshot, target),
//!     Resolution::Found { node: zero, strategy: Strategy::ResourceIdPattern },
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod resolver;
mod target;

pub use config::PatternConfig;
pub use resolver::Resolver;
pub use target::{Digit, Found, Resolution, ResolveError, SemanticTarget, Strategy};
