// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotary Invoke: act on resolved nodes of a foreign dialer.
//!
//! Acting on a foreign application is a two-step affair: find the node, then
//! ask the host platform to do something with it. Between the two the foreign
//! window may have changed, so every action first probes the node and every
//! failure is a typed [`ActionError`] rather than a panic.
//!
//! - [`ActionHost`]: the platform seam. It extends
//!   [`TreeSource`](rotary_tree::TreeSource) with a liveness probe, a live-text
//!   read, and [`NodeAction`] execution.
//! - Primitives: [`activate`], [`append_text`], [`clear_text`],
//!   [`delete_last_char`].
//! - [`ActionInvoker`]: policies that resolve a target in a fresh snapshot and
//!   pick a primitive, falling back from key presses to editing the number
//!   field when the dial pad does not expose a usable key.
//!
//! With the `test-helpers` feature, [`mock::ScriptedHost`] provides an
//! in-memory foreign dialer.
//!
//! ## Example
//!
//! ```rust
//! # #[cfg(feature = "test-helpers")]
//! # {
//! use rotary_invoke::{ActionInvoker, Injection, mock::ScriptedHost};
//! use rotary_resolve::Digit;
//!
//! let (mut host, layout) = ScriptedHost::dialer("com.android.dialer");
//! let invoker = ActionInvoker::default();
//!
//! let five = Digit::new(5).unwrap();
//! assert_eq!(invoker.inject_digit(&mut host, five), Ok(Injection::Pressed));
//! assert_eq!(host.text(layout.field), Some("5"));
//! # }
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod actions;
mod error;
mod host;
mod policy;

#[cfg(any(test, feature = "test-helpers"))]
pub mod mock;

pub use actions::{activate, append_text, clear_text, delete_last_char};
pub use error::ActionError;
pub use host::{ActionHost, ActionKind, HostRejection, NodeAction};
pub use policy::{ActionInvoker, Injection};
