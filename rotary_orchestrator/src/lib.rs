// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotary Orchestrator: one rotary-dial session over a foreign dialer.
//!
//! The [`Orchestrator`] owns the pieces from the other crates and routes
//! between them:
//!
//! - Tree changes go to the [`Prober`](rotary_presence::Prober). When a dial
//!   pad appears the overlay is shown over it. When the pad goes away the
//!   overlay is hidden and the session forgets its number and gesture.
//! - Pointer input and frames go to the [`RotaryDial`](rotary_gesture::RotaryDial).
//!   Every selected digit is appended to the [`DialedNumber`], shown, and
//!   injected through the [`ActionInvoker`](rotary_invoke::ActionInvoker).
//! - Overlay buttons arrive as `request_*` calls.
//!
//! Everything the overlay renders or plays leaves through [`OverlaySink`].
//! Injection never blocks. A stale node is retried against a fresh snapshot
//! up to [`OrchestratorConfig::stale_retries`] times. Any other failure is
//! logged and reported through [`OverlaySink::injection_result`], and the
//! mirrored number keeps the digit either way.
//!
//! ## Example
//!
//! ```rust,no_run
//! use kurbo::Rect;
//! use rotary_orchestrator::{Components, Orchestrator, OrchestratorConfig, OverlaySink};
//! use rotary_resolve::SemanticTarget;
//!
//! struct Overlay;
//!
//! impl OverlaySink for Overlay {
//!     fn show_overlay(&mut self, bounds: Rect, owner: &str) {
//!         println!("over {owner} at {bounds:?}");
//!     }
//!     fn hide_overlay(&mut self) {}
//!     fn update_number_display(&mut self, text: &str) {
//!         println!("{text}");
//!     }
//!     fn injection_result(&mut self, success: bool, target: SemanticTarget) {
//!         println!("{target}: {success}");
//!     }
//! }
//!
//! # fn run<H: rotary_invoke::ActionHost>(host: H) {
//! let mut session = Orchestrator::new(
//!     host,
//!     Overlay,
//!     Components::default(),
//!     OrchestratorConfig::default(),
//! );
//! session.on_tree_changed();
//! let _ = session.request_digit('5');
//! # }
//! ```

mod session;
mod shared;
mod sink;

pub use session::{Components, Orchestrator, OrchestratorConfig};
pub use shared::SharedOrchestrator;
pub use sink::{DialedNumber, OverlaySink};
