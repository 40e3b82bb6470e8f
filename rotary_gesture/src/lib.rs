// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotary Gesture: turn a finger drag on a rotary dial into a dialed digit.
//!
//! A rotary dial has ten finger holes spaced around its face and a fixed
//! finger stop. Dialing means grabbing the hole of a digit, turning the dial
//! clockwise until the finger meets the stop, and letting go; the dial then
//! winds back and the digit is "sent". [`RotaryDial`] models that:
//!
//! 1. **Grab.** A pointer-down inside the grab band (an annulus between
//!    `band_inner` and `band_outer` times the dial radius, both exclusive)
//!    selects the nearest hole strictly within `hole_tolerance` degrees.
//! 2. **Drag.** Each move measures rotation from the hole's rest angle.
//!    Counter-clockwise travel reads as zero, and rotation never exceeds the
//!    travel from the hole to the stop ([`max_rotation`]).
//! 3. **Release.** Pointer-up or cancel accepts the digit when the rotation
//!    met `acceptance_threshold`, then the dial winds back on a decelerating
//!    curve driven by [`RotaryDial::on_frame`].
//! 4. **Select.** An accepted digit is reported once, `settle_delay_ms` after
//!    release, as [`DialEvent::DigitSelected`].
//!
//! Drag and return ticks ([`DialEvent::Tick`], [`DialEvent::ReturnTick`]) let
//! an external sound or haptics layer follow the motion.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Size;
//! use rotary_gesture::{DialConfig, DialEvent, DialGeometry, RotaryDial};
//!
//! let geometry = DialGeometry::from_size(Size::new(400.0, 400.0));
//! let mut dial = RotaryDial::new(DialConfig::default(), geometry);
//! let hole = geometry.radius * 0.7;
//!
//! // Digit 5 rests at 210 degrees; drag it 90 degrees clockwise.
//! dial.on_pointer_down(geometry.point_at(210.0, hole), 0);
//! dial.on_pointer_move(geometry.point_at(300.0, hole));
//! dial.on_pointer_up(20);
//!
//! let selected: Vec<_> = [60, 120, 520]
//!     .into_iter()
//!     .flat_map(|t| dial.on_frame(t))
//!     .filter(|e| matches!(e, DialEvent::DigitSelected(_)))
//!     .collect();
//! assert_eq!(selected, [DialEvent::DigitSelected(5)]);
//! ```
//!
//! ## Preemption
//!
//! A pointer-down while the dial is still winding back cancels the return.
//! If that return carried an accepted digit that had not been reported yet,
//! the digit is reported first, in the same batch of events, and the new grab
//! is evaluated from rest.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod angle;
mod config;
mod dial;

pub use angle::{
    DialGeometry, RADIUS_FRACTION, angular_distance, max_rotation, normalize_degrees,
};
pub use config::{DialConfig, DigitHole};
pub use dial::{DialEvent, DialEvents, GestureState, Millis, PointerEvent, RotaryDial};
