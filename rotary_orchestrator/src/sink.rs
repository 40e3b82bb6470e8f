// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay seam and the mirrored number.

use core::fmt;

use kurbo::Rect;
use rotary_resolve::{Digit, SemanticTarget};

/// Receives everything the overlay needs to draw and play.
///
/// Implemented by the platform's overlay window. Tick callbacks default to
/// doing nothing, for overlays without sound or haptics.
pub trait OverlaySink {
    /// Show the rotary overlay over a dial pad at `bounds`, owned by `owner`.
    fn show_overlay(&mut self, bounds: Rect, owner: &str);

    /// Remove the overlay.
    fn hide_overlay(&mut self);

    /// Redraw the number shown on the overlay.
    fn update_number_display(&mut self, text: &str);

    /// The dial was dragged `angle_delta` degrees since the last tick.
    fn tick(&mut self, angle_delta: f64) {
        let _ = angle_delta;
    }

    /// The dial wound back `angle_delta` degrees since the last return tick.
    fn return_tick(&mut self, angle_delta: f64) {
        let _ = angle_delta;
    }

    /// Outcome of acting on `target` in the foreign dialer.
    fn injection_result(&mut self, success: bool, target: SemanticTarget);
}

/// The number as the overlay believes it was dialed.
///
/// This is updated before anything is sent to the foreign dialer and is not
/// rolled back when sending fails.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DialedNumber(String);

impl DialedNumber {
    /// Empty number.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `digit`.
    pub fn push(&mut self, digit: Digit) {
        self.0.push(digit.glyph());
    }

    /// Remove and return the last digit.
    pub fn pop(&mut self) -> Option<Digit> {
        self.0.pop().and_then(Digit::from_char)
    }

    /// Forget every digit.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// The digits as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing has been dialed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DialedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
