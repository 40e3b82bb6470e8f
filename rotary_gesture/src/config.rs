// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dial layout and timing constants.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// One finger hole of the dial.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DigitHole {
    /// Digit dialed through this hole.
    pub digit: u8,
    /// Angle of the hole at rest, in degrees.
    pub rest_angle: f64,
}

/// Layout, thresholds, and animation timing of a [`RotaryDial`](crate::RotaryDial).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DialConfig {
    /// Finger holes. Digit 1 sits nearest the stop, 0 farthest.
    pub holes: Vec<DigitHole>,
    /// Angle of the finger stop, in degrees.
    pub stop_angle: f64,
    /// Inner edge of the grab band, as a fraction of the dial radius (exclusive).
    pub band_inner: f64,
    /// Outer edge of the grab band, as a fraction of the dial radius (exclusive).
    pub band_outer: f64,
    /// A grab must land strictly closer than this to a hole, in degrees.
    pub hole_tolerance: f64,
    /// Minimum rotation for a release to dial its digit, in degrees.
    pub acceptance_threshold: f64,
    /// Rotation between drag ticks, in degrees.
    pub drag_tick_interval: f64,
    /// Rotation between return ticks, in degrees.
    pub return_tick_interval: f64,
    /// Duration of the return animation, in milliseconds.
    pub return_duration_ms: u64,
    /// Delay from release to the digit being reported, in milliseconds.
    pub settle_delay_ms: u64,
    /// Deceleration factor of the return easing.
    pub easing_factor: f64,
    /// Report the digit immediately when the drag is cancelled rather than released.
    pub cancel_skips_settle: bool,
}

impl Default for DialConfig {
    fn default() -> Self {
        // 1 at 330° down to 9 at 90°, then 0 at 60°, 30° apart.
        let holes = (1..=9)
            .map(|d: u8| DigitHole {
                digit: d,
                rest_angle: 360.0 - 30.0 * f64::from(d),
            })
            .chain(core::iter::once(DigitHole {
                digit: 0,
                rest_angle: 60.0,
            }))
            .collect();
        Self {
            holes,
            stop_angle: 20.0,
            band_inner: 0.55,
            band_outer: 0.85,
            hole_tolerance: 20.0,
            acceptance_threshold: 15.0,
            drag_tick_interval: 8.0,
            return_tick_interval: 10.0,
            return_duration_ms: 500,
            settle_delay_ms: 100,
            easing_factor: 2.0,
            cancel_skips_settle: false,
        }
    }
}

impl DialConfig {
    /// Rest angle of `digit`, if the dial has a hole for it.
    pub fn rest_angle(&self, digit: u8) -> Option<f64> {
        self.holes
            .iter()
            .find(|h| h.digit == digit)
            .map(|h| h.rest_angle)
    }

    /// Decelerating ease: `1 - (1 - t)^(2 * factor)` for `t` in `[0, 1]`.
    pub fn ease(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        1.0 - (1.0 - t).powf(2.0 * self.easing_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_hole_layout() {
        let config = DialConfig::default();
        let expected = [
            (1, 330.0),
            (2, 300.0),
            (3, 270.0),
            (4, 240.0),
            (5, 210.0),
            (6, 180.0),
            (7, 150.0),
            (8, 120.0),
            (9, 90.0),
            (0, 60.0),
        ];
        for (digit, angle) in expected {
            assert_eq!(config.rest_angle(digit), Some(angle), "digit {digit}");
        }
        assert_eq!(config.holes.len(), 10);
    }

    #[test]
    fn ease_decelerates() {
        let config = DialConfig::default();
        assert_eq!(config.ease(0.0), 0.0);
        assert_eq!(config.ease(1.0), 1.0);
        assert!((config.ease(0.5) - 0.9375).abs() < 1e-12);
        assert_eq!(config.ease(2.0), 1.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn timing_from_json() {
        let config: DialConfig =
            serde_json::from_str(r#"{ "settle_delay_ms": 0, "cancel_skips_settle": true }"#).unwrap();
        assert_eq!(config.settle_delay_ms, 0);
        assert!(config.cancel_skips_settle);
        assert_eq!(config.holes, DialConfig::default().holes);
    }
}
