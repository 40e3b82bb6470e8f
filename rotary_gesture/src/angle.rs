// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Degree arithmetic and dial geometry.
//!
//! Angles are in degrees, measured from the positive x axis towards the
//! positive y axis. In screen coordinates (y pointing down) that is clockwise,
//! which is also the direction a rotary dial turns.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Size};

/// Map any finite angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let mut r = degrees % 360.0;
    if r < 0.0 {
        r += 360.0;
    }
    // Adding 360 to a tiny negative remainder rounds to exactly 360.
    if r >= 360.0 { 0.0 } else { r }
}

/// Shortest unsigned distance between two angles, in `[0, 180]`.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = normalize_degrees(a - b);
    if d > 180.0 { 360.0 - d } else { d }
}

/// Travel from a hole's rest angle to the finger stop, in `(0, 360]`.
///
/// A hole sitting exactly on the stop travels a full turn.
pub fn max_rotation(rest_angle: f64, stop_angle: f64) -> f64 {
    let travel = normalize_degrees(rest_angle - stop_angle);
    if travel <= 0.0 { 360.0 } else { travel }
}

/// Fraction of the half-extent used as the dial radius.
pub const RADIUS_FRACTION: f64 = 0.85;

/// Center and radius of the dial face in view coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DialGeometry {
    /// Dial center.
    pub center: Point,
    /// Dial radius.
    pub radius: f64,
}

impl DialGeometry {
    /// Geometry with an explicit center and radius.
    pub const fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Dial centered in a view of `size`, with radius
    /// `min(width, height) / 2 ×` [`RADIUS_FRACTION`].
    pub fn from_size(size: Size) -> Self {
        Self {
            center: Point::new(size.width / 2.0, size.height / 2.0),
            radius: size.min_side() / 2.0 * RADIUS_FRACTION,
        }
    }

    /// Angle of `point` around the center, in `[0, 360)`.
    pub fn angle_of(&self, point: Point) -> f64 {
        normalize_degrees((point - self.center).atan2().to_degrees())
    }

    /// Distance of `point` from the center.
    pub fn distance_of(&self, point: Point) -> f64 {
        (point - self.center).hypot()
    }

    /// Point at `distance` from the center along `angle`.
    pub fn point_at(&self, angle: f64, distance: f64) -> Point {
        let radians = angle.to_radians();
        self.center + kurbo::Vec2::new(radians.cos(), radians.sin()) * distance
    }
}
