// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dial state machine.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Size};
use smallvec::SmallVec;

use crate::angle::{DialGeometry, angular_distance, max_rotation, normalize_degrees};
use crate::config::DialConfig;

/// Timestamp in milliseconds on the host's monotonic clock.
pub type Millis = u64;

/// Pointer input delivered to the dial.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerEvent {
    /// Finger down.
    Down {
        /// Position in view coordinates.
        position: Point,
        /// Event time.
        timestamp: Millis,
    },
    /// Finger moved.
    Move {
        /// Position in view coordinates.
        position: Point,
        /// Event time.
        timestamp: Millis,
    },
    /// Finger lifted. Rotation is taken from the last move.
    Up {
        /// Event time.
        timestamp: Millis,
    },
    /// The platform took the pointer away.
    Cancel {
        /// Event time.
        timestamp: Millis,
    },
}

/// Where the dial is in its grab, drag, and return cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum GestureState {
    /// At rest, waiting for a grab.
    #[default]
    Idle,
    /// A finger holds a hole.
    Dragging {
        /// Digit of the held hole.
        digit: u8,
        /// Rest angle of the held hole.
        rest_angle: f64,
        /// Current rotation from rest, in degrees.
        rotation: f64,
        /// Rotation at the last drag tick.
        last_tick_rotation: f64,
    },
    /// Released; the dial is winding back to rest.
    Returning {
        /// Rotation at release.
        from_angle: f64,
        /// Current rotation.
        rotation: f64,
        /// Accepted digit not yet reported.
        pending_digit: Option<u8>,
        /// Release time.
        started_at: Millis,
        /// Rotation at the last return tick.
        last_tick_rotation: f64,
    },
}

/// Output of the dial, in the order it happened.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DialEvent {
    /// A hole was grabbed.
    Grabbed {
        /// Digit of the grabbed hole.
        digit: u8,
    },
    /// The drag advanced by at least one drag-tick interval.
    Tick {
        /// Rotation change since the previous tick (signed).
        angle_delta: f64,
    },
    /// The finger let go.
    Released {
        /// Digit of the held hole.
        digit: u8,
        /// Rotation at release.
        rotation: f64,
        /// Whether the rotation met the acceptance threshold.
        accepted: bool,
    },
    /// The return advanced by at least one return-tick interval.
    ReturnTick {
        /// Rotation change since the previous return tick (negative while winding back).
        angle_delta: f64,
    },
    /// A digit was dialed. Emitted at most once per accepted release.
    DigitSelected(u8),
    /// The return finished and the dial is idle.
    Rested,
}

/// Events produced by one input.
pub type DialEvents = SmallVec<[DialEvent; 4]>;

/// Rotary dial gesture recognizer.
///
/// Feed it pointer events and animation frames; it answers with
/// [`DialEvent`]s. Time only advances through the timestamps passed in, so the
/// machine is fully deterministic.
#[derive(Clone, Debug)]
pub struct RotaryDial {
    config: DialConfig,
    geometry: DialGeometry,
    state: GestureState,
}

impl RotaryDial {
    /// Create an idle dial.
    pub fn new(config: DialConfig, geometry: DialGeometry) -> Self {
        Self {
            config,
            geometry,
            state: GestureState::Idle,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &DialConfig {
        &self.config
    }

    /// Current geometry.
    pub fn geometry(&self) -> DialGeometry {
        self.geometry
    }

    /// Current state.
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Current rotation from rest, in degrees. Zero when idle.
    pub fn rotation(&self) -> f64 {
        match self.state {
            GestureState::Idle => 0.0,
            GestureState::Dragging { rotation, .. } | GestureState::Returning { rotation, .. } => {
                rotation
            }
        }
    }

    /// Re-derive the geometry for a new view size.
    pub fn resize(&mut self, size: Size) {
        self.geometry = DialGeometry::from_size(size);
    }

    /// Drop any gesture in progress without reporting it.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }

    /// Dispatch a pointer event.
    pub fn handle(&mut self, event: PointerEvent) -> DialEvents {
        match event {
            PointerEvent::Down {
                position,
                timestamp,
            } => self.on_pointer_down(position, timestamp),
            PointerEvent::Move { position, .. } => self.on_pointer_move(position),
            PointerEvent::Up { timestamp } => self.on_pointer_up(timestamp),
            PointerEvent::Cancel { timestamp } => self.on_pointer_cancel(timestamp),
        }
    }

    /// Finger down: grab the nearest hole under the finger, if any.
    ///
    /// A grab preempts a return in flight. A digit that return had accepted
    /// but not yet reported is reported first.
    pub fn on_pointer_down(&mut self, position: Point, timestamp: Millis) -> DialEvents {
        let mut events = DialEvents::new();
        match self.state {
            GestureState::Returning { pending_digit, .. } => {
                if let Some(digit) = pending_digit {
                    events.push(DialEvent::DigitSelected(digit));
                }
                tracing::debug!(timestamp, "return preempted by new grab");
            }
            GestureState::Dragging { digit, .. } => {
                tracing::debug!(digit, "second pointer down; previous drag dropped");
            }
            GestureState::Idle => {}
        }
        self.state = GestureState::Idle;

        let distance = self.geometry.distance_of(position);
        let inner = self.geometry.radius * self.config.band_inner;
        let outer = self.geometry.radius * self.config.band_outer;
        if !(distance > inner && distance < outer) {
            tracing::trace!(distance, inner, outer, "pointer down outside grab band");
            return events;
        }

        let angle = self.geometry.angle_of(position);
        let Some((digit, rest_angle)) = self.hole_at(angle) else {
            tracing::trace!(angle, "pointer down between holes");
            return events;
        };
        tracing::debug!(digit, angle, rest_angle, "hole grabbed");
        self.state = GestureState::Dragging {
            digit,
            rest_angle,
            rotation: 0.0,
            last_tick_rotation: 0.0,
        };
        events.push(DialEvent::Grabbed { digit });
        events
    }

    /// Finger moved: update the clamped rotation and emit drag ticks.
    pub fn on_pointer_move(&mut self, position: Point) -> DialEvents {
        let mut events = DialEvents::new();
        let angle = self.geometry.angle_of(position);
        let stop_angle = self.config.stop_angle;
        let tick = self.config.drag_tick_interval;
        if let GestureState::Dragging {
            rest_angle,
            rotation,
            last_tick_rotation,
            ..
        } = &mut self.state
        {
            let mut raw = normalize_degrees(angle - *rest_angle);
            // Counter-clockwise travel is rejected, not wrapped.
            if raw > 180.0 {
                raw = 0.0;
            }
            *rotation = raw.clamp(0.0, max_rotation(*rest_angle, stop_angle));
            let delta = *rotation - *last_tick_rotation;
            if delta.abs() >= tick {
                events.push(DialEvent::Tick { angle_delta: delta });
                *last_tick_rotation = *rotation;
            }
        }
        events
    }

    /// Finger lifted: accept or reject, then start the return.
    pub fn on_pointer_up(&mut self, timestamp: Millis) -> DialEvents {
        self.release(timestamp, false)
    }

    /// Pointer cancelled: like [`RotaryDial::on_pointer_up`], optionally without the settle delay.
    pub fn on_pointer_cancel(&mut self, timestamp: Millis) -> DialEvents {
        self.release(timestamp, true)
    }

    fn release(&mut self, timestamp: Millis, cancelled: bool) -> DialEvents {
        let mut events = DialEvents::new();
        let GestureState::Dragging {
            digit, rotation, ..
        } = self.state
        else {
            return events;
        };
        let accepted = rotation >= self.config.acceptance_threshold;
        tracing::debug!(digit, rotation, accepted, cancelled, "hole released");
        events.push(DialEvent::Released {
            digit,
            rotation,
            accepted,
        });
        let mut pending_digit = accepted.then_some(digit);
        if cancelled && self.config.cancel_skips_settle && pending_digit.take().is_some() {
            events.push(DialEvent::DigitSelected(digit));
        }
        self.state = GestureState::Returning {
            from_angle: rotation,
            rotation,
            pending_digit,
            started_at: timestamp,
            last_tick_rotation: rotation,
        };
        events
    }

    /// Advance the return animation to `timestamp`.
    pub fn on_frame(&mut self, timestamp: Millis) -> DialEvents {
        let mut events = DialEvents::new();
        let duration = self.config.return_duration_ms;
        let settle = self.config.settle_delay_ms;
        let tick = self.config.return_tick_interval;
        let GestureState::Returning { started_at, .. } = self.state else {
            return events;
        };
        let elapsed = timestamp.saturating_sub(started_at);
        #[allow(
            clippy::cast_precision_loss,
            reason = "Animation times are far below 2^52 ms."
        )]
        let t = if duration == 0 {
            1.0
        } else {
            (elapsed as f64 / duration as f64).min(1.0)
        };
        let eased = self.config.ease(t);

        let GestureState::Returning {
            from_angle,
            rotation,
            pending_digit,
            last_tick_rotation,
            ..
        } = &mut self.state
        else {
            return events;
        };
        *rotation = *from_angle * (1.0 - eased);
        let delta = *rotation - *last_tick_rotation;
        if delta.abs() >= tick {
            events.push(DialEvent::ReturnTick { angle_delta: delta });
            *last_tick_rotation = *rotation;
        }
        if elapsed >= settle
            && let Some(digit) = pending_digit.take()
        {
            tracing::debug!(digit, elapsed, "digit selected");
            events.push(DialEvent::DigitSelected(digit));
        }
        if t >= 1.0 {
            // Settle delay longer than the animation: report before resting.
            if let Some(digit) = pending_digit.take() {
                events.push(DialEvent::DigitSelected(digit));
            }
            self.state = GestureState::Idle;
            events.push(DialEvent::Rested);
        }
        events
    }

    /// Nearest hole strictly within tolerance of `angle`.
    fn hole_at(&self, angle: f64) -> Option<(u8, f64)> {
        let mut best: Option<(u8, f64, f64)> = None;
        for hole in &self.config.holes {
            let diff = angular_distance(angle, hole.rest_angle);
            if diff < self.config.hole_tolerance && best.is_none_or(|(_, _, d)| diff < d) {
                best = Some((hole.digit, hole.rest_angle, diff));
            }
        }
        best.map(|(digit, rest, _)| (digit, rest))
    }
}

impl Default for RotaryDial {
    fn default() -> Self {
        Self::new(
            DialConfig::default(),
            DialGeometry::from_size(Size::new(400.0, 400.0)),
        )
    }
}
