// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dialing session: presence, gesture, mirrored number, and injection.

use kurbo::Size;
use rotary_gesture::{DialEvent, DialEvents, Millis, PointerEvent, RotaryDial};
use rotary_invoke::{ActionError, ActionHost, ActionInvoker, Injection};
use rotary_presence::{PresenceEvent, PresenceState, Prober};
use rotary_resolve::{Digit, Resolver, SemanticTarget};

use crate::sink::{DialedNumber, OverlaySink};

/// Session-level settings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrchestratorConfig {
    /// How many times an action that hit a stale node is retried against a
    /// fresh snapshot. Other failures are never retried.
    pub stale_retries: u32,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self { stale_retries: 1 }
    }
}

/// The collaborators an [`Orchestrator`] drives.
#[derive(Clone, Debug, Default)]
pub struct Components {
    /// Resolver shared by presence detection and injection.
    pub resolver: Resolver,
    /// Dial-pad presence machine.
    pub prober: Prober,
    /// Rotary gesture machine.
    pub dial: RotaryDial,
}

/// Ties a foreign dialer (`H`) to a rotary overlay (`S`).
///
/// Every inbound call runs to completion: nothing here blocks or waits on the
/// foreign application. Use [`SharedOrchestrator`](crate::SharedOrchestrator)
/// when events arrive on more than one thread.
#[derive(Debug)]
pub struct Orchestrator<H, S> {
    host: H,
    sink: S,
    invoker: ActionInvoker,
    prober: Prober,
    dial: RotaryDial,
    config: OrchestratorConfig,
    number: DialedNumber,
    overlay_visible: bool,
}

impl<H: ActionHost, S: OverlaySink> Orchestrator<H, S> {
    /// Create a session with the overlay hidden and nothing dialed.
    pub fn new(host: H, sink: S, components: Components, config: OrchestratorConfig) -> Self {
        let Components {
            resolver,
            prober,
            dial,
        } = components;
        Self {
            host,
            sink,
            invoker: ActionInvoker::new(resolver),
            prober,
            dial,
            config,
            number: DialedNumber::new(),
            overlay_visible: false,
        }
    }

    /// The foreign tree changed; re-detect the dial pad.
    pub fn on_tree_changed(&mut self) {
        let snapshot = self.host.snapshot();
        let event = self
            .prober
            .on_tree_changed(self.invoker.resolver(), snapshot.as_ref());
        match event {
            Some(PresenceEvent::Shown { bounds, owner }) => {
                tracing::debug!(%owner, ?bounds, "overlay shown");
                self.overlay_visible = true;
                self.sink.show_overlay(bounds, &owner);
            }
            Some(PresenceEvent::Hidden) => {
                tracing::debug!("dial pad gone; ending session");
                self.hide_session();
            }
            None => {}
        }
    }

    /// Feed a pointer event to the dial. Ignored while the overlay is hidden.
    pub fn on_pointer(&mut self, event: PointerEvent) {
        if !self.overlay_visible {
            tracing::trace!(?event, "pointer ignored; overlay hidden");
            return;
        }
        let events = self.dial.handle(event);
        self.dispatch(events);
    }

    /// Advance the return animation to `timestamp`.
    pub fn on_frame(&mut self, timestamp: Millis) {
        let events = self.dial.on_frame(timestamp);
        self.dispatch(events);
    }

    /// The overlay view was resized.
    pub fn resize(&mut self, size: Size) {
        self.dial.resize(size);
    }

    /// Dial `glyph` as if it had been selected on the dial.
    ///
    /// Anything but `0`–`9` is rejected and leaves the number untouched.
    pub fn request_digit(&mut self, glyph: char) -> Result<Injection, ActionError> {
        let Some(digit) = Digit::from_char(glyph) else {
            tracing::warn!(?glyph, "not a dialable digit");
            return Err(ActionError::InvalidDigit(glyph));
        };
        self.dial_digit(digit)
    }

    /// Remove the last digit here and in the foreign dialer.
    ///
    /// Returns `Ok(None)` without touching the foreign dialer when nothing
    /// has been dialed.
    pub fn request_delete(&mut self) -> Result<Option<Injection>, ActionError> {
        if self.number.pop().is_none() {
            tracing::trace!("delete ignored; number empty");
            return Ok(None);
        }
        self.sink.update_number_display(self.number.as_str());
        let result = self.with_retry(|invoker, host| invoker.delete_last(host));
        self.report(SemanticTarget::Delete, result).map(Some)
    }

    /// Press the foreign call button. The number is cleared once that worked.
    pub fn request_call(&mut self) -> Result<(), ActionError> {
        let result = self.with_retry(|invoker, host| invoker.place_call(host));
        let result = self.report(SemanticTarget::Call, result);
        if result.is_ok() {
            self.number.clear();
            self.sink.update_number_display(self.number.as_str());
        }
        result
    }

    /// Clear the number here and in the foreign number field.
    pub fn request_clear(&mut self) -> Result<(), ActionError> {
        self.number.clear();
        self.sink.update_number_display(self.number.as_str());
        let result = self.with_retry(|invoker, host| invoker.clear_field(host));
        self.report(SemanticTarget::NumberField, result)
    }

    /// Close the overlay from its own close control.
    ///
    /// Presence is left as it is, so the overlay only comes back once the
    /// dial pad has gone away and been detected again.
    pub fn request_hide(&mut self) {
        tracing::debug!("overlay closed by user");
        self.hide_session();
    }

    /// The mirrored number.
    pub fn number(&self) -> &DialedNumber {
        &self.number
    }

    /// Returns true while the overlay is shown.
    pub fn is_overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// Dial-pad presence as last detected.
    pub fn presence(&self) -> &PresenceState {
        self.prober.state()
    }

    /// The gesture machine.
    pub fn dial(&self) -> &RotaryDial {
        &self.dial
    }

    /// The foreign dialer.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the foreign dialer.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The overlay.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the overlay.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn dispatch(&mut self, events: DialEvents) {
        for event in events {
            match event {
                DialEvent::Tick { angle_delta } => self.sink.tick(angle_delta),
                DialEvent::ReturnTick { angle_delta } => self.sink.return_tick(angle_delta),
                DialEvent::DigitSelected(value) => {
                    let Some(digit) = Digit::new(value) else {
                        tracing::warn!(value, "dial selected a value outside 0-9");
                        continue;
                    };
                    tracing::debug!(%digit, "digit selected on dial");
                    // Failures are already reported to the sink.
                    let _ = self.dial_digit(digit);
                }
                other => tracing::trace!(event = ?other, "dial"),
            }
        }
    }

    fn dial_digit(&mut self, digit: Digit) -> Result<Injection, ActionError> {
        self.number.push(digit);
        self.sink.update_number_display(self.number.as_str());
        let result = self.with_retry(|invoker, host| invoker.inject_digit(host, digit));
        self.report(SemanticTarget::Digit(digit), result)
    }

    fn hide_session(&mut self) {
        if self.overlay_visible {
            self.overlay_visible = false;
            self.sink.hide_overlay();
        }
        self.number.clear();
        self.dial.reset();
        self.sink.update_number_display(self.number.as_str());
    }

    fn with_retry<T>(
        &mut self,
        mut action: impl FnMut(&ActionInvoker, &mut H) -> Result<T, ActionError>,
    ) -> Result<T, ActionError> {
        let mut retries = 0;
        loop {
            match action(&self.invoker, &mut self.host) {
                Err(err) if err.is_stale() && retries < self.config.stale_retries => {
                    retries += 1;
                    tracing::debug!(retries, %err, "retrying stale action on a fresh snapshot");
                }
                result => return result,
            }
        }
    }

    fn report<T>(
        &mut self,
        target: SemanticTarget,
        result: Result<T, ActionError>,
    ) -> Result<T, ActionError> {
        match &result {
            Ok(_) => tracing::debug!(semantic = %target, "injection succeeded"),
            Err(err) => tracing::warn!(semantic = %target, %err, "injection failed"),
        }
        self.sink.injection_result(result.is_ok(), target);
        result
    }
}
