// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolve-then-act policies with their fallbacks.

use rotary_resolve::{Digit, Found, ResolveError, Resolver, SemanticTarget};
use rotary_tree::Snapshot;

use crate::actions::{activate, append_text, clear_text, delete_last_char};
use crate::error::ActionError;
use crate::host::ActionHost;

/// How a policy reached the foreign dialer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Injection {
    /// A key was clicked.
    Pressed,
    /// The number field text was edited directly.
    Typed,
}

/// Runs the digit, delete, call, and clear policies against a host.
///
/// Each call takes exactly one fresh snapshot, resolves against it, and acts
/// on the resolved handle before returning. Handles never outlive the call.
#[derive(Clone, Debug, Default)]
pub struct ActionInvoker {
    resolver: Resolver,
}

impl ActionInvoker {
    /// Create an invoker around `resolver`.
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }

    /// The resolver in use.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Press the key for `digit`, or type it into the number field.
    ///
    /// A key the host refuses to click also falls back to typing.
    pub fn inject_digit<H: ActionHost + ?Sized>(
        &self,
        host: &mut H,
        digit: Digit,
    ) -> Result<Injection, ActionError> {
        let snapshot = host.snapshot().ok_or(ActionError::NoSnapshot)?;
        let target = SemanticTarget::Digit(digit);
        let miss = match self.resolver.resolve_checked(&snapshot, target) {
            Ok(found) => match activate(host, found.node) {
                Ok(()) => return Ok(Injection::Pressed),
                Err(err @ ActionError::ActionRejected { .. }) => err,
                Err(err) => return Err(err),
            },
            Err(err) => err.into(),
        };
        tracing::debug!(%digit, reason = %miss, "key press unavailable; typing into number field");
        let field = self.field_or(&snapshot, miss)?;
        append_text(host, field.node, digit.glyph())?;
        Ok(Injection::Typed)
    }

    /// Press the delete key, or drop the last character of the number field.
    pub fn delete_last<H: ActionHost + ?Sized>(
        &self,
        host: &mut H,
    ) -> Result<Injection, ActionError> {
        let snapshot = host.snapshot().ok_or(ActionError::NoSnapshot)?;
        let miss = match self.resolver.resolve_checked(&snapshot, SemanticTarget::Delete) {
            Ok(found) => match activate(host, found.node) {
                Ok(()) => return Ok(Injection::Pressed),
                Err(err @ ActionError::ActionRejected { .. }) => err,
                Err(err) => return Err(err),
            },
            Err(err) => err.into(),
        };
        tracing::debug!(reason = %miss, "delete key unavailable; editing number field");
        let field = self.field_or(&snapshot, miss)?;
        delete_last_char(host, field.node)?;
        Ok(Injection::Typed)
    }

    /// Press the call button. There is no fallback.
    pub fn place_call<H: ActionHost + ?Sized>(&self, host: &mut H) -> Result<(), ActionError> {
        let snapshot = host.snapshot().ok_or(ActionError::NoSnapshot)?;
        let found = self.resolver.resolve_checked(&snapshot, SemanticTarget::Call)?;
        activate(host, found.node)
    }

    /// Empty the number field.
    pub fn clear_field<H: ActionHost + ?Sized>(&self, host: &mut H) -> Result<(), ActionError> {
        let snapshot = host.snapshot().ok_or(ActionError::NoSnapshot)?;
        let found = self
            .resolver
            .resolve_checked(&snapshot, SemanticTarget::NumberField)?;
        clear_text(host, found.node)
    }

    // Resolve the number field; on a miss report the primary failure.
    fn field_or(&self, snapshot: &Snapshot, primary: ActionError) -> Result<Found, ActionError> {
        self.resolver
            .resolve_checked(snapshot, SemanticTarget::NumberField)
            .map_err(|err: ResolveError| {
                tracing::debug!(reason = %err, "number field fallback unavailable");
                primary
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ActionKind, NodeAction};
    use crate::mock::ScriptedHost;
    use rotary_tree::{NodeFlags, NodeInfo};

    const PKG: &str = "com.google.android.dialer";

    fn d(value: u8) -> Digit {
        Digit::new(value).unwrap()
    }

    #[test]
    fn digit_is_pressed_on_a_stock_dialer() {
        let (mut host, layout) = ScriptedHost::dialer(PKG);
        let invoker = ActionInvoker::default();
        for digit in [5, 5, 0] {
            assert_eq!(invoker.inject_digit(&mut host, d(digit)), Ok(Injection::Pressed));
        }
        assert_eq!(host.text(layout.field), Some("550"));
        assert_eq!(host.performed()[2], (layout.keys[0], NodeAction::Click));
    }

    #[test]
    fn digit_is_typed_when_no_key_exists() {
        let mut host = ScriptedHost::new(PKG);
        let root = host.add(None, NodeInfo::new("FrameLayout"));
        let field = host.add(
            Some(root),
            NodeInfo::new("android.widget.EditText")
                .with_text("12")
                .with_flags(NodeFlags::EDITABLE),
        );
        let invoker = ActionInvoker::default();
        assert_eq!(invoker.inject_digit(&mut host, d(3)), Ok(Injection::Typed));
        assert_eq!(host.text(field), Some("123"));
    }

    #[test]
    fn refused_key_falls_back_to_typing() {
        let (mut host, layout) = ScriptedHost::dialer(PKG);
        host.refuse(layout.keys[7]);
        let invoker = ActionInvoker::default();
        assert_eq!(invoker.inject_digit(&mut host, d(7)), Ok(Injection::Typed));
        assert_eq!(host.text(layout.field), Some("7"));
    }

    #[test]
    fn refused_key_without_field_reports_rejection() {
        let mut host = ScriptedHost::new(PKG);
        let root = host.add(None, NodeInfo::new("FrameLayout"));
        let key = host.add(
            Some(root),
            NodeInfo::new("Button").with_text("4").with_flags(NodeFlags::CLICKABLE),
        );
        host.refuse(key);
        let err = ActionInvoker::default().inject_digit(&mut host, d(4)).unwrap_err();
        assert!(matches!(
            err,
            ActionError::ActionRejected { action: ActionKind::Click, .. }
        ));
    }

    #[test]
    fn nothing_to_act_on_is_not_found() {
        let mut host = ScriptedHost::new(PKG);
        host.add(None, NodeInfo::new("FrameLayout"));
        let invoker = ActionInvoker::default();
        assert_eq!(
            invoker.inject_digit(&mut host, d(9)),
            Err(ActionError::NotFound(SemanticTarget::Digit(d(9))))
        );
        assert_eq!(
            invoker.place_call(&mut host),
            Err(ActionError::NotFound(SemanticTarget::Call))
        );
    }

    #[test]
    fn unavailable_tree_is_no_snapshot() {
        let (mut host, _) = ScriptedHost::dialer(PKG);
        host.set_available(false);
        assert_eq!(
            ActionInvoker::default().delete_last(&mut host),
            Err(ActionError::NoSnapshot)
        );
    }

    #[test]
    fn stale_action_is_reported_not_retried() {
        let (mut host, layout) = ScriptedHost::dialer(PKG);
        host.expire_next_actions(1);
        let err = ActionInvoker::default().inject_digit(&mut host, d(2)).unwrap_err();
        assert!(err.is_stale());
        assert_eq!(host.text(layout.field), None);
    }

    #[test]
    fn delete_presses_backspace_then_falls_back() {
        let (mut host, layout) = ScriptedHost::dialer(PKG);
        let invoker = ActionInvoker::default();
        invoker.inject_digit(&mut host, d(1)).unwrap();
        invoker.inject_digit(&mut host, d(2)).unwrap();
        assert_eq!(invoker.delete_last(&mut host), Ok(Injection::Pressed));
        assert_eq!(host.text(layout.field), Some("1"));

        host.remove(layout.delete);
        assert_eq!(invoker.delete_last(&mut host), Ok(Injection::Typed));
        assert_eq!(host.text(layout.field), Some(""));
        // Empty field: success, nothing sent.
        let before = host.performed().len();
        assert_eq!(invoker.delete_last(&mut host), Ok(Injection::Typed));
        assert_eq!(host.performed().len(), before);
    }

    #[test]
    fn call_clicks_the_fab() {
        let (mut host, layout) = ScriptedHost::dialer(PKG);
        ActionInvoker::default().place_call(&mut host).unwrap();
        assert_eq!(host.performed(), &[(layout.call, NodeAction::Click)]);
    }

    #[test]
    fn clear_empties_the_field() {
        let (mut host, layout) = ScriptedHost::dialer(PKG);
        let invoker = ActionInvoker::default();
        invoker.inject_digit(&mut host, d(8)).unwrap();
        invoker.clear_field(&mut host).unwrap();
        assert_eq!(host.text(layout.field), Some(""));
    }
}
