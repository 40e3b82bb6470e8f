// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotary Presence: notice when a foreign dial pad appears and disappears.
//!
//! The host calls [`Prober::on_tree_changed`] for every change notification
//! of the foreign window. The prober classifies the snapshot and keeps a
//! two-state machine:
//!
//! ```text
//!            dial pad found               anything else
//! Hidden ───────────────────▶ Visible ───────────────────▶ Hidden
//!                             │     ▲
//!                             └─────┘ dial pad found (bounds refreshed, no event)
//! ```
//!
//! Events are edge-triggered: a [`PresenceEvent`] is returned only when the
//! state actually changes. Notifications come in bursts while a dialer is
//! animating, and the overlay must not flicker through them.
//!
//! A snapshot counts as a dial pad when all of the following hold:
//! - the owning package does not contain an emergency marker,
//! - the owning package contains one of the allow-listed dialer packages,
//! - the tree has a [`DialPadContainer`](SemanticTarget::DialPadContainer), or
//!   a number field unless [`ProberConfig::number_field_fallback`] is off.
//!
//! ```rust
//! use rotary_presence::{PresenceEvent, Prober};
//! use rotary_resolve::Resolver;
//! use rotary_tree::{NodeFlags, NodeInfo, Snapshot};
//!
//! let mut snapshot = Snapshot::new(1).with_package("com.android.dialer");
//! let root = snapshot.insert(None, NodeInfo::new("FrameLayout"));
//! let grid = snapshot.insert(Some(root), NodeInfo::new("TableLayout").with_bounds(0, 700, 1080, 1900));
//! for _ in 0..12 {
//!     snapshot.insert(Some(grid), NodeInfo::new("ImageButton").with_flags(NodeFlags::CLICKABLE));
//! }
//!
//! let resolver = Resolver::default();
//! let mut prober = Prober::default();
//! assert!(matches!(
//!     prober.on_tree_changed(&resolver, Some(&snapshot)),
//!     Some(PresenceEvent::Shown { .. })
//! ));
//! // Same screen again: no event.
//! assert_eq!(prober.on_tree_changed(&resolver, Some(&snapshot)), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use rotary_resolve::{Resolver, SemanticTarget};
use rotary_tree::Snapshot;
use rotary_tree::search::contains_ignore_case;

/// Whether a dial pad is currently on screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PresenceState {
    /// No usable dial pad.
    #[default]
    Hidden,
    /// A dial pad is on screen.
    Visible {
        /// Screen bounds of the detected container.
        bounds: Rect,
        /// Package owning the dial pad.
        owner: String,
    },
}

impl PresenceState {
    /// Returns true for [`PresenceState::Visible`].
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible { .. })
    }
}

/// A presence transition.
#[derive(Clone, Debug, PartialEq)]
pub enum PresenceEvent {
    /// The dial pad appeared.
    Shown {
        /// Screen bounds of the detected container.
        bounds: Rect,
        /// Package owning the dial pad.
        owner: String,
    },
    /// The dial pad went away.
    Hidden,
}

/// Allow-list and exclusion configuration for [`Prober`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProberConfig {
    /// Package fragments of supported dialers, matched case-insensitively.
    pub dialer_packages: Vec<String>,
    /// Package fragments that mark an emergency dialer.
    pub emergency_markers: Vec<String>,
    /// Accept a lone number field as a dial pad when no key grid is exposed.
    ///
    /// On by default. Turn it off to require a key grid.
    pub number_field_fallback: bool,
}

impl Default for ProberConfig {
    fn default() -> Self {
        Self {
            dialer_packages: [
                "com.android.dialer",
                "com.google.android.dialer",
                "com.samsung.android.dialer",
                "com.android.contacts",
                "com.google.android.contacts",
            ]
            .iter()
            .map(|s| (*s).to_owned())
            .collect(),
            emergency_markers: alloc::vec!["emergency".to_owned()],
            number_field_fallback: true,
        }
    }
}

/// Edge-triggered dial-pad presence machine.
#[derive(Clone, Debug, Default)]
pub struct Prober {
    config: ProberConfig,
    state: PresenceState,
}

impl Prober {
    /// Create a prober in the [`PresenceState::Hidden`] state.
    pub fn new(config: ProberConfig) -> Self {
        Self {
            config,
            state: PresenceState::Hidden,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ProberConfig {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> &PresenceState {
        &self.state
    }

    /// Forget the current state without emitting anything.
    pub fn reset(&mut self) {
        self.state = PresenceState::Hidden;
    }

    /// Classify a new snapshot and return the transition it causes, if any.
    ///
    /// `None` for `snapshot` means the host could not read the foreign tree;
    /// the state is left as it is.
    pub fn on_tree_changed(
        &mut self,
        resolver: &Resolver,
        snapshot: Option<&Snapshot>,
    ) -> Option<PresenceEvent> {
        let Some(snapshot) = snapshot else {
            tracing::warn!("foreign tree unavailable; presence unchanged");
            return None;
        };
        let Some(fresh) = self.classify(resolver, snapshot) else {
            if !self.state.is_visible() {
                return None;
            }
            tracing::debug!(owner = snapshot.package_name(), "dial pad hidden");
            self.state = PresenceState::Hidden;
            return Some(PresenceEvent::Hidden);
        };
        if let PresenceState::Visible { bounds, owner } = &mut self.state {
            if *bounds != fresh {
                tracing::trace!(?fresh, "dial pad bounds refreshed");
                *bounds = fresh;
            }
            let package = snapshot.package_name();
            if owner.as_str() != package {
                tracing::debug!(from = %owner, to = package, "dial pad owner changed");
                package.clone_into(owner);
            }
            return None;
        }
        let owner = snapshot.package_name().to_owned();
        tracing::debug!(%owner, bounds = ?fresh, "dial pad shown");
        self.state = PresenceState::Visible {
            bounds: fresh,
            owner: owner.clone(),
        };
        Some(PresenceEvent::Shown {
            bounds: fresh,
            owner,
        })
    }

    /// Bounds of the dial pad in `snapshot`, or `None` if it does not qualify.
    fn classify(&self, resolver: &Resolver, snapshot: &Snapshot) -> Option<Rect> {
        let package = snapshot.package_name();
        if self
            .config
            .emergency_markers
            .iter()
            .any(|m| contains_ignore_case(package, m))
        {
            tracing::debug!(package, "emergency dialer excluded");
            return None;
        }
        if !self
            .config
            .dialer_packages
            .iter()
            .any(|p| contains_ignore_case(package, p))
        {
            return None;
        }
        if let Some(node) = resolver
            .resolve(snapshot, SemanticTarget::DialPadContainer)
            .node()
        {
            return snapshot.bounds(node);
        }
        if self.config.number_field_fallback {
            let node = resolver.resolve(snapshot, SemanticTarget::NumberField).node()?;
            return snapshot.bounds(node);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotary_tree::{NodeFlags, NodeId, NodeInfo};

    fn dialer(pass: u32, package: &str, grid_bounds: (i32, i32, i32, i32)) -> Snapshot {
        let mut s = Snapshot::new(pass).with_package(package);
        let root = s.insert(None, NodeInfo::new("FrameLayout"));
        let (l, t, r, b) = grid_bounds;
        let grid = s.insert(Some(root), NodeInfo::new("TableLayout").with_bounds(l, t, r, b));
        for _ in 0..12 {
            s.insert(
                Some(grid),
                NodeInfo::new("android.widget.ImageButton").with_flags(NodeFlags::CLICKABLE),
            );
        }
        s
    }

    fn number_only(pass: u32) -> (Snapshot, NodeId) {
        let mut s = Snapshot::new(pass).with_package("com.google.android.dialer");
        let root = s.insert(None, NodeInfo::new("FrameLayout"));
        let field = s.insert(
            Some(root),
            NodeInfo::new("android.widget.EditText")
                .with_resource_id("com.google.android.dialer:id/digits")
                .with_flags(NodeFlags::EDITABLE)
                .with_bounds(0, 300, 1080, 420),
        );
        (s, field)
    }

    fn call_log(pass: u32) -> Snapshot {
        let mut s = Snapshot::new(pass).with_package("com.google.android.dialer");
        let root = s.insert(None, NodeInfo::new("FrameLayout"));
        let list = s.insert(Some(root), NodeInfo::new("androidx.recyclerview.widget.RecyclerView"));
        for name in ["Alice", "Bob"] {
            s.insert(
                Some(list),
                NodeInfo::new("android.widget.ImageButton")
                    .with_description(alloc::format!("Call {name}"))
                    .with_flags(NodeFlags::CLICKABLE),
            );
        }
        s
    }

    #[test]
    fn shown_and_hidden_are_edge_triggered() {
        let resolver = Resolver::default();
        let mut prober = Prober::default();
        let pad = dialer(1, "com.google.android.dialer", (0, 700, 1080, 1900));

        assert_eq!(
            prober.on_tree_changed(&resolver, Some(&pad)),
            Some(PresenceEvent::Shown {
                bounds: Rect::new(0.0, 700.0, 1080.0, 1900.0),
                owner: "com.google.android.dialer".into(),
            })
        );
        assert_eq!(prober.on_tree_changed(&resolver, Some(&pad)), None);
        assert!(prober.state().is_visible());

        let other = call_log(2);
        assert_eq!(
            prober.on_tree_changed(&resolver, Some(&other)),
            Some(PresenceEvent::Hidden)
        );
        assert_eq!(prober.on_tree_changed(&resolver, Some(&other)), None);
        assert_eq!(prober.state(), &PresenceState::Hidden);
    }

    #[test]
    fn visible_bounds_refresh_silently() {
        let resolver = Resolver::default();
        let mut prober = Prober::default();
        prober.on_tree_changed(&resolver, Some(&dialer(1, "com.android.dialer", (0, 700, 1080, 1900))));
        let moved = dialer(2, "com.android.dialer", (0, 900, 1080, 2100));
        assert_eq!(prober.on_tree_changed(&resolver, Some(&moved)), None);
        assert_eq!(
            prober.state(),
            &PresenceState::Visible {
                bounds: Rect::new(0.0, 900.0, 1080.0, 2100.0),
                owner: "com.android.dialer".into(),
            }
        );
    }

    #[test]
    fn visible_owner_follows_package() {
        let resolver = Resolver::default();
        let mut prober = Prober::default();
        prober.on_tree_changed(&resolver, Some(&dialer(1, "com.android.dialer", (0, 700, 1080, 1900))));
        let handed_over = dialer(2, "com.google.android.dialer", (0, 700, 1080, 1900));
        assert_eq!(prober.on_tree_changed(&resolver, Some(&handed_over)), None);
        assert_eq!(
            prober.state(),
            &PresenceState::Visible {
                bounds: Rect::new(0.0, 700.0, 1080.0, 1900.0),
                owner: "com.google.android.dialer".into(),
            }
        );
    }

    #[test]
    fn emergency_dialer_is_excluded() {
        let resolver = Resolver::default();
        let mut prober = Prober::default();
        let pad = dialer(1, "com.android.dialer", (0, 0, 10, 10));
        prober.on_tree_changed(&resolver, Some(&pad));

        let emergency = dialer(2, "com.android.dialer.EmergencyDialer", (0, 0, 10, 10));
        assert_eq!(
            prober.on_tree_changed(&resolver, Some(&emergency)),
            Some(PresenceEvent::Hidden)
        );
        let phone_emergency = dialer(3, "com.android.phone.emergency", (0, 0, 10, 10));
        assert_eq!(prober.on_tree_changed(&resolver, Some(&phone_emergency)), None);
    }

    #[test]
    fn unknown_package_is_ignored() {
        let resolver = Resolver::default();
        let mut prober = Prober::default();
        let pad = dialer(1, "org.example.calculator", (0, 0, 10, 10));
        assert_eq!(prober.on_tree_changed(&resolver, Some(&pad)), None);
        assert!(!prober.state().is_visible());
    }

    #[test]
    fn missing_snapshot_keeps_state() {
        let resolver = Resolver::default();
        let mut prober = Prober::default();
        prober.on_tree_changed(&resolver, Some(&dialer(1, "com.android.dialer", (0, 0, 10, 10))));
        assert_eq!(prober.on_tree_changed(&resolver, None), None);
        assert!(prober.state().is_visible());
    }

    #[test]
    fn lone_number_field_counts_as_dial_pad() {
        let resolver = Resolver::default();
        let (screen, _) = number_only(1);
        let mut prober = Prober::default();
        assert_eq!(
            prober.on_tree_changed(&resolver, Some(&screen)),
            Some(PresenceEvent::Shown {
                bounds: Rect::new(0.0, 300.0, 1080.0, 420.0),
                owner: "com.google.android.dialer".into(),
            })
        );
        assert_eq!(
            prober.on_tree_changed(&resolver, Some(&call_log(2))),
            Some(PresenceEvent::Hidden)
        );
    }

    #[test]
    fn number_field_fallback_can_be_disabled() {
        let resolver = Resolver::default();
        let (screen, _) = number_only(1);
        let mut strict = Prober::new(ProberConfig {
            number_field_fallback: false,
            ..ProberConfig::default()
        });
        assert_eq!(strict.on_tree_changed(&resolver, Some(&screen)), None);
        assert!(!strict.state().is_visible());

        let pad = dialer(2, "com.google.android.dialer", (0, 700, 1080, 1900));
        assert!(matches!(
            strict.on_tree_changed(&resolver, Some(&pad)),
            Some(PresenceEvent::Shown { .. })
        ));
    }

    #[test]
    fn reset_is_silent() {
        let resolver = Resolver::default();
        let mut prober = Prober::default();
        let pad = dialer(1, "com.android.dialer", (0, 0, 10, 10));
        prober.on_tree_changed(&resolver, Some(&pad));
        prober.reset();
        assert!(matches!(
            prober.on_tree_changed(&resolver, Some(&pad)),
            Some(PresenceEvent::Shown { .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_from_json() {
        let config: ProberConfig =
            serde_json::from_str(r#"{ "dialer_packages": ["org.lineageos.dialer"] }"#).unwrap();
        assert_eq!(config.dialer_packages, ["org.lineageos.dialer"]);
        assert_eq!(config.emergency_markers, ["emergency"]);
        assert!(config.number_field_fallback);

        let strict: ProberConfig =
            serde_json::from_str(r#"{ "number_field_fallback": false }"#).unwrap();
        assert!(!strict.number_field_fallback);
        assert_eq!(strict.dialer_packages.len(), 5);
    }
}
