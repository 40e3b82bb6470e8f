// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dial a number on an in-memory foreign dialer with rotary gestures.
//!
//! This example shows how to combine:
//! - `rotary_invoke::mock::ScriptedHost` as a stand-in for a platform dialer,
//! - `rotary_gesture` pointer events and frames driving the dial,
//! - `rotary_orchestrator` routing digits into the foreign number field.
//!
//! An optional argument names a JSON file with resolver patterns; missing
//! fields keep their defaults.
//!
//! Run:
//! - `cargo run -p rotary_demos --example scripted_dialer`
//! - `RUST_LOG=debug cargo run -p rotary_demos --example scripted_dialer -- patterns.json`

use std::error::Error;

use kurbo::Rect;
use rotary_gesture::{DialConfig, Millis, PointerEvent};
use rotary_invoke::mock::ScriptedHost;
use rotary_orchestrator::{Components, Orchestrator, OrchestratorConfig, OverlaySink};
use rotary_resolve::{PatternConfig, Resolver, SemanticTarget};
use tracing_subscriber::EnvFilter;

/// Prints what a real overlay would draw.
#[derive(Debug, Default)]
struct ConsoleOverlay {
    ticks: usize,
}

impl OverlaySink for ConsoleOverlay {
    fn show_overlay(&mut self, bounds: Rect, owner: &str) {
        println!("overlay shown over {owner} at {bounds:?}");
    }

    fn hide_overlay(&mut self) {
        println!("overlay hidden");
    }

    fn update_number_display(&mut self, text: &str) {
        println!("display: {text:?}");
    }

    fn tick(&mut self, _angle_delta: f64) {
        self.ticks += 1;
    }

    fn injection_result(&mut self, success: bool, target: SemanticTarget) {
        let outcome = if success { "ok" } else { "FAILED" };
        println!("  {target}: {outcome}");
    }
}

fn load_patterns() -> Result<PatternConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            let config = serde_json::from_str(&text)?;
            tracing::info!(%path, "loaded resolver patterns");
            Ok(config)
        }
        None => Ok(PatternConfig::default()),
    }
}

/// Grab the hole of `digit`, turn it towards the stop, and let go.
fn dial(
    session: &mut Orchestrator<ScriptedHost, ConsoleOverlay>,
    config: &DialConfig,
    digit: u8,
    now: &mut Millis,
) {
    let Some(rest) = config.rest_angle(digit) else {
        return;
    };
    let geometry = session.dial().geometry();
    let hole = geometry.radius * (config.band_inner + config.band_outer) / 2.0;
    // Rotation is read from the touch angle, which cannot tell a turn past
    // 180 degrees from a counter-clockwise one.
    let travel = rotary_gesture::max_rotation(rest, config.stop_angle).min(150.0);

    session.on_pointer(PointerEvent::Down {
        position: geometry.point_at(rest, hole),
        timestamp: *now,
    });
    const STEPS: u32 = 5;
    for step in 1..=STEPS {
        *now += 16;
        let angle = rest + travel * f64::from(step) / f64::from(STEPS);
        session.on_pointer(PointerEvent::Move {
            position: geometry.point_at(angle, hole),
            timestamp: *now,
        });
    }
    *now += 16;
    session.on_pointer(PointerEvent::Up { timestamp: *now });
    let end = *now + config.return_duration_ms.max(config.settle_delay_ms);
    while *now < end {
        *now += 16;
        session.on_frame(*now);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (host, layout) = ScriptedHost::dialer("com.google.android.dialer");
    let components = Components {
        resolver: Resolver::new(load_patterns()?),
        ..Components::default()
    };
    let dial_config = components.dial.config().clone();
    let mut session = Orchestrator::new(
        host,
        ConsoleOverlay::default(),
        components,
        OrchestratorConfig::default(),
    );

    session.on_tree_changed();

    let mut now: Millis = 0;
    for digit in [5, 5, 5, 1, 2, 3, 9] {
        dial(&mut session, &dial_config, digit, &mut now);
    }
    println!("dialed by gesture: {}", session.number());

    // Fix the last digit from the overlay's buttons.
    session.request_delete()?;
    session.request_digit('4')?;
    println!(
        "foreign field: {:?} ({} drag ticks)",
        session.host().text(layout.field).unwrap_or_default(),
        session.sink().ticks
    );

    session.request_call()?;
    println!("called; display now {:?}", session.number().as_str());
    Ok(())
}
