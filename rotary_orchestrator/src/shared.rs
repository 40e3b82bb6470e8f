// Copyright 2026 the Rotary Dialer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::{Arc, Mutex, MutexGuard};

use rotary_gesture::{Millis, PointerEvent};
use rotary_invoke::{ActionError, ActionHost, Injection};

use crate::session::Orchestrator;
use crate::sink::OverlaySink;

/// A cloneable handle that serializes every call into one [`Orchestrator`].
///
/// Accessibility callbacks, touch input, and the frame clock often arrive on
/// different threads. Each call here holds the lock for its whole duration,
/// so the number, gesture, and presence state change one event at a time.
#[derive(Debug)]
pub struct SharedOrchestrator<H, S> {
    inner: Arc<Mutex<Orchestrator<H, S>>>,
}

impl<H, S> Clone for SharedOrchestrator<H, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: ActionHost, S: OverlaySink> SharedOrchestrator<H, S> {
    /// Share `orchestrator`.
    pub fn new(orchestrator: Orchestrator<H, S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(orchestrator)),
        }
    }

    /// Run `f` with exclusive access to the orchestrator.
    ///
    /// A panic in an earlier holder does not make the session unusable.
    pub fn with<R>(&self, f: impl FnOnce(&mut Orchestrator<H, S>) -> R) -> R {
        f(&mut self.lock())
    }

    /// See [`Orchestrator::on_tree_changed`].
    pub fn on_tree_changed(&self) {
        self.lock().on_tree_changed();
    }

    /// See [`Orchestrator::on_pointer`].
    pub fn on_pointer(&self, event: PointerEvent) {
        self.lock().on_pointer(event);
    }

    /// See [`Orchestrator::on_frame`].
    pub fn on_frame(&self, timestamp: Millis) {
        self.lock().on_frame(timestamp);
    }

    /// See [`Orchestrator::request_digit`].
    pub fn request_digit(&self, glyph: char) -> Result<Injection, ActionError> {
        self.lock().request_digit(glyph)
    }

    /// See [`Orchestrator::request_delete`].
    pub fn request_delete(&self) -> Result<Option<Injection>, ActionError> {
        self.lock().request_delete()
    }

    /// See [`Orchestrator::request_call`].
    pub fn request_call(&self) -> Result<(), ActionError> {
        self.lock().request_call()
    }

    /// See [`Orchestrator::request_clear`].
    pub fn request_clear(&self) -> Result<(), ActionError> {
        self.lock().request_clear()
    }

    /// See [`Orchestrator::request_hide`].
    pub fn request_hide(&self) {
        self.lock().request_hide();
    }

    /// A copy of the mirrored number.
    pub fn number(&self) -> String {
        self.lock().number().as_str().to_owned()
    }

    fn lock(&self) -> MutexGuard<'_, Orchestrator<H, S>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("orchestrator lock poisoned; continuing with last state");
                poisoned.into_inner()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Components, OrchestratorConfig};
    use kurbo::Rect;
    use rotary_invoke::mock::ScriptedHost;
    use rotary_resolve::SemanticTarget;
    use std::thread;

    #[derive(Debug, Default)]
    struct CountingSink {
        results: usize,
    }

    impl OverlaySink for CountingSink {
        fn show_overlay(&mut self, _bounds: Rect, _owner: &str) {}

        fn hide_overlay(&mut self) {}

        fn update_number_display(&mut self, _text: &str) {}

        fn injection_result(&mut self, _success: bool, _target: SemanticTarget) {
            self.results += 1;
        }
    }

    fn shared() -> (SharedOrchestrator<ScriptedHost, CountingSink>, usize) {
        let (host, layout) = ScriptedHost::dialer("com.android.dialer");
        let orchestrator = Orchestrator::new(
            host,
            CountingSink::default(),
            Components::default(),
            OrchestratorConfig::default(),
        );
        let shared = SharedOrchestrator::new(orchestrator);
        shared.on_tree_changed();
        (shared, layout.field)
    }

    #[test]
    fn requests_from_many_threads_are_serialized() {
        let (shared, field) = shared();
        let workers: Vec<_> = ['1', '2', '3', '4']
            .into_iter()
            .map(|glyph| {
                let handle = shared.clone();
                thread::spawn(move || handle.request_digit(glyph))
            })
            .collect();
        for worker in workers {
            assert!(worker.join().unwrap().is_ok(), "every digit lands");
        }

        let number = shared.number();
        assert_eq!(number.len(), 4);
        shared.with(|o| {
            assert_eq!(o.host().text(field), Some(number.as_str()));
            assert_eq!(o.sink().results, 4);
        });
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let (shared, _) = shared();
        let handle = shared.clone();
        let panicked = thread::spawn(move || {
            handle.with(|o| {
                if o.number().is_empty() {
                    panic!("overlay crashed");
                }
            });
        })
        .join();
        assert!(panicked.is_err(), "worker panicked while holding the lock");

        assert_eq!(shared.request_digit('8'), Ok(Injection::Pressed));
        assert_eq!(shared.number(), "8");
    }
}
