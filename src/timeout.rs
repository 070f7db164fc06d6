//! Scoped timeouts for UI-facing delayed callbacks.
//!
//! A timeout is started with a key, runs its task when the duration expires,
//! and does nothing if cleared first. `clear` is idempotent: clearing a
//! fired, cleared, or unknown key is a no-op. The helper carries no ordering
//! guarantee relative to store mutations beyond "the task runs after the
//! duration unless cleared first": callers clear outstanding timeouts
//! before resetting related state, since nothing cancels implicitly.
//!
//! The error-escalating variant reports expiry as
//! [`EngineError::Timeout`] through a caller-supplied error sink, carrying
//! the key and the name of the guarded function. That is a cooperative
//! signal to the caller, not an engine failure.

use rustc_hash::FxHashMap;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;
use tracing::debug;

use crate::core::error::EngineError;

/// Explicit configuration for one timeout.
///
/// Every recognized field is enumerated here; there is no open-ended
/// options bag.
#[derive(Default)]
pub struct TimeoutOptions {
    /// Invoked after the task when the timeout expires.
    pub callback: Option<Box<dyn FnOnce() + Send>>,
    /// Logged when the timeout is started.
    pub start_message: Option<String>,
    /// Logged when the timeout expires or is cleared.
    pub end_message: Option<String>,
}

impl std::fmt::Debug for TimeoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeoutOptions")
            .field("callback", &self.callback.is_some())
            .field("start_message", &self.start_message)
            .field("end_message", &self.end_message)
            .finish()
    }
}

/// Handle to one running timeout.
///
/// A plain value: the key identifies it, `clear` cancels it. Dropping the
/// registry clears every outstanding timeout.
#[derive(Debug)]
pub struct TimeoutHandle {
    key: String,
    cancel: Sender<()>,
}

impl TimeoutHandle {
    /// The identifying key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Cancel the timeout. Idempotent; clearing after expiry is a no-op.
    pub fn clear(&self) {
        // A send failure means the watchdog already finished.
        let _ = self.cancel.send(());
    }
}

/// Registry of active timeouts, keyed by caller-chosen strings.
#[derive(Debug, Default)]
pub struct Timeouts {
    active: FxHashMap<String, TimeoutHandle>,
}

impl Timeouts {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `duration` unless the key is cleared first.
    ///
    /// Starting a new timeout under an existing key replaces (and clears)
    /// the old one.
    pub fn add_timeout<F>(
        &mut self,
        task: F,
        duration: Duration,
        key: &str,
        options: TimeoutOptions,
    ) -> &TimeoutHandle
    where
        F: FnOnce() + Send + 'static,
    {
        self.spawn(key, duration, options, task, |_| {})
    }

    /// Watchdog variant: on expiry, escalate through `on_error` with a
    /// [`EngineError::Timeout`] naming the key and the guarded `function`.
    ///
    /// The options callback still runs first, as the cooperative
    /// cleanup hook.
    pub fn error_on_timeout<E>(
        &mut self,
        function: &str,
        duration: Duration,
        key: &str,
        options: TimeoutOptions,
        on_error: E,
    ) -> &TimeoutHandle
    where
        E: FnOnce(EngineError) + Send + 'static,
    {
        let err = EngineError::Timeout {
            key: key.to_owned(),
            function: function.to_owned(),
        };
        self.spawn(key, duration, options, || {}, move |_| on_error(err))
    }

    /// Clear a timeout by key. Unknown keys are a no-op.
    pub fn clear(&mut self, key: &str) {
        if let Some(handle) = self.active.remove(key) {
            handle.clear();
        }
    }

    /// Keys of timeouts that have been added and not cleared.
    ///
    /// Entries persist after expiry until cleared, mirroring the handles
    /// the UI keeps for rendering.
    pub fn active_keys(&self) -> impl Iterator<Item = &str> {
        self.active.keys().map(String::as_str)
    }

    fn spawn<F, E>(
        &mut self,
        key: &str,
        duration: Duration,
        options: TimeoutOptions,
        task: F,
        escalate: E,
    ) -> &TimeoutHandle
    where
        F: FnOnce() + Send + 'static,
        E: FnOnce(()) + Send + 'static,
    {
        // Replace an existing timeout under this key.
        self.clear(key);

        let TimeoutOptions {
            callback,
            start_message,
            end_message,
        } = options;

        if let Some(msg) = start_message {
            debug!(key, message = %msg, "timeout started");
        }

        let (tx, rx) = mpsc::channel::<()>();
        let thread_key = key.to_owned();
        thread::spawn(move || match rx.recv_timeout(duration) {
            Err(RecvTimeoutError::Timeout) => {
                task();
                if let Some(cb) = callback {
                    cb();
                }
                escalate(());
                if let Some(msg) = end_message {
                    debug!(key = %thread_key, message = %msg, "timeout expired");
                }
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if let Some(msg) = end_message {
                    debug!(key = %thread_key, message = %msg, "timeout cleared");
                }
            }
        });

        let handle = TimeoutHandle {
            key: key.to_owned(),
            cancel: tx,
        };
        self.active.insert(key.to_owned(), handle);
        self.active
            .get(key)
            .expect("handle inserted under this key")
    }
}
