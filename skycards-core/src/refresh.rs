//! Recurring timers that emit actions
//!
//! Used for the poll tick that re-fetches every location and for the
//! spinner animation. Timers are keyed by name; re-registering a name
//! replaces the previous timer, and every timer is aborted on cancel or when
//! the registry is dropped, so no recurring work outlives the dashboard.
//!
//! Timers fire on a fixed period with no jitter. A late tick is delayed
//! rather than followed by a burst of catch-up ticks.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::action::Action;

/// Shortest accepted period. `tokio::time::interval` panics on zero.
pub const MIN_PERIOD: Duration = Duration::from_millis(10);

/// Registry of named recurring timers.
pub struct RefreshTimers<A> {
    handles: HashMap<&'static str, JoinHandle<()>>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A: Action> RefreshTimers<A> {
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            handles: HashMap::new(),
            action_tx,
        }
    }

    /// Emit `action_fn()` every `period`, first time after one full period.
    ///
    /// Replaces an existing timer registered under `name`. Periods shorter
    /// than [`MIN_PERIOD`] are raised to it.
    pub fn every<F>(&mut self, name: &'static str, period: Duration, action_fn: F) -> &mut Self
    where
        F: Fn() -> A + Send + 'static,
    {
        self.cancel(name);

        if period < MIN_PERIOD {
            tracing::warn!(
                timer = name,
                period_ms = period.as_millis() as u64,
                "Timer period too short, using the minimum"
            );
        }
        let period = period.max(MIN_PERIOD);

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if tx.send(action_fn()).is_err() {
                    // Dashboard gone
                    break;
                }
            }
        });

        tracing::debug!(timer = name, period_ms = period.as_millis() as u64, "Timer started");
        self.handles.insert(name, handle);
        self
    }

    pub fn cancel(&mut self, name: &str) {
        if let Some(handle) = self.handles.remove(name) {
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.handles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<A> Drop for RefreshTimers<A> {
    fn drop(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}
