//! In-flight fetches, one slot per location
//!
//! Each tracked location gets at most one running fetch task. Spawning for a
//! location that already has one aborts the older task, and cancelling a
//! location (it was removed or evicted) aborts whatever is still running for
//! it. A task that already finished and queued its result action cannot be
//! recalled, so consumers must still check that the location is tracked and
//! the request's units are current before applying a result.
//!
//! # Example
//!
//! ```ignore
//! let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut fetches = FetchTasks::new(action_tx);
//!
//! fetches.spawn(zip.clone(), async move {
//!     match client.fetch_snapshot(&zip, Units::Imperial).await {
//!         Ok(snapshot) => Action::WeatherDidLoad { key: zip, units: Units::Imperial, snapshot },
//!         Err(e) => Action::WeatherDidError { key: zip, units: Units::Imperial, error: e.to_string() },
//!     }
//! });
//!
//! // Location removed: drop the request
//! fetches.cancel(&zip);
//! ```

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::action::Action;
use crate::location::LocationKey;

/// Registry of running fetch tasks keyed by location.
pub struct FetchTasks<K, A> {
    in_flight: HashMap<K, AbortHandle>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<K, A> FetchTasks<K, A>
where
    K: LocationKey,
    A: Action,
{
    /// Results are sent to `action_tx` when a task completes.
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            in_flight: HashMap::new(),
            action_tx,
        }
    }

    /// Start a fetch for `key`, replacing any fetch already running for it.
    ///
    /// The future's output is sent as an action when it completes. An aborted
    /// task sends nothing.
    pub fn spawn<F>(&mut self, key: K, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        self.cancel(&key);
        self.in_flight.retain(|_, handle| !handle.is_finished());

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let action = future.await;
            // Receiver gone means the dashboard is shutting down
            let _ = tx.send(action);
        });

        self.in_flight.insert(key, handle.abort_handle());
        self
    }

    /// Abort the fetch for `key`, if any.
    pub fn cancel(&mut self, key: &K) {
        if let Some(handle) = self.in_flight.remove(key) {
            if !handle.is_finished() {
                tracing::debug!(location = %key, "Aborting in-flight fetch");
            }
            handle.abort();
        }
    }

    /// Abort every fetch (shutdown).
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.in_flight.drain() {
            handle.abort();
        }
    }

    /// Whether a fetch for `key` is still running.
    pub fn is_in_flight(&self, key: &K) -> bool {
        self.in_flight
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Number of fetches still running.
    pub fn len(&self) -> usize {
        self.in_flight
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, A> Drop for FetchTasks<K, A> {
    fn drop(&mut self) {
        for (_, handle) in self.in_flight.drain() {
            handle.abort();
        }
    }
}
