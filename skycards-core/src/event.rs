//! Terminal input events and the background poller that reads them

use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Terminal event as seen by components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Timing of the input poller.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout for each `crossterm::event::poll` call
    pub poll_timeout: Duration,
    /// Sleep between poll cycles
    pub loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// Map a crossterm event to an [`EventKind`].
///
/// Key releases and repeats (reported on some platforms) are dropped so a
/// single press types a single character.
pub fn process_raw_event(raw: event::Event) -> Option<EventKind> {
    match raw {
        event::Event::Key(key) if key.kind == KeyEventKind::Press => Some(EventKind::Key(key)),
        event::Event::Resize(w, h) => Some(EventKind::Resize(w, h)),
        _ => None,
    }
}

/// Events read per wake-up before yielding back to the runtime.
const BATCH_LIMIT: usize = 20;

/// Read whatever crossterm has buffered, up to [`BATCH_LIMIT`] events.
///
/// Returns `false` once the receiving side is gone.
fn forward_batch(tx: &mpsc::UnboundedSender<EventKind>, poll_timeout: Duration) -> bool {
    for _ in 0..BATCH_LIMIT {
        if !event::poll(poll_timeout).unwrap_or(false) {
            break;
        }
        let Some(kind) = event::read().ok().and_then(process_raw_event) else {
            continue;
        };
        if tx.send(kind).is_err() {
            return false;
        }
    }
    true
}

/// Throw away buffered input so keys typed during shutdown don't land in
/// the shell.
fn discard_buffered() {
    while event::poll(Duration::ZERO).unwrap_or(false) {
        let _ = event::read();
    }
}

/// Spawn the task that turns terminal input into [`EventKind`]s.
///
/// Runs until `cancel_token` fires or the receiver is dropped.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<EventKind>,
    config: PollerConfig,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    discard_buffered();
                    info!("Input poller stopped");
                    return;
                }
                _ = tokio::time::sleep(config.loop_sleep) => {
                    if !forward_batch(&tx, config.poll_timeout) {
                        debug!("Event receiver dropped, input poller exiting");
                        return;
                    }
                }
            }
        }
    })
}
