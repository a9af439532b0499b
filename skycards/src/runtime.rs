//! Dashboard runtime: the event/action/render loop
//!
//! The loop owns the store and is the only writer of state. Terminal input
//! and timers feed actions into one channel; fetch tasks report back through
//! the same channel. Effects returned by the reducer are executed here.

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::{Frame, Terminal};
use skycards_core::location::LocationKey;
use skycards_core::{
    spawn_event_poller, EventKind, FetchTasks, LoggingMiddleware, PollerConfig, RefreshTimers,
    Store, WeatherSource,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::action::Action;
use crate::effect::Effect;
use crate::reducer::reducer;
use crate::state::{AppState, LOADING_ANIM_TICK_MS};

/// Drives one dashboard: state, fetch tasks and timers.
pub struct Dashboard<K: LocationKey, W: WeatherSource> {
    store: Store<AppState<K>, Action<K>, Effect<K>, LoggingMiddleware>,
    action_tx: mpsc::UnboundedSender<Action<K>>,
    action_rx: mpsc::UnboundedReceiver<Action<K>>,
    fetches: FetchTasks<K, Action<K>>,
    timers: RefreshTimers<Action<K>>,
    source: W,
    refresh_every: Duration,
    should_render: bool,
}

impl<K: LocationKey, W: WeatherSource> Dashboard<K, W> {
    pub fn new(state: AppState<K>, source: W, refresh_every: Duration) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store: Store::with_middleware(state, reducer::<K>, LoggingMiddleware),
            fetches: FetchTasks::new(action_tx.clone()),
            timers: RefreshTimers::new(action_tx.clone()),
            action_tx,
            action_rx,
            source,
            refresh_every,
            should_render: true,
        }
    }

    /// Register the timers and queue the first fetch of every location.
    pub fn start(&mut self) {
        self.timers
            .every("spinner", Duration::from_millis(LOADING_ANIM_TICK_MS), || {
                Action::Tick
            });
        self.timers
            .every("refresh", self.refresh_every, || Action::WeatherRefreshAll);
        self.enqueue(Action::WeatherRefreshAll);

        info!(
            kind = K::KIND,
            locations = self.state().locations.len(),
            units = %self.state().units,
            refresh_secs = self.refresh_every.as_secs(),
            "Dashboard started"
        );
    }

    /// Send an action into the queue.
    pub fn enqueue(&self, action: Action<K>) {
        let _ = self.action_tx.send(action);
    }

    pub fn state(&self) -> &AppState<K> {
        self.store.state()
    }

    pub fn fetches(&self) -> &FetchTasks<K, Action<K>> {
        &self.fetches
    }

    /// Run the reducer and execute its effects. Returns whether to re-render.
    pub fn dispatch(&mut self, action: Action<K>) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.handle_effect(effect);
        }
        result.changed
    }

    /// Dispatch everything already queued. Returns the number of actions
    /// processed; stops early at `Quit`.
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(action) = self.action_rx.try_recv() {
            processed += 1;
            if matches!(action, Action::Quit) {
                break;
            }
            if self.dispatch(action) {
                self.should_render = true;
            }
        }
        processed
    }

    /// Cancel every timer and in-flight fetch.
    pub fn shutdown(&mut self) {
        self.timers.cancel_all();
        self.fetches.cancel_all();
    }

    fn handle_effect(&mut self, effect: Effect<K>) {
        match effect {
            Effect::Fetch { key, units } => {
                let source = self.source.clone();
                self.fetches.spawn(key.clone(), async move {
                    match source.fetch(&key, units).await {
                        Ok(snapshot) => Action::WeatherDidLoad {
                            key,
                            units,
                            snapshot,
                        },
                        Err(e) => {
                            warn!(location = %key, error = %e, "Weather fetch failed");
                            Action::WeatherDidError {
                                key,
                                units,
                                error: e.to_string(),
                            }
                        }
                    }
                });
            }
            Effect::ValidateAdd { key, units } => {
                let source = self.source.clone();
                self.fetches.spawn(key.clone(), async move {
                    match source.fetch(&key, units).await {
                        Ok(snapshot) => Action::LocationDidValidate {
                            key,
                            units,
                            snapshot,
                        },
                        Err(e) => {
                            info!(location = %key, error = %e, "Location not added");
                            Action::LocationDidFailValidation {
                                key,
                                error: e.to_string(),
                            }
                        }
                    }
                });
            }
            Effect::CancelFetch(key) => self.fetches.cancel(&key),
        }
    }

    /// Run the event/action loop until quit.
    pub async fn run<B, FRender, FEvent>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, &AppState<K>),
        FEvent: FnMut(&EventKind, &AppState<K>) -> Vec<Action<K>>,
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<EventKind>();
        let cancel_token = CancellationToken::new();
        let _handle = spawn_event_poller(event_tx, PollerConfig::default(), cancel_token.clone());

        let result = loop {
            if self.should_render {
                let state = self.store.state();
                if let Err(e) = terminal.draw(|frame| render(frame, state)) {
                    break Err(e);
                }
                self.should_render = false;
            }

            tokio::select! {
                Some(event) = event_rx.recv() => {
                    if matches!(event, EventKind::Resize(..)) {
                        self.should_render = true;
                    }
                    for action in map_event(&event, self.store.state()) {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if matches!(action, Action::Quit) {
                        break Ok(());
                    }
                    if self.dispatch(action) {
                        self.should_render = true;
                    }
                }

                else => {
                    break Ok(());
                }
            }
        };

        cancel_token.cancel();
        self.shutdown();
        info!("Dashboard stopped");
        result
    }
}
