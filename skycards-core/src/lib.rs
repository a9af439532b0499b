//! Core types for skycards, a terminal weather dashboard
//!
//! The dashboard follows a Redux/Elm-style loop: input and timers produce
//! actions, a reducer updates state and returns effects, the runtime runs
//! effects as tasks, and tasks report back with result actions.
//!
//! # Core Concepts
//!
//! - **LocationSet**: bounded, de-duplicated list of tracked locations,
//!   generic over [`LocationKey`] (US ZIP codes or city names)
//! - **WeatherClient**: one OpenWeather request per location, normalized
//!   into a [`WeatherSnapshot`]
//! - **map_condition**: condition keyword to icon and summary sentence
//! - **Store**: state container whose reducer returns [`DispatchResult`]s
//! - **FetchTasks** / **RefreshTimers**: keyed fetch tasks and recurring
//!   timers, all aborted on cancel or drop
//!
//! # Two-phase fetches
//!
//! Intent actions (`WeatherFetch`) become effects; the runtime spawns the
//! request through [`FetchTasks`] and the task sends `WeatherDidLoad` or
//! `WeatherDidError` back over the action channel. The `Did*` prefix marks
//! result actions.
//!
//! ```ignore
//! match effect {
//!     Effect::Fetch { key, units } => {
//!         let client = client.clone();
//!         fetches.spawn(key.clone(), async move {
//!             match client.fetch_snapshot(&key, units).await {
//!                 Ok(snapshot) => Action::WeatherDidLoad { key, units, snapshot },
//!                 Err(e) => Action::WeatherDidError { key, units, error: e.to_string() },
//!             }
//!         });
//!     }
//!     Effect::CancelFetch(key) => fetches.cancel(&key),
//! }
//! ```

pub mod action;
pub mod component;
pub mod condition;
pub mod config;
pub mod event;
pub mod fetch_tasks;
pub mod location;
pub mod provider;
pub mod refresh;
pub mod store;
pub mod testing;
pub mod units;

pub use action::{truncate_for_log, Action, ActionSummary};
pub use component::Component;
pub use condition::{map_condition, map_condition_in, Presentation, SkyTone, WeatherIcon};
pub use config::{ConfigError, ProviderConfig, API_KEY_ENV, DEFAULT_BASE_URL};
pub use event::{process_raw_event, spawn_event_poller, EventKind, PollerConfig};
pub use fetch_tasks::FetchTasks;
pub use location::{
    AddOutcome, CityName, DuplicatePolicy, LocationKey, LocationSet, OverflowPolicy, Rejection,
    ZipCode,
};
pub use provider::{ProviderError, WeatherClient, WeatherSnapshot, WeatherSource};
pub use refresh::RefreshTimers;
pub use store::{
    DispatchResult, LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store,
};
pub use units::{Units, UnitsParseError};

pub use testing::{key, ActionAssertions, RenderHarness};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionSummary};
    pub use crate::component::Component;
    pub use crate::event::EventKind;
    pub use crate::location::{AddOutcome, CityName, LocationKey, LocationSet, ZipCode};
    pub use crate::provider::{WeatherSnapshot, WeatherSource};
    pub use crate::store::{DispatchResult, Store};
    pub use crate::units::Units;

    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span},
        Frame,
    };
}
