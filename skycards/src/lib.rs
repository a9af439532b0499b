//! skycards - terminal weather dashboard
//!
//! The flow is one-directional:
//! 1. Key press -> `DashboardView::handle_event()` -> actions
//! 2. Actions dispatched to the store
//! 3. Reducer updates state and returns effects
//! 4. Effects run as fetch tasks keyed by location
//! 5. Fetch results come back as `WeatherDidLoad` / `WeatherDidError`
//! 6. If state changed, re-render

pub mod action;
pub mod cli;
pub mod components;
pub mod effect;
pub mod logging;
pub mod reducer;
pub mod runtime;
pub mod state;

pub use action::Action;
pub use effect::Effect;
pub use reducer::reducer;
pub use runtime::Dashboard;
pub use state::{AppState, FetchState};
