//! Application state - single source of truth
//!
//! Components receive `&AppState` as props; only the reducer mutates it.

use std::collections::HashMap;

use skycards_core::location::{LocationKey, LocationSet};
use skycards_core::{Units, WeatherSnapshot};

/// Spinner animation period
pub const LOADING_ANIM_TICK_MS: u64 = 100;

/// Where one location's latest fetch stands.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchState {
    /// Request issued, no result yet
    Pending,
    /// Last request failed; the message is shown on the card
    Failed(String),
    Ready(WeatherSnapshot),
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug)]
pub struct AppState<K: LocationKey> {
    /// Tracked locations, in display order
    pub locations: LocationSet<K>,

    /// Latest fetch result per tracked location
    pub fetches: HashMap<K, FetchState>,

    /// Location bar contents
    pub input: String,

    /// Whether keys go to the location bar instead of the card grid
    pub input_focused: bool,

    /// Entry whose check-before-add fetch is in flight
    pub pending_add: Option<K>,

    /// Why the last checked entry was not added, shown under the location bar
    pub input_error: Option<String>,

    /// Index of the highlighted card
    pub selected: usize,

    pub units: Units,

    /// Animation frame counter (for loading spinners)
    pub tick_count: u32,

    pub terminal_size: (u16, u16),
}

impl<K: LocationKey> AppState<K> {
    /// State tracking `keys`, each waiting for its first fetch.
    pub fn new(keys: impl IntoIterator<Item = K>, units: Units) -> Self {
        let locations = LocationSet::from_keys(keys);
        let fetches = locations
            .iter()
            .map(|key| (key.clone(), FetchState::Pending))
            .collect();
        Self {
            locations,
            fetches,
            input: String::new(),
            input_focused: false,
            pending_add: None,
            input_error: None,
            selected: 0,
            units,
            tick_count: 0,
            terminal_size: (80, 24),
        }
    }

    pub fn fetch_state(&self, key: &K) -> Option<&FetchState> {
        self.fetches.get(key)
    }

    /// Whether any card or a check-before-add is waiting on a request.
    pub fn is_loading(&self) -> bool {
        self.pending_add.is_some()
            || self
                .fetches
                .values()
                .any(|fetch| matches!(fetch, FetchState::Pending))
    }

    pub fn selected_key(&self) -> Option<&K> {
        self.locations.get(self.selected)
    }

    /// Keep the selection on a card after the list shrinks.
    pub(crate) fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.locations.len().saturating_sub(1));
    }
}

impl<K: LocationKey> Default for AppState<K> {
    fn default() -> Self {
        Self::new(K::defaults(), K::DEFAULT_UNITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycards_core::location::{CityName, ZipCode};

    #[test]
    fn test_default_tracks_defaults_as_pending() {
        let state = AppState::<ZipCode>::default();
        assert_eq!(state.locations.len(), 3);
        assert_eq!(state.units, Units::Imperial);
        assert!(state.is_loading());
        for key in state.locations.iter() {
            assert_eq!(state.fetch_state(key), Some(&FetchState::Pending));
        }
    }

    #[test]
    fn test_city_defaults() {
        let state = AppState::<CityName>::default();
        assert_eq!(state.units, Units::Metric);
        assert_eq!(
            state.selected_key().map(|c| c.as_str()),
            Some("New York")
        );
    }

    #[test]
    fn test_not_loading_without_pending() {
        let state = AppState::<ZipCode>::new(Vec::new(), Units::Imperial);
        assert!(!state.is_loading());
        assert_eq!(state.selected_key(), None);
    }

    #[test]
    fn test_pending_add_counts_as_loading() {
        let mut state = AppState::<CityName>::new(Vec::new(), Units::Metric);
        state.pending_add = CityName::parse("Lima");
        assert!(state.is_loading());
    }
}
