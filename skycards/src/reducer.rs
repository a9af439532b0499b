//! Reducer - (state, action) -> effects
//!
//! All state transitions happen here. Side work (HTTP requests, aborting
//! them) is returned as [`Effect`]s for the runtime to execute.

use skycards_core::location::{AddOutcome, LocationKey};
use skycards_core::{DispatchResult, Units, WeatherSnapshot};
use tracing::debug;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, FetchState};

pub fn reducer<K: LocationKey>(
    state: &mut AppState<K>,
    action: Action<K>,
) -> DispatchResult<Effect<K>> {
    match action {
        // ===== Location list =====
        Action::LocationInputChange(value) => {
            if K::MAX_INPUT_LEN.is_some_and(|max| value.chars().count() > max) {
                return DispatchResult::unchanged();
            }
            if state.input == value {
                return DispatchResult::unchanged();
            }
            state.input = value;
            state.input_error = None;
            DispatchResult::changed()
        }

        Action::LocationAdd(raw) if K::VALIDATE_ON_ADD => match state.locations.check(&raw) {
            Ok(key) => {
                if state.pending_add.as_ref() == Some(&key) {
                    return DispatchResult::unchanged();
                }
                let mut effects = Vec::with_capacity(2);
                if let Some(previous) = state.pending_add.replace(key.clone()) {
                    effects.push(Effect::CancelFetch(previous));
                }
                state.input_error = None;
                effects.push(Effect::ValidateAdd {
                    key,
                    units: state.units,
                });
                DispatchResult::changed_with_many(effects)
            }
            Err(reason) => {
                debug!(input = %raw.trim(), ?reason, "Location not checked");
                DispatchResult::unchanged()
            }
        },

        Action::LocationAdd(raw) => {
            let outcome = state.locations.add(&raw);
            if let AddOutcome::Rejected(reason) = outcome {
                debug!(input = %raw.trim(), ?reason, "Location not added");
                return DispatchResult::unchanged();
            }
            track_added(state, outcome, None)
        }

        Action::LocationDidValidate {
            key,
            units,
            snapshot,
        } => {
            if state.pending_add.as_ref() != Some(&key) {
                debug!(location = %key, "Dropping stale check result");
                return DispatchResult::unchanged();
            }
            state.pending_add = None;
            let outcome = state.locations.insert(key);
            if let AddOutcome::Rejected(reason) = outcome {
                state.input_error = Some(reason.to_string());
                return DispatchResult::changed();
            }
            // Checked in other units: show it loading and fetch again
            let snapshot = (units == state.units).then_some(snapshot);
            track_added(state, outcome, snapshot)
        }

        Action::LocationDidFailValidation { key, error } => {
            if state.pending_add.as_ref() != Some(&key) {
                debug!(location = %key, "Dropping stale check error");
                return DispatchResult::unchanged();
            }
            state.pending_add = None;
            state.input_error = Some(error);
            DispatchResult::changed()
        }

        Action::LocationRemove(key) => {
            if !state.locations.remove(&key) {
                return DispatchResult::unchanged();
            }
            state.fetches.remove(&key);
            state.clamp_selection();
            DispatchResult::changed_with(Effect::CancelFetch(key))
        }

        Action::LocationSelectNext => {
            if state.selected + 1 >= state.locations.len() {
                return DispatchResult::unchanged();
            }
            state.selected += 1;
            DispatchResult::changed()
        }

        Action::LocationSelectPrev => {
            if state.selected == 0 {
                return DispatchResult::unchanged();
            }
            state.selected -= 1;
            DispatchResult::changed()
        }

        // ===== Weather =====
        Action::WeatherRefreshAll => refetch_all(state),

        Action::WeatherFetch(key) => {
            if !state.locations.contains(&key) {
                return DispatchResult::unchanged();
            }
            state.fetches.insert(key.clone(), FetchState::Pending);
            DispatchResult::changed_with(Effect::Fetch {
                key,
                units: state.units,
            })
        }

        Action::WeatherDidLoad {
            key,
            units,
            snapshot,
        } => {
            if !accepts_result(state, &key, units) {
                return DispatchResult::unchanged();
            }
            state.fetches.insert(key, FetchState::Ready(snapshot));
            DispatchResult::changed()
        }

        Action::WeatherDidError { key, units, error } => {
            if !accepts_result(state, &key, units) {
                return DispatchResult::unchanged();
            }
            state.fetches.insert(key, FetchState::Failed(error));
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::UiFocusInput => {
            if state.input_focused {
                return DispatchResult::unchanged();
            }
            state.input_focused = true;
            DispatchResult::changed()
        }

        Action::UiBlurInput => {
            if !state.input_focused {
                return DispatchResult::unchanged();
            }
            state.input_focused = false;
            DispatchResult::changed()
        }

        Action::UiToggleUnits => {
            state.units = state.units.toggle();
            let result = refetch_all(state);
            // Title shows the units even with nothing tracked
            DispatchResult::changed_with_many(result.effects)
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        // ===== Global =====
        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            // Only the spinners animate
            if state.is_loading() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // Handled by the runtime loop
        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Apply an accepted add: clear the input, select the entry and either
/// show `snapshot` or start a fetch.
fn track_added<K: LocationKey>(
    state: &mut AppState<K>,
    outcome: AddOutcome<K>,
    snapshot: Option<WeatherSnapshot>,
) -> DispatchResult<Effect<K>> {
    state.input.clear();
    state.input_error = None;

    let (key, evicted) = match outcome {
        AddOutcome::Added { key, evicted } => (key, evicted),
        AddOutcome::Moved(key) => {
            state.selected = state.locations.position(&key).unwrap_or(0);
            return DispatchResult::changed();
        }
        AddOutcome::Rejected(_) => return DispatchResult::unchanged(),
    };

    let mut effects = Vec::with_capacity(2);
    if let Some(old) = evicted {
        debug!(location = %old, "Evicted oldest location");
        state.fetches.remove(&old);
        effects.push(Effect::CancelFetch(old));
    }
    state.selected = state.locations.len() - 1;
    match snapshot {
        Some(snapshot) => {
            state.fetches.insert(key, FetchState::Ready(snapshot));
        }
        None => {
            state.fetches.insert(key.clone(), FetchState::Pending);
            effects.push(Effect::Fetch {
                key,
                units: state.units,
            });
        }
    }
    DispatchResult::changed_with_many(effects)
}

/// Whether a fetch result still matches what the dashboard shows: the
/// location is tracked and the request used the current units.
fn accepts_result<K: LocationKey>(state: &AppState<K>, key: &K, units: Units) -> bool {
    if !state.locations.contains(key) {
        debug!(location = %key, "Dropping result for untracked location");
        return false;
    }
    if units != state.units {
        debug!(location = %key, %units, "Dropping result fetched in other units");
        return false;
    }
    true
}

/// Mark every tracked location pending and fetch each one.
fn refetch_all<K: LocationKey>(state: &mut AppState<K>) -> DispatchResult<Effect<K>> {
    if state.locations.is_empty() {
        return DispatchResult::unchanged();
    }
    let mut effects = Vec::with_capacity(state.locations.len());
    for key in state.locations.iter() {
        state.fetches.insert(key.clone(), FetchState::Pending);
        effects.push(Effect::Fetch {
            key: key.clone(),
            units: state.units,
        });
    }
    DispatchResult::changed_with_many(effects)
}
