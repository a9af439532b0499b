//! Actions for the dashboard
//!
//! Naming: the prefix is the area (`Location*`, `Weather*`, `Ui*`), the
//! verb comes last, and `Did` marks the result of an async fetch.

use skycards_core::location::LocationKey;
use skycards_core::{truncate_for_log, ActionSummary, Units, WeatherSnapshot};

#[derive(Clone, Debug, PartialEq)]
pub enum Action<K> {
    // ===== Location list =====
    /// Location bar edited
    LocationInputChange(String),

    /// Location bar submitted (raw, untrimmed input)
    LocationAdd(String),

    LocationRemove(K),

    LocationSelectNext,

    LocationSelectPrev,

    /// Result: an entry awaiting its check-before-add fetched successfully
    LocationDidValidate {
        key: K,
        units: Units,
        snapshot: WeatherSnapshot,
    },

    /// Result: the check-before-add fetch failed; the entry is not added
    LocationDidFailValidation { key: K, error: String },

    // ===== Weather =====
    /// Intent: re-fetch every tracked location (poll tick or `r`)
    WeatherRefreshAll,

    /// Intent: fetch one location
    WeatherFetch(K),

    /// Result: fetch succeeded. `units` are the ones the request used.
    WeatherDidLoad {
        key: K,
        units: Units,
        snapshot: WeatherSnapshot,
    },

    /// Result: fetch failed
    WeatherDidError {
        key: K,
        units: Units,
        error: String,
    },

    // ===== UI =====
    UiFocusInput,

    UiBlurInput,

    /// Switch imperial/metric and re-fetch
    UiToggleUnits,

    UiTerminalResize(u16, u16),

    // ===== Global =====
    /// Spinner animation tick
    Tick,

    Quit,
}

impl<K: LocationKey> skycards_core::Action for Action<K> {
    fn name(&self) -> &'static str {
        match self {
            Action::LocationInputChange(_) => "LocationInputChange",
            Action::LocationAdd(_) => "LocationAdd",
            Action::LocationRemove(_) => "LocationRemove",
            Action::LocationSelectNext => "LocationSelectNext",
            Action::LocationSelectPrev => "LocationSelectPrev",
            Action::LocationDidValidate { .. } => "LocationDidValidate",
            Action::LocationDidFailValidation { .. } => "LocationDidFailValidation",
            Action::WeatherRefreshAll => "WeatherRefreshAll",
            Action::WeatherFetch(_) => "WeatherFetch",
            Action::WeatherDidLoad { .. } => "WeatherDidLoad",
            Action::WeatherDidError { .. } => "WeatherDidError",
            Action::UiFocusInput => "UiFocusInput",
            Action::UiBlurInput => "UiBlurInput",
            Action::UiToggleUnits => "UiToggleUnits",
            Action::UiTerminalResize(..) => "UiTerminalResize",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }
}

/// Shows concise info instead of full Debug output for data-heavy actions
impl<K: LocationKey> ActionSummary for Action<K> {
    fn summary(&self) -> String {
        match self {
            Action::WeatherDidLoad {
                key,
                units,
                snapshot,
            } => format!(
                "WeatherDidLoad {{ {}: {} {} }}",
                key,
                units.format_temperature(snapshot.temperature),
                snapshot.condition
            ),
            Action::LocationDidValidate {
                key,
                units,
                snapshot,
            } => format!(
                "LocationDidValidate {{ {}: {} {} }}",
                key,
                units.format_temperature(snapshot.temperature),
                snapshot.condition
            ),
            Action::WeatherDidError { key, error, .. } => {
                format!("WeatherDidError {{ {}: {:?} }}", key, truncate_for_log(error, 40))
            }
            Action::LocationDidFailValidation { key, error } => format!(
                "LocationDidFailValidation {{ {}: {:?} }}",
                key,
                truncate_for_log(error, 40)
            ),
            _ => format!("{:?}", self),
        }
    }
}
