//! Effects - side effects declared by the reducer
//!
//! The reducer never performs I/O; it returns these and the runtime runs
//! them against the fetch task registry.

use skycards_core::Units;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect<K> {
    /// Fetch current conditions for one location, replacing any fetch
    /// already running for it
    Fetch { key: K, units: Units },

    /// Fetch a location that is not tracked yet; it is added only if this
    /// succeeds
    ValidateAdd { key: K, units: Units },

    /// Abort the in-flight fetch for a location that is no longer tracked
    CancelFetch(K),
}
