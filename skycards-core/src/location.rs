//! Capacity-bounded, de-duplicated list of tracked locations
//!
//! One list type serves both identifier flavors. What differs between ZIP
//! codes and city names (validation, capacity, what happens on a duplicate or
//! when the list is full, how the provider is queried) lives on the
//! [`LocationKey`] implementation.
//!
//! # Example
//!
//! ```
//! use skycards_core::location::{AddOutcome, LocationSet, ZipCode};
//!
//! let mut zips = LocationSet::<ZipCode>::new();
//! zips.add("10001");
//! zips.add("90210");
//! zips.add("60601");
//!
//! // Full: the oldest entry makes room
//! let outcome = zips.add(" 94103 ");
//! assert!(matches!(outcome, AddOutcome::Added { evicted: Some(_), .. }));
//! assert_eq!(zips.len(), 3);
//! ```

use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use crate::units::Units;

/// What to do when an identifier is already tracked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Move the existing entry to the most-recent slot.
    MoveToEnd,
    /// Leave the list untouched.
    Ignore,
}

/// What to do when the list is at capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Drop the oldest entry to make room.
    EvictOldest,
    /// Refuse the new entry.
    Reject,
}

/// An identifier the provider can be queried with.
pub trait LocationKey:
    Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Short name of the flavor, used in logs and the UI title.
    const KIND: &'static str;
    /// Maximum number of tracked entries.
    const CAPACITY: usize;
    const ON_DUPLICATE: DuplicatePolicy;
    const ON_FULL: OverflowPolicy;
    /// Input placeholder shown in the location bar.
    const PLACEHOLDER: &'static str;
    /// Maximum accepted input length, if the flavor has one.
    const MAX_INPUT_LEN: Option<usize>;
    /// Whether a new entry must fetch successfully before it is tracked.
    const VALIDATE_ON_ADD: bool;
    const DEFAULT_UNITS: Units;
    const DEFAULT_REFRESH: Duration;

    /// Parse already-trimmed, non-empty user input.
    fn parse(input: &str) -> Option<Self>;

    /// Location part of the provider query string (already URL-encoded).
    fn query(&self) -> String;

    /// Locations shown on first start.
    fn defaults() -> Vec<Self>;
}

/// A five digit US ZIP code.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ZipCode(String);

impl ZipCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl LocationKey for ZipCode {
    const KIND: &'static str = "zip";
    const CAPACITY: usize = 3;
    const ON_DUPLICATE: DuplicatePolicy = DuplicatePolicy::MoveToEnd;
    const ON_FULL: OverflowPolicy = OverflowPolicy::EvictOldest;
    const PLACEHOLDER: &'static str = "Enter ZIP code";
    const MAX_INPUT_LEN: Option<usize> = Some(5);
    const VALIDATE_ON_ADD: bool = false;
    const DEFAULT_UNITS: Units = Units::Imperial;
    const DEFAULT_REFRESH: Duration = Duration::from_secs(5 * 60);

    fn parse(input: &str) -> Option<Self> {
        (input.len() == 5 && input.bytes().all(|b| b.is_ascii_digit()))
            .then(|| ZipCode(input.to_string()))
    }

    fn query(&self) -> String {
        format!("zip={},us", urlencoding::encode(&self.0))
    }

    fn defaults() -> Vec<Self> {
        ["10001", "90210", "60601"]
            .into_iter()
            .map(|zip| ZipCode(zip.to_string()))
            .collect()
    }
}

/// A free-text city name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CityName(String);

impl CityName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl LocationKey for CityName {
    const KIND: &'static str = "city";
    const CAPACITY: usize = 5;
    const ON_DUPLICATE: DuplicatePolicy = DuplicatePolicy::Ignore;
    const ON_FULL: OverflowPolicy = OverflowPolicy::Reject;
    const PLACEHOLDER: &'static str = "Enter city name";
    const MAX_INPUT_LEN: Option<usize> = None;
    const VALIDATE_ON_ADD: bool = true;
    const DEFAULT_UNITS: Units = Units::Metric;
    const DEFAULT_REFRESH: Duration = Duration::from_secs(10 * 60);

    fn parse(input: &str) -> Option<Self> {
        (!input.is_empty()).then(|| CityName(input.to_string()))
    }

    fn query(&self) -> String {
        format!("q={}", urlencoding::encode(&self.0))
    }

    fn defaults() -> Vec<Self> {
        ["New York", "London", "Tokyo"]
            .into_iter()
            .map(|city| CityName(city.to_string()))
            .collect()
    }
}

/// Why an add was skipped. Input-side rejections are silent; the
/// message is used only when a checked entry can no longer be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    Invalid,
    Duplicate,
    Full,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rejection::Empty => "nothing entered",
            Rejection::Invalid => "not a valid location",
            Rejection::Duplicate => "already tracked",
            Rejection::Full => "location list is full",
        })
    }
}

/// Result of [`LocationSet::add`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddOutcome<K> {
    /// A new entry was appended, possibly evicting the oldest one.
    Added { key: K, evicted: Option<K> },
    /// The entry already existed and now sits in the most-recent slot.
    Moved(K),
    Rejected(Rejection),
}

impl<K> AddOutcome<K> {
    /// Whether the input was taken (the input field should be cleared).
    pub fn is_accepted(&self) -> bool {
        !matches!(self, AddOutcome::Rejected(_))
    }
}

/// Ordered set of tracked locations. Insertion order is display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationSet<K> {
    entries: Vec<K>,
    capacity: usize,
}

impl<K: LocationKey> Default for LocationSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: LocationKey> LocationSet<K> {
    /// Empty set with the flavor's capacity.
    pub fn new() -> Self {
        Self::with_capacity(K::CAPACITY)
    }

    /// Empty set with an explicit capacity (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Set pre-filled with `keys`, applying the usual add rules in order.
    pub fn from_keys(keys: impl IntoIterator<Item = K>) -> Self {
        let mut set = Self::new();
        for key in keys {
            set.insert(key);
        }
        set
    }

    /// Add raw user input.
    pub fn add(&mut self, input: &str) -> AddOutcome<K> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return AddOutcome::Rejected(Rejection::Empty);
        }
        match K::parse(trimmed) {
            Some(key) => self.insert(key),
            None => AddOutcome::Rejected(Rejection::Invalid),
        }
    }

    /// Parse raw input and check it would be taken, without changing the
    /// set.
    ///
    /// `Ok` means [`add`](Self::add) with the same input would add or move
    /// the entry.
    pub fn check(&self, input: &str) -> Result<K, Rejection> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Rejection::Empty);
        }
        let key = K::parse(trimmed).ok_or(Rejection::Invalid)?;
        if self.contains(&key) {
            return match K::ON_DUPLICATE {
                DuplicatePolicy::MoveToEnd => Ok(key),
                DuplicatePolicy::Ignore => Err(Rejection::Duplicate),
            };
        }
        if self.is_full() && K::ON_FULL == OverflowPolicy::Reject {
            return Err(Rejection::Full);
        }
        Ok(key)
    }

    /// Add an already-parsed key.
    pub fn insert(&mut self, key: K) -> AddOutcome<K> {
        if let Some(index) = self.position(&key) {
            return match K::ON_DUPLICATE {
                DuplicatePolicy::MoveToEnd => {
                    let existing = self.entries.remove(index);
                    self.entries.push(existing);
                    AddOutcome::Moved(key)
                }
                DuplicatePolicy::Ignore => AddOutcome::Rejected(Rejection::Duplicate),
            };
        }

        let evicted = if self.is_full() {
            match K::ON_FULL {
                OverflowPolicy::EvictOldest => Some(self.entries.remove(0)),
                OverflowPolicy::Reject => return AddOutcome::Rejected(Rejection::Full),
            }
        } else {
            None
        };

        self.entries.push(key.clone());
        AddOutcome::Added { key, evicted }
    }

    /// Remove an entry. Returns `false` if it was not tracked.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.position(key) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains(key)
    }

    pub fn position(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|entry| entry == key)
    }

    pub fn get(&self, index: usize) -> Option<&K> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[K] {
        &self.entries
    }
}
