//! Unit systems understood by the provider

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Unit system requested from the provider and used for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Units {
    /// Fahrenheit, miles per hour
    #[default]
    Imperial,
    /// Celsius, meters per second
    Metric,
}

impl Units {
    /// Value of the `units` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            Units::Imperial => "imperial",
            Units::Metric => "metric",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Units::Imperial => Units::Metric,
            Units::Metric => Units::Imperial,
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Imperial => "°F",
            Units::Metric => "°C",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            Units::Imperial => "mph",
            Units::Metric => "m/s",
        }
    }

    /// Format a rounded temperature, e.g. `72°F`.
    pub fn format_temperature(&self, value: i32) -> String {
        format!("{}{}", value, self.temperature_suffix())
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

/// Returned when a unit name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown unit system '{0}' (expected 'imperial' or 'metric')")]
pub struct UnitsParseError(pub String);

impl FromStr for Units {
    type Err = UnitsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "imperial" | "f" | "fahrenheit" => Ok(Units::Imperial),
            "metric" | "c" | "celsius" => Ok(Units::Metric),
            other => Err(UnitsParseError(other.to_string())),
        }
    }
}
