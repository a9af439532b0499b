//! Command line arguments and their resolution into startup settings

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use skycards_core::location::LocationKey;
use skycards_core::{ConfigError, ProviderConfig, ProviderError, Units, DEFAULT_BASE_URL};
use thiserror::Error;
use tracing::warn;

use crate::logging;
use crate::state::AppState;

/// Which identifier the dashboard tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// US ZIP codes, up to 3
    Zip,
    /// City names, up to 5
    City,
}

/// Current weather for a handful of locations, as cards
#[derive(Parser, Debug)]
#[command(name = "skycards", version)]
#[command(about = "Current weather for a handful of locations, as terminal cards")]
pub struct Args {
    /// Track ZIP codes or city names
    #[arg(long, short, value_enum, default_value_t = Mode::Zip)]
    pub mode: Mode,

    /// Location to track; repeat for more (replaces the defaults)
    #[arg(long = "location", short = 'l', value_name = "ID")]
    pub locations: Vec<String>,

    /// imperial or metric (default depends on mode)
    #[arg(long, short)]
    pub units: Option<Units>,

    /// Seconds between refreshes (default depends on mode)
    #[arg(long, short)]
    pub refresh_interval: Option<u64>,

    /// OpenWeather API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Provider endpoint
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Log file (default: skycards.log in the temp directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Reasons the dashboard cannot start.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("'{input}' is not a valid {kind} location")]
    InvalidLocation { kind: &'static str, input: String },

    #[error("refresh interval must be at least one second")]
    InvalidRefreshInterval,

    #[error("could not open log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Args {
    pub fn provider_config(&self) -> Result<ProviderConfig, StartupError> {
        let key = self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)?;
        let config = ProviderConfig::new(key)?.with_base_url(self.base_url.as_str())?;
        Ok(config)
    }

    /// Starting state: the requested locations, or the mode's defaults.
    pub fn initial_state<K: LocationKey>(&self) -> Result<AppState<K>, StartupError> {
        let keys = if self.locations.is_empty() {
            K::defaults()
        } else {
            self.locations
                .iter()
                .map(|input| {
                    K::parse(input.trim()).ok_or_else(|| StartupError::InvalidLocation {
                        kind: K::KIND,
                        input: input.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        let requested = keys.len();
        let state = AppState::new(keys, self.units.unwrap_or(K::DEFAULT_UNITS));
        if state.locations.len() < requested {
            warn!(
                requested,
                tracked = state.locations.len(),
                capacity = state.locations.capacity(),
                "Some locations were dropped (duplicates or over capacity)"
            );
        }
        Ok(state)
    }

    pub fn refresh_every<K: LocationKey>(&self) -> Result<Duration, StartupError> {
        match self.refresh_interval {
            Some(0) => Err(StartupError::InvalidRefreshInterval),
            Some(secs) => Ok(Duration::from_secs(secs)),
            None => Ok(K::DEFAULT_REFRESH),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(logging::default_log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycards_core::location::{CityName, ZipCode};

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("skycards").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["--api-key", "k"]);
        assert_eq!(args.mode, Mode::Zip);
        assert_eq!(args.base_url, DEFAULT_BASE_URL);

        let state = args.initial_state::<ZipCode>().unwrap();
        assert_eq!(state.locations.len(), 3);
        assert_eq!(state.units, Units::Imperial);
        assert_eq!(
            args.refresh_every::<ZipCode>().unwrap(),
            Duration::from_secs(300)
        );
    }

    #[test]
    fn test_city_mode_with_locations() {
        let args = parse(&[
            "--mode", "city", "-l", "Paris", "-l", " Lima ", "--units", "imperial", "-r", "60",
        ]);
        assert_eq!(args.mode, Mode::City);

        let state = args.initial_state::<CityName>().unwrap();
        let tracked: Vec<_> = state.locations.iter().map(|c| c.as_str()).collect();
        assert_eq!(tracked, ["Paris", "Lima"]);
        assert_eq!(state.units, Units::Imperial);
        assert_eq!(
            args.refresh_every::<CityName>().unwrap(),
            Duration::from_secs(60)
        );
    }

    #[test]
    fn test_invalid_zip_is_reported() {
        let args = parse(&["-l", "1234"]);
        let err = args.initial_state::<ZipCode>().unwrap_err();
        assert_eq!(err.to_string(), "'1234' is not a valid zip location");
    }

    #[test]
    fn test_missing_api_key() {
        let args = Args {
            api_key: None,
            ..parse(&[])
        };
        assert!(matches!(
            args.provider_config(),
            Err(StartupError::Config(ConfigError::MissingApiKey))
        ));
    }

    #[test]
    fn test_zero_refresh_rejected() {
        let args = parse(&["-r", "0"]);
        assert!(args.refresh_every::<ZipCode>().is_err());
    }
}
