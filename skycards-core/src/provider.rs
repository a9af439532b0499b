//! OpenWeather current-weather client
//!
//! One request per location, normalized into a [`WeatherSnapshot`]. The
//! client never touches application state: callers spawn it as a task and
//! turn the `Result` into a result action.

use std::future::Future;

use serde::Deserialize;
use thiserror::Error;

use crate::config::{ConfigError, ProviderConfig};
use crate::location::LocationKey;
use crate::units::Units;

/// Base URL for provider condition icons.
pub const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Errors produced while fetching one location.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Weather API error ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("Unexpected API response format")]
    Malformed,

    #[error("Weather request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl ProviderError {
    /// HTTP status for provider-side failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Normalized weather for one location at one point in time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeatherSnapshot {
    /// Rounded, in the requested units
    pub temperature: i32,
    /// Lower-cased primary condition keyword, e.g. `rain`
    pub condition: String,
    /// Provider description, verbatim
    pub description: String,
    /// Provider display name, verbatim (may be empty)
    pub city_name: String,
    pub feels_like: Option<i32>,
    pub humidity: Option<u8>,
    /// Rounded, in the requested units
    pub wind_speed: Option<i32>,
    pub icon_url: Option<String>,
}

/// Raw provider payload. Everything optional so missing fields become
/// [`ProviderError::Malformed`] instead of a serde message.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderResponse {
    main: Option<MainBlock>,
    #[serde(default)]
    weather: Vec<ConditionEntry>,
    name: Option<String>,
    wind: Option<WindBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    feels_like: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    main: String,
    #[serde(default)]
    description: String,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: Option<f64>,
}

/// Turn a provider payload into a snapshot.
pub fn normalize(response: ProviderResponse) -> Result<WeatherSnapshot, ProviderError> {
    let main = response.main.ok_or(ProviderError::Malformed)?;
    let primary = response
        .weather
        .into_iter()
        .next()
        .ok_or(ProviderError::Malformed)?;

    Ok(WeatherSnapshot {
        temperature: main.temp.round() as i32,
        condition: primary.main.to_lowercase(),
        description: primary.description,
        city_name: response.name.unwrap_or_default(),
        feels_like: main.feels_like.map(|t| t.round() as i32),
        humidity: main.humidity.map(|h| h.round().clamp(0.0, 100.0) as u8),
        wind_speed: response
            .wind
            .and_then(|w| w.speed)
            .map(|s| s.round() as i32),
        icon_url: primary
            .icon
            .filter(|icon| !icon.is_empty())
            .map(|icon| format!("{}/{}@2x.png", ICON_BASE_URL, icon)),
    })
}

/// Parse and normalize a response body.
pub fn parse_body(body: &str) -> Result<WeatherSnapshot, ProviderError> {
    let response: ProviderResponse =
        serde_json::from_str(body).map_err(|_| ProviderError::Malformed)?;
    normalize(response)
}

/// Anything that can produce a snapshot for a location.
///
/// The dashboard runtime fetches through this seam, so tests can swap the
/// network for a scripted source.
pub trait WeatherSource: Clone + Send + Sync + 'static {
    fn fetch<K: LocationKey>(
        &self,
        key: &K,
        units: Units,
    ) -> impl Future<Output = Result<WeatherSnapshot, ProviderError>> + Send;
}

/// HTTP client for the OpenWeather current-weather endpoint.
#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl WeatherClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        if config.api_key().is_empty() {
            return Err(ConfigError::MissingApiKey.into());
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Full request URL for a location.
    pub fn request_url<K: LocationKey>(&self, key: &K, units: Units) -> String {
        format!(
            "{}/weather?{}&appid={}&units={}",
            self.config.base_url(),
            key.query(),
            urlencoding::encode(self.config.api_key()),
            units.as_query()
        )
    }

    /// Fetch and normalize current conditions for `key`.
    pub async fn fetch_snapshot<K: LocationKey>(
        &self,
        key: &K,
        units: Units,
    ) -> Result<WeatherSnapshot, ProviderError> {
        let url = self.request_url(key, units);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!(location = %key, status = status.as_u16(), "Provider returned an error");
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let snapshot = parse_body(&body)?;
        tracing::debug!(
            location = %key,
            temperature = snapshot.temperature,
            condition = %snapshot.condition,
            "Weather fetched"
        );
        Ok(snapshot)
    }
}

impl WeatherSource for WeatherClient {
    async fn fetch<K: LocationKey>(
        &self,
        key: &K,
        units: Units,
    ) -> Result<WeatherSnapshot, ProviderError> {
        self.fetch_snapshot(key, units).await
    }
}
