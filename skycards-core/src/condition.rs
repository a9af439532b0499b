//! Condition keyword -> icon and summary sentence
//!
//! Pure lookups used by the card view. Every input maps to something, so a
//! keyword the provider invents later still renders.

use crate::units::Units;

/// Temperature above which a clear day counts as hot, in Fahrenheit.
pub const HOT_THRESHOLD_F: i32 = 77;
/// Same threshold in Celsius.
pub const HOT_THRESHOLD_C: i32 = 25;

/// Icon shown on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Sun,
    Cloud,
    CloudRain,
    Snowflake,
    CloudFog,
}

impl WeatherIcon {
    /// Terminal glyph for the icon.
    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherIcon::Sun => "☀",
            WeatherIcon::Cloud => "☁",
            WeatherIcon::CloudRain => "🌧",
            WeatherIcon::Snowflake => "❄",
            WeatherIcon::CloudFog => "🌫",
        }
    }
}

/// Icon plus canned summary for a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Presentation {
    pub icon: WeatherIcon,
    pub summary: &'static str,
}

/// Map a condition keyword and a Fahrenheit temperature to a presentation.
///
/// Matching is case-insensitive. Unknown keywords fall back to a cloud and
/// a generic summary.
pub fn map_condition(condition: &str, temperature: i32) -> Presentation {
    present(condition, temperature > HOT_THRESHOLD_F)
}

/// Like [`map_condition`], with `temperature` expressed in `units`.
pub fn map_condition_in(condition: &str, temperature: i32, units: Units) -> Presentation {
    let hot = match units {
        Units::Imperial => temperature > HOT_THRESHOLD_F,
        Units::Metric => temperature > HOT_THRESHOLD_C,
    };
    present(condition, hot)
}

fn present(condition: &str, hot: bool) -> Presentation {
    let (icon, summary) = match condition.to_lowercase().as_str() {
        "clear" if hot => (WeatherIcon::Sun, "It's a hot, sunny day!"),
        "clear" => (WeatherIcon::Sun, "Enjoy the sunshine!"),
        "clouds" => (WeatherIcon::Cloud, "Pray you see the sun again."),
        "rain" | "drizzle" => (WeatherIcon::CloudRain, "Don't forget your umbrella!"),
        "snow" => (WeatherIcon::Snowflake, "Bundle up, it's snowing!"),
        "mist" | "fog" => (
            WeatherIcon::CloudFog,
            "Drive and walk carefully, visibility is reduced.",
        ),
        _ => (WeatherIcon::Cloud, "Check the forecast for details."),
    };
    Presentation { icon, summary }
}

/// Broad sky look derived from free-text descriptions, used to tint cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SkyTone {
    Rainy,
    Overcast,
    Sunny,
    #[default]
    PartlyCloudy,
}

impl SkyTone {
    /// Substring match, checked in order: rain, cloud, clear/sun.
    pub fn from_description(description: &str) -> Self {
        let lower = description.to_lowercase();
        if lower.contains("rain") {
            SkyTone::Rainy
        } else if lower.contains("cloud") {
            SkyTone::Overcast
        } else if lower.contains("clear") || lower.contains("sun") {
            SkyTone::Sunny
        } else {
            SkyTone::PartlyCloudy
        }
    }

    /// Sky color as RGB.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            SkyTone::Rainy => (0x5D, 0x9E, 0xA6),
            SkyTone::Overcast => (0xA9, 0xA9, 0xA9),
            SkyTone::Sunny => (0x87, 0xCE, 0xEB),
            SkyTone::PartlyCloudy => (0xB0, 0xC4, 0xDE),
        }
    }
}
