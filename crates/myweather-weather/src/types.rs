use serde::{Deserialize, Serialize};

/// Label used for any text field the provider could not supply
pub const UNKNOWN: &str = "unknown";

pub const DEFAULT_TEMPERATURE: i32 = 20;
pub const DEFAULT_HUMIDITY: i32 = 50;
pub const DEFAULT_FORECAST: [i32; 2] = [20, 21];

/// Wind scale at or above which a reading counts as windy
pub const WINDY_SCALE: u32 = 3;

/// One weather reading plus the next two hourly temperatures.
///
/// Built fresh on every fetch and never mutated afterwards. When a fetch
/// fails the whole record is [`WeatherRecord::fallback`]; fields are never a
/// mix of live and default values, except that the forecast defaults on its
/// own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub temperature: i32,
    pub humidity: i32,
    pub is_windy: bool,
    pub is_rainy: bool,
    pub wind_direction: String,
    pub wind_level: String,
    /// Next-hour and next-two-hour temperatures
    pub forecast: [i32; 2],
    pub description: String,
}

impl WeatherRecord {
    /// The all-defaults record shown whenever a fetch fails
    pub fn fallback() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            humidity: DEFAULT_HUMIDITY,
            is_windy: false,
            is_rainy: false,
            wind_direction: UNKNOWN.to_string(),
            wind_level: UNKNOWN.to_string(),
            forecast: DEFAULT_FORECAST,
            description: UNKNOWN.to_string(),
        }
    }

    /// Direction and level as one label, e.g. "NE 3"
    pub fn wind_summary(&self) -> String {
        format!("{} {}", self.wind_direction, self.wind_level)
    }
}

impl Default for WeatherRecord {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Whether a weather description mentions rain.
///
/// Matches "rain" in any case (English responses) and 雨 (Chinese responses).
pub fn is_rain_description(text: &str) -> bool {
    text.contains('雨') || text.to_ascii_lowercase().contains("rain")
}
