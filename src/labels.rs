//! Text for the display labels.

use myweather_settings::UserPreferences;
use myweather_weather::WeatherRecord;

/// Time-of-day bucket used for the greeting line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Forenoon,
    Noon,
    Afternoon,
    Evening,
}

impl Greeting {
    /// Bucket for a local hour (0-23)
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            5..=8 => Self::Morning,
            9..=11 => Self::Forenoon,
            12..=13 => Self::Noon,
            14..=17 => Self::Afternoon,
            _ => Self::Evening,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Forenoon => "forenoon",
            Self::Noon => "noon",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }

    pub fn line(&self, username: &str) -> String {
        format!("Good {}, {}", self.label(), username)
    }
}

/// Everything the main window shows, as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub city: String,
    pub temperature: String,
    pub humidity_wind: String,
    pub forecast: String,
    pub description: String,
    pub greeting: String,
}

impl Labels {
    /// Placeholder text before the first fetch completes
    pub fn loading(prefs: &UserPreferences, greeting: Greeting) -> Self {
        Self {
            city: city_label(&prefs.selected_city),
            temperature: "<loading>°".to_string(),
            humidity_wind: "<loading>".to_string(),
            forecast: "<loading>".to_string(),
            description: "<loading>".to_string(),
            greeting: greeting.line(&prefs.username),
        }
    }

    pub fn build(prefs: &UserPreferences, record: &WeatherRecord, greeting: Greeting) -> Self {
        Self {
            city: city_label(&prefs.selected_city),
            temperature: format!("{}°", record.temperature),
            humidity_wind: format!(
                "{} | humidity {}%",
                record.wind_summary(),
                record.humidity
            ),
            forecast: format!("{}° {}°", record.forecast[0], record.forecast[1]),
            description: record.description.clone(),
            greeting: greeting.line(&prefs.username),
        }
    }
}

fn city_label(city: &str) -> String {
    format!("{}  ▼", city)
}
