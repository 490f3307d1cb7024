use serde::{Deserialize, Serialize};

pub const DEFAULT_USERNAME: &str = "default user";
pub const DEFAULT_CITY: &str = "Nanjing";
pub const DEFAULT_ALERT_TOGGLES: [bool; 2] = [false, false];
pub const DEFAULT_CHARACTER_SKIN: &str = "light";

/// Skins the settings panel offers
pub const CHARACTER_SKINS: [&str; 4] = ["light", "dark", "yuka", "yukari"];

/// Flat user preference record, stored as
/// `{"username", "selectedCity", "alerts": [banner, popup], "charac"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub username: String,
    #[serde(rename = "selectedCity")]
    pub selected_city: String,
    /// `[banner alert enabled, popup alert enabled]`
    #[serde(rename = "alerts")]
    pub alert_toggles: [bool; 2],
    #[serde(rename = "charac")]
    pub character_skin: String,
}

impl UserPreferences {
    pub fn banner_alerts(&self) -> bool {
        self.alert_toggles[0]
    }

    pub fn popup_alerts(&self) -> bool {
        self.alert_toggles[1]
    }

    pub fn has_known_skin(&self) -> bool {
        CHARACTER_SKINS.contains(&self.character_skin.as_str())
    }
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            selected_city: DEFAULT_CITY.to_string(),
            alert_toggles: DEFAULT_ALERT_TOGGLES,
            character_skin: DEFAULT_CHARACTER_SKIN.to_string(),
        }
    }
}

/// What a settings file may contain; any key can be absent.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StoredPreferences {
    username: Option<String>,
    #[serde(rename = "selectedCity")]
    selected_city: Option<String>,
    alerts: Option<[bool; 2]>,
    charac: Option<String>,
}

impl StoredPreferences {
    pub(crate) fn username(&self) -> String {
        self.username.clone().unwrap_or_else(|| DEFAULT_USERNAME.to_string())
    }

    pub(crate) fn selected_city(&self) -> String {
        self.selected_city.clone().unwrap_or_else(|| DEFAULT_CITY.to_string())
    }

    pub(crate) fn alert_toggles(&self) -> [bool; 2] {
        self.alerts.unwrap_or(DEFAULT_ALERT_TOGGLES)
    }

    pub(crate) fn character_skin(&self) -> String {
        self.charac.clone().unwrap_or_else(|| DEFAULT_CHARACTER_SKIN.to_string())
    }

    /// Stored keys laid over the default record
    pub(crate) fn overlay(self) -> UserPreferences {
        let defaults = UserPreferences::default();
        UserPreferences {
            username: self.username.unwrap_or(defaults.username),
            selected_city: self.selected_city.unwrap_or(defaults.selected_city),
            alert_toggles: self.alerts.unwrap_or(defaults.alert_toggles),
            character_skin: self.charac.unwrap_or(defaults.character_skin),
        }
    }
}
