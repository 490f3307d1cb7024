//! JSON file persistence for [`UserPreferences`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use myweather_core::{Config, SettingsError};

use crate::preferences::{StoredPreferences, UserPreferences};

pub const SETTINGS_FILE_NAME: &str = "user_settings.json";

/// Reads and writes the user settings file.
///
/// Saves replace the whole file through a temporary sibling and a rename,
/// so an interrupted save leaves the previous file intact. There is no
/// locking; concurrent writers race.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/myweather/user_settings.json`
    pub fn default_location() -> Result<Self, SettingsError> {
        let dir = Config::config_dir().map_err(|_| SettingsError::NoLocation)?;
        Ok(Self::new(dir.join(SETTINGS_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed file contents, or `None` when missing or unreadable as preferences
    fn read_stored(&self) -> Option<StoredPreferences> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No settings file at {}", self.path.display());
                return None;
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<StoredPreferences>(&contents) {
            Ok(stored) => Some(stored),
            Err(e) => {
                tracing::warn!(
                    "Ignoring malformed settings file {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    /// Load preferences. Never fails; defaults fill whatever is missing.
    pub fn load(&self) -> UserPreferences {
        self.read_stored()
            .map(StoredPreferences::overlay)
            .unwrap_or_default()
    }

    pub fn load_username(&self) -> String {
        self.read_stored().unwrap_or_default().username()
    }

    pub fn load_selected_city(&self) -> String {
        self.read_stored().unwrap_or_default().selected_city()
    }

    pub fn load_alert_toggles(&self) -> [bool; 2] {
        self.read_stored().unwrap_or_default().alert_toggles()
    }

    pub fn load_character_skin(&self) -> String {
        self.read_stored().unwrap_or_default().character_skin()
    }

    /// Overwrite the settings file with `prefs`.
    pub fn save(&self, prefs: &UserPreferences) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(prefs)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.write_error(source))?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(|source| self.write_error(source))?;
        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(self.write_error(source));
        }

        tracing::info!("Saved settings to {}", self.path.display());
        Ok(())
    }

    /// Change only the selected city, keeping every other stored value
    pub fn save_selected_city(&self, city: &str) -> Result<(), SettingsError> {
        let mut prefs = self.load();
        prefs.selected_city = city.to_string();
        self.save(&prefs)
    }

    /// Write the default record and return it
    pub fn reset(&self) -> Result<UserPreferences, SettingsError> {
        let defaults = UserPreferences::default();
        self.save(&defaults)?;
        Ok(defaults)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| SETTINGS_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: std::io::Error) -> SettingsError {
        SettingsError::Write {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use quickcheck::{Arbitrary, Gen};
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join(SETTINGS_FILE_NAME))
    }

    #[derive(Clone, Debug)]
    struct ArbitraryPreferences(UserPreferences);

    impl Arbitrary for ArbitraryPreferences {
        fn arbitrary(g: &mut Gen) -> Self {
            ArbitraryPreferences(UserPreferences {
                username: String::arbitrary(g),
                selected_city: String::arbitrary(g),
                alert_toggles: [bool::arbitrary(g), bool::arbitrary(g)],
                character_skin: String::arbitrary(g),
            })
        }
    }

    #[quickcheck]
    fn save_then_load_round_trips(prefs: ArbitraryPreferences) -> bool {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&prefs.0).unwrap();
        store.load() == prefs.0
    }

    #[quickcheck]
    fn accessors_match_saved_record(prefs: ArbitraryPreferences) -> bool {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&prefs.0).unwrap();
        store.load_username() == prefs.0.username
            && store.load_selected_city() == prefs.0.selected_city
            && store.load_alert_toggles() == prefs.0.alert_toggles
            && store.load_character_skin() == prefs.0.character_skin
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let prefs = store.load();

        assert_eq!(
            prefs,
            UserPreferences {
                username: "default user".into(),
                selected_city: "Nanjing".into(),
                alert_toggles: [false, false],
                character_skin: "light".into(),
            }
        );
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        for contents in ["{not json", "", "[1, 2]", r#"{"alerts": "yes"}"#, r#"{"username": 7}"#] {
            fs::write(store.path(), contents).unwrap();
            assert_eq!(store.load(), UserPreferences::default(), "contents: {}", contents);
        }
    }

    #[test]
    fn test_partial_file_is_overlaid() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"username": "test_user", "extra": 1}"#).unwrap();

        let prefs = store.load();

        assert_eq!(prefs.username, "test_user");
        assert_eq!(prefs.selected_city, "Nanjing");
        assert_eq!(store.load_selected_city(), "Nanjing");
        assert_eq!(store.load_alert_toggles(), [false, false]);
        assert_eq!(store.load_character_skin(), "light");
    }

    #[test]
    fn test_save_writes_expected_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let prefs = UserPreferences {
            username: "new_user".into(),
            selected_city: "深圳".into(),
            alert_toggles: [true, true],
            character_skin: "yuka".into(),
        };

        store.save(&prefs).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!({
                "username": "new_user",
                "selectedCity": "深圳",
                "alerts": [true, true],
                "charac": "yuka"
            })
        );
    }

    #[test]
    fn test_save_overwrites_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&UserPreferences::default()).unwrap();

        let mut prefs = UserPreferences::default();
        prefs.selected_city = "上海".into();
        store.save(&prefs).unwrap();

        assert_eq!(store.load_selected_city(), "上海");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("a").join("b").join(SETTINGS_FILE_NAME));

        store.save(&UserPreferences::default()).unwrap();

        assert!(store.path().exists());
    }

    #[test]
    fn test_failed_save_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut prefs = UserPreferences::default();
        prefs.username = "kept".into();
        store.save(&prefs).unwrap();

        // A directory squatting on the temp path makes the write fail
        fs::create_dir(store.temp_path()).unwrap();
        prefs.username = "lost".into();
        let err = store.save(&prefs).unwrap_err();

        assert!(matches!(err, SettingsError::Write { .. }));
        assert_eq!(store.load_username(), "kept");
    }

    #[test]
    fn test_save_selected_city_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let prefs = UserPreferences {
            username: "test_user".into(),
            alert_toggles: [true, false],
            ..UserPreferences::default()
        };
        store.save(&prefs).unwrap();

        store.save_selected_city("Beijing").unwrap();

        let loaded = store.load();
        assert_eq!(loaded.selected_city, "Beijing");
        assert_eq!(loaded.username, "test_user");
        assert_eq!(loaded.alert_toggles, [true, false]);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .save(&UserPreferences {
                username: "someone".into(),
                selected_city: "北京".into(),
                alert_toggles: [true, true],
                character_skin: "yukari".into(),
            })
            .unwrap();

        let reset = store.reset().unwrap();

        assert_eq!(reset, UserPreferences::default());
        assert_eq!(store.load(), UserPreferences::default());
    }
}
