//! Ties the provider, presenters and preferences together the way the main
//! window does: fetch on load, on refresh, and after settings change.

use chrono::Timelike;
use myweather_alerts::{AlertPresenter, Banner, BannerPresenter, DialogSink, ModalPresenter};
use myweather_core::AppError;
use myweather_settings::UserPreferences;
use myweather_weather::{log_fetch_failure, WeatherRecord, WeatherSource};

use crate::labels::{Greeting, Labels};

/// Display state for one window.
///
/// Refreshing takes `&mut self`, so refreshes never overlap and the last
/// one to finish is what is shown.
pub struct Desk<S, D> {
    source: S,
    prefs: UserPreferences,
    banner: BannerPresenter,
    modal: ModalPresenter<D>,
    record: WeatherRecord,
    labels: Labels,
    status: Option<&'static str>,
}

impl<S: WeatherSource, D: DialogSink> Desk<S, D> {
    pub fn new(source: S, prefs: UserPreferences, dialogs: D) -> Self {
        let labels = Labels::loading(&prefs, Greeting::for_hour(local_hour()));
        Self {
            banner: BannerPresenter::new(prefs.banner_alerts()),
            modal: ModalPresenter::new(prefs.popup_alerts(), dialogs),
            source,
            prefs,
            record: WeatherRecord::fallback(),
            labels,
            status: None,
        }
    }

    pub async fn refresh(&mut self) -> &Labels {
        self.refresh_at(local_hour()).await
    }

    /// Fetch for the selected city and rebuild everything shown
    pub async fn refresh_at(&mut self, hour: u32) -> &Labels {
        let city = self.prefs.selected_city.clone();

        let record = match self.source.try_fetch_current(&city).await {
            Ok(record) => {
                self.status = None;
                record
            }
            Err(e) => {
                log_fetch_failure(self.source.name(), &city, &e);
                self.status = Some(AppError::from(e).user_message());
                WeatherRecord::fallback()
            }
        };

        self.banner.present(&record);
        self.modal.present(&record);
        self.labels = Labels::build(&self.prefs, &record, Greeting::for_hour(hour));
        self.record = record;

        &self.labels
    }

    /// Adopt saved preferences and refresh
    pub async fn apply(&mut self, prefs: UserPreferences) -> &Labels {
        tracing::info!("Applying settings for '{}'", prefs.selected_city);
        self.banner.set_enabled(prefs.banner_alerts());
        self.modal.set_enabled(prefs.popup_alerts());
        self.prefs = prefs;
        self.refresh().await
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn record(&self) -> &WeatherRecord {
        &self.record
    }

    pub fn banner(&self) -> &Banner {
        self.banner.banner()
    }

    pub fn dialogs(&self) -> &D {
        self.modal.dialogs()
    }

    pub fn prefs(&self) -> &UserPreferences {
        &self.prefs
    }

    /// Why the last refresh showed defaults, if it did
    pub fn status(&self) -> Option<&'static str> {
        self.status
    }
}

fn local_hour() -> u32 {
    chrono::Local::now().hour()
}
