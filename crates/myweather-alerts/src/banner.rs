use myweather_weather::WeatherRecord;

use crate::AlertPresenter;

pub const WIND_WARNING: &str = "wind warning";
pub const RAIN_WARNING: &str = "rain warning";
const SEPARATOR: &str = " | ";

/// What the inline alert label currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banner {
    pub visible: bool,
    pub text: String,
}

/// Shows applicable warnings in one inline label.
///
/// Disabling it freezes the banner in whatever state it was last left;
/// it is not hidden.
#[derive(Debug, Clone)]
pub struct BannerPresenter {
    enabled: bool,
    banner: Banner,
}

impl BannerPresenter {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            banner: Banner::default(),
        }
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    /// Warning text for a record, empty when nothing applies
    pub fn warning_text(record: &WeatherRecord) -> String {
        let mut alerts = Vec::with_capacity(2);
        if record.is_windy {
            alerts.push(WIND_WARNING);
        }
        if record.is_rainy {
            alerts.push(RAIN_WARNING);
        }
        alerts.join(SEPARATOR)
    }
}

impl AlertPresenter for BannerPresenter {
    fn present(&mut self, record: &WeatherRecord) {
        if !self.enabled {
            return;
        }

        let text = Self::warning_text(record);
        if text.is_empty() {
            self.banner.visible = false;
        } else {
            tracing::info!("Showing alert banner: {}", text);
            self.banner = Banner {
                visible: true,
                text,
            };
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
