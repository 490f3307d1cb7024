use myweather_weather::WeatherRecord;

use crate::AlertPresenter;

pub const STORM_DIALOG: &str = "storm warning";
pub const RAIN_DIALOG: &str = "heavy-rain warning";

/// Shows one blocking informational dialog; returns once it is dismissed
pub trait DialogSink {
    fn show_information(&mut self, message: &str);
}

/// Raises one dialog per applicable warning, wind before rain
#[derive(Debug)]
pub struct ModalPresenter<D> {
    enabled: bool,
    dialogs: D,
}

impl<D: DialogSink> ModalPresenter<D> {
    pub fn new(enabled: bool, dialogs: D) -> Self {
        Self { enabled, dialogs }
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }
}

impl<D: DialogSink> AlertPresenter for ModalPresenter<D> {
    fn present(&mut self, record: &WeatherRecord) {
        if !self.enabled {
            return;
        }
        if record.is_windy {
            self.dialogs.show_information(STORM_DIALOG);
        }
        if record.is_rainy {
            self.dialogs.show_information(RAIN_DIALOG);
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
