//! Wind and rain alerts.
//!
//! Two interchangeable presenters decide what to surface for a
//! [`WeatherRecord`](myweather_weather::WeatherRecord): an inline banner and
//! a pair of modal dialogs. Wind is always checked before rain.

pub mod banner;
pub mod modal;

pub use banner::{Banner, BannerPresenter, RAIN_WARNING, WIND_WARNING};
pub use modal::{DialogSink, ModalPresenter, RAIN_DIALOG, STORM_DIALOG};

use myweather_weather::WeatherRecord;

/// Decides whether and how to surface a warning for a reading
pub trait AlertPresenter {
    fn present(&mut self, record: &WeatherRecord);

    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);
}
