//! Weather data layer for MyWeather
//!
//! Fetches current conditions and a two-hour forecast from QWeather and
//! normalizes them into a [`WeatherRecord`], substituting the default record
//! whenever anything goes wrong. [`DemoProvider`] stands in when no network
//! access is wanted.

pub mod city;
pub mod demo;
pub mod error;
pub mod provider;
pub mod source;
pub mod types;

pub use city::{CityId, CityLookup};
pub use demo::DemoProvider;
pub use error::FetchError;
pub use provider::QWeatherProvider;
pub use source::{log_fetch_failure, WeatherSource};
pub use types::*;
