//! User preferences for MyWeather.
//!
//! A small flat record persisted as JSON. Loading never fails: a missing or
//! corrupt file yields the default record, and a partial file is overlaid
//! onto it key by key.

#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub mod preferences;
pub mod store;

pub use preferences::{UserPreferences, CHARACTER_SKINS, DEFAULT_CHARACTER_SKIN};
pub use store::SettingsStore;
