//! Offline provider producing random readings.

use std::ops::RangeInclusive;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::FetchError;
use crate::source::WeatherSource;
use crate::types::{WeatherRecord, UNKNOWN};

pub const TEMPERATURE_RANGE: RangeInclusive<i32> = 15..=30;
pub const HUMIDITY_RANGE: RangeInclusive<i32> = 30..=70;
pub const WIND_LEVEL_RANGE: RangeInclusive<u32> = 1..=5;

pub const WIND_DIRECTIONS: [&str; 4] = ["East", "West", "South", "North"];
pub const DESCRIPTIONS: [&str; 7] = [
    "Sunny",
    "Overcast",
    "Cloudy",
    "Gusty",
    "Light Rain",
    "Heavy Rain",
    "Rainstorm",
];

/// Random weather for demos and offline use. Never fails.
///
/// The wind and rain flags are drawn independently of the level and
/// description, so alerts fire about half the time each.
pub struct DemoProvider {
    rng: Mutex<StdRng>,
}

impl DemoProvider {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sequence for tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn generate(&self) -> WeatherRecord {
        let mut rng = self.rng.lock();

        let wind_level = rng.gen_range(WIND_LEVEL_RANGE);
        let wind_direction = WIND_DIRECTIONS.choose(&mut *rng).copied().unwrap_or(UNKNOWN);
        let description = DESCRIPTIONS.choose(&mut *rng).copied().unwrap_or(UNKNOWN);

        WeatherRecord {
            temperature: rng.gen_range(TEMPERATURE_RANGE),
            humidity: rng.gen_range(HUMIDITY_RANGE),
            is_windy: rng.gen(),
            is_rainy: rng.gen(),
            wind_direction: wind_direction.to_string(),
            wind_level: wind_level.to_string(),
            forecast: [
                rng.gen_range(TEMPERATURE_RANGE),
                rng.gen_range(TEMPERATURE_RANGE),
            ],
            description: description.to_string(),
        }
    }
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherSource for DemoProvider {
    fn name(&self) -> &'static str {
        "demo"
    }

    fn try_fetch_current(
        &self,
        city: &str,
    ) -> impl std::future::Future<Output = Result<WeatherRecord, FetchError>> + Send {
        tracing::debug!("Generating demo weather for '{}'", city);
        let record = self.generate();
        async move { Ok(record) }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_fields_within_ranges() {
        let provider = DemoProvider::with_seed(7);
        for _ in 0..500 {
            let record = provider.generate();
            assert!(TEMPERATURE_RANGE.contains(&record.temperature));
            assert!(HUMIDITY_RANGE.contains(&record.humidity));
            let level: u32 = record.wind_level.parse().unwrap();
            assert!(WIND_LEVEL_RANGE.contains(&level));
            assert!(WIND_DIRECTIONS.contains(&record.wind_direction.as_str()));
            assert!(DESCRIPTIONS.contains(&record.description.as_str()));
            assert!(record.forecast.iter().all(|t| TEMPERATURE_RANGE.contains(t)));
        }
    }

    #[test]
    fn test_seeded_sequences_repeat() {
        let a = DemoProvider::with_seed(42);
        let b = DemoProvider::with_seed(42);
        for _ in 0..10 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn test_flags_take_both_values() {
        let provider = DemoProvider::with_seed(1);
        let records: Vec<_> = (0..200).map(|_| provider.generate()).collect();
        assert!(records.iter().any(|r| r.is_windy));
        assert!(records.iter().any(|r| !r.is_windy));
        assert!(records.iter().any(|r| r.is_rainy));
        assert!(records.iter().any(|r| !r.is_rainy));
    }

    #[tokio::test]
    async fn test_never_fails_even_for_unknown_city() {
        let provider = DemoProvider::with_seed(3);
        let record = provider.try_fetch_current("Atlantis").await.unwrap();
        assert!(TEMPERATURE_RANGE.contains(&record.temperature));
    }
}
