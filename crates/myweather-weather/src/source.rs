use std::future::Future;

use crate::error::FetchError;
use crate::types::WeatherRecord;

/// Anything that can produce a weather reading for a city.
///
/// Implementors supply [`try_fetch_current`](Self::try_fetch_current); the
/// provided [`fetch_current`](Self::fetch_current) is the public boundary
/// that never fails and substitutes [`WeatherRecord::fallback`] instead.
pub trait WeatherSource: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    fn try_fetch_current(
        &self,
        city: &str,
    ) -> impl Future<Output = Result<WeatherRecord, FetchError>> + Send;

    fn fetch_current(&self, city: &str) -> impl Future<Output = WeatherRecord> + Send {
        async move {
            match self.try_fetch_current(city).await {
                Ok(record) => record,
                Err(e) => {
                    log_fetch_failure(self.name(), city, &e);
                    WeatherRecord::fallback()
                }
            }
        }
    }
}

/// Log a failed fetch that is about to be replaced by the fallback record
pub fn log_fetch_failure(source: &str, city: &str, error: &FetchError) {
    tracing::warn!("{} fetch for '{}' failed, using defaults: {}", source, city, error);
}
