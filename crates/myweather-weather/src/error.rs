//! Why a fetch fell back to defaults.

use myweather_core::error::ReqwestErrorExt;
use myweather_core::{AppError, WeatherError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(u16),

    /// Envelope `code` was not 200; `None` when missing or not a number
    #[error("API returned code {}", .0.map_or_else(|| "<missing>".to_string(), |c| c.to_string()))]
    Protocol(Option<u16>),

    #[error("Malformed response: {0}")]
    Parse(String),

    #[error("Forecast has {0} hourly entries, need 2")]
    InsufficientForecast(usize),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::UnknownCity(city) => AppError::Weather(WeatherError::CityNotFound(city)),
            FetchError::Transport(err) => AppError::Network((&err).into_network_error()),
            FetchError::Status(status) => AppError::Network(myweather_core::NetworkError::ServerError {
                status,
                message: format!("weather API answered HTTP {}", status),
            }),
            FetchError::Protocol(Some(401 | 403)) => AppError::Weather(WeatherError::InvalidApiKey),
            FetchError::Protocol(Some(code)) if code >= 500 => {
                AppError::Weather(WeatherError::ServiceUnavailable)
            }
            other @ (FetchError::Protocol(_)
            | FetchError::Parse(_)
            | FetchError::InsufficientForecast(_)) => {
                AppError::Weather(WeatherError::ApiError(other.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_protocol_display() {
        assert_eq!(FetchError::Protocol(Some(500)).to_string(), "API returned code 500");
        assert_eq!(FetchError::Protocol(None).to_string(), "API returned code <missing>");
    }

    #[test]
    fn test_unknown_city_maps_to_city_not_found() {
        let app: AppError = FetchError::UnknownCity("无锡".into()).into();
        assert!(matches!(app, AppError::Weather(WeatherError::CityNotFound(ref c)) if c == "无锡"));
    }

    #[test]
    fn test_auth_codes_map_to_invalid_key() {
        let app: AppError = FetchError::Protocol(Some(401)).into();
        assert!(matches!(app, AppError::Weather(WeatherError::InvalidApiKey)));
    }

    #[test]
    fn test_server_codes_map_to_unavailable() {
        let app: AppError = FetchError::Protocol(Some(500)).into();
        assert!(matches!(app, AppError::Weather(WeatherError::ServiceUnavailable)));
    }

    #[test]
    fn test_parse_maps_to_api_error() {
        let app: AppError = FetchError::Parse("temp: abc".into()).into();
        assert!(matches!(app, AppError::Weather(WeatherError::ApiError(_))));
    }

    #[test]
    fn test_http_status_maps_to_server_error() {
        let app: AppError = FetchError::Status(502).into();
        assert!(matches!(
            app,
            AppError::Network(myweather_core::NetworkError::ServerError { status: 502, .. })
        ));
    }
}
