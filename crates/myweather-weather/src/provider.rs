//! QWeather-backed provider.
//!
//! One GET per call, no retries. Every failure path (unknown city, transport
//! error, non-success status, bad envelope code, malformed field) surfaces as
//! a [`FetchError`] from the `try_` methods and as the default record or
//! default forecast from the infallible ones.

use std::time::Duration;

use myweather_core::WeatherConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::instrument;

use crate::city::{CityId, CityLookup};
use crate::error::FetchError;
use crate::source::WeatherSource;
use crate::types::{
    is_rain_description, WeatherRecord, DEFAULT_FORECAST, DEFAULT_HUMIDITY, DEFAULT_TEMPERATURE,
    UNKNOWN, WINDY_SCALE,
};

/// Envelope code QWeather uses for success
const SUCCESS_CODE: u16 = 200;

/// Envelope `code`; documented as a string but some gateways send a number
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EnvelopeCode {
    Number(i64),
    Text(String),
}

impl EnvelopeCode {
    fn as_u16(&self) -> Option<u16> {
        match self {
            EnvelopeCode::Number(n) => u16::try_from(*n).ok(),
            EnvelopeCode::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NowResponse {
    code: Option<EnvelopeCode>,
    now: Option<NowBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NowBlock {
    temp: Option<String>,
    humidity: Option<String>,
    wind_scale: Option<String>,
    wind_dir: Option<String>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HourlyResponse {
    code: Option<EnvelopeCode>,
    #[serde(default)]
    hourly: Vec<HourlyEntry>,
}

#[derive(Debug, Deserialize)]
struct HourlyEntry {
    temp: Option<String>,
}

#[derive(Debug, Clone)]
pub struct QWeatherProvider {
    client: Client,
    base_url: String,
    api_key: String,
    lang: String,
    cities: CityLookup,
}

impl QWeatherProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            lang: config.lang.clone(),
            cities: CityLookup::new(),
        })
    }

    pub fn cities(&self) -> &CityLookup {
        &self.cities
    }

    fn resolve(&self, city: &str) -> Result<CityId, FetchError> {
        self.cities
            .resolve(city)
            .ok_or_else(|| FetchError::UnknownCity(city.to_string()))
    }

    /// GET `{base_url}/{endpoint}` for a location and decode the JSON body.
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, id: CityId) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!("GET {} location={}", url, id);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("location", id.to_string()),
                ("key", self.api_key.clone()),
                ("lang", self.lang.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Current conditions, or why they could not be produced.
    #[instrument(skip(self), level = "debug")]
    pub async fn try_fetch_current(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        let id = self.resolve(city)?;

        let response: NowResponse = self.get("weather/now", id).await?;
        check_code(response.code.as_ref())?;
        let now = response
            .now
            .ok_or_else(|| FetchError::Parse("missing 'now' object".to_string()))?;

        let conditions = Conditions::from_block(now)?;
        let forecast = forecast_or_default(city, self.request_hourly(id).await);

        Ok(conditions.into_record(forecast))
    }

    /// Next two hourly temperatures, or why they could not be produced.
    #[instrument(skip(self), level = "debug")]
    pub async fn try_fetch_hourly_forecast(&self, city: &str) -> Result<[i32; 2], FetchError> {
        let id = self.resolve(city)?;
        self.request_hourly(id).await
    }

    /// Next two hourly temperatures; `[20, 21]` on any failure.
    pub async fn fetch_hourly_forecast(&self, city: &str) -> [i32; 2] {
        forecast_or_default(city, self.try_fetch_hourly_forecast(city).await)
    }

    async fn request_hourly(&self, id: CityId) -> Result<[i32; 2], FetchError> {
        let response: HourlyResponse = self.get("weather/24h", id).await?;
        check_code(response.code.as_ref())?;

        match response.hourly.as_slice() {
            [first, second, ..] => Ok([
                parse_required_int("hourly[0].temp", first.temp.as_deref())?,
                parse_required_int("hourly[1].temp", second.temp.as_deref())?,
            ]),
            short => Err(FetchError::InsufficientForecast(short.len())),
        }
    }
}

impl WeatherSource for QWeatherProvider {
    fn name(&self) -> &'static str {
        "qweather"
    }

    async fn try_fetch_current(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        QWeatherProvider::try_fetch_current(self, city).await
    }
}

/// Normalized `now` block, before the forecast is attached
#[derive(Debug)]
struct Conditions {
    temperature: i32,
    humidity: i32,
    wind_scale: Option<u32>,
    wind_direction: String,
    wind_level: String,
    description: String,
}

impl Conditions {
    fn from_block(now: NowBlock) -> Result<Self, FetchError> {
        let temperature = parse_int_or("now.temp", now.temp.as_deref(), DEFAULT_TEMPERATURE)?;
        let humidity = parse_int_or("now.humidity", now.humidity.as_deref(), DEFAULT_HUMIDITY)?;
        let wind_scale = parse_wind_scale(now.wind_scale.as_deref())?;

        Ok(Self {
            temperature,
            humidity,
            wind_scale,
            wind_direction: label_or_unknown(now.wind_dir),
            wind_level: label_or_unknown(now.wind_scale),
            description: label_or_unknown(now.text),
        })
    }

    fn into_record(self, forecast: [i32; 2]) -> WeatherRecord {
        WeatherRecord {
            temperature: self.temperature,
            humidity: self.humidity,
            is_windy: self.wind_scale.is_some_and(|scale| scale >= WINDY_SCALE),
            is_rainy: is_rain_description(&self.description),
            wind_direction: self.wind_direction,
            wind_level: self.wind_level,
            forecast,
            description: self.description,
        }
    }
}

fn forecast_or_default(city: &str, result: Result<[i32; 2], FetchError>) -> [i32; 2] {
    result.unwrap_or_else(|e| {
        tracing::warn!("Hourly forecast for '{}' failed, using defaults: {}", city, e);
        DEFAULT_FORECAST
    })
}

/// Succeeds only when the envelope code is 200
fn check_code(code: Option<&EnvelopeCode>) -> Result<(), FetchError> {
    match code.and_then(EnvelopeCode::as_u16) {
        Some(SUCCESS_CODE) => Ok(()),
        other => Err(FetchError::Protocol(other)),
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_int_or(field: &str, value: Option<&str>, default: i32) -> Result<i32, FetchError> {
    match present(value) {
        Some(_) => parse_required_int(field, value),
        None => Ok(default),
    }
}

fn parse_required_int(field: &str, value: Option<&str>) -> Result<i32, FetchError> {
    let raw = present(value).ok_or_else(|| FetchError::Parse(format!("{} missing", field)))?;
    raw.parse::<i32>()
        .map_err(|_| FetchError::Parse(format!("{}: '{}' is not an integer", field, raw)))
}

/// Leading integer of a wind scale; "3" and "3-4" both give 3
fn parse_wind_scale(value: Option<&str>) -> Result<Option<u32>, FetchError> {
    let Some(raw) = present(value) else {
        return Ok(None);
    };
    let lead = raw.split('-').next().unwrap_or(raw).trim();
    lead.parse::<u32>()
        .map(Some)
        .map_err(|_| FetchError::Parse(format!("now.windScale: '{}' is not a scale", raw)))
}

fn label_or_unknown(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => UNKNOWN.to_string(),
    }
}
