//! OpenWeather geocoding and air pollution client
//!
//! Resolves a city name to coordinates, then fetches the current pollutant
//! component map for those coordinates. Every request carries an explicit
//! timeout; failures are not retried.

use aqi_common::{Pollutant, Pollutants};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("aqi-web/", env!("CARGO_PKG_VERSION"));

/// Collaborator failures, one per user-facing outcome
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProviderError {
    /// Geocoding returned no match for the city
    #[error("City not found")]
    CityNotFound,

    /// Geocoding request failed or returned an unusable response
    #[error("Failed to fetch location data")]
    Location(String),

    /// Air pollution request failed or returned an unusable response
    #[error("Failed to fetch Air Quality Index data")]
    AirQuality(String),
}

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Source of live pollutant readings for a named city
#[async_trait]
pub trait AirQualityProvider: Send + Sync {
    /// Resolve a city name to coordinates
    async fn locate(&self, city: &str) -> Result<Coordinates, ProviderError>;

    /// Current pollutant concentrations at `coords`
    async fn components(&self, coords: Coordinates) -> Result<Pollutants, ProviderError>;
}

/// OpenWeather HTTP client
pub struct OpenWeatherClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, String> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Querying OpenWeather API");

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| format!("network error: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {}", status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| format!("parse error: {}", e))
    }
}

#[async_trait]
impl AirQualityProvider for OpenWeatherClient {
    async fn locate(&self, city: &str) -> Result<Coordinates, ProviderError> {
        let body = self
            .get_json(
                "/geo/1.0/direct",
                &[("q", city.to_string()), ("limit", "1".to_string())],
            )
            .await
            .map_err(|e| {
                warn!(city = %city, error = %e, "Geocoding request failed");
                ProviderError::Location(e)
            })?;

        parse_geocode(&body)
    }

    async fn components(&self, coords: Coordinates) -> Result<Pollutants, ProviderError> {
        let body = self
            .get_json(
                "/data/2.5/air_pollution",
                &[
                    ("lat", coords.lat.to_string()),
                    ("lon", coords.lon.to_string()),
                ],
            )
            .await
            .map_err(|e| {
                warn!(lat = coords.lat, lon = coords.lon, error = %e, "Air pollution request failed");
                ProviderError::AirQuality(e)
            })?;

        parse_components(&body)
    }
}

/// First geocoding match, or `CityNotFound` for an empty result list
pub fn parse_geocode(body: &Value) -> Result<Coordinates, ProviderError> {
    let matches = body
        .as_array()
        .ok_or_else(|| ProviderError::Location("geocoding response is not a list".to_string()))?;

    let first = matches.first().ok_or(ProviderError::CityNotFound)?;
    Coordinates::deserialize(first)
        .map_err(|e| ProviderError::Location(format!("bad geocoding entry: {}", e)))
}

/// Pollutants from `list[0].components`
pub fn parse_components(body: &Value) -> Result<Pollutants, ProviderError> {
    let components: &Map<String, Value> = body
        .get("list")
        .and_then(|list| list.get(0))
        .and_then(|entry| entry.get("components"))
        .and_then(Value::as_object)
        .ok_or_else(|| ProviderError::AirQuality("missing list[0].components".to_string()))?;

    let mut values = [0.0; 6];
    for (slot, pollutant) in values.iter_mut().zip(Pollutant::ALL) {
        let key = pollutant.component_key();
        *slot = components
            .get(key)
            .and_then(Value::as_f64)
            .ok_or_else(|| ProviderError::AirQuality(format!("missing component '{}'", key)))?;
    }
    Ok(Pollutants::from_features(values))
}
