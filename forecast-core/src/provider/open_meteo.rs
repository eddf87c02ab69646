use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::Location;
use crate::provider::{DailySeries, ForecastProvider, Geocoder, ProviderError};

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// The four daily aggregates requested from the forecast endpoint.
const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,precipitation_probability_max";

/// Client for both Open-Meteo endpoints (geocoding and forecast).
///
/// Open-Meteo needs no API key. No request timeout is configured; calls
/// resolve or fail per the transport's own defaults.
#[derive(Debug, Clone, Default)]
pub struct OpenMeteoClient {
    http: Client,
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }
}

#[derive(Debug, Deserialize)]
struct GeoSearchResponse {
    #[serde(default)]
    results: Vec<GeoMatch>,
}

#[derive(Debug, Deserialize)]
struct GeoMatch {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: DailySeries,
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    async fn resolve(&self, query: &str) -> Result<Location, ProviderError> {
        let res = self
            .http
            .get(GEOCODING_URL)
            .query(&[
                ("name", query),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo geocoding")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Open-Meteo geocoding response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo geocoding request failed with status {}: {}",
                status,
                truncate_body(&body),
            )
            .into());
        }

        let parsed: GeoSearchResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo geocoding JSON")?;

        // count=1 means at most one entry; zero entries means the query
        // matched nothing.
        let best = parsed.results.into_iter().next().ok_or(ProviderError::NotFound)?;

        tracing::debug!(query, name = %best.name, "geocoded");

        Ok(Location {
            name: best.name,
            latitude: best.latitude,
            longitude: best.longitude,
        })
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    async fn daily(&self, latitude: f64, longitude: f64) -> Result<DailySeries, ProviderError> {
        let lat = latitude.to_string();
        let lon = longitude.to_string();

        let res = self
            .http
            .get(FORECAST_URL)
            .query(&[
                ("latitude", lat.as_str()),
                ("longitude", lon.as_str()),
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo forecast")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Open-Meteo forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            )
            .into());
        }

        let parsed: ForecastResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo forecast JSON")?;

        tracing::debug!(latitude, longitude, days = parsed.daily.time.len(), "fetched forecast");

        Ok(parsed.daily)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
