use std::fmt::Debug;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::model::Location;

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Failure classes surfaced by the geocoding and forecast clients.
///
/// The orchestrator is the only consumer; it maps each variant to one of
/// the two fixed user-facing messages.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The geocoder returned zero matches for the query.
    #[error("no location matched the query")]
    NotFound,

    /// Transport failure, non-success HTTP status, or an unparsable body,
    /// at either endpoint.
    #[error(transparent)]
    Network(#[from] anyhow::Error),
}

/// Resolves a free-text place name to its best-matching location.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, query: &str) -> Result<Location, ProviderError>;
}

/// Fetches the daily forecast series for a coordinate pair.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn daily(&self, latitude: f64, longitude: f64) -> Result<DailySeries, ProviderError>;
}

/// Daily aggregates as the provider returns them: five parallel vectors,
/// index-aligned, one entry per day over the default 7-day horizon.
///
/// Equal length is part of the provider contract and is not re-validated
/// here; `ForecastResult::from_series` zips the vectors so downstream code
/// never touches raw indices.
#[derive(Debug, Clone, Deserialize)]
pub struct DailySeries {
    pub time: Vec<NaiveDate>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub precipitation_sum: Vec<f64>,
    pub precipitation_probability_max: Vec<u8>,
}
