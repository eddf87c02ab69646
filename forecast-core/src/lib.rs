//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - The domain model (locations, daily forecasts, the rain threshold)
//! - Clients for the Open-Meteo geocoding and forecast endpoints
//! - The persisted last-city store
//! - The search orchestrator tying the three together
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries
//! or services.

pub mod model;
pub mod provider;
pub mod search;
pub mod store;

pub use model::{DailyForecast, ForecastResult, Location, RAIN_CHANCE_THRESHOLD_PCT};
pub use provider::{DailySeries, ForecastProvider, Geocoder, OpenMeteoClient, ProviderError};
pub use search::{DEFAULT_CITY, SearchSession, SearchState};
pub use store::{CityStore, FileCityStore};
