use crate::model::ForecastResult;
use crate::provider::{ForecastProvider, Geocoder, ProviderError};
use crate::store::CityStore;

/// City searched on first run when nothing has been persisted yet.
pub const DEFAULT_CITY: &str = "Jammalamadugu";

/// Message shown when the geocoder finds no match.
pub const NOT_FOUND_MESSAGE: &str = "City not found. Please try again.";

/// Message shown for any transport or provider failure.
pub const NETWORK_MESSAGE: &str = "Could not fetch weather. Please try again.";

/// Everything the view needs to render: the current query text, the last
/// successful result, an error message, and the in-flight flag.
///
/// `result` is deliberately not cleared when a later search fails to
/// geocode; the previous forecast stays visible next to the error.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub result: Option<ForecastResult>,
    pub error: Option<String>,
    pub loading: bool,
}

/// Composes the geocoder and forecast client sequentially and owns the
/// view state. All three collaborators are injected; there is no ambient
/// configuration.
#[derive(Debug)]
pub struct SearchSession {
    geocoder: Box<dyn Geocoder>,
    forecast: Box<dyn ForecastProvider>,
    store: Box<dyn CityStore>,
    state: SearchState,
}

impl SearchSession {
    pub fn new(
        geocoder: Box<dyn Geocoder>,
        forecast: Box<dyn ForecastProvider>,
        store: Box<dyn CityStore>,
    ) -> Self {
        Self { geocoder, forecast, store, state: SearchState::default() }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Startup behavior, run once per session: search the persisted city,
    /// or the default when nothing has been saved yet.
    pub async fn start(&mut self) {
        let initial = self.store.load().unwrap_or_else(|| DEFAULT_CITY.to_owned());
        self.search(&initial).await;
    }

    /// Run one search. Blank queries are rejected silently with no state
    /// change. The loading flag is lowered as the final step on every
    /// path, success or failure.
    pub async fn search(&mut self, query: &str) {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return;
        }

        self.state.query = trimmed.to_owned();
        self.state.loading = true;
        self.state.error = None;

        match self.run(trimmed).await {
            Ok(result) => {
                self.state.result = Some(result);
                self.state.error = None;
            }
            Err(ProviderError::NotFound) => {
                self.state.error = Some(NOT_FOUND_MESSAGE.to_owned());
            }
            Err(ProviderError::Network(err)) => {
                tracing::debug!("search failed: {err:#}");
                self.state.error = Some(NETWORK_MESSAGE.to_owned());
            }
        }

        self.state.loading = false;
    }

    async fn run(&mut self, query: &str) -> Result<ForecastResult, ProviderError> {
        let location = self.geocoder.resolve(query).await?;

        // Persisted before the forecast call: a resolved city whose
        // forecast then fails still becomes the saved city.
        self.store.save(&location.name);

        let series = self.forecast.daily(location.latitude, location.longitude).await?;

        Ok(ForecastResult::from_series(location.name, series))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use anyhow::anyhow;
    use async_trait::async_trait;

    use super::*;
    use crate::model::Location;
    use crate::provider::DailySeries;

    #[derive(Debug, Default)]
    struct MemoryStore {
        city: Mutex<Option<String>>,
    }

    impl CityStore for MemoryStore {
        fn load(&self) -> Option<String> {
            self.city.lock().unwrap().clone()
        }

        fn save(&self, name: &str) {
            *self.city.lock().unwrap() = Some(name.to_owned());
        }
    }

    #[derive(Debug)]
    enum GeocodeMode {
        Found,
        NotFound,
        Network,
    }

    /// Geocoder fake: resolves any query to "<query> Town" at fixed
    /// coordinates, records the queries it saw.
    #[derive(Debug)]
    struct FakeGeocoder {
        mode: GeocodeMode,
        queries: Arc<Mutex<Vec<String>>>,
    }

    impl FakeGeocoder {
        fn new(mode: GeocodeMode) -> Self {
            Self { mode, queries: Arc::default() }
        }
    }

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn resolve(&self, query: &str) -> Result<Location, ProviderError> {
            self.queries.lock().unwrap().push(query.to_owned());
            match self.mode {
                GeocodeMode::Found => Ok(Location {
                    name: format!("{query} Town"),
                    latitude: 14.8,
                    longitude: 78.4,
                }),
                GeocodeMode::NotFound => Err(ProviderError::NotFound),
                GeocodeMode::Network => Err(anyhow!("connection refused").into()),
            }
        }
    }

    #[derive(Debug)]
    struct FakeForecast {
        fail: bool,
    }

    #[async_trait]
    impl ForecastProvider for FakeForecast {
        async fn daily(&self, _lat: f64, _lon: f64) -> Result<DailySeries, ProviderError> {
            if self.fail {
                return Err(anyhow!("gateway timeout").into());
            }
            Ok(DailySeries {
                time: vec!["2026-08-06".parse().unwrap(), "2026-08-07".parse().unwrap()],
                temperature_2m_max: vec![33.0, 31.5],
                temperature_2m_min: vec![24.0, 23.5],
                precipitation_sum: vec![0.4, 9.1],
                precipitation_probability_max: vec![20, 75],
            })
        }
    }

    fn session(geocode: GeocodeMode, forecast_fails: bool) -> SearchSession {
        SearchSession::new(
            Box::new(FakeGeocoder::new(geocode)),
            Box::new(FakeForecast { fail: forecast_fails }),
            Box::new(MemoryStore::default()),
        )
    }

    fn session_with_store(
        geocode: GeocodeMode,
        forecast_fails: bool,
        city: Option<&str>,
    ) -> SearchSession {
        let store = MemoryStore::default();
        *store.city.lock().unwrap() = city.map(str::to_owned);
        SearchSession::new(
            Box::new(FakeGeocoder::new(geocode)),
            Box::new(FakeForecast { fail: forecast_fails }),
            Box::new(store),
        )
    }

    #[tokio::test]
    async fn successful_search_sets_result_and_persists_resolved_name() {
        let mut session = session(GeocodeMode::Found, false);

        session.search("guntur").await;

        let state = session.state();
        assert!(!state.loading);
        assert_eq!(state.error, None);

        let result = state.result.as_ref().expect("result present");
        assert_eq!(result.location, "guntur Town");
        assert_eq!(result.days.len(), 2);

        // The provider's canonical name is what gets saved, not the query.
        assert_eq!(session.store.load(), Some("guntur Town".to_string()));
    }

    #[tokio::test]
    async fn not_found_sets_message_and_keeps_prior_result() {
        let mut session = session(GeocodeMode::Found, false);
        session.search("guntur").await;
        let before = session.state().result.clone();
        assert!(before.is_some());

        // Swap the geocoder for one that finds nothing.
        session.geocoder = Box::new(FakeGeocoder::new(GeocodeMode::NotFound));
        session.search("nowhere").await;

        let state = session.state();
        assert_eq!(state.error.as_deref(), Some(NOT_FOUND_MESSAGE));
        assert_eq!(state.result, before);
        assert!(!state.loading);

        // Persisted city is untouched by a failed resolve.
        assert_eq!(session.store.load(), Some("guntur Town".to_string()));
    }

    #[tokio::test]
    async fn geocoder_network_failure_sets_network_message() {
        let mut session = session(GeocodeMode::Network, false);

        session.search("guntur").await;

        let state = session.state();
        assert_eq!(state.error.as_deref(), Some(NETWORK_MESSAGE));
        assert_eq!(state.result, None);
        assert!(!state.loading);
        assert_eq!(session.store.load(), None);
    }

    #[tokio::test]
    async fn forecast_failure_still_persists_city_and_keeps_result() {
        let mut session = session(GeocodeMode::Found, true);

        session.search("guntur").await;

        let state = session.state();
        assert_eq!(state.error.as_deref(), Some(NETWORK_MESSAGE));
        assert_eq!(state.result, None);
        assert!(!state.loading);

        // Resolve succeeded, so the name was saved before the forecast
        // call failed.
        assert_eq!(session.store.load(), Some("guntur Town".to_string()));
    }

    #[tokio::test]
    async fn blank_query_changes_nothing_and_calls_nobody() {
        let geocoder = FakeGeocoder::new(GeocodeMode::Found);
        let queries = Arc::clone(&geocoder.queries);
        let mut session = SearchSession::new(
            Box::new(geocoder),
            Box::new(FakeForecast { fail: false }),
            Box::new(MemoryStore::default()),
        );

        session.search("   ").await;
        session.search("").await;

        let state = session.state();
        assert_eq!(state.query, "");
        assert_eq!(state.result, None);
        assert_eq!(state.error, None);
        assert!(!state.loading);
        assert!(queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn start_uses_persisted_city_when_present() {
        let mut session = session_with_store(GeocodeMode::Found, false, Some("Guntur"));

        session.start().await;

        assert_eq!(session.state().query, "Guntur");
        assert_eq!(
            session.state().result.as_ref().map(|r| r.location.as_str()),
            Some("Guntur Town")
        );
    }

    #[tokio::test]
    async fn start_falls_back_to_default_city() {
        let mut session = session_with_store(GeocodeMode::Found, false, None);

        session.start().await;

        assert_eq!(session.state().query, DEFAULT_CITY);
        assert_eq!(
            session.state().result.as_ref().map(|r| r.location.as_str()),
            Some("Jammalamadugu Town")
        );
    }

    #[tokio::test]
    async fn error_is_cleared_by_the_next_success() {
        let mut session = session(GeocodeMode::NotFound, false);
        session.search("nowhere").await;
        assert_eq!(session.state().error.as_deref(), Some(NOT_FOUND_MESSAGE));

        session.geocoder = Box::new(FakeGeocoder::new(GeocodeMode::Found));
        session.search("guntur").await;

        assert_eq!(session.state().error, None);
        assert!(session.state().result.is_some());
    }
}
