use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::provider::DailySeries;

/// A day counts as "will rain" when the maximum precipitation probability
/// is strictly above this percentage.
pub const RAIN_CHANCE_THRESHOLD_PCT: u8 = 60;

/// A resolved place: canonical name plus coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One day of the forecast, assembled from the provider's parallel series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub precipitation_mm: f64,
    pub rain_chance_pct: u8,
}

impl DailyForecast {
    pub fn will_rain(&self) -> bool {
        self.rain_chance_pct > RAIN_CHANCE_THRESHOLD_PCT
    }
}

/// The outcome of one successful search: resolved location name and its
/// daily forecast, ordered by ascending date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub location: String,
    pub days: Vec<DailyForecast>,
}

impl ForecastResult {
    /// Zip the provider's parallel vectors into per-day records.
    ///
    /// Entries are paired index-by-index, so alignment is preserved by
    /// construction. The series vectors are equal-length by provider
    /// contract; if one is shorter the zip stops there.
    pub fn from_series(location: impl Into<String>, series: DailySeries) -> Self {
        let DailySeries {
            time,
            temperature_2m_max,
            temperature_2m_min,
            precipitation_sum,
            precipitation_probability_max,
        } = series;

        let days = time
            .into_iter()
            .zip(temperature_2m_max)
            .zip(temperature_2m_min)
            .zip(precipitation_sum)
            .zip(precipitation_probability_max)
            .map(
                |((((date, temp_max_c), temp_min_c), precipitation_mm), rain_chance_pct)| {
                    DailyForecast {
                        date,
                        temp_max_c,
                        temp_min_c,
                        precipitation_mm,
                        rain_chance_pct,
                    }
                },
            )
            .collect();

        Self { location: location.into(), days }
    }
}
