//! OpenWeatherMap client
//!
//! Current conditions and the 5-day/3-hour forecast, keyed by coordinates
//! resolved elsewhere. The API credential is passed in explicitly at
//! construction; temperatures are requested in Celsius (`units=metric`).

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{ApiError, Result, upstream_unreachable};

/// The forecast endpoint returns samples at 3-hour resolution, 8 per day
pub const POINTS_PER_DAY: usize = 8;

/// One timestamped temperature sample from the forecast series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Upstream `dt_txt` timestamp, kept verbatim
    pub time: String,
    /// Temperature in Celsius
    pub temperature: f64,
}

/// Client for the OpenWeatherMap API
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Current temperature in Celsius at the given coordinates
    #[instrument(skip(self))]
    pub async fn current_temperature(&self, lat: f64, lon: f64) -> Result<f64> {
        debug!("querying current weather at {lat},{lon}");
        let url = format!(
            "{}/weather?lat={lat}&lon={lon}&appid={}&units=metric",
            self.base_url, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| upstream_unreachable("weather", &err))?;
        if !response.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "weather service returned status {}",
                response.status()
            )));
        }

        let data: openweather::WeatherResponse = response
            .json()
            .await
            .map_err(|_| ApiError::Upstream("invalid weather service response".to_string()))?;

        Ok(data.main.temp)
    }

    /// Forecast points for the given coordinates, truncated to `days` worth
    /// of samples (8 per day), in upstream chronological order.
    ///
    /// Any positive `days` is accepted here; the caller-facing [1, 5] range
    /// check lives at the handler boundary.
    #[instrument(skip(self))]
    pub async fn forecast(&self, lat: f64, lon: f64, days: u8) -> Result<Vec<ForecastPoint>> {
        debug!("querying {days}-day forecast at {lat},{lon}");
        let url = format!(
            "{}/forecast?lat={lat}&lon={lon}&appid={}&units=metric",
            self.base_url, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| upstream_unreachable("weather", &err))?;
        if !response.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "weather service returned status {}",
                response.status()
            )));
        }

        let data: openweather::ForecastResponse = response
            .json()
            .await
            .map_err(|_| ApiError::Upstream("invalid weather service response".to_string()))?;

        Ok(clip_forecast(data.list, days))
    }
}

/// Take the first `min(8 * days, available)` entries, never reordering
fn clip_forecast(list: Vec<openweather::ForecastEntry>, days: u8) -> Vec<ForecastPoint> {
    let limit = POINTS_PER_DAY * days as usize;
    list.into_iter()
        .take(limit)
        .map(|entry| ForecastPoint {
            time: entry.dt_txt,
            temperature: entry.main.temp,
        })
        .collect()
}

/// OpenWeatherMap API response structures
mod openweather {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct WeatherResponse {
        pub main: Main,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub list: Vec<ForecastEntry>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastEntry {
        pub dt_txt: String,
        pub main: Main,
    }

    #[derive(Debug, Deserialize)]
    pub struct Main {
        pub temp: f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn entries(count: usize) -> Vec<openweather::ForecastEntry> {
        (0..count)
            .map(|i| openweather::ForecastEntry {
                dt_txt: format!("2026-08-29 {:02}:00:00", (i * 3) % 24),
                main: openweather::Main { temp: 10.0 + i as f64 },
            })
            .collect()
    }

    #[rstest]
    #[case(1, 40, 8)]
    #[case(3, 40, 24)]
    #[case(5, 40, 40)]
    #[case(5, 12, 12)] // never more than available
    #[case(2, 0, 0)]
    fn test_clip_forecast_length(
        #[case] days: u8,
        #[case] available: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(clip_forecast(entries(available), days).len(), expected);
    }

    #[test]
    fn test_clip_forecast_preserves_order() {
        let points = clip_forecast(entries(10), 1);
        assert_eq!(points[0].time, "2026-08-29 00:00:00");
        assert_eq!(points[0].temperature, 10.0);
        assert_eq!(points[7].time, "2026-08-29 21:00:00");
        assert_eq!(points[7].temperature, 17.0);
    }
}
