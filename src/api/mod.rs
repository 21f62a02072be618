//! HTTP surface: application state, routes and request handlers
//!
//! Each handler extracts input, runs its own validation, delegates to the
//! upstream clients and shapes the response. Domain failures become 404s
//! and an out-of-range `days` parameter becomes a 400, before any upstream
//! call is made.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chart;
use crate::config::AppConfig;
use crate::countries::{CountryClient, CountryRecord, title_case};
use crate::error::{ApiError, Result};
use crate::favorites::Favorites;
use crate::weather::WeatherClient;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub countries: CountryClient,
    pub weather: WeatherClient,
    pub favorites: Arc<Favorites>,
}

impl AppState {
    /// Build the state from configuration: one HTTP client with a bounded
    /// timeout, shared by both upstream clients, and an empty favorites set.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!("geoproxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            countries: CountryClient::new(client.clone(), &config.countries_base_url),
            weather: WeatherClient::new(
                client,
                &config.weather_base_url,
                &config.openweather_api_key,
            ),
            favorites: Arc::new(Favorites::new()),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/continents/{continent}", get(get_continent))
        .route("/countries/{country}", get(get_country))
        .route("/countries/{country}/temperature", get(get_temperature))
        .route("/countries/{country}/forecast", get(get_forecast))
        .route("/favorites", get(list_favorites))
        .route(
            "/favorites/{country}",
            post(add_favorite).delete(remove_favorite),
        )
        .with_state(state)
}

#[derive(Serialize)]
struct ContinentResponse {
    continent: String,
    countries: Vec<String>,
}

#[derive(Serialize)]
struct TemperatureResponse {
    temperature: f64,
}

#[derive(Serialize)]
struct ForecastResponse {
    forecast_url: String,
}

#[derive(Serialize)]
struct FavoritesResponse {
    favorites: Vec<String>,
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Deserialize)]
struct ForecastParams {
    days: Option<i64>,
}

async fn get_continent(
    State(state): State<AppState>,
    Path(continent): Path<String>,
) -> Result<Json<ContinentResponse>> {
    let canonical = title_case(&continent);
    // An unrecognized continent is an unresolvable resource at this
    // boundary, not a malformed request.
    let countries = state
        .countries
        .countries_by_continent(&canonical)
        .await
        .map_err(|err| match err {
            ApiError::InvalidInput(message) => ApiError::NotFound(message),
            other => other,
        })?;

    Ok(Json(ContinentResponse {
        continent: canonical,
        countries,
    }))
}

async fn get_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<CountryRecord>> {
    let record = state.countries.country_info(&country).await?;
    Ok(Json(record))
}

async fn get_temperature(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<TemperatureResponse>> {
    let record = state.countries.country_info(&country).await?;
    let (lat, lon) = capital_coordinates(&record)?;
    let temperature = state.weather.current_temperature(lat, lon).await?;
    Ok(Json(TemperatureResponse { temperature }))
}

async fn get_forecast(
    State(state): State<AppState>,
    Path(country): Path<String>,
    Query(params): Query<ForecastParams>,
) -> Result<Json<ForecastResponse>> {
    let days = params.days.unwrap_or(1);
    if !(1..=5).contains(&days) {
        return Err(ApiError::InvalidInput(format!(
            "days must be between 1 and 5, got {days}"
        )));
    }
    let days = days as u8;

    let record = state.countries.country_info(&country).await?;
    let (lat, lon) = capital_coordinates(&record)?;
    let points = state.weather.forecast(lat, lon, days).await?;
    let forecast_url = chart::forecast_chart_url(&record.name, days, &points);
    Ok(Json(ForecastResponse { forecast_url }))
}

async fn list_favorites(State(state): State<AppState>) -> Json<FavoritesResponse> {
    Json(FavoritesResponse {
        favorites: state.favorites.list(),
    })
}

async fn add_favorite(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<MessageResponse>> {
    // Existence check against the directory; only real countries can be
    // favorited.
    let record = state.countries.country_info(&country).await?;

    let message = if state.favorites.add(&record.name) {
        info!("favorited {}", record.name);
        format!("{} added to favorites", record.name)
    } else {
        format!("{} is already in favorites", record.name)
    };
    Ok(Json(MessageResponse { message }))
}

async fn remove_favorite(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<MessageResponse>> {
    let canonical = title_case(&country);
    if state.favorites.remove(&canonical) {
        info!("unfavorited {canonical}");
        Ok(Json(MessageResponse {
            message: format!("{canonical} removed from favorites"),
        }))
    } else {
        Err(ApiError::NotFound(format!(
            "{canonical} is not in favorites"
        )))
    }
}

/// Coordinates the weather lookup will use; a record whose upstream data
/// lacked them cannot be weather-queried.
fn capital_coordinates(record: &CountryRecord) -> Result<(f64, f64)> {
    record.coordinates().ok_or_else(|| {
        ApiError::Upstream(format!("No coordinates available for {}", record.name))
    })
}
