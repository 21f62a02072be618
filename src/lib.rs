//! `GeoProxy` - country directory and weather proxy API
//!
//! This library aggregates the REST Countries directory and the
//! OpenWeatherMap API behind a small set of proxy endpoints, keeps an
//! in-memory favorite-countries list, and renders forecasts as
//! QuickChart line-chart URLs.

pub mod api;
pub mod chart;
pub mod config;
pub mod countries;
pub mod error;
pub mod favorites;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::AppConfig;
pub use countries::{CountryClient, CountryRecord, MaybeUnknown};
pub use error::{ApiError, Result};
pub use favorites::Favorites;
pub use weather::{ForecastPoint, WeatherClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
