//! REST Countries v3.1 client
//!
//! Looks countries up by region or by name and normalizes the upstream
//! records: first-listed capital, numeric fields that may be absent, and a
//! `latlng` pair that is only trusted when it has exactly two elements.
//! Missing data is surfaced as the string `"Unknown"` rather than an
//! omitted key.

use reqwest::{Client, StatusCode};
use serde::{Serialize, Serializer};
use tracing::{debug, instrument};

use crate::error::{ApiError, Result, upstream_unreachable};

/// The closed set of recognized continents, in upstream region spelling
pub const CONTINENTS: [&str; 5] = ["Asia", "Africa", "North America", "South America", "Europe"];

/// A numeric field the upstream may omit; serializes as the value or the
/// literal string `"Unknown"`, never as a missing key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaybeUnknown<T> {
    Known(T),
    Unknown,
}

impl<T: Serialize> Serialize for MaybeUnknown<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            MaybeUnknown::Known(value) => value.serialize(serializer),
            MaybeUnknown::Unknown => serializer.serialize_str("Unknown"),
        }
    }
}

impl<T> From<Option<T>> for MaybeUnknown<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => MaybeUnknown::Known(v),
            None => MaybeUnknown::Unknown,
        }
    }
}

/// Normalized country record, constructed fresh on every request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRecord {
    pub name: String,
    pub capital: String,
    pub population: MaybeUnknown<u64>,
    pub area: MaybeUnknown<f64>,
    pub latitude: MaybeUnknown<f64>,
    pub longitude: MaybeUnknown<f64>,
}

impl CountryRecord {
    fn from_upstream(name: String, raw: rest_countries::Country) -> Self {
        // A country can have multiple capitals (e.g. South Africa); take
        // the first listed one.
        let capital = raw
            .capital
            .and_then(|capitals| capitals.into_iter().next())
            .unwrap_or_else(|| "Unknown".to_string());

        // Only a well-formed two-element latlng pair counts as coordinates.
        let (latitude, longitude) = match raw.latlng.as_deref() {
            Some(&[lat, lon]) => (MaybeUnknown::Known(lat), MaybeUnknown::Known(lon)),
            _ => (MaybeUnknown::Unknown, MaybeUnknown::Unknown),
        };

        Self {
            name,
            capital,
            population: raw.population.into(),
            area: raw.area.into(),
            latitude,
            longitude,
        }
    }

    /// Coordinates of the record, if the upstream data carried them
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (&self.latitude, &self.longitude) {
            (MaybeUnknown::Known(lat), MaybeUnknown::Known(lon)) => Some((*lat, *lon)),
            _ => None,
        }
    }
}

/// Client for the REST Countries directory service
#[derive(Debug, Clone)]
pub struct CountryClient {
    client: Client,
    base_url: String,
}

impl CountryClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// List the common names of all countries in a continent, preserving
    /// upstream order. Unrecognized continents are rejected before any
    /// network call.
    #[instrument(skip(self))]
    pub async fn countries_by_continent(&self, continent: &str) -> Result<Vec<String>> {
        let continent = title_case(continent);
        if !CONTINENTS.contains(&continent.as_str()) {
            return Err(ApiError::InvalidInput(format!(
                "Invalid continent: {continent}. Valid continents are: {}",
                CONTINENTS.join(", ")
            )));
        }

        let url = format!(
            "{}/region/{}",
            self.base_url,
            urlencoding::encode(&continent)
        );
        debug!("querying countries by region: {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| upstream_unreachable("country", &err))?;
        if !response.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "country service returned status {}",
                response.status()
            )));
        }

        let data: Vec<rest_countries::Country> = response
            .json()
            .await
            .map_err(|_| ApiError::Upstream("invalid country service response".to_string()))?;

        Ok(data
            .into_iter()
            .map(|country| country.name.common)
            .collect())
    }

    /// Look a single country up by exact (title-cased) name. Uses only the
    /// first match; ambiguity is not surfaced.
    #[instrument(skip(self))]
    pub async fn country_info(&self, country_name: &str) -> Result<CountryRecord> {
        let name = title_case(country_name);
        let url = format!("{}/name/{}", self.base_url, urlencoding::encode(&name));
        debug!("querying country by name: {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| upstream_unreachable("country", &err))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(format!("Country not found: {name}")));
        }
        if !response.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "country service returned status {}",
                response.status()
            )));
        }

        let data: Vec<rest_countries::Country> = response
            .json()
            .await
            .map_err(|_| ApiError::Upstream("invalid country service response".to_string()))?;

        let first = data
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound(format!("Country not found: {name}")))?;

        Ok(CountryRecord::from_upstream(name, first))
    }
}

/// Title-case a name the way the upstream directory spells it: the first
/// letter of every word upper-cased, the rest lowered ("north america" ->
/// "North America", "GUINEA-BISSAU" -> "Guinea-Bissau").
#[must_use]
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_alphabetic = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if prev_alphabetic {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(ch);
            prev_alphabetic = false;
        }
    }
    out
}

/// REST Countries API response structures
mod rest_countries {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct Country {
        pub name: CountryName,
        #[serde(default)]
        pub capital: Option<Vec<String>>,
        #[serde(default)]
        pub population: Option<u64>,
        #[serde(default)]
        pub area: Option<f64>,
        #[serde(default)]
        pub latlng: Option<Vec<f64>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CountryName {
        pub common: String,
    }
}
