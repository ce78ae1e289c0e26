//! Google Maps adapter: Geocoding for typed cities, Places for autocomplete.
//!
//! Implements `GeocodingPort` and `AutocompletePort`. Any provider status other
//! than `OK` becomes a `DomainError::Resolution`; `ZERO_RESULTS` is "no match".

use crate::adapters::google::types::{
    AutocompleteResponse, DetailsResponse, GeocodeResponse, PlaceResult,
};
use crate::domain::{Coordinate, DomainError, PlaceCandidate, ResolvedPlace};
use crate::ports::{AutocompletePort, GeocodingPort};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

pub struct GoogleMapsAdapter {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    country_code: String,
}

impl GoogleMapsAdapter {
    pub fn new(api_key: &str, country_code: &str, timeout: Duration) -> Result<Self, DomainError> {
        Self::with_base_url(api_key, country_code, timeout, DEFAULT_BASE_URL)
    }

    /// Point at another host (wiremock in tests).
    pub fn with_base_url(
        api_key: &str,
        country_code: &str,
        timeout: Duration,
        base_url: &str,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Resolution(format!("build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            country_code: country_code.to_uppercase(),
        })
    }

    /// Geocoding query for typed text: `"<text>, <country name>"`.
    fn geocode_address(&self, text: &str) -> String {
        format!("{}, {}", text.trim(), country_name(&self.country_code))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, DomainError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| DomainError::Resolution(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, path, "maps API returned error");
            return Err(DomainError::Resolution(format!("maps API error {}", status)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DomainError::Resolution(format!("Failed to parse maps response: {}", e)))
    }
}

/// Display name used in geocoding queries. Unknown codes are passed through.
fn country_name(code: &str) -> &str {
    match code {
        "FR" => "France",
        "BE" => "Belgique",
        "CH" => "Suisse",
        "LU" => "Luxembourg",
        "MC" => "Monaco",
        other => other,
    }
}

fn status_error(status: &str, message: Option<String>) -> DomainError {
    match message {
        Some(m) => DomainError::Resolution(format!("{}: {}", status, m)),
        None => DomainError::Resolution(status.to_string()),
    }
}

fn to_place(result: PlaceResult) -> ResolvedPlace {
    ResolvedPlace {
        label: result.display_label(),
        coordinate: Coordinate::new(result.geometry.location.lat, result.geometry.location.lng),
    }
}

#[async_trait::async_trait]
impl GeocodingPort for GoogleMapsAdapter {
    async fn geocode(&self, query: &str) -> Result<Option<ResolvedPlace>, DomainError> {
        let address = self.geocode_address(query);
        let components = format!("country:{}", self.country_code);
        debug!(address = %address, "geocoding");
        let body: GeocodeResponse = self
            .get_json(
                "/maps/api/geocode/json",
                &[("address", address.as_str()), ("components", components.as_str())],
            )
            .await?;

        match body.status.as_str() {
            "OK" => Ok(body.results.into_iter().next().map(to_place)),
            "ZERO_RESULTS" => Ok(None),
            other => Err(status_error(other, body.error_message)),
        }
    }
}

#[async_trait::async_trait]
impl AutocompletePort for GoogleMapsAdapter {
    async fn suggest(&self, partial: &str) -> Result<Vec<PlaceCandidate>, DomainError> {
        let components = format!("country:{}", self.country_code.to_lowercase());
        let body: AutocompleteResponse = self
            .get_json(
                "/maps/api/place/autocomplete/json",
                &[
                    ("input", partial),
                    ("types", "(cities)"),
                    ("components", components.as_str()),
                ],
            )
            .await?;

        match body.status.as_str() {
            "OK" => Ok(body
                .predictions
                .into_iter()
                .map(|p| PlaceCandidate {
                    place_id: p.place_id,
                    description: p.description,
                })
                .collect()),
            "ZERO_RESULTS" => Ok(Vec::new()),
            other => Err(status_error(other, body.error_message)),
        }
    }

    async fn resolve(&self, candidate: &PlaceCandidate) -> Result<ResolvedPlace, DomainError> {
        let body: DetailsResponse = self
            .get_json(
                "/maps/api/place/details/json",
                &[
                    ("place_id", candidate.place_id.as_str()),
                    ("fields", "formatted_address,geometry,name,address_components"),
                ],
            )
            .await?;

        if body.status != "OK" {
            return Err(status_error(&body.status, body.error_message));
        }
        let mut place = body
            .result
            .map(to_place)
            .ok_or_else(|| DomainError::Resolution("place details without result".into()))?;
        if place.label.is_none() {
            place.label = Some(candidate.description.clone());
        }
        Ok(place)
    }
}
