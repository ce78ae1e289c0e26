//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/provider types here — these are mapped from adapters.

use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::IntErrorKind;

/// Smallest radius accepted by the search backend, in kilometres.
pub const MIN_RADIUS_KM: u32 = 1;
/// Largest radius accepted by the search backend, in kilometres.
pub const MAX_RADIUS_KM: u32 = 50;
/// Radius used when the radius field is empty or not a number.
pub const DEFAULT_RADIUS_KM: u32 = 5;

/// A point on the map. Immutable value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parses a `"lat, lng"` pair as typed in the map prompt.
    pub fn parse_pair(input: &str) -> Result<Self, DomainError> {
        let mut parts = input.split(',').map(str::trim);
        let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(DomainError::Validation(format!(
                "expected 'lat, lng', got '{}'",
                input.trim()
            )));
        };
        let latitude: f64 = lat
            .parse()
            .map_err(|_| DomainError::Validation(format!("invalid latitude '{}'", lat)))?;
        let longitude: f64 = lng
            .parse()
            .map_err(|_| DomainError::Validation(format!("invalid longitude '{}'", lng)))?;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::Validation(format!(
                "coordinate out of range: {}, {}",
                latitude, longitude
            )));
        }
        Ok(Self::new(latitude, longitude))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// A place resolved by the geocoding or autocomplete provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlace {
    pub label: Option<String>,
    pub coordinate: Coordinate,
}

/// A candidate offered by the autocomplete provider for partial input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceCandidate {
    /// Provider handle used to resolve the candidate on selection.
    pub place_id: String,
    pub description: String,
}

impl fmt::Display for PlaceCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// The three channels that can say "where".
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    /// Free text; no coordinate until a lookup resolves it.
    TextCity { raw: String },
    /// Pre-resolved and authoritative.
    AutocompleteSelection {
        label: String,
        coordinate: Coordinate,
    },
    /// Authoritative, no label.
    MapClick { coordinate: Coordinate },
}

impl From<ResolvedPlace> for LocationInput {
    fn from(place: ResolvedPlace) -> Self {
        LocationInput::AutocompleteSelection {
            label: place.label.unwrap_or_default(),
            coordinate: place.coordinate,
        }
    }
}

/// Numeric field as the backend sends it: a number, or a string such as `"N/A"` or `"0"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(serde_json::Number),
    Text(String),
}

impl LooseNumber {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LooseNumber::Number(n) => n.as_f64(),
            LooseNumber::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for LooseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LooseNumber::Number(n) => write!(f, "{}", n),
            LooseNumber::Text(s) => f.write_str(s),
        }
    }
}

/// One business returned by the search backend. Opaque payload: fields are never
/// mutated and unknown fields are carried through to exports untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<LooseNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_ratings: Option<LooseNumber>,
    #[serde(
        rename = "alreadyExported",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub already_exported: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BusinessRecord {
    /// Minimal record (tests, demo backend).
    pub fn new(id: impl Into<String>, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            phone: None,
            website: None,
            rating: None,
            total_ratings: None,
            already_exported: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Phone number, if the backend sent a non-empty one.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|p| !p.trim().is_empty())
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref().filter(|w| !w.trim().is_empty())
    }

    pub fn is_already_exported(&self) -> bool {
        self.already_exported.unwrap_or(false)
    }
}

/// Clamps a radius to `[MIN_RADIUS_KM, MAX_RADIUS_KM]`.
pub fn clamp_radius_km(raw: i64) -> u32 {
    raw.clamp(i64::from(MIN_RADIUS_KM), i64::from(MAX_RADIUS_KM)) as u32
}

/// Parses the radius field the way a browser number input is read: leading
/// integer digits, then clamped. Digits too long for an `i64` saturate to the
/// nearest bound. Anything unparseable falls back to `default_km`.
pub fn parse_radius_input(input: &str, default_km: u32) -> u32 {
    let trimmed = input.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let leading: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    match leading.parse::<i64>() {
        Ok(n) => clamp_radius_km(sign * n),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => clamp_radius_km(sign * i64::MAX),
        Err(_) => clamp_radius_km(i64::from(default_km)),
    }
}

/// Parameters of one search, as snapshotted at submit time.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParameters {
    pub keyword: String,
    pub city_label: String,
    /// Always within `[MIN_RADIUS_KM, MAX_RADIUS_KM]`.
    pub radius_km: u32,
    /// `None` when no location ever resolved; the backend then geocodes the text.
    pub center: Option<Coordinate>,
}

impl SearchParameters {
    pub fn new(
        keyword: impl Into<String>,
        city_label: impl Into<String>,
        radius_km: i64,
        center: Option<Coordinate>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            city_label: city_label.into(),
            radius_km: clamp_radius_km(radius_km),
            center,
        }
    }

    /// Rejects a form with neither keyword nor city.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.keyword.trim().is_empty() && self.city_label.trim().is_empty() {
            return Err(DomainError::Validation(
                "enter a keyword or a city before searching".to_string(),
            ));
        }
        Ok(())
    }

    /// City value sent to the backend: the label, annotated with the resolved
    /// coordinate pair when one is known (`"Lyon, France [45.764000, 4.835700]"`).
    pub fn annotated_city(&self) -> String {
        match self.center {
            Some(c) => format!(
                "{} [{:.6}, {:.6}]",
                self.city_label, c.latitude, c.longitude
            ),
            None => self.city_label.clone(),
        }
    }

    pub fn to_request(&self) -> SearchRequest {
        SearchRequest {
            keyword: self.keyword.clone(),
            city: self.annotated_city(),
            radius: self.radius_km.to_string(),
        }
    }
}

/// Wire body of `POST /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub keyword: String,
    pub city: String,
    pub radius: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_clamped_at_both_ends() {
        assert_eq!(SearchParameters::new("k", "c", 0, None).radius_km, 1);
        assert_eq!(SearchParameters::new("k", "c", 51, None).radius_km, 50);
        assert_eq!(SearchParameters::new("k", "c", -7, None).radius_km, 1);
        assert_eq!(SearchParameters::new("k", "c", 12, None).radius_km, 12);
    }

    #[test]
    fn test_parse_radius_input() {
        assert_eq!(parse_radius_input("10", 5), 10);
        assert_eq!(parse_radius_input(" 15km", 5), 15);
        assert_eq!(parse_radius_input("", 5), 5);
        assert_eq!(parse_radius_input("abc", 5), 5);
        assert_eq!(parse_radius_input("0", 5), 1);
        assert_eq!(parse_radius_input("120", 5), 50);
        assert_eq!(parse_radius_input("-3", 5), 1);
    }

    #[test]
    fn test_parse_radius_input_overflow_saturates() {
        assert_eq!(parse_radius_input("99999999999999999999", 5), 50);
        assert_eq!(parse_radius_input("-99999999999999999999", 5), 1);
        assert_eq!(parse_radius_input("123456789012345678901234km", 5), 50);
    }

    #[test]
    fn test_request_without_center_sends_plain_city() {
        let params = SearchParameters::new("boulangerie", "Lyon", 5, None);
        assert_eq!(
            params.to_request(),
            SearchRequest {
                keyword: "boulangerie".into(),
                city: "Lyon".into(),
                radius: "5".into(),
            }
        );
    }

    #[test]
    fn test_request_with_center_annotates_city() {
        let params = SearchParameters::new(
            "café",
            "Lyon, France",
            10,
            Some(Coordinate::new(45.764, 4.8357)),
        );
        assert_eq!(
            params.to_request().city,
            "Lyon, France [45.764000, 4.835700]"
        );
    }

    #[test]
    fn test_validate_requires_keyword_or_city() {
        assert!(SearchParameters::new("", "  ", 5, None).validate().is_err());
        assert!(SearchParameters::new("spa", "", 5, None).validate().is_ok());
        assert!(SearchParameters::new("", "Nice", 5, None).validate().is_ok());
    }

    #[test]
    fn test_parse_pair() {
        let c = Coordinate::parse_pair("45.7640, 4.8357").unwrap();
        assert_eq!(c, Coordinate::new(45.764, 4.8357));
        assert!(Coordinate::parse_pair("45.7").is_err());
        assert!(Coordinate::parse_pair("north, south").is_err());
        assert!(Coordinate::parse_pair("95, 4").is_err());
    }

    #[test]
    fn test_business_record_keeps_unknown_fields() {
        let json = serde_json::json!({
            "id": "abc",
            "name": "Chez Paul",
            "address": "1 rue de la Paix",
            "phone": "",
            "rating": "N/A",
            "total_ratings": 42,
            "business_status": "OPERATIONAL",
            "alreadyExported": true
        });
        let record: BusinessRecord = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(record.phone(), None);
        assert!(record.is_already_exported());
        assert_eq!(record.rating.as_ref().and_then(LooseNumber::as_f64), None);
        assert_eq!(
            record.total_ratings.as_ref().and_then(LooseNumber::as_f64),
            Some(42.0)
        );
        assert_eq!(serde_json::to_value(&record).unwrap(), json);
    }
}
