//! Wire types for the Google Maps Geocoding and Places web services.
//! Only the fields the adapter reads are modelled.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AutocompleteResponse {
    pub status: String,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<PlaceResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Prediction {
    pub description: String,
    pub place_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl PlaceResult {
    fn component(&self, kind: &str) -> Option<&str> {
        self.address_components
            .iter()
            .find(|c| c.types.iter().any(|t| t == kind))
            .map(|c| c.long_name.as_str())
    }

    /// `"<locality>, <country>"` when both components are present, otherwise
    /// the formatted address.
    pub fn display_label(&self) -> Option<String> {
        match (self.component("locality"), self.component("country")) {
            (Some(city), Some(country)) => Some(format!("{}, {}", city, country)),
            _ => self
                .formatted_address
                .clone()
                .filter(|a| !a.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(json: serde_json::Value) -> PlaceResult {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_label_prefers_locality_and_country() {
        let place = result(serde_json::json!({
            "formatted_address": "69000 Lyon, France",
            "address_components": [
                {"long_name": "Lyon", "types": ["locality", "political"]},
                {"long_name": "Rhône", "types": ["administrative_area_level_2"]},
                {"long_name": "France", "types": ["country", "political"]}
            ],
            "geometry": {"location": {"lat": 45.764, "lng": 4.8357}}
        }));
        assert_eq!(place.display_label().as_deref(), Some("Lyon, France"));
    }

    #[test]
    fn test_label_falls_back_to_formatted_address() {
        let place = result(serde_json::json!({
            "formatted_address": "Île-de-France, France",
            "address_components": [
                {"long_name": "France", "types": ["country"]}
            ],
            "geometry": {"location": {"lat": 48.8, "lng": 2.3}}
        }));
        assert_eq!(place.display_label().as_deref(), Some("Île-de-France, France"));
    }
}
