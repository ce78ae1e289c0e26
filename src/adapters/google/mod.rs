//! Google Maps web services (geocoding, places autocomplete).

pub mod client;
pub mod types;

pub use client::GoogleMapsAdapter;
