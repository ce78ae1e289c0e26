//! Durable user preferences.

pub mod preferences_json;

pub use preferences_json::PreferencesJson;
