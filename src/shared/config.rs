//! Application configuration. Endpoints, provider credentials, timings, paths.

use serde::Deserialize;
use std::time::Duration;

/// Base URL of the Pro Finder API when nothing is configured (local dev server).
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5001";

/// Quiet period before a typed city is geocoded. Short enough to feel live,
/// long enough to skip intermediate keystrokes.
pub const DEFAULT_GEOCODE_DEBOUNCE_MS: u64 = 400;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    /// Export sinks live under this URL. Read from PRO_FINDER_API_BASE_URL.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Full URL of the search endpoint; defaults to `<api_base_url>/search`.
    #[serde(default)]
    pub search_url: Option<String>,

    /// Google Maps key for geocoding and autocomplete. Also read from GOOGLE_MAPS_API_KEY.
    #[serde(default)]
    pub google_maps_api_key: Option<String>,

    /// ISO 3166-1 alpha-2 restriction for geocoding/autocomplete (default FR).
    #[serde(default)]
    pub country_code: Option<String>,

    #[serde(default)]
    pub geocode_debounce_ms: Option<u64>,

    /// Bounded wait for every outbound call (default 30).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// How long a toast stays on screen (default 3).
    #[serde(default)]
    pub notification_ttl_secs: Option<u64>,

    #[serde(default)]
    pub downloads_dir: Option<String>,

    #[serde(default)]
    pub preferences_path: Option<String>,

    #[serde(default)]
    pub default_radius_km: Option<u32>,

    /// Serve search and exports from in-process fakes. Read from PRO_FINDER_DEMO_MODE.
    #[serde(default)]
    pub demo_mode: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("PRO_FINDER"));
        if let Ok(path) = std::env::var("PRO_FINDER_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // GOOGLE_MAPS_API_KEY is read directly (no prefix) so one .env serves frontend and backend
        if cfg.google_maps_api_key.is_none() {
            if let Ok(key) = std::env::var("GOOGLE_MAPS_API_KEY") {
                if !key.trim().is_empty() {
                    cfg.google_maps_api_key = Some(key);
                }
            }
        }
        Ok(cfg)
    }

    pub fn api_base_url_or_default(&self) -> String {
        self.api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn search_url_or_default(&self) -> String {
        self.search_url
            .clone()
            .unwrap_or_else(|| format!("{}/search", self.api_base_url_or_default()))
    }

    pub fn country_code_or_default(&self) -> String {
        self.country_code
            .clone()
            .unwrap_or_else(|| "FR".to_string())
            .to_uppercase()
    }

    pub fn geocode_debounce(&self) -> Duration {
        Duration::from_millis(
            self.geocode_debounce_ms
                .unwrap_or(DEFAULT_GEOCODE_DEBOUNCE_MS),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(30).max(1))
    }

    pub fn notification_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.notification_ttl_secs.unwrap_or(3) as i64)
    }

    pub fn downloads_dir_or_default(&self) -> String {
        self.downloads_dir
            .clone()
            .unwrap_or_else(|| "./downloads".to_string())
    }

    pub fn preferences_path_or_default(&self) -> String {
        self.preferences_path
            .clone()
            .unwrap_or_else(|| "./data/preferences.json".to_string())
    }

    /// Default radius, clamped like any other radius.
    pub fn default_radius_km_or_default(&self) -> u32 {
        crate::domain::clamp_radius_km(i64::from(
            self.default_radius_km
                .unwrap_or(crate::domain::DEFAULT_RADIUS_KM),
        ))
    }

    /// Returns true if Google Maps geocoding/autocomplete can be used.
    pub fn is_google_configured(&self) -> bool {
        self.google_maps_api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    pub fn is_demo_mode(&self) -> bool {
        self.demo_mode.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_base_url_or_default(), "http://localhost:5001");
        assert_eq!(cfg.search_url_or_default(), "http://localhost:5001/search");
        assert_eq!(cfg.country_code_or_default(), "FR");
        assert_eq!(cfg.geocode_debounce(), Duration::from_millis(400));
        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
        assert_eq!(cfg.default_radius_km_or_default(), 5);
        assert!(!cfg.is_google_configured());
        assert!(!cfg.is_demo_mode());
    }

    #[test]
    fn test_base_url_trailing_slash_and_radius_clamp() {
        let cfg = AppConfig {
            api_base_url: Some("https://api.example.test/".into()),
            default_radius_km: Some(80),
            google_maps_api_key: Some("  ".into()),
            ..AppConfig::default()
        };
        assert_eq!(cfg.search_url_or_default(), "https://api.example.test/search");
        assert_eq!(cfg.default_radius_km_or_default(), 50);
        assert!(!cfg.is_google_configured());
    }
}
