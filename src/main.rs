//! Wiring & DI. Entry point: bootstrap adapters, inject into the coordinator, run UI.
//! No business logic here.

use dotenv::dotenv;
use pro_finder::adapters::backend::ProFinderApi;
use pro_finder::adapters::delivery::{DownloadsDir, TerminalLinkOpener};
use pro_finder::adapters::geo::GazetteerGeocoder;
use pro_finder::adapters::google::GoogleMapsAdapter;
use pro_finder::adapters::mock::{MockExportSink, MockSearchBackend};
use pro_finder::adapters::persistence::PreferencesJson;
use pro_finder::adapters::ui::tui::TuiInputPort;
use pro_finder::ports::{
    AutocompletePort, ExportSinkPort, GeocodingPort, InputPort, PreferencePort, SearchBackendPort,
};
use pro_finder::shared::config::AppConfig;
use pro_finder::usecases::{CoordinatorPorts, CoordinatorSettings, SearchCoordinator};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    pro_finder::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration; using defaults");
        AppConfig::default()
    });
    let timeout = cfg.request_timeout();

    // --- Location provider: Google Maps when a key is set, built-in gazetteer otherwise ---
    let (geocoder, autocomplete): (Arc<dyn GeocodingPort>, Arc<dyn AutocompletePort>) =
        if cfg.is_google_configured() {
            let maps = Arc::new(
                GoogleMapsAdapter::new(
                    cfg.google_maps_api_key.as_deref().unwrap_or_default(),
                    &cfg.country_code_or_default(),
                    timeout,
                )
                .map_err(|e| anyhow::anyhow!("{}", e))?,
            );
            info!(country = %cfg.country_code_or_default(), "Google Maps geocoding enabled");
            (maps.clone(), maps)
        } else {
            warn!("GOOGLE_MAPS_API_KEY not set, using the offline city list");
            let gazetteer = Arc::new(GazetteerGeocoder::new());
            (gazetteer.clone(), gazetteer)
        };

    // --- Backend: HTTP API, or in-process fakes in demo mode ---
    let (backend, sinks): (Arc<dyn SearchBackendPort>, Arc<dyn ExportSinkPort>) =
        if cfg.is_demo_mode() {
            warn!("PRO_FINDER_DEMO_MODE set, serving sample results and local exports");
            (
                Arc::new(MockSearchBackend::new()),
                Arc::new(MockExportSink::new()),
            )
        } else {
            let api = Arc::new(
                ProFinderApi::new(
                    &cfg.api_base_url_or_default(),
                    &cfg.search_url_or_default(),
                    timeout,
                )
                .map_err(|e| anyhow::anyhow!("{}", e))?,
            );
            info!(
                search_url = %cfg.search_url_or_default(),
                api_base_url = %cfg.api_base_url_or_default(),
                "Pro Finder backend"
            );
            (api.clone(), api)
        };

    let preferences_path = PathBuf::from(cfg.preferences_path_or_default());
    let preferences_impl = PreferencesJson::new(&preferences_path);
    preferences_impl
        .load()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let preferences: Arc<dyn PreferencePort> = Arc::new(preferences_impl);

    let downloads_dir = PathBuf::from(cfg.downloads_dir_or_default());
    info!(path = %downloads_dir.display(), "CSV downloads directory");

    let settings = CoordinatorSettings {
        default_radius_km: cfg.default_radius_km_or_default(),
        debounce: cfg.geocode_debounce(),
        timeout,
        notification_ttl: cfg.notification_ttl(),
    };
    let coordinator = Arc::new(SearchCoordinator::new(
        CoordinatorPorts {
            geocoder,
            autocomplete,
            backend,
            sinks,
            preferences,
            opener: Arc::new(TerminalLinkOpener::new()),
            saver: Arc::new(DownloadsDir::new(&downloads_dir)),
        },
        settings,
    ));
    let dark = coordinator.load_preferences().await;
    info!(dark_mode = dark, "preferences loaded");

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(Arc::clone(&coordinator)));

    // --- Run (menu loop until Quit) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
