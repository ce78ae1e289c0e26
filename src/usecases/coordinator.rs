//! SearchCoordinator: the single owner of `AppState`.
//!
//! - Wires GeoResolution, SearchLifecycle and ExportDispatcher to one state handle
//! - The UI reads snapshots; every write goes through a method here
//! - Dark mode is persisted on every toggle

use crate::domain::{
    Activation, AppState, Completion, Coordinate, DomainError, ExportSink, ExportStatus,
    Notification, PlaceCandidate,
};
use crate::ports::{
    AutocompletePort, ExportSinkPort, FileSaverPort, GeocodingPort, PreferencePort,
    SearchBackendPort, UrlOpenerPort,
};
use crate::usecases::{ExportDispatcher, GeoResolution, SearchLifecycle, SharedState};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Every outbound collaborator, injected by `main`.
pub struct CoordinatorPorts {
    pub geocoder: Arc<dyn GeocodingPort>,
    pub autocomplete: Arc<dyn AutocompletePort>,
    pub backend: Arc<dyn SearchBackendPort>,
    pub sinks: Arc<dyn ExportSinkPort>,
    pub preferences: Arc<dyn PreferencePort>,
    pub opener: Arc<dyn UrlOpenerPort>,
    pub saver: Arc<dyn FileSaverPort>,
}

#[derive(Debug, Clone, Copy)]
pub struct CoordinatorSettings {
    pub default_radius_km: u32,
    pub debounce: Duration,
    pub timeout: Duration,
    pub notification_ttl: chrono::Duration,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            default_radius_km: crate::domain::DEFAULT_RADIUS_KM,
            debounce: Duration::from_millis(crate::shared::config::DEFAULT_GEOCODE_DEBOUNCE_MS),
            timeout: Duration::from_secs(30),
            notification_ttl: chrono::Duration::seconds(3),
        }
    }
}

pub struct SearchCoordinator {
    state: SharedState,
    geo: GeoResolution,
    search: SearchLifecycle,
    exports: ExportDispatcher,
    preferences: Arc<dyn PreferencePort>,
    notification_ttl: chrono::Duration,
}

impl SearchCoordinator {
    pub fn new(ports: CoordinatorPorts, settings: CoordinatorSettings) -> Self {
        let state: SharedState = Arc::new(RwLock::new(AppState::new(settings.default_radius_km)));
        let geo = GeoResolution::new(
            ports.geocoder,
            ports.autocomplete,
            Arc::clone(&state),
            settings.debounce,
            settings.timeout,
        );
        let search = SearchLifecycle::new(ports.backend, Arc::clone(&state), settings.timeout);
        let exports = ExportDispatcher::new(
            ports.sinks,
            ports.opener,
            ports.saver,
            Arc::clone(&state),
            settings.timeout,
        );
        Self {
            state,
            geo,
            search,
            exports,
            preferences: ports.preferences,
            notification_ttl: settings.notification_ttl,
        }
    }

    /// Read-only copy of the current state.
    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    /// Read the stored theme. A broken store falls back to light mode.
    pub async fn load_preferences(&self) -> bool {
        let dark = match self.preferences.dark_mode().await {
            Ok(dark) => dark,
            Err(e) => {
                warn!(error = %e, "could not read preferences; using light mode");
                false
            }
        };
        self.state.write().await.set_dark_mode(dark);
        dark
    }

    /// Flip the theme and persist it. The in-memory value flips even if the
    /// write fails; the error is returned so the UI can mention it.
    pub async fn toggle_dark_mode(&self) -> Result<bool, DomainError> {
        let enabled = {
            let mut state = self.state.write().await;
            let enabled = !state.dark_mode();
            state.set_dark_mode(enabled);
            enabled
        };
        info!(dark_mode = enabled, "theme toggled");
        self.preferences.set_dark_mode(enabled).await?;
        Ok(enabled)
    }

    pub async fn set_keyword(&self, keyword: impl Into<String>) {
        self.state.write().await.set_keyword(keyword.into());
    }

    /// Store the raw radius text. The circle follows without any network call.
    pub async fn set_radius(&self, input: impl Into<String>) -> u32 {
        let mut state = self.state.write().await;
        state.set_radius_input(input.into());
        state.radius_km()
    }

    pub async fn edit_city(&self, raw: impl Into<String>) -> Activation {
        self.geo.edit_text(raw).await
    }

    pub async fn click_map(&self, coordinate: Coordinate) -> Activation {
        self.geo.map_click(coordinate).await
    }

    pub async fn suggest_places(&self, partial: &str) -> Result<Vec<PlaceCandidate>, DomainError> {
        self.geo.suggest(partial).await
    }

    pub async fn select_place(&self, candidate: &PlaceCandidate) -> Result<Completion, DomainError> {
        self.geo.select_candidate(candidate).await
    }

    /// Re-resolve the typed city after a map click.
    pub async fn resolve_city_again(&self) -> Option<Activation> {
        self.geo.relink_text().await
    }

    /// Wait for a pending city lookup, if any.
    pub async fn settle_location(&self) -> Option<Completion> {
        self.geo.settle().await
    }

    /// Submit the form as it stands.
    pub async fn submit_search(&self) -> Result<Completion, DomainError> {
        self.search.submit_current().await
    }

    pub async fn dismiss_search_error(&self) {
        self.search.dismiss_error().await;
    }

    /// Returns true if `id` is selected afterwards.
    pub async fn toggle_result(&self, id: &str) -> bool {
        self.state.write().await.toggle_selection(id)
    }

    pub async fn select_all(&self) -> usize {
        let mut state = self.state.write().await;
        state.select_all();
        state.selection().len()
    }

    pub async fn export(&self, sink: ExportSink) -> Result<ExportStatus, DomainError> {
        self.exports.dispatch(sink).await
    }

    /// Toast still on screen, if any.
    pub async fn notification(&self) -> Option<Notification> {
        self.state
            .read()
            .await
            .active_notification(Utc::now(), self.notification_ttl)
            .cloned()
    }

    pub async fn dismiss_notification(&self) {
        self.state.write().await.dismiss_notification();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{
        MemoryFileSaver, MemoryPreferences, MockExportSink, MockGeocoder, MockSearchBackend,
        RecordingUrlOpener,
    };
    use crate::domain::{BusinessRecord, ResolvedPlace, SearchRequest, SessionPhase};

    const LYON: Coordinate = Coordinate {
        latitude: 45.764,
        longitude: 4.8357,
    };

    struct Fixture {
        coordinator: SearchCoordinator,
        geocoder: Arc<MockGeocoder>,
        backend: Arc<MockSearchBackend>,
        preferences: Arc<MemoryPreferences>,
    }

    fn fixture() -> Fixture {
        let geocoder = Arc::new(MockGeocoder::new().with_place(
            "Lyon",
            ResolvedPlace {
                label: Some("Lyon, France".into()),
                coordinate: LYON,
            },
        ));
        let backend = Arc::new(MockSearchBackend::new());
        let preferences = Arc::new(MemoryPreferences::default());
        let ports = CoordinatorPorts {
            geocoder: geocoder.clone(),
            autocomplete: geocoder.clone(),
            backend: backend.clone(),
            sinks: Arc::new(MockExportSink::new()),
            preferences: preferences.clone(),
            opener: Arc::new(RecordingUrlOpener::default()),
            saver: Arc::new(MemoryFileSaver::default()),
        };
        Fixture {
            coordinator: SearchCoordinator::new(ports, CoordinatorSettings::default()),
            geocoder,
            backend,
            preferences,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_autocomplete_then_radius_edit_moves_circle_without_network() {
        let f = fixture();
        let candidate = f.coordinator.suggest_places("Lyo").await.unwrap().remove(0);
        f.coordinator.select_place(&candidate).await.unwrap();
        let lookups_before = f.geocoder.queries().len();

        assert_eq!(f.coordinator.set_radius("10").await, 10);

        let circle = f.coordinator.snapshot().await.circle();
        assert!(circle.visible);
        assert_eq!(circle.radius_meters, 10_000);
        assert_eq!(circle.center, Some(LYON));
        assert_eq!(f.geocoder.queries().len(), lookups_before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_with_resolved_center_sends_annotated_city() {
        let f = fixture();
        f.backend.push_ok(vec![BusinessRecord::new("1", "Chez Paul", "Lyon")]);
        f.coordinator.set_keyword("boulangerie").await;
        f.coordinator.edit_city("Lyon").await;
        assert_eq!(f.coordinator.settle_location().await, Some(Completion::Applied));

        assert_eq!(f.coordinator.submit_search().await.unwrap(), Completion::Applied);
        assert_eq!(
            f.backend.requests(),
            vec![SearchRequest {
                keyword: "boulangerie".into(),
                city: "Lyon [45.764000, 4.835700]".into(),
                radius: "5".into(),
            }]
        );
        assert_eq!(
            f.coordinator.snapshot().await.session().phase(),
            SessionPhase::Succeeded
        );
    }

    #[tokio::test]
    async fn test_select_all_twice_clears() {
        let f = fixture();
        f.backend.push_ok(vec![
            BusinessRecord::new("1", "A", "x"),
            BusinessRecord::new("2", "B", "y"),
        ]);
        f.coordinator.set_keyword("spa").await;
        f.coordinator.submit_search().await.unwrap();

        assert_eq!(f.coordinator.select_all().await, 2);
        assert_eq!(f.coordinator.select_all().await, 0);
        assert!(f.coordinator.toggle_result("2").await);
        assert!(!f.coordinator.toggle_result("unknown").await);
    }

    #[tokio::test]
    async fn test_dark_mode_is_loaded_and_persisted() {
        let f = fixture();
        f.preferences.set(true);
        assert!(f.coordinator.load_preferences().await);

        assert!(!f.coordinator.toggle_dark_mode().await.unwrap());
        assert!(!f.preferences.get());
        assert!(!f.coordinator.snapshot().await.dark_mode());
    }

    #[tokio::test]
    async fn test_export_notification_can_be_dismissed() {
        let f = fixture();
        f.backend.push_ok(vec![BusinessRecord::new("1", "A", "x")]);
        f.coordinator.set_keyword("spa").await;
        f.coordinator.submit_search().await.unwrap();
        f.coordinator.toggle_result("1").await;

        let status = f.coordinator.export(ExportSink::Notion).await.unwrap();
        assert!(status.is_success());
        assert!(f.coordinator.notification().await.is_some());

        f.coordinator.dismiss_notification().await;
        assert!(f.coordinator.notification().await.is_none());
    }
}
