//! GeoResolution use case: turns the three location channels into one center.
//!
//! - Map clicks and autocomplete selections apply immediately
//! - Typed text is geocoded after a quiet period (debounce)
//! - Every lookup carries the generation it was issued under; only a current
//!   generation is ever applied, so a late text result cannot move a pin

use crate::domain::{
    Activation, Completion, Coordinate, DomainError, Generation, LocationInput, PlaceCandidate,
};
use crate::ports::{AutocompletePort, GeocodingPort};
use crate::usecases::{SharedState, bounded};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub struct GeoResolution {
    geocoder: Arc<dyn GeocodingPort>,
    autocomplete: Arc<dyn AutocompletePort>,
    state: SharedState,
    debounce: Duration,
    timeout: Duration,
    /// Latest scheduled lookup. Older tasks are detached; they wake, see a
    /// superseded generation and return without calling the provider.
    pending: Mutex<Option<JoinHandle<Completion>>>,
}

impl GeoResolution {
    pub fn new(
        geocoder: Arc<dyn GeocodingPort>,
        autocomplete: Arc<dyn AutocompletePort>,
        state: SharedState,
        debounce: Duration,
        timeout: Duration,
    ) -> Self {
        Self {
            geocoder,
            autocomplete,
            state,
            debounce,
            timeout,
            pending: Mutex::new(None),
        }
    }

    /// Activate one input channel. Text inputs schedule a debounced lookup and
    /// return immediately; the result lands in the shared state later.
    pub async fn activate(&self, input: LocationInput) -> Activation {
        let activation = self.state.write().await.location_mut().activate(input);
        match &activation {
            Activation::Lookup { generation, query } => {
                self.schedule_lookup(*generation, query.clone()).await;
            }
            Activation::Resolved(coordinate) => {
                info!(center = %coordinate, "center pinned");
            }
            Activation::Cleared => info!("city cleared; center reset"),
            Activation::LabelOnly => debug!("city label edited while pinned; no lookup"),
        }
        activation
    }

    pub async fn edit_text(&self, raw: impl Into<String>) -> Activation {
        self.activate(LocationInput::TextCity { raw: raw.into() }).await
    }

    pub async fn map_click(&self, coordinate: Coordinate) -> Activation {
        self.activate(LocationInput::MapClick { coordinate }).await
    }

    /// Re-resolve the typed city after a map click. `None` if there is no text.
    pub async fn relink_text(&self) -> Option<Activation> {
        let activation = self.state.write().await.location_mut().relink_text()?;
        if let Activation::Lookup { generation, query } = &activation {
            self.schedule_lookup(*generation, query.clone()).await;
        }
        Some(activation)
    }

    /// Autocomplete candidates for partial input. Failures are resolution errors.
    pub async fn suggest(&self, partial: &str) -> Result<Vec<PlaceCandidate>, DomainError> {
        if partial.trim().is_empty() {
            return Ok(Vec::new());
        }
        bounded(
            "autocomplete",
            self.timeout,
            self.autocomplete.suggest(partial.trim()),
        )
        .await
        .map_err(as_resolution)
    }

    /// Resolve a chosen candidate and make it the center. If another input was
    /// activated while the provider answered, the selection is dropped as stale.
    pub async fn select_candidate(
        &self,
        candidate: &PlaceCandidate,
    ) -> Result<Completion, DomainError> {
        let issued_under = self.state.read().await.location().generation();
        let place = bounded(
            "place details",
            self.timeout,
            self.autocomplete.resolve(candidate),
        )
        .await
        .map_err(as_resolution)?;

        let mut state = self.state.write().await;
        if !state.location().is_current(issued_under) {
            debug!(place = %candidate.description, "autocomplete selection superseded");
            return Ok(Completion::Stale);
        }
        state.location_mut().activate(place.into());
        info!(place = %candidate.description, "autocomplete selection applied");
        Ok(Completion::Applied)
    }

    /// Wait for the latest scheduled lookup to finish (or be discarded).
    /// Returns `None` when nothing was pending.
    pub async fn settle(&self) -> Option<Completion> {
        let handle = self.pending.lock().await.take()?;
        match handle.await {
            Ok(completion) => Some(completion),
            Err(e) => {
                warn!(error = %e, "geocode task did not complete");
                None
            }
        }
    }

    async fn schedule_lookup(&self, generation: Generation, query: String) {
        let geocoder = Arc::clone(&self.geocoder);
        let state = Arc::clone(&self.state);
        let debounce = self.debounce;
        let timeout = self.timeout;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if !state.read().await.location().is_current(generation) {
                debug!(%generation, query = %query, "lookup abandoned before issue");
                return Completion::Stale;
            }

            debug!(%generation, query = %query, "geocode issued");
            let result = bounded("geocoding", timeout, geocoder.geocode(&query))
                .await
                .map_err(as_resolution);
            let completion = state
                .write()
                .await
                .location_mut()
                .complete_lookup(generation, result);

            match completion {
                Completion::Applied => info!(%generation, query = %query, "geocode applied"),
                Completion::Failed => {
                    warn!(%generation, query = %query, "geocode failed; overlay hidden, search stays text-only")
                }
                Completion::Stale => debug!(%generation, query = %query, "geocode result discarded (superseded)"),
            }
            completion
        });

        *self.pending.lock().await = Some(handle);
    }
}

/// Provider-specific failures all become a generic resolution error.
fn as_resolution(e: DomainError) -> DomainError {
    match e {
        DomainError::Resolution(_) => e,
        other => DomainError::Resolution(other.to_string()),
    }
}
