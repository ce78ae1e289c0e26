//! SearchLifecycle use case: submit -> loading -> results | error.
//!
//! - Snapshots the parameters as "last search" for later exports
//! - Clears the selection on every submission
//! - Last submit wins: a response for a superseded token is ignored
//! - No automatic retry; the user resubmits

use crate::domain::{Completion, DomainError, SearchParameters};
use crate::ports::SearchBackendPort;
use crate::usecases::{SharedState, bounded};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct SearchLifecycle {
    backend: Arc<dyn SearchBackendPort>,
    state: SharedState,
    timeout: Duration,
}

impl SearchLifecycle {
    pub fn new(backend: Arc<dyn SearchBackendPort>, state: SharedState, timeout: Duration) -> Self {
        Self {
            backend,
            state,
            timeout,
        }
    }

    /// Submit the form as it stands (keyword, city label, radius, effective center).
    pub async fn submit_current(&self) -> Result<Completion, DomainError> {
        let parameters = self.state.read().await.current_parameters();
        self.submit(parameters).await
    }

    /// Submit `parameters`. A validation failure is returned without touching
    /// state or the network; backend failures are recorded in the session.
    pub async fn submit(&self, parameters: SearchParameters) -> Result<Completion, DomainError> {
        parameters.validate()?;
        let request = parameters.to_request();
        let token = self.state.write().await.begin_search(parameters);
        info!(
            %token,
            keyword = %request.keyword,
            city = %request.city,
            radius = %request.radius,
            "search submitted"
        );

        let outcome = bounded("search", self.timeout, self.backend.search(&request)).await;
        let count = outcome.as_ref().map(Vec::len).ok();
        if let Err(e) = &outcome {
            warn!(%token, error = %e, "search failed");
        }

        let completion = self.state.write().await.complete_search(token, outcome);
        match completion {
            Completion::Applied => info!(%token, results = count.unwrap_or(0), "search results applied"),
            Completion::Failed => debug!(%token, "search failure recorded"),
            Completion::Stale => debug!(%token, "search response discarded (superseded)"),
        }
        Ok(completion)
    }

    /// Failed -> Idle.
    pub async fn dismiss_error(&self) {
        self.state.write().await.dismiss_search_error();
    }
}
