//! Application use cases. Orchestrate domain logic via ports.
//!
//! All mutable state lives in one `AppState` behind the coordinator's lock.
//! Services hold a clone of that handle and never keep state of their own
//! beyond task bookkeeping.

pub mod coordinator;
pub mod export_dispatcher;
pub mod geo_resolution;
pub mod search_lifecycle;

pub use coordinator::{CoordinatorPorts, CoordinatorSettings, SearchCoordinator};
pub use export_dispatcher::ExportDispatcher;
pub use geo_resolution::GeoResolution;
pub use search_lifecycle::SearchLifecycle;

use crate::domain::{AppState, DomainError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Handle to the coordinator-owned state.
pub type SharedState = Arc<RwLock<AppState>>;

/// Awaits `fut` for at most `after`. No outbound call may leave a state stuck
/// in Submitting or resolving.
pub(crate) async fn bounded<T, F>(operation: &'static str, after: Duration, fut: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    tokio::time::timeout(after, fut)
        .await
        .unwrap_or_else(|_| Err(DomainError::Timeout { operation, after }))
}
