//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters. Every provider-specific failure is mapped to a
//! `DomainError` before it crosses the port.

use crate::domain::{
    BusinessRecord, DomainError, ExportPayload, ExportSink, PlaceCandidate, ResolvedPlace,
    SearchRequest,
};

/// Geocoding provider. Free text in, zero or one place out.
#[async_trait::async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve `query` to a place. `Ok(None)` when the provider has no match.
    async fn geocode(&self, query: &str) -> Result<Option<ResolvedPlace>, DomainError>;
}

/// Places autocomplete provider.
#[async_trait::async_trait]
pub trait AutocompletePort: Send + Sync {
    /// Candidate places for partial input.
    async fn suggest(&self, partial: &str) -> Result<Vec<PlaceCandidate>, DomainError>;

    /// Resolve a chosen candidate to a labelled coordinate.
    async fn resolve(&self, candidate: &PlaceCandidate) -> Result<ResolvedPlace, DomainError>;
}

/// Search backend (`POST /search`).
#[async_trait::async_trait]
pub trait SearchBackendPort: Send + Sync {
    /// Non-2xx and transport failures map to `DomainError::Backend`.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<BusinessRecord>, DomainError>;
}

/// Export sinks (`POST /api/export-*`).
#[async_trait::async_trait]
pub trait ExportSinkPort: Send + Sync {
    /// Send the payload to `sink`. Returns the raw 2xx body; interpretation is
    /// left to the dispatcher. Non-2xx maps to `DomainError::Export`.
    async fn export(&self, sink: ExportSink, payload: &ExportPayload)
    -> Result<Vec<u8>, DomainError>;
}

/// Durable user preferences.
#[async_trait::async_trait]
pub trait PreferencePort: Send + Sync {
    async fn dark_mode(&self) -> Result<bool, DomainError>;

    async fn set_dark_mode(&self, enabled: bool) -> Result<(), DomainError>;
}
