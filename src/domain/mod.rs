//! Core domain layer. No external I/O dependencies.
//!
//! Entities, state machines and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod export;
pub mod generation;
pub mod location;
pub mod notification;
pub mod radius;
pub mod selection;
pub mod session;
pub mod state;
pub mod suggestions;

pub use entities::{
    BusinessRecord, Coordinate, DEFAULT_RADIUS_KM, LocationInput, LooseNumber, MAX_RADIUS_KM,
    MIN_RADIUS_KM, PlaceCandidate, ResolvedPlace, SearchParameters, SearchRequest,
    clamp_radius_km, parse_radius_input,
};
pub use errors::DomainError;
pub use export::{ExportArtifact, ExportJob, ExportPayload, ExportSink, ExportStatus, csv_filename};
pub use generation::{Completion, Generation, GenerationCounter};
pub use location::{Activation, LocationSource, LocationState};
pub use notification::{Notification, NotificationKind};
pub use radius::RadiusCircle;
pub use selection::SelectionSet;
pub use session::{SearchSession, SessionPhase};
pub use state::AppState;
pub use suggestions::{KEYWORD_SUGGESTIONS, SuggestionCategory, category_for};
