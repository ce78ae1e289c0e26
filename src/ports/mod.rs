//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by UI/adapter into the application
//! - Outbound: Called by application into infrastructure

pub mod delivery;
pub mod inbound;
pub mod outbound;

pub use delivery::{FileSaverPort, UrlOpenerPort};
pub use inbound::InputPort;
pub use outbound::{
    AutocompletePort, ExportSinkPort, GeocodingPort, PreferencePort, SearchBackendPort,
};
