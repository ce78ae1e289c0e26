//! Infrastructure adapters. Implement outbound ports.
//!
//! Maps providers, the Pro Finder backend, filesystem, terminal. Map errors to DomainError.

pub mod backend;
pub mod delivery;
pub mod geo;
pub mod google;
pub mod mock;
pub mod persistence;
pub mod ui;
