//! Offline location provider.

pub mod gazetteer;

pub use gazetteer::GazetteerGeocoder;
