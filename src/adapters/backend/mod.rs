//! Pro Finder backend (search and export sinks).

pub mod client;

pub use client::ProFinderApi;
