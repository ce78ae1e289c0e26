//! pro-finder: local business prospecting from the terminal, with Hexagonal Architecture.
//!
//! Location resolution, search lifecycle, result selection and exports are
//! coordinated in `usecases`; providers and the UI live in `adapters`.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
