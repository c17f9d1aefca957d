//! `pharmastock-core` — shared building blocks for the pharmacy inventory service.
//!
//! This crate contains **pure** primitives (no IO): the domain error model and the
//! case-insensitive name matching used by every lookup.

pub mod error;
pub mod name;

pub use error::{DomainError, DomainResult};
pub use name::names_match;
