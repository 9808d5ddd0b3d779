//! Query-by-example support for planet listing.
//!
//! # Responsibility
//! - Turn partially populated templates into storage-agnostic predicates.
//!
//! # Invariants
//! - Filters are pure values; building one never touches storage.

pub mod planet_filter;
