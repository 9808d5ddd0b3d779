//! Domain model for planet records.
//!
//! # Responsibility
//! - Define the canonical planet record shared by storage, service and HTTP layers.
//! - Own field-level validation for writes.
//!
//! # Invariants
//! - Every stored planet is identified by a storage-assigned `PlanetId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod planet;
