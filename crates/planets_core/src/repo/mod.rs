//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage capability the planet service depends on.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Planet::validate()` before persistence.
//! - Uniqueness of `name` is enforced by storage and reported as
//!   `RepoError::DuplicateName`.
//! - Absence on reads is `Ok(None)`; absence on delete is `RepoError::NotFound`.

pub mod memory_repo;
pub mod planet_repo;
