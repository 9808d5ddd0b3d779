//! Core domain logic for the planets service.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::planet::{Planet, PlanetId, PlanetValidationError};
pub use query::planet_filter::{FieldMatch, PlanetField, PlanetFilter, PlanetTemplate};
pub use repo::memory_repo::InMemoryPlanetRepository;
pub use repo::planet_repo::{PlanetRepository, RepoError, RepoResult, SqlitePlanetRepository};
pub use service::planet_service::{PlanetService, PlanetServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
