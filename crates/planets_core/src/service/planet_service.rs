//! Planet use-case service.
//!
//! # Responsibility
//! - Provide create/get/list/remove entry points for boundary callers.
//! - Build list filters from optional terrain/climate inputs.
//!
//! # Invariants
//! - One repository call per operation; no retries, no pre-checks.
//! - Read absence is `Ok(None)`; delete absence is `PlanetServiceError::NotFound`.
//! - Service layer remains storage-agnostic.

use crate::model::planet::{Planet, PlanetId, PlanetValidationError};
use crate::query::planet_filter::{PlanetFilter, PlanetTemplate};
use crate::repo::planet_repo::{PlanetRepository, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, PlanetServiceError>;

/// Service error for planet use-cases.
#[derive(Debug)]
pub enum PlanetServiceError {
    /// A required field is blank.
    Validation(PlanetValidationError),
    /// Storage rejected a create because the name is taken.
    DuplicateName(String),
    /// Target planet does not exist.
    NotFound(PlanetId),
    /// Any other persistence failure.
    Storage(RepoError),
}

impl Display for PlanetServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateName(name) => write!(f, "planet name already exists: `{name}`"),
            Self::NotFound(id) => write!(f, "planet not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PlanetServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for PlanetServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::DuplicateName(name) => Self::DuplicateName(name),
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

/// Planet service facade over repository implementations.
pub struct PlanetService<R: PlanetRepository> {
    repo: R,
}

impl<R: PlanetRepository> PlanetService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new planet and returns it with its assigned id.
    ///
    /// Any `id` already set on the input is ignored.
    pub fn create(&self, planet: &Planet) -> ServiceResult<Planet> {
        let id = self.repo.create_planet(planet)?;
        Ok(planet.with_id(id))
    }

    pub fn get(&self, id: PlanetId) -> ServiceResult<Option<Planet>> {
        Ok(self.repo.get_planet(id)?)
    }

    /// Looks a planet up by exact, case-sensitive name.
    pub fn get_by_name(&self, name: &str) -> ServiceResult<Option<Planet>> {
        Ok(self.repo.get_planet_by_name(name)?)
    }

    /// Lists planets whose terrain and climate match the given values.
    ///
    /// # Contract
    /// - Unset (`None` or empty) filters impose no constraint.
    /// - Set filters match exactly, ignoring case.
    /// - Both filters set means both must match.
    pub fn list(&self, terrain: Option<&str>, climate: Option<&str>) -> ServiceResult<Vec<Planet>> {
        let template = PlanetTemplate {
            name: None,
            climate: climate.map(str::to_string),
            terrain: terrain.map(str::to_string),
        };
        let filter = PlanetFilter::from_template(&template);
        Ok(self.repo.list_planets(&filter)?)
    }

    /// Deletes a planet by id.
    pub fn remove(&self, id: PlanetId) -> ServiceResult<()> {
        Ok(self.repo.delete_planet(id)?)
    }
}
