//! In-memory planet repository.
//!
//! Mirrors the SQLite repository contract (AUTOINCREMENT ids, UNIQUE names,
//! ascending id scans) without a database. Useful for service-level tests
//! and embedders that do not need persistence.

use crate::model::planet::{Planet, PlanetId};
use crate::query::planet_filter::PlanetFilter;
use crate::repo::planet_repo::{PlanetRepository, RepoError, RepoResult};
use std::cell::RefCell;

#[derive(Debug, Default)]
struct MemoryState {
    last_id: PlanetId,
    planets: Vec<Planet>,
}

/// Vec-backed planet repository kept in insertion (= id) order.
#[derive(Debug, Default)]
pub struct InMemoryPlanetRepository {
    state: RefCell<MemoryState>,
}

impl InMemoryPlanetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlanetRepository for InMemoryPlanetRepository {
    fn create_planet(&self, planet: &Planet) -> RepoResult<PlanetId> {
        planet.validate()?;

        let mut state = self.state.borrow_mut();
        if state.planets.iter().any(|stored| stored.name == planet.name) {
            return Err(RepoError::DuplicateName(planet.name.clone()));
        }

        // ids are never reused, even after deletes
        state.last_id += 1;
        let id = state.last_id;
        state.planets.push(planet.with_id(id));
        Ok(id)
    }

    fn get_planet(&self, id: PlanetId) -> RepoResult<Option<Planet>> {
        Ok(self
            .state
            .borrow()
            .planets
            .iter()
            .find(|planet| planet.id == Some(id))
            .cloned())
    }

    fn get_planet_by_name(&self, name: &str) -> RepoResult<Option<Planet>> {
        Ok(self
            .state
            .borrow()
            .planets
            .iter()
            .find(|planet| planet.name == name)
            .cloned())
    }

    fn list_planets(&self, filter: &PlanetFilter) -> RepoResult<Vec<Planet>> {
        Ok(self
            .state
            .borrow()
            .planets
            .iter()
            .filter(|planet| filter.matches(planet))
            .cloned()
            .collect())
    }

    fn delete_planet(&self, id: PlanetId) -> RepoResult<()> {
        let mut state = self.state.borrow_mut();
        let index = state
            .planets
            .iter()
            .position(|planet| planet.id == Some(id))
            .ok_or(RepoError::NotFound(id))?;
        state.planets.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryPlanetRepository;
    use crate::model::planet::Planet;
    use crate::repo::planet_repo::{PlanetRepository, RepoError};

    #[test]
    fn ids_are_not_reused_after_delete() {
        let repo = InMemoryPlanetRepository::new();
        let first = repo.create_planet(&Planet::new("Hoth", "frozen", "tundra")).unwrap();
        repo.delete_planet(first).unwrap();

        let second = repo.create_planet(&Planet::new("Hoth", "frozen", "tundra")).unwrap();
        assert!(second > first);
    }

    #[test]
    fn duplicate_name_is_case_sensitive() {
        let repo = InMemoryPlanetRepository::new();
        repo.create_planet(&Planet::new("Hoth", "frozen", "tundra")).unwrap();

        let err = repo
            .create_planet(&Planet::new("Hoth", "cold", "ice"))
            .unwrap_err();
        assert!(matches!(err, RepoError::DuplicateName(name) if name == "Hoth"));

        repo.create_planet(&Planet::new("HOTH", "cold", "ice")).unwrap();
    }
}
