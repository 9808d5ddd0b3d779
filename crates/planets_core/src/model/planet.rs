//! Planet domain model.
//!
//! # Responsibility
//! - Define the single entity persisted by the service.
//! - Validate required text fields before any persistence happens.
//!
//! # Invariants
//! - `id` is `None` until storage assigns it, and never changes afterwards.
//! - `name`, `climate` and `terrain` are non-blank for every stored planet.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned planet identifier.
pub type PlanetId = i64;

/// Validation error for planet write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanetValidationError {
    /// A required text field is empty or whitespace-only.
    EmptyField(&'static str),
}

impl Display for PlanetValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "planet field `{field}` must not be empty"),
        }
    }
}

impl Error for PlanetValidationError {}

/// Canonical planet record.
///
/// Serialized as `{ "id": integer|null, "name", "climate", "terrain" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    /// Assigned by storage on create. `None` for unsaved planets.
    pub id: Option<PlanetId>,
    /// Globally unique, compared case-sensitively.
    pub name: String,
    /// Free-form description, may hold several comma separated values.
    pub climate: String,
    /// Free-form description.
    pub terrain: String,
}

impl Planet {
    /// Creates an unsaved planet without an id.
    pub fn new(
        name: impl Into<String>,
        climate: impl Into<String>,
        terrain: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            climate: climate.into(),
            terrain: terrain.into(),
        }
    }

    /// Returns a copy of this planet carrying the storage-assigned id.
    pub fn with_id(&self, id: PlanetId) -> Self {
        Self {
            id: Some(id),
            ..self.clone()
        }
    }

    /// Checks required text fields.
    ///
    /// Fields are checked in declaration order; the first blank one is
    /// reported.
    pub fn validate(&self) -> Result<(), PlanetValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("climate", &self.climate),
            ("terrain", &self.terrain),
        ] {
            if value.trim().is_empty() {
                return Err(PlanetValidationError::EmptyField(field));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Planet, PlanetValidationError};

    #[test]
    fn validate_accepts_populated_planet() {
        let planet = Planet::new("Tatooine", "arid", "desert");
        assert!(planet.validate().is_ok());
    }

    #[test]
    fn validate_reports_first_blank_field() {
        let planet = Planet::new(" ", "", "desert");
        assert_eq!(
            planet.validate(),
            Err(PlanetValidationError::EmptyField("name"))
        );

        let planet = Planet::new("Hoth", "frozen", "\t\n");
        assert_eq!(
            planet.validate(),
            Err(PlanetValidationError::EmptyField("terrain"))
        );
    }

    #[test]
    fn with_id_keeps_fields() {
        let planet = Planet::new("Endor", "temperate", "forests").with_id(7);
        assert_eq!(planet.id, Some(7));
        assert_eq!(planet.name, "Endor");
    }
}
