//! Filter builder over planet templates.
//!
//! # Responsibility
//! - Build a `PlanetFilter` from a `PlanetTemplate`, skipping unset fields.
//! - Evaluate the filter in-process or render it as a SQL `WHERE` fragment.
//!
//! # Invariants
//! - Matching is exact after Unicode lowercasing; no substring or prefix match.
//! - A template with no set fields yields a filter matching every planet.
//! - `matches` and `sql_predicate` accept exactly the same planets.

use crate::db::functions::UNICODE_LOWER_FN;
use crate::model::planet::Planet;
use rusqlite::types::Value;

/// Filterable planet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanetField {
    Name,
    Climate,
    Terrain,
}

impl PlanetField {
    /// Column name in the `planets` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Climate => "climate",
            Self::Terrain => "terrain",
        }
    }

    fn value_of(self, planet: &Planet) -> &str {
        match self {
            Self::Name => planet.name.as_str(),
            Self::Climate => planet.climate.as_str(),
            Self::Terrain => planet.terrain.as_str(),
        }
    }
}

/// Partially populated planet used to express filter intent.
///
/// `None` and empty values are treated as unset. Any other value, including
/// whitespace, is a constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanetTemplate {
    pub name: Option<String>,
    pub climate: Option<String>,
    pub terrain: Option<String>,
}

/// One equality constraint of a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: PlanetField,
    pub value: String,
}

/// Conjunction of case-insensitive equality constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanetFilter {
    constraints: Vec<FieldMatch>,
}

impl PlanetFilter {
    /// Builds a filter from the set fields of `template`.
    pub fn from_template(template: &PlanetTemplate) -> Self {
        let constraints = [
            (PlanetField::Name, template.name.as_deref()),
            (PlanetField::Climate, template.climate.as_deref()),
            (PlanetField::Terrain, template.terrain.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value
                .filter(|value| !value.is_empty())
                .map(|value| FieldMatch {
                    field,
                    value: value.to_string(),
                })
        })
        .collect();

        Self { constraints }
    }

    /// Constraints in field declaration order.
    pub fn constraints(&self) -> &[FieldMatch] {
        &self.constraints
    }

    /// Returns whether this filter accepts every planet.
    pub fn is_unconstrained(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Evaluates the filter against one planet.
    pub fn matches(&self, planet: &Planet) -> bool {
        self.constraints.iter().all(|constraint| {
            constraint.field.value_of(planet).to_lowercase() == constraint.value.to_lowercase()
        })
    }

    /// Renders the filter as a SQL predicate plus positional bind values.
    ///
    /// The predicate is `1 = 1` when unconstrained. It calls the
    /// `unicode_lower` function registered by `db::functions`, so the
    /// connection must come from `open_db*` or `register_functions`.
    pub fn sql_predicate(&self) -> (String, Vec<Value>) {
        if self.constraints.is_empty() {
            return ("1 = 1".to_string(), Vec::new());
        }

        let clause = self
            .constraints
            .iter()
            .map(|constraint| {
                format!(
                    "{UNICODE_LOWER_FN}({}) = {UNICODE_LOWER_FN}(?)",
                    constraint.field.column()
                )
            })
            .collect::<Vec<_>>()
            .join(" AND ");
        let values = self
            .constraints
            .iter()
            .map(|constraint| Value::Text(constraint.value.clone()))
            .collect();

        (clause, values)
    }
}

#[cfg(test)]
mod tests {
    use super::{PlanetField, PlanetFilter, PlanetTemplate};
    use crate::model::planet::Planet;

    fn template(climate: Option<&str>, terrain: Option<&str>) -> PlanetTemplate {
        PlanetTemplate {
            name: None,
            climate: climate.map(str::to_string),
            terrain: terrain.map(str::to_string),
        }
    }

    #[test]
    fn empty_template_matches_everything() {
        let filter = PlanetFilter::from_template(&PlanetTemplate::default());
        assert!(filter.is_unconstrained());
        assert!(filter.matches(&Planet::new("Tatooine", "arid", "desert")));

        let (clause, values) = filter.sql_predicate();
        assert_eq!(clause, "1 = 1");
        assert!(values.is_empty());
    }

    #[test]
    fn empty_values_are_unset() {
        let filter = PlanetFilter::from_template(&template(Some(""), Some("")));
        assert!(filter.is_unconstrained());
    }

    #[test]
    fn whitespace_value_is_a_constraint() {
        let filter = PlanetFilter::from_template(&template(None, Some("   ")));
        assert_eq!(filter.constraints().len(), 1);
        assert!(!filter.matches(&Planet::new("Tatooine", "arid", "desert")));
    }

    #[test]
    fn non_ascii_letters_match_ignoring_case() {
        let filter = PlanetFilter::from_template(&template(Some("ácido"), Some("VOLCÁNICO")));
        assert!(filter.matches(&Planet::new("Mustafar", "Ácido", "Volcánico")));
        assert!(!filter.matches(&Planet::new("Mustafar", "Acido", "Volcanico")));
    }

    #[test]
    fn matching_ignores_case_but_is_exact() {
        let filter = PlanetFilter::from_template(&template(Some("ARID"), Some("Desert")));
        assert!(filter.matches(&Planet::new("Tatooine", "arid", "desert")));
        assert!(!filter.matches(&Planet::new("Tatooine", "arid", "deserts")));
        assert!(!filter.matches(&Planet::new("Tatooine", "ari", "desert")));
    }

    #[test]
    fn climate_list_does_not_match_single_value() {
        let filter = PlanetFilter::from_template(&template(Some("temperate"), None));
        assert!(!filter.matches(&Planet::new("Yavin IV", "temperate, tropical", "grass")));
        assert!(filter.matches(&Planet::new("Alderaan", "temperate", "grass")));
    }

    #[test]
    fn constraints_are_conjunctive() {
        let filter = PlanetFilter::from_template(&template(Some("temperate"), Some("desert")));
        assert!(!filter.matches(&Planet::new("Alderaan", "temperate", "grass")));
        assert!(!filter.matches(&Planet::new("Tatooine", "arid", "desert")));
    }

    #[test]
    fn name_constraint_is_honored_when_set() {
        let filter = PlanetFilter::from_template(&PlanetTemplate {
            name: Some("hoth".to_string()),
            ..PlanetTemplate::default()
        });
        assert_eq!(filter.constraints()[0].field, PlanetField::Name);
        assert!(filter.matches(&Planet::new("Hoth", "frozen", "tundra")));
    }

    #[test]
    fn sql_predicate_binds_values_in_field_order() {
        let filter = PlanetFilter::from_template(&template(Some("arid"), Some("desert")));
        let (clause, values) = filter.sql_predicate();
        assert_eq!(
            clause,
            "unicode_lower(climate) = unicode_lower(?) AND unicode_lower(terrain) = unicode_lower(?)"
        );
        assert_eq!(values.len(), 2);
    }
}
