//! Planet repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert, get-by-id, get-by-name, filtered scan and delete over
//!   the `planets` table.
//! - Translate SQLite constraint failures into semantic errors.
//!
//! # Invariants
//! - Write paths call `Planet::validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Scans return rows in ascending id order.

use crate::db::schema::{current_user_version, SCHEMA_VERSION};
use crate::db::DbError;
use crate::model::planet::{Planet, PlanetId, PlanetValidationError};
use crate::query::planet_filter::PlanetFilter;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PLANET_SELECT_SQL: &str = "SELECT id, name, climate, terrain FROM planets";
const REQUIRED_COLUMNS: &[&str] = &["id", "name", "climate", "terrain"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for planet persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(PlanetValidationError),
    Db(DbError),
    NotFound(PlanetId),
    DuplicateName(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "planet not found: {id}"),
            Self::DuplicateName(name) => write!(f, "planet name already exists: `{name}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted planet data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PlanetValidationError> for RepoError {
    fn from(value: PlanetValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage capability for planet records.
pub trait PlanetRepository {
    /// Inserts a new planet and returns the storage-assigned id.
    fn create_planet(&self, planet: &Planet) -> RepoResult<PlanetId>;
    /// Gets one planet by id.
    fn get_planet(&self, id: PlanetId) -> RepoResult<Option<Planet>>;
    /// Gets one planet by exact, case-sensitive name.
    fn get_planet_by_name(&self, name: &str) -> RepoResult<Option<Planet>>;
    /// Lists planets accepted by `filter`, in ascending id order.
    fn list_planets(&self, filter: &PlanetFilter) -> RepoResult<Vec<Planet>>;
    /// Hard-deletes one planet by id.
    fn delete_planet(&self, id: PlanetId) -> RepoResult<()>;
}

/// SQLite-backed planet repository.
pub struct SqlitePlanetRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePlanetRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps an arbitrary connection after checking its schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` differs from the
    ///   bootstrapped schema version.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the `planets`
    ///   table shape is incomplete.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version = current_user_version(conn)?;
        if actual_version != SCHEMA_VERSION {
            return Err(RepoError::UninitializedConnection {
                expected_version: SCHEMA_VERSION,
                actual_version,
            });
        }

        let table_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'planets'
            );",
            [],
            |row| row.get(0),
        )?;
        if table_exists == 0 {
            return Err(RepoError::MissingRequiredTable("planets"));
        }

        let mut stmt = conn.prepare("PRAGMA table_info(planets);")?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>("name"))?
            .collect::<Result<Vec<_>, _>>()?;
        for &column in REQUIRED_COLUMNS {
            if !columns.iter().any(|name| name == column) {
                return Err(RepoError::MissingRequiredColumn {
                    table: "planets",
                    column,
                });
            }
        }

        Ok(Self { conn })
    }
}

impl PlanetRepository for SqlitePlanetRepository<'_> {
    fn create_planet(&self, planet: &Planet) -> RepoResult<PlanetId> {
        planet.validate()?;

        let result = self.conn.execute(
            "INSERT INTO planets (name, climate, terrain) VALUES (?1, ?2, ?3);",
            params![
                planet.name.as_str(),
                planet.climate.as_str(),
                planet.terrain.as_str()
            ],
        );

        match result {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(err) => {
                let err = DbError::from(err);
                if err.is_unique_violation() {
                    Err(RepoError::DuplicateName(planet.name.clone()))
                } else {
                    Err(err.into())
                }
            }
        }
    }

    fn get_planet(&self, id: PlanetId) -> RepoResult<Option<Planet>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PLANET_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt.query_row([id], parse_planet_row).optional()?;
        row.map(check_planet).transpose()
    }

    fn get_planet_by_name(&self, name: &str) -> RepoResult<Option<Planet>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PLANET_SELECT_SQL} WHERE name = ?1;"))?;
        let row = stmt.query_row([name], parse_planet_row).optional()?;
        row.map(check_planet).transpose()
    }

    fn list_planets(&self, filter: &PlanetFilter) -> RepoResult<Vec<Planet>> {
        let (predicate, bind_values) = filter.sql_predicate();
        let sql = format!("{PLANET_SELECT_SQL} WHERE {predicate} ORDER BY id ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut planets = Vec::new();

        while let Some(row) = rows.next()? {
            planets.push(check_planet(parse_planet_row(row)?)?);
        }

        Ok(planets)
    }

    fn delete_planet(&self, id: PlanetId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM planets WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_planet_row(row: &Row<'_>) -> rusqlite::Result<Planet> {
    Ok(Planet {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        climate: row.get("climate")?,
        terrain: row.get("terrain")?,
    })
}

fn check_planet(planet: Planet) -> RepoResult<Planet> {
    planet.validate().map_err(|err| {
        RepoError::InvalidData(format!(
            "planet row {} failed validation: {err}",
            planet.id.unwrap_or_default()
        ))
    })?;
    Ok(planet)
}
