use planets_core::db::schema::SCHEMA_VERSION;
use planets_core::db::{open_db, open_db_in_memory, DbError};
use planets_core::{Planet, PlanetRepository, SqlitePlanetRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_bootstraps_schema() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), SCHEMA_VERSION);
    assert_table_exists(&conn, "planets");
}

#[test]
fn reopening_file_database_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planets.db");

    let conn_first = open_db(&path).unwrap();
    SqlitePlanetRepository::new(&conn_first)
        .create_planet(&Planet::new("Tatooine", "arid", "desert"))
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), SCHEMA_VERSION);
    let loaded = SqlitePlanetRepository::new(&conn_second)
        .get_planet_by_name("Tatooine")
        .unwrap();
    assert!(loaded.is_some());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
