//! Shared connection state for request handlers.
//!
//! # Invariants
//! - One SQLite connection is shared process-wide behind a mutex.
//! - The lock is held for exactly one service call, on a blocking thread.
//! - A lock poisoned by a panicking call is recovered, not propagated.

use crate::error::ApiError;
use log::{error, info, warn};
use planets_core::{PlanetService, ServiceResult, SqlitePlanetRepository};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Application state cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps a connection returned by `planets_core::db::open_db*`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs one service operation on a blocking thread and logs its outcome.
    pub(crate) async fn run<T, F>(&self, event: &'static str, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&PlanetService<SqlitePlanetRepository<'_>>) -> ServiceResult<T> + Send + 'static,
    {
        let started_at = Instant::now();
        let conn = Arc::clone(&self.conn);

        let result = tokio::task::spawn_blocking(move || {
            // Each call is a single statement, so a poisoned connection holds no partial write.
            let guard = conn.lock().unwrap_or_else(|poisoned| {
                warn!("event=db_lock module=api status=recovered reason=poisoned");
                poisoned.into_inner()
            });
            let service = PlanetService::new(SqlitePlanetRepository::new(&guard));
            op(&service).map_err(ApiError::from)
        })
        .await
        .unwrap_or_else(|err| Err(ApiError::Internal(format!("storage task failed: {err}"))));

        let duration_ms = started_at.elapsed().as_millis();
        match &result {
            Ok(_) => info!("event={event} module=api status=ok duration_ms={duration_ms}"),
            Err(ApiError::Internal(message)) => error!(
                "event={event} module=api status=error duration_ms={duration_ms} error_code=internal_error error={message}"
            ),
            Err(err) => warn!(
                "event={event} module=api status=rejected duration_ms={duration_ms} error_code={}",
                err.code()
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use planets_core::db::open_db_in_memory;
    use planets_core::Planet;
    use std::sync::Arc;

    #[tokio::test]
    async fn poisoned_lock_does_not_fail_later_requests() {
        let state = AppState::new(open_db_in_memory().unwrap());
        state
            .run("planet_create", |service| {
                service.create(&Planet::new("Tatooine", "arid", "desert"))
            })
            .await
            .unwrap();

        let conn = Arc::clone(&state.conn);
        let panicked = std::thread::spawn(move || {
            let _guard = conn.lock().unwrap();
            panic!("storage call panicked while holding the lock");
        })
        .join();
        assert!(panicked.is_err());
        assert!(state.conn.is_poisoned());

        let planets = state
            .run("planet_list", |service| service.list(None, None))
            .await
            .unwrap();
        assert_eq!(planets.len(), 1);
        assert_eq!(planets[0].name, "Tatooine");
    }
}
