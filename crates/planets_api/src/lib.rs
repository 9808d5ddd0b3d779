//! HTTP boundary for the planets service.
//!
//! # Responsibility
//! - Map HTTP verbs and paths onto `PlanetService` operations.
//! - Validate create payloads before storage is touched.
//! - Translate service outcomes into status codes and JSON bodies.
//!
//! # Invariants
//! - Handlers never block the async runtime on SQLite.
//! - Every error response carries an `ErrorBody` JSON envelope.

mod error;
mod handlers;
mod state;

pub use error::{ApiError, ErrorBody};
pub use handlers::{CreatePlanetRequest, ListPlanetsQuery};
pub use state::AppState;

use axum::routing::get;
use axum::Router;
use log::info;
use std::future::Future;
use tokio::net::TcpListener;

/// Builds the `/planets` router over shared application state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/planets",
            get(handlers::list_planets).post(handlers::create_planet),
        )
        .route(
            "/planets/:id",
            get(handlers::get_planet).delete(handlers::delete_planet),
        )
        .route("/planets/name/:name", get(handlers::get_planet_by_name))
        .with_state(state)
}

/// Serves the router on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("event=server_start module=api status=ok addr={addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("event=server_stop module=api status=ok addr={addr}");
    Ok(())
}
