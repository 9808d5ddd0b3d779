//! Request handlers for `/planets`.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use planets_core::{Planet, PlanetId};
use serde::Deserialize;

/// Create payload. Any `id` sent by the client is ignored.
///
/// Missing or `null` fields are read as empty strings so they surface as
/// validation failures rather than decode failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePlanetRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub climate: Option<String>,
    #[serde(default)]
    pub terrain: Option<String>,
}

impl CreatePlanetRequest {
    pub fn into_planet(self) -> Planet {
        Planet::new(
            self.name.unwrap_or_default(),
            self.climate.unwrap_or_default(),
            self.terrain.unwrap_or_default(),
        )
    }
}

/// Optional list filters from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPlanetsQuery {
    pub terrain: Option<String>,
    pub climate: Option<String>,
}

pub async fn create_planet(
    State(state): State<AppState>,
    payload: Result<Json<CreatePlanetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Planet>), ApiError> {
    let Json(request) = payload?;
    let planet = request.into_planet();
    planet.validate()?;

    let created = state
        .run("planet_create", move |service| service.create(&planet))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_planet(
    State(state): State<AppState>,
    id: Result<Path<PlanetId>, PathRejection>,
) -> Result<Json<Planet>, ApiError> {
    let Path(id) = id?;
    state
        .run("planet_get", move |service| service.get(id))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("planet not found: {id}")))
}

pub async fn get_planet_by_name(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<Planet>, ApiError> {
    let Path(name) = name?;
    state
        .run("planet_get_by_name", move |service| service.get_by_name(&name))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("planet not found for name".to_string()))
}

pub async fn list_planets(
    State(state): State<AppState>,
    query: Result<Query<ListPlanetsQuery>, QueryRejection>,
) -> Result<Json<Vec<Planet>>, ApiError> {
    let Query(query) = query?;
    let planets = state
        .run("planet_list", move |service| {
            service.list(query.terrain.as_deref(), query.climate.as_deref())
        })
        .await?;
    Ok(Json(planets))
}

pub async fn delete_planet(
    State(state): State<AppState>,
    id: Result<Path<PlanetId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state
        .run("planet_delete", move |service| service.remove(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
