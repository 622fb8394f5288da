use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{not_found, require_text};
use crate::error::Error;
use crate::models::{Hall, HallUpdate};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct HallFilter {
    pub cinema_id: Option<Uuid>,
}

pub async fn load_halls(
    Query(filter): Query<HallFilter>,
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Vec<Hall>> {
    Json(state.query().halls_for_cinema(filter.cinema_id))
}

pub async fn load_hall(
    Path(id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Hall>, Error> {
    Ok(Json(state.halls.require(id)?))
}

pub async fn add_hall(
    Extension(state): Extension<Arc<AppState>>,
    Json(input): Json<HallUpdate>,
) -> Result<(StatusCode, Json<Hall>), Error> {
    check_hall(&state, &input)?;
    let hall = state.halls.add(input.into_hall(Uuid::nil())).await?;
    Ok((StatusCode::CREATED, Json(hall)))
}

pub async fn update_hall(
    Path(id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
    Json(input): Json<HallUpdate>,
) -> Result<Json<Hall>, Error> {
    check_hall(&state, &input)?;
    Ok(Json(state.halls.update(input.into_hall(id)).await?))
}

/// Screenings in a removed hall are kept; their capacity reads as zero.
pub async fn delete_hall(
    Path(id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Hall>, Error> {
    let hall = state
        .halls
        .delete(id)
        .await?
        .ok_or_else(|| not_found("hall", id))?;
    Ok(Json(hall))
}

fn check_hall(state: &AppState, input: &HallUpdate) -> Result<(), Error> {
    require_text("name", &input.name)?;
    if !state.cinemas.contains(input.cinema_id) {
        return Err(Error::Validation(format!("invalid cinema '{}'", input.cinema_id)));
    }
    Ok(())
}
