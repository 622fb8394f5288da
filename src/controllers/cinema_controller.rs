use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use super::{not_found, require_text};
use crate::error::Error;
use crate::models::{Cinema, CinemaUpdate};
use crate::state::AppState;

pub async fn load_cinemas(Extension(state): Extension<Arc<AppState>>) -> Json<Vec<Cinema>> {
    let mut cinemas = state.cinemas.get_all();
    cinemas.sort_by(|a, b| a.name.cmp(&b.name));
    Json(cinemas)
}

pub async fn load_cinema(
    Path(id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Cinema>, Error> {
    Ok(Json(state.cinemas.require(id)?))
}

pub async fn add_cinema(
    Extension(state): Extension<Arc<AppState>>,
    Json(input): Json<CinemaUpdate>,
) -> Result<(StatusCode, Json<Cinema>), Error> {
    require_text("name", &input.name)?;
    let cinema = state.cinemas.add(input.into_cinema(Uuid::nil())).await?;
    Ok((StatusCode::CREATED, Json(cinema)))
}

pub async fn update_cinema(
    Path(id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
    Json(input): Json<CinemaUpdate>,
) -> Result<Json<Cinema>, Error> {
    require_text("name", &input.name)?;
    Ok(Json(state.cinemas.update(input.into_cinema(id)).await?))
}

/// Halls of a removed cinema are kept and show it as unknown.
pub async fn delete_cinema(
    Path(id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Cinema>, Error> {
    let cinema = state
        .cinemas
        .delete(id)
        .await?
        .ok_or_else(|| not_found("cinema", id))?;
    Ok(Json(cinema))
}
