use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::error::Error;
use crate::models::{Screening, ScreeningUpdate};
use crate::scheduling::{Availability, BookingContext, ScreeningFilter, ScreeningRow};
use crate::state::AppState;
use crate::workflows;

pub async fn load_screenings(
    Query(filter): Query<ScreeningFilter>,
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Vec<ScreeningRow>> {
    Json(state.query().screening_rows(&filter))
}

pub async fn load_screening(
    Path(id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<ScreeningRow>, Error> {
    Ok(Json(state.query().screening_row(id)?))
}

pub async fn add_screening(
    Extension(state): Extension<Arc<AppState>>,
    Json(input): Json<ScreeningUpdate>,
) -> Result<(StatusCode, Json<ScreeningRow>), Error> {
    let screening = workflows::create_screening(&state, input.into()).await?;
    Ok((StatusCode::CREATED, Json(state.query().screening_row(screening.id)?)))
}

pub async fn update_screening(
    Path(id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
    Json(input): Json<ScreeningUpdate>,
) -> Result<Json<ScreeningRow>, Error> {
    let screening = workflows::update_screening(&state, id, input.into()).await?;
    Ok(Json(state.query().screening_row(screening.id)?))
}

pub async fn delete_screening(
    Path(id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Screening>, Error> {
    Ok(Json(workflows::delete_screening(&state, id).await?))
}

pub async fn load_availability(
    Path(id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Availability>, Error> {
    Ok(Json(state.query().availability(id)?))
}

pub async fn load_booking_context(
    Path(id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<BookingContext>, Error> {
    Ok(Json(workflows::load_context(&state, id)?))
}
