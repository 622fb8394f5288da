use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Error;
use crate::models::{Booking, BookingRequest};
use crate::state::AppState;
use crate::workflows;

#[derive(Debug, Default, Deserialize)]
pub struct BookingFilter {
    pub screening_id: Option<Uuid>,
}

pub async fn load_bookings(
    Query(filter): Query<BookingFilter>,
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Vec<Booking>> {
    let bookings = state
        .bookings
        .get_all()
        .into_iter()
        .filter(|b| filter.screening_id.is_none_or(|s| b.screening_id == s))
        .collect();
    Json(bookings)
}

pub async fn add_booking(
    Path(screening_id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Booking>), Error> {
    let booking = workflows::book_seats(&state, screening_id, request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn delete_booking(
    Path(id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Booking>, Error> {
    Ok(Json(workflows::cancel_booking(&state, id).await?))
}
