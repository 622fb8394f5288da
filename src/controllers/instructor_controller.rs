use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use super::{not_found, require_text};
use crate::error::Error;
use crate::models::{Instructor, InstructorUpdate};
use crate::state::AppState;

pub async fn load_instructors(Extension(state): Extension<Arc<AppState>>) -> Json<Vec<Instructor>> {
    let mut instructors = state.instructors.get_all();
    instructors.sort_by(|a, b| a.name.cmp(&b.name));
    Json(instructors)
}

pub async fn load_instructor(
    Path(id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Instructor>, Error> {
    Ok(Json(state.instructors.require(id)?))
}

pub async fn add_instructor(
    Extension(state): Extension<Arc<AppState>>,
    Json(input): Json<InstructorUpdate>,
) -> Result<(StatusCode, Json<Instructor>), Error> {
    require_text("name", &input.name)?;
    let instructor = state.instructors.add(input.into_instructor(Uuid::nil())).await?;
    Ok((StatusCode::CREATED, Json(instructor)))
}

pub async fn update_instructor(
    Path(id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
    Json(input): Json<InstructorUpdate>,
) -> Result<Json<Instructor>, Error> {
    require_text("name", &input.name)?;
    Ok(Json(state.instructors.update(input.into_instructor(id)).await?))
}

pub async fn delete_instructor(
    Path(id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Instructor>, Error> {
    let instructor = state
        .instructors
        .delete(id)
        .await?
        .ok_or_else(|| not_found("instructor", id))?;
    Ok(Json(instructor))
}
