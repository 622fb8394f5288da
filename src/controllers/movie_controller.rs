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
use crate::models::{Genre, Movie, MovieUpdate};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MovieFilter {
    /// Flag names joined by `|`, e.g. `DRAMA | WAR`.
    pub genre: Option<String>,
}

/// Movies having every requested genre, ordered by title.
pub async fn load_movies(
    Query(filter): Query<MovieFilter>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<Movie>>, Error> {
    let genre = match filter.genre.as_deref() {
        Some(text) => bitflags::parser::from_str::<Genre>(text)
            .map_err(|e| Error::Validation(format!("invalid genre '{text}': {e}")))?,
        None => Genre::empty(),
    };

    let mut movies: Vec<Movie> = state
        .movies
        .get_all()
        .into_iter()
        .filter(|m| m.has_genre(genre))
        .collect();
    movies.sort_by(|a, b| a.title.cmp(&b.title));
    Ok(Json(movies))
}

pub async fn load_movie(
    Path(id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Movie>, Error> {
    Ok(Json(state.movies.require(id)?))
}

pub async fn add_movie(
    Extension(state): Extension<Arc<AppState>>,
    Json(input): Json<MovieUpdate>,
) -> Result<(StatusCode, Json<Movie>), Error> {
    check_movie(&state, &input)?;
    let movie = state.movies.add(input.into_movie(Uuid::nil())).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Changing the running time does not revalidate screenings already
/// placed with the old one.
pub async fn update_movie(
    Path(id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
    Json(input): Json<MovieUpdate>,
) -> Result<Json<Movie>, Error> {
    check_movie(&state, &input)?;
    Ok(Json(state.movies.update(input.into_movie(id)).await?))
}

pub async fn delete_movie(
    Path(id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Movie>, Error> {
    let movie = state
        .movies
        .delete(id)
        .await?
        .ok_or_else(|| not_found("movie", id))?;
    Ok(Json(movie))
}

fn check_movie(state: &AppState, input: &MovieUpdate) -> Result<(), Error> {
    require_text("title", &input.title)?;
    if let Some(instructor_id) = input.instructor_id {
        if !state.instructors.contains(instructor_id) {
            return Err(Error::Validation(format!("invalid instructor '{instructor_id}'")));
        }
    }
    Ok(())
}
