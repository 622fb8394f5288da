use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use cinema_scheduler::models::{Cinema, Genre, Hall, Movie};
use cinema_scheduler::{create_app, AppState, Config};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub struct Seed {
    pub cinema: Cinema,
    pub hall: Hall,
    pub movie: Movie,
}

pub fn get_test_app(state: AppState) -> (Arc<AppState>, Router) {
    let state = Arc::new(state);
    let app = create_app(state.clone(), &Config::default());
    (state, app)
}

/// One cinema with a 50 seat hall and a 120 minute movie.
pub async fn seed(state: &AppState) -> Seed {
    let cinema = state
        .cinemas
        .add(Cinema { id: Uuid::nil(), name: "Grand".to_string(), location: "Copenhagen".to_string() })
        .await
        .unwrap();
    let hall = state
        .halls
        .add(Hall { id: Uuid::nil(), name: "Sal 1".to_string(), capacity: 50, cinema_id: cinema.id })
        .await
        .unwrap();
    let movie = state
        .movies
        .add(Movie {
            id: Uuid::nil(),
            title: "Blade Runner 2049".to_string(),
            duration: 120,
            genres: Genre::THRILLER | Genre::MYSTERY,
            premiere_date: NaiveDate::from_ymd_opt(2017, 10, 5).unwrap(),
            instructor_id: None,
        })
        .await
        .unwrap();

    Seed { cinema, hall, movie }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, body)
}
