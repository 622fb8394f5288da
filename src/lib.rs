//! Screening scheduling and seat availability for a small cinema chain,
//! served as a local JSON and websocket API.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod notifications;
pub mod scheduling;
pub mod state;
pub mod store;
pub mod websockets;
pub mod workflows;

use controllers::{
    booking_controller::*, cinema_controller::*, hall_controller::*, home_controller,
    instructor_controller::*, movie_controller::*, screening_controller::*,
};

pub use config::Config;
pub use error::Error;
pub use state::AppState;

use crate::websockets::websocket_handler;

pub fn create_app(state: Arc<AppState>, config: &Config) -> Router {
    Router::new()
        .route("/", get(home_controller::index))
        .route("/ws", get(websocket_handler))
        .route("/cinemas", get(load_cinemas).post(add_cinema))
        .route(
            "/cinemas/{id}",
            get(load_cinema).put(update_cinema).delete(delete_cinema),
        )
        .route("/halls", get(load_halls).post(add_hall))
        .route("/halls/{id}", get(load_hall).put(update_hall).delete(delete_hall))
        .route("/instructors", get(load_instructors).post(add_instructor))
        .route(
            "/instructors/{id}",
            get(load_instructor)
                .put(update_instructor)
                .delete(delete_instructor),
        )
        .route("/movies", get(load_movies).post(add_movie))
        .route(
            "/movies/{id}",
            get(load_movie).put(update_movie).delete(delete_movie),
        )
        .route("/screenings", get(load_screenings).post(add_screening))
        .route(
            "/screenings/{id}",
            get(load_screening)
                .put(update_screening)
                .delete(delete_screening),
        )
        .route("/screenings/{id}/availability", get(load_availability))
        .route("/screenings/{id}/booking", get(load_booking_context))
        .route("/screenings/{id}/bookings", post(add_booking))
        .route("/bookings", get(load_bookings))
        .route("/bookings/{id}", delete(delete_booking))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_origin(config.app_url.clone())
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}
