use axum::http::{Method, StatusCode};
use cinema_scheduler::models::Booking;
use cinema_scheduler::store::RetryPolicy;
use cinema_scheduler::AppState;
use serde_json::{json, Value};
use uuid::Uuid;

mod common;
use common::{get_test_app, seed, send};

fn screening_body(hall_id: Uuid, movie_id: Uuid, start: &str) -> Value {
    json!({ "hall_id": hall_id, "movie_id": movie_id, "start_time": start })
}

#[tokio::test]
async fn test_index() {
    let (_, app) = get_test_app(AppState::in_memory());

    let (status, body) = send(&app, Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "cinema-scheduler");
}

#[tokio::test]
async fn test_conflicting_screening_is_rejected() {
    let (state, app) = get_test_app(AppState::in_memory());
    let s = seed(&state).await;

    let (status, first) = send(
        &app,
        Method::POST,
        "/screenings",
        Some(screening_body(s.hall.id, s.movie.id, "2025-06-01T18:00:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["end_time"], "2025-06-01T20:00:00");
    assert_eq!(first["hall_name"], "Sal 1");

    let (status, body) = send(
        &app,
        Method::POST,
        "/screenings",
        Some(screening_body(s.hall.id, s.movie.id, "2025-06-01T20:15:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 5);
    assert_eq!(body["info"]["screening_id"], first["id"]);
    assert!(body["message"].as_str().unwrap().contains("18:00 - 20:00"));
    assert_eq!(state.screenings.len(), 1);

    let (status, _) = send(
        &app,
        Method::POST,
        "/screenings",
        Some(screening_body(s.hall.id, s.movie.id, "2025-06-01T20:30:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(state.screenings.len(), 2);
}

#[tokio::test]
async fn test_update_screening_excludes_itself() {
    let (state, app) = get_test_app(AppState::in_memory());
    let s = seed(&state).await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/screenings",
        Some(screening_body(s.hall.id, s.movie.id, "2025-06-01T18:00:00")),
    )
    .await;
    let uri = format!("/screenings/{}", created["id"].as_str().unwrap());

    let (status, moved) = send(
        &app,
        Method::PUT,
        &uri,
        Some(screening_body(s.hall.id, s.movie.id, "2025-06-01T18:30:00")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["id"], created["id"]);
    assert_eq!(moved["start_time"], "2025-06-01T18:30:00");

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/screenings/{}", Uuid::new_v4()),
        Some(screening_body(s.hall.id, s.movie.id, "2025-06-02T18:30:00")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_movie_is_unprocessable() {
    let (state, app) = get_test_app(AppState::in_memory());
    let s = seed(&state).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/screenings",
        Some(screening_body(s.hall.id, Uuid::new_v4(), "2025-06-01T18:00:00")),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 4);
}

#[tokio::test]
async fn test_overbooking_is_accepted() {
    let (state, app) = get_test_app(AppState::in_memory());
    let s = seed(&state).await;

    let (_, screening) = send(
        &app,
        Method::POST,
        "/screenings",
        Some(screening_body(s.hall.id, s.movie.id, "2025-06-01T18:00:00")),
    )
    .await;
    let id = screening["id"].as_str().unwrap();

    for seats in [20, 25, 10] {
        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/screenings/{id}/bookings"),
            Some(json!({ "number_of_seats": seats, "phone_number": "12345678" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, availability) =
        send(&app, Method::GET, &format!("/screenings/{id}/availability"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(availability, json!({ "capacity": 50, "booked": 55, "available": 0 }));

    let (_, context) = send(&app, Method::GET, &format!("/screenings/{id}/booking"), None).await;
    assert_eq!(context["movie_title"], "Blade Runner 2049");
    assert_eq!(context["cinema_name"], "Grand");

    let (_, bookings) = send(&app, Method::GET, &format!("/bookings?screening_id={id}"), None).await;
    assert_eq!(bookings.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_booking_validation() {
    let (state, app) = get_test_app(AppState::in_memory());
    let s = seed(&state).await;
    let (_, screening) = send(
        &app,
        Method::POST,
        "/screenings",
        Some(screening_body(s.hall.id, s.movie.id, "2025-06-01T18:00:00")),
    )
    .await;
    let uri = format!("/screenings/{}/bookings", screening["id"].as_str().unwrap());

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(json!({ "number_of_seats": 2, "email": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 1);

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(json!({ "number_of_seats": 0, "email": "guest@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 2);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/screenings/{}/bookings", Uuid::new_v4()),
        Some(json!({ "number_of_seats": 2, "email": "guest@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert!(state.bookings.is_empty());
}

#[tokio::test]
async fn test_missing_screening_is_not_found() {
    let (_, app) = get_test_app(AppState::in_memory());

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/screenings/{}/availability", Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3);
}

#[tokio::test]
async fn test_screening_listing_filters() {
    let (state, app) = get_test_app(AppState::in_memory());
    let s = seed(&state).await;

    for start in ["2025-06-03T18:00:00", "2025-06-01T18:00:00", "2025-06-02T18:00:00"] {
        send(
            &app,
            Method::POST,
            "/screenings",
            Some(screening_body(s.hall.id, s.movie.id, start)),
        )
        .await;
    }

    let (_, rows) = send(&app, Method::GET, "/screenings", None).await;
    let starts: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["start_time"].as_str().unwrap())
        .collect();
    assert_eq!(
        starts,
        vec!["2025-06-01T18:00:00", "2025-06-02T18:00:00", "2025-06-03T18:00:00"]
    );

    let uri = format!("/screenings?cinema_id={}&from=2025-06-02", s.cinema.id);
    let (_, rows) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(rows.as_array().unwrap().len(), 2);

    let uri = format!("/screenings?movie_id={}", Uuid::new_v4());
    let (_, rows) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(rows, json!([]));
}

#[tokio::test]
async fn test_catalog_endpoints() {
    let (state, app) = get_test_app(AppState::in_memory());
    let s = seed(&state).await;

    let (status, hall) = send(
        &app,
        Method::POST,
        "/halls",
        Some(json!({ "name": " Sal 2 ", "capacity": 80, "cinema_id": s.cinema.id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(hall["name"], "Sal 2");

    let (status, _) = send(
        &app,
        Method::POST,
        "/halls",
        Some(json!({ "name": "Sal 3", "capacity": 80, "cinema_id": Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, halls) = send(&app, Method::GET, &format!("/halls?cinema_id={}", s.cinema.id), None).await;
    assert_eq!(halls.as_array().unwrap().len(), 2);

    let (_, movies) = send(&app, Method::GET, "/movies?genre=THRILLER", None).await;
    assert_eq!(movies.as_array().unwrap().len(), 1);
    let (_, movies) = send(&app, Method::GET, "/movies?genre=WAR", None).await;
    assert_eq!(movies, json!([]));
    let (status, _) = send(&app, Method::GET, "/movies?genre=MUSICAL", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, Method::DELETE, &format!("/halls/{}", s.hall.id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::DELETE, &format!("/halls/{}", s.hall.id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_data_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let policy = RetryPolicy::new(2, std::time::Duration::from_millis(1));

    let (state, app) = get_test_app(AppState::open(dir.path(), policy).await.unwrap());
    let s = seed(&state).await;
    let (_, screening) = send(
        &app,
        Method::POST,
        "/screenings",
        Some(screening_body(s.hall.id, s.movie.id, "2025-06-01T18:00:00")),
    )
    .await;
    let (_, booking) = send(
        &app,
        Method::POST,
        &format!("/screenings/{}/bookings", screening["id"].as_str().unwrap()),
        Some(json!({ "number_of_seats": 4, "email": "guest@example.com" })),
    )
    .await;
    let booking: Booking = serde_json::from_value(booking).unwrap();

    let reopened = AppState::open(dir.path(), policy).await.unwrap();
    assert_eq!(reopened.movies.get_by_id(s.movie.id), Some(s.movie));
    assert_eq!(reopened.bookings.get_all(), vec![booking.clone()]);
    assert_eq!(reopened.query().availability(booking.screening_id).unwrap().booked, 4);
}

#[tokio::test]
async fn test_delete_screening_returns_it() {
    let (state, app) = get_test_app(AppState::in_memory());
    let s = seed(&state).await;
    let (_, created) = send(
        &app,
        Method::POST,
        "/screenings",
        Some(screening_body(s.hall.id, s.movie.id, "2025-06-01T18:00:00")),
    )
    .await;
    let uri = format!("/screenings/{}", created["id"].as_str().unwrap());

    let (status, deleted) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], created["id"]);
    assert_eq!(deleted["start_time"], "2025-06-01T18:00:00");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_failed_write_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let policy = RetryPolicy::new(2, std::time::Duration::from_millis(1));
    std::fs::create_dir(dir.path().join("cinemas.csv.tmp")).unwrap();

    let (state, app) = get_test_app(AppState::open(dir.path(), policy).await.unwrap());

    let (status, body) = send(
        &app,
        Method::POST,
        "/cinemas",
        Some(json!({ "name": "Palads", "location": "Copenhagen" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 6);

    // kept in memory, only the file is behind
    assert_eq!(state.cinemas.len(), 1);
    assert!(!dir.path().join("cinemas.csv").exists());
}
