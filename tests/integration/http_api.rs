/// End-to-end tests of the JSON API, driven through the router without a socket
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use habit_tracker_api::http::create_router;
use habit_tracker_api::*;

fn app() -> Router {
    let service = HabitService::new(SqliteStorage::in_memory().unwrap());
    create_router(Arc::new(service), None)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(raw) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(raw.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, name: &str, frequency: &str) -> String {
    let body = json!({ "name": name, "frequency": frequency }).to_string();
    let (status, habit) = send(app, Method::POST, "/api/habits", Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    habit["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_habit_statuses() {
    let app = app();

    let cases = [
        (r#"{"name": "Read a book", "frequency": "daily"}"#, StatusCode::CREATED),
        (r#"{"name": "Missing quote, "frequency": "daily"}"#, StatusCode::BAD_REQUEST),
        (r#"{"name": "", "frequency": "daily"}"#, StatusCode::INTERNAL_SERVER_ERROR),
        (r#"{"name": "Valid", "frequency": "Not valid frequency"}"#, StatusCode::INTERNAL_SERVER_ERROR),
        (r#"{"frequency": "weekly"}"#, StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (body, expected) in cases {
        let (status, _) = send(&app, Method::POST, "/api/habits", Some(body)).await;
        assert_eq!(status, expected, "body: {}", body);
    }
}

#[tokio::test]
async fn test_created_habit_shape() {
    let app = app();
    let body = r#"{"name": "Stretch", "frequency": "monthly"}"#;

    let (status, habit) = send(&app, Method::POST, "/api/habits", Some(body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(habit["name"], "Stretch");
    assert_eq!(habit["frequency"], "monthly");
    assert_eq!(habit["current_streak"], 0);
    assert_eq!(habit["total_completions"], 0);
    assert!(habit["last_completed_at"].is_null());
}

#[tokio::test]
async fn test_list_habits_empty_and_sorted() {
    let app = app();

    let (status, habits) = send(&app, Method::GET, "/api/habits", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(habits, json!([]));

    create(&app, "Idle", "daily").await;
    let busy = create(&app, "Busy", "daily").await;
    send(&app, Method::PATCH, &format!("/api/habits/{}/mark_complete", busy), None).await;

    let (_, habits) = send(&app, Method::GET, "/api/habits", None).await;
    let names: Vec<&str> = habits
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Busy", "Idle"]);
}

#[tokio::test]
async fn test_get_habit_statuses() {
    let app = app();
    let id = create(&app, "Run", "weekly").await;

    let (status, habit) = send(&app, Method::GET, &format!("/api/habits/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(habit["name"], "Run");

    let (status, body) = send(&app, Method::GET, "/api/habits/not-an-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid habit ID");

    let missing = HabitId::new();
    let (status, _) = send(&app, Method::GET, &format!("/api/habits/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_habit_statuses() {
    let app = app();
    let id = create(&app, "Run", "weekly").await;
    let uri = format!("/api/habits/{}", id);

    let (status, habit) = send(&app, Method::PUT, &uri, Some(r#"{"name": "Sprint", "frequency": "daily"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(habit["name"], "Sprint");
    assert_eq!(habit["frequency"], "daily");

    let (status, _) = send(&app, Method::PUT, "/api/habits/abc", Some(r#"{"name": "x", "frequency": "daily"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PUT, &uri, Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PUT, &uri, Some(r#"{"name": "", "frequency": "daily"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let missing = format!("/api/habits/{}", HabitId::new());
    let (status, _) = send(&app, Method::PUT, &missing, Some(r#"{"name": "x", "frequency": "daily"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_delete_habit_statuses() {
    let app = app();
    let id = create(&app, "Floss", "daily").await;
    let uri = format!("/api/habits/{}", id);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Habit deleted");

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(&app, Method::DELETE, "/api/habits/12", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mark_complete() {
    let app = app();
    let id = create(&app, "Journal", "daily").await;
    let uri = format!("/api/habits/{}/mark_complete", id);

    let (status, body) = send(&app, Method::PATCH, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transition"], "started");
    assert_eq!(body["current_streak"], 1);
    assert_eq!(body["total_completions"], 1);

    let (_, body) = send(&app, Method::PATCH, &uri, None).await;
    assert_eq!(body["transition"], "continued");
    assert_eq!(body["current_streak"], 2);
    assert_eq!(body["total_completions"], 2);

    let (status, _) = send(&app, Method::PATCH, "/api/habits/nope/mark_complete", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = format!("/api/habits/{}/mark_complete", HabitId::new());
    let (status, body) = send(&app, Method::PATCH, &missing, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Habit not found");
}

#[tokio::test]
async fn test_streaks_listing() {
    let app = app();
    create(&app, "Never done", "daily").await;
    let once = create(&app, "Once", "monthly").await;
    let twice = create(&app, "Twice", "monthly").await;

    for id in [&once, &twice, &twice] {
        send(&app, Method::PATCH, &format!("/api/habits/{}/mark_complete", id), None).await;
    }

    for path in ["/api/habits/streaks", "/api/habits/with_streaks"] {
        let (status, habits) = send(&app, Method::GET, path, None).await;
        assert_eq!(status, StatusCode::OK);

        let streaks: Vec<(String, u64)> = habits
            .as_array()
            .unwrap()
            .iter()
            .map(|h| (h["name"].as_str().unwrap().to_string(), h["current_streak"].as_u64().unwrap()))
            .collect();
        assert_eq!(streaks, vec![("Twice".to_string(), 2), ("Once".to_string(), 1)]);
    }
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
