//! Integration tests for the tutorials API
//!
//! These tests drive the full router against a temporary database:
//! - HTTP routing
//! - Request/response handling
//! - Database operations
//! - Error handling

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use tower::ServiceExt;

use tutorials::database::TutorialStore;
use tutorials::route::create_app;
use tutorials::state::AppState;
use tutorials::weather::WeatherClient;

/// Helper function to create a test application with a temporary database
fn setup_test_app() -> (axum::Router, NamedTempFile) {
    let temp_db = NamedTempFile::new().expect("Failed to create temp file");
    let store = TutorialStore::open(temp_db.path()).expect("Failed to initialize test database");

    let state = AppState {
        store,
        weather: WeatherClient::new("http://127.0.0.1:9", "unused"),
    };

    (create_app(state), temp_db)
}

/// Sends one request and returns the status, headers and JSON body
///
/// Non-JSON bodies come back as `Value::Null`.
async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, axum::http::HeaderMap, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(payload) => {
            request = request.header("content-type", "application/json");
            Body::from(payload.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, headers, json)
}

/// Creates a tutorial and returns its JSON representation
async fn create(app: &axum::Router, payload: Value) -> Value {
    let (status, _, body) = send(app, "POST", "/api/tutorials", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_welcome() {
    let (app, _temp_db) = setup_test_app();

    let (status, _, body) = send(&app, "GET", "/api", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to tutorial API.");
}

#[tokio::test]
async fn test_create_tutorial_generates_id_and_zero_counters() {
    let (app, _temp_db) = setup_test_app();

    let (status, headers, body) = send(
        &app,
        "POST",
        "/api/tutorials",
        Some(json!({
            "title": "Getting Started with Docker",
            "author": "Robert Martinez",
            "category": "DevOps",
            "readTime": 15
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().expect("id is a string");
    assert!(uuid::Uuid::parse_str(id).is_ok());
    assert_eq!(
        headers[header::LOCATION].to_str().unwrap(),
        format!("/api/tutorials/{id}")
    );

    assert_eq!(body["title"], "Getting Started with Docker");
    assert_eq!(body["readTime"], 15);
    assert_eq!(body["published"], false);
    assert_eq!(body["difficulty"], "Beginner");
    assert_eq!(body["viewCount"], 0);
    assert_eq!(body["likes"], 0);
    assert_eq!(body["createdAt"], body["updatedAt"]);

    // Round trip through GET
    let (status, _, fetched) = send(&app, "GET", &format!("/api/tutorials/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn test_create_tutorial_ids_are_unique() {
    let (app, _temp_db) = setup_test_app();

    let first = create(&app, json!({ "title": "Same" })).await;
    let second = create(&app, json!({ "title": "Same" })).await;

    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn test_create_tutorial_requires_title() {
    let (app, _temp_db) = setup_test_app();

    let (status, _, body) = send(&app, "POST", "/api/tutorials", Some(json!({ "title": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Title"));

    let (status, _, _) = send(&app, "POST", "/api/tutorials", Some(json!({ "author": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_tutorial_rejects_oversized_fields() {
    let (app, _temp_db) = setup_test_app();

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/tutorials",
        Some(json!({ "title": "ok", "author": "a".repeat(101) })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("author"));
}

#[tokio::test]
async fn test_get_unknown_tutorial_returns_404() {
    let (app, _temp_db) = setup_test_app();
    let id = uuid::Uuid::new_v4();

    let (status, _, body) = send(&app, "GET", &format!("/api/tutorials/{id}"), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("Cannot find Tutorial with id={id}."));
}

#[tokio::test]
async fn test_malformed_id_is_rejected() {
    let (app, _temp_db) = setup_test_app();

    let (status, _, body) = send(&app, "GET", "/api/tutorials/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    for (method, uri) in [
        ("DELETE", "/api/tutorials/not-a-uuid"),
        ("POST", "/api/tutorials/not-a-uuid/view"),
        ("POST", "/api/tutorials/not-a-uuid/like"),
    ] {
        let (status, _, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert!(body["message"].is_string(), "{method} {uri}");
    }
}

#[tokio::test]
async fn test_mistyped_body_is_rejected_with_json_message() {
    let (app, _temp_db) = setup_test_app();

    for payload in [
        json!({ "title": 5 }),
        json!({ "title": "A", "readTime": "x" }),
        json!({ "title": "A", "difficulty": "expert" }),
        json!({ "title": "A", "difficulty": 7 }),
    ] {
        let (status, _, body) = send(&app, "POST", "/api/tutorials", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
        assert!(body["message"].is_string(), "{payload}");
    }

    let created = create(&app, json!({ "title": "Typed" })).await;
    let id = created["id"].as_str().unwrap();
    let (status, _, body) = send(
        &app,
        "PUT",
        &format!("/api/tutorials/{id}"),
        Some(json!({ "published": "yes" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_unparseable_body_is_rejected_with_json_message() {
    let (app, _temp_db) = setup_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/tutorials")
                .header("content-type", "application/json")
                .body(Body::from("{\"title\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_create_accepts_lenient_difficulty() {
    let (app, _temp_db) = setup_test_app();

    let by_name = create(&app, json!({ "title": "A", "difficulty": "intermediate" })).await;
    assert_eq!(by_name["difficulty"], "Intermediate");

    let by_ordinal = create(&app, json!({ "title": "B", "difficulty": 2 })).await;
    assert_eq!(by_ordinal["difficulty"], "Advanced");

    let id = by_ordinal["id"].as_str().unwrap();
    let (status, _, _) = send(
        &app,
        "PUT",
        &format!("/api/tutorials/{id}"),
        Some(json!({ "difficulty": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, fetched) = send(&app, "GET", &format!("/api/tutorials/{id}"), None).await;
    assert_eq!(fetched["difficulty"], "Beginner");
}

#[tokio::test]
async fn test_partial_update_changes_only_supplied_fields() {
    let (app, _temp_db) = setup_test_app();

    let created = create(
        &app,
        json!({
            "title": "Original title",
            "description": "Original description",
            "author": "Ann",
            "tags": "a,b",
            "difficulty": "Advanced"
        }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let (status, _, body) = send(
        &app,
        "PUT",
        &format!("/api/tutorials/{id}"),
        Some(json!({ "description": "New description", "published": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Tutorial was updated successfully.");

    let (_, _, updated) = send(&app, "GET", &format!("/api/tutorials/{id}"), None).await;
    assert_eq!(updated["description"], "New description");
    assert_eq!(updated["published"], true);

    assert_eq!(updated["title"], "Original title");
    assert_eq!(updated["author"], "Ann");
    assert_eq!(updated["tags"], "a,b");
    assert_eq!(updated["difficulty"], "Advanced");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let before: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(created["updatedAt"].clone()).unwrap();
    let after: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(updated["updatedAt"].clone()).unwrap();
    assert!(after > before);
}

#[tokio::test]
async fn test_update_with_empty_title_keeps_title() {
    let (app, _temp_db) = setup_test_app();

    let created = create(&app, json!({ "title": "Keep me" })).await;
    let id = created["id"].as_str().unwrap();

    let (status, _, _) = send(
        &app,
        "PUT",
        &format!("/api/tutorials/{id}"),
        Some(json!({ "title": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, fetched) = send(&app, "GET", &format!("/api/tutorials/{id}"), None).await;
    assert_eq!(fetched["title"], "Keep me");
}

#[tokio::test]
async fn test_update_rejects_invalid_fields() {
    let (app, _temp_db) = setup_test_app();

    let created = create(&app, json!({ "title": "Valid", "readTime": 10 })).await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/api/tutorials/{id}");

    let (status, _, body) =
        send(&app, "PUT", &uri, Some(json!({ "title": "x".repeat(201) }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "The field title must be a string with a maximum length of 200."
    );

    let (status, _, body) = send(&app, "PUT", &uri, Some(json!({ "readTime": -1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The field readTime must not be negative.");

    // Rejected updates leave the row untouched
    let (_, _, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(fetched["title"], "Valid");
    assert_eq!(fetched["readTime"], 10);
    assert_eq!(fetched["updatedAt"], created["updatedAt"]);
}

#[tokio::test]
async fn test_update_unknown_tutorial_returns_404() {
    let (app, _temp_db) = setup_test_app();
    let id = uuid::Uuid::new_v4();

    let (status, _, body) = send(
        &app,
        "PUT",
        &format!("/api/tutorials/{id}"),
        Some(json!({ "title": "x" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        format!("Cannot update Tutorial with id={id}. Tutorial was not found!")
    );
}

#[tokio::test]
async fn test_view_and_like_increment_by_one() {
    let (app, _temp_db) = setup_test_app();

    let created = create(&app, json!({ "title": "Counters" })).await;
    let id = created["id"].as_str().unwrap();

    for expected in 1..=3 {
        let (status, _, body) =
            send(&app, "POST", &format!("/api/tutorials/{id}/view"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "View count updated successfully.");
        assert_eq!(body["viewCount"], expected);
    }

    for expected in 1..=2 {
        let (status, _, body) =
            send(&app, "POST", &format!("/api/tutorials/{id}/like"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["likes"], expected);
    }

    let (_, _, fetched) = send(&app, "GET", &format!("/api/tutorials/{id}"), None).await;
    assert_eq!(fetched["viewCount"], 3);
    assert_eq!(fetched["likes"], 2);
}

#[tokio::test]
async fn test_view_and_like_refresh_updated_at() {
    let (app, _temp_db) = setup_test_app();

    let created = create(&app, json!({ "title": "Timestamps" })).await;
    let id = created["id"].as_str().unwrap();
    let updated_at = |value: &Value| -> chrono::DateTime<chrono::Utc> {
        serde_json::from_value(value["updatedAt"].clone()).unwrap()
    };
    let created_at = updated_at(&created);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    send(&app, "POST", &format!("/api/tutorials/{id}/view"), None).await;
    let (_, _, viewed) = send(&app, "GET", &format!("/api/tutorials/{id}"), None).await;
    let after_view = updated_at(&viewed);
    assert!(after_view > created_at);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    send(&app, "POST", &format!("/api/tutorials/{id}/like"), None).await;
    let (_, _, liked) = send(&app, "GET", &format!("/api/tutorials/{id}"), None).await;
    assert!(updated_at(&liked) > after_view);

    assert_eq!(liked["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_view_and_like_unknown_tutorial_return_404() {
    let (app, _temp_db) = setup_test_app();
    let id = uuid::Uuid::new_v4();

    let (status, _, _) = send(&app, "POST", &format!("/api/tutorials/{id}/view"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, "POST", &format!("/api/tutorials/{id}/like"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_likes_are_not_lost() {
    let (app, _temp_db) = setup_test_app();

    let created = create(&app, json!({ "title": "Popular" })).await;
    let id = created["id"].as_str().unwrap().to_string();

    let mut handles = Vec::new();
    for _ in 0..20 {
        let app = app.clone();
        let uri = format!("/api/tutorials/{id}/like");
        handles.push(tokio::spawn(async move {
            send(&app, "POST", &uri, None).await.0
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let (_, _, fetched) = send(&app, "GET", &format!("/api/tutorials/{id}"), None).await;
    assert_eq!(fetched["likes"], 20);
}

#[tokio::test]
async fn test_delete_tutorial() {
    let (app, _temp_db) = setup_test_app();

    let created = create(&app, json!({ "title": "Short lived" })).await;
    let id = created["id"].as_str().unwrap();

    let (status, _, body) = send(&app, "DELETE", &format!("/api/tutorials/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Tutorial was deleted successfully!");

    let (status, _, _) = send(&app, "GET", &format!("/api/tutorials/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_tutorial_returns_404() {
    let (app, _temp_db) = setup_test_app();
    let id = uuid::Uuid::new_v4();

    let (status, _, body) = send(&app, "DELETE", &format!("/api/tutorials/{id}"), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        format!("Cannot delete Tutorial with id={id}. Tutorial was not found!")
    );
}

#[tokio::test]
async fn test_delete_all_tutorials() {
    let (app, _temp_db) = setup_test_app();

    for title in ["One", "Two", "Three"] {
        create(&app, json!({ "title": title })).await;
    }

    let (status, _, body) = send(&app, "DELETE", "/api/tutorials", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "3 Tutorials were deleted successfully!");

    let (_, _, list) = send(&app, "GET", "/api/tutorials", None).await;
    assert_eq!(list.as_array().unwrap().len(), 0);

    let (_, _, body) = send(&app, "DELETE", "/api/tutorials", None).await;
    assert_eq!(body["message"], "0 Tutorials were deleted successfully!");
}

#[tokio::test]
async fn test_list_filters_by_title_and_sorts_by_updated_at() {
    let (app, _temp_db) = setup_test_app();

    let react = create(&app, json!({ "title": "Learning React" })).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    create(&app, json!({ "title": "Learning Rust" })).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    create(&app, json!({ "title": "React Native basics" })).await;

    let (status, _, list) = send(&app, "GET", "/api/tutorials", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["React Native basics", "Learning Rust", "Learning React"]
    );

    let (_, _, filtered) = send(&app, "GET", "/api/tutorials?title=React", None).await;
    assert_eq!(filtered.as_array().unwrap().len(), 2);

    // Substring match is case-sensitive
    let (_, _, none) = send(&app, "GET", "/api/tutorials?title=react", None).await;
    assert_eq!(none.as_array().unwrap().len(), 0);

    // Empty filter means no filter
    let (_, _, all) = send(&app, "GET", "/api/tutorials?title=", None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    // Touching the oldest moves it to the front
    let id = react["id"].as_str().unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    send(&app, "POST", &format!("/api/tutorials/{id}/view"), None).await;
    let (_, _, list) = send(&app, "GET", "/api/tutorials", None).await;
    assert_eq!(list[0]["title"], "Learning React");
}

#[tokio::test]
async fn test_list_published_only() {
    let (app, _temp_db) = setup_test_app();

    create(&app, json!({ "title": "Draft" })).await;
    create(&app, json!({ "title": "Live", "published": true })).await;

    let (status, _, list) = send(&app, "GET", "/api/tutorials/published", None).await;

    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"], "Live");
}

#[tokio::test]
async fn test_list_by_difficulty() {
    let (app, _temp_db) = setup_test_app();

    create(&app, json!({ "title": "Easy" })).await;
    create(&app, json!({ "title": "Hard", "difficulty": "Advanced" })).await;
    create(&app, json!({ "title": "Unrated", "difficulty": null })).await;

    let (status, _, list) = send(&app, "GET", "/api/tutorials/difficulty/Advanced", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["title"], "Hard");

    let (_, _, list) = send(&app, "GET", "/api/tutorials/difficulty/beginner", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["title"], "Easy");

    let (_, _, list) = send(&app, "GET", "/api/tutorials/difficulty/2", None).await;
    assert_eq!(list[0]["title"], "Hard");

    let (status, _, _) = send(&app, "GET", "/api/tutorials/difficulty/expert", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_categories_in_use_are_distinct() {
    let (app, _temp_db) = setup_test_app();

    create(&app, json!({ "title": "A", "category": "DevOps" })).await;
    create(&app, json!({ "title": "B", "category": "Design" })).await;
    create(&app, json!({ "title": "C", "category": "DevOps" })).await;
    create(&app, json!({ "title": "D" })).await;
    create(&app, json!({ "title": "E", "category": "" })).await;

    let (status, _, list) = send(&app, "GET", "/api/tutorials/categories", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!(["Design", "DevOps"]));
}

#[tokio::test]
async fn test_static_category_table() {
    let (app, _temp_db) = setup_test_app();

    let (status, _, list) = send(&app, "GET", "/api/categories", None).await;

    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 11);
    assert_eq!(list[0], json!({ "id": "8", "category": "Backend Development" }));
}
