//! End-to-end tests for the HTTP surface, driven through the router with `oneshot`.
#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;

use availability::db::repository::AvailabilityRepository;
use availability::db::LocalRepository;
use availability::http::{create_router, AppState};
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn local_app() -> Router {
    let repo: Arc<dyn AvailabilityRepository> = Arc::new(LocalRepository::new());
    create_router(AppState::new(repo))
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    TestResponse {
        status,
        headers,
        body,
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/availability")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn create(app: &Router, user: &str, day: &str, slot: &str) -> Value {
    let body = format!("user_id={}&day={}&time_slot={}", user, day, slot);
    let response = send(app, post_form(&body)).await;
    assert_eq!(response.status, StatusCode::OK);
    response.json()
}

// =========================================================
// Create
// =========================================================

#[tokio::test]
async fn test_create_returns_stored_entry() {
    let app = local_app();
    let created = create(&app, "alice", "Mon", "AM").await;

    assert_eq!(
        created,
        json!({"id": 1, "user_id": "alice", "day": "Mon", "time_slot": "AM"})
    );
}

#[tokio::test]
async fn test_create_decodes_form_encoding() {
    let app = local_app();
    let created = create(&app, "alice", "Mon+Morning", "early%2Flate").await;

    assert_eq!(created["day"], "Mon Morning");
    assert_eq!(created["time_slot"], "early/late");
}

#[tokio::test]
async fn test_create_missing_field_is_unprocessable() {
    let app = local_app();
    let response = send(&app, post_form("user_id=alice&day=Mon")).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.json()["detail"].is_string());
}

#[tokio::test]
async fn test_create_empty_field_is_unprocessable() {
    let app = local_app();
    let response = send(&app, post_form("user_id=alice&day=&time_slot=AM")).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json(), json!({"detail": "day must not be empty"}));

    let listed = send(&app, get("/api/availability/alice")).await;
    assert_eq!(listed.json(), json!([]));
}

// =========================================================
// List by user
// =========================================================

#[tokio::test]
async fn test_list_user_sorted_and_filtered() {
    let app = local_app();
    create(&app, "alice", "Tue", "AM").await;
    create(&app, "alice", "Mon", "PM").await;
    create(&app, "bob", "Mon", "AM").await;
    create(&app, "alice", "Mon", "AM").await;

    let response = send(&app, get("/api/availability/alice")).await;
    assert_eq!(response.status, StatusCode::OK);

    let shifts: Vec<(String, String)> = response
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|e| {
            assert_eq!(e["user_id"], "alice");
            (
                e["day"].as_str().unwrap().to_string(),
                e["time_slot"].as_str().unwrap().to_string(),
            )
        })
        .collect();

    assert_eq!(
        shifts,
        vec![
            ("Mon".to_string(), "AM".to_string()),
            ("Mon".to_string(), "PM".to_string()),
            ("Tue".to_string(), "AM".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_list_unknown_user_is_empty_array() {
    let app = local_app();
    let response = send(&app, get("/api/availability/nobody")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!([]));
}

// =========================================================
// On-call lookup
// =========================================================

#[tokio::test]
async fn test_on_call_lists_users_with_duplicates() {
    let app = local_app();
    create(&app, "carol", "Wed", "night").await;
    create(&app, "alice", "Wed", "night").await;
    create(&app, "carol", "Wed", "night").await;
    create(&app, "bob", "Wed", "day").await;

    let response = send(&app, get("/api/availability/Wed/night")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!([{"on-call": "carol"}, {"on-call": "alice"}, {"on-call": "carol"}])
    );
}

#[tokio::test]
async fn test_on_call_path_segments_are_decoded() {
    let app = local_app();
    create(&app, "dana", "Mon+Morning", "AM").await;

    let response = send(&app, get("/api/availability/Mon%20Morning/AM")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!([{"on-call": "dana"}]));
}

#[tokio::test]
async fn test_on_call_unoccupied_is_not_found() {
    let app = local_app();
    create(&app, "alice", "Mon", "AM").await;

    let response = send(&app, get("/api/availability/Mon/PM")).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json(), json!({"detail": "Shift is unoccupied"}));
}

// =========================================================
// Delete
// =========================================================

#[tokio::test]
async fn test_delete_confirms_and_removes() {
    let app = local_app();
    let created = create(&app, "alice", "Mon", "AM").await;
    let id = created["id"].as_i64().unwrap();

    let response = send(&app, delete(&format!("/api/availability/{}", id))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"ok": true, "deleted_id": id}));

    let again = send(&app, delete(&format!("/api/availability/{}", id))).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.json(), json!({"detail": "Shift not found"}));

    let listed = send(&app, get("/api/availability/alice")).await;
    assert_eq!(listed.json(), json!([]));
}

#[tokio::test]
async fn test_delete_only_removes_target() {
    let app = local_app();
    let first = create(&app, "alice", "Mon", "AM").await;
    let second = create(&app, "alice", "Mon", "PM").await;

    let uri = format!("/api/availability/{}", first["id"]);
    assert_eq!(send(&app, delete(&uri)).await.status, StatusCode::OK);

    let listed = send(&app, get("/api/availability/alice")).await;
    assert_eq!(listed.json(), json!([second]));
}

#[tokio::test]
async fn test_delete_non_integer_id_is_unprocessable() {
    let app = local_app();
    let response = send(&app, delete("/api/availability/alice")).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.json()["detail"].is_string());
}

#[tokio::test]
async fn test_deleted_ids_are_not_reused() {
    let app = local_app();
    let first = create(&app, "alice", "Mon", "AM").await;
    let uri = format!("/api/availability/{}", first["id"]);
    send(&app, delete(&uri)).await;

    let second = create(&app, "alice", "Mon", "AM").await;
    assert!(second["id"].as_i64().unwrap() > first["id"].as_i64().unwrap());
}

// =========================================================
// Frontend, health and fallbacks
// =========================================================

#[tokio::test]
async fn test_root_redirects_to_frontend() {
    let app = local_app();
    let response = send(&app, get("/")).await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(
        response.headers.get(header::LOCATION).unwrap(),
        "/static/index.html"
    );
}

#[tokio::test]
async fn test_static_files_are_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>rota</h1>").unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log('rota');").unwrap();

    let repo: Arc<dyn AvailabilityRepository> = Arc::new(LocalRepository::new());
    let app = create_router(AppState::new(repo).with_static_dir(dir.path()));

    let index = send(&app, get("/static/index.html")).await;
    assert_eq!(index.status, StatusCode::OK);
    assert_eq!(index.body, b"<h1>rota</h1>");

    let script = send(&app, get("/static/app.js")).await;
    assert_eq!(script.status, StatusCode::OK);

    let missing = send(&app, get("/static/missing.css")).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_connected() {
    let app = local_app();
    let response = send(&app, get("/health")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({"status": "ok", "database": "connected"})
    );
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = local_app();
    let response = send(&app, get("/api/rota")).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json(), json!({"detail": "Not Found"}));
}

// =========================================================
// CORS
// =========================================================

#[tokio::test]
async fn test_cors_mirrors_origin_with_credentials() {
    let app = local_app();
    let request = Request::builder()
        .uri("/api/availability/alice")
        .header(header::ORIGIN, "http://rota.example")
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response
            .headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://rota.example"
    );
    assert_eq!(
        response
            .headers
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_cors_preflight_allows_delete() {
    let app = local_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/availability/1")
        .header(header::ORIGIN, "http://rota.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-requested-with")
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;

    assert!(response.status.is_success());
    assert_eq!(
        response
            .headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap(),
        "DELETE"
    );
    assert_eq!(
        response
            .headers
            .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
            .unwrap(),
        "x-requested-with"
    );
}

// =========================================================
// SQLite-backed round trip
// =========================================================

#[cfg(feature = "sqlite-repo")]
#[tokio::test]
async fn test_full_flow_over_sqlite() {
    use availability::db::SqliteRepository;

    let dir = tempfile::tempdir().unwrap();
    let repo = SqliteRepository::new(support::scratch_sqlite_config(&dir, "http.db")).unwrap();
    let repo: Arc<dyn AvailabilityRepository> = Arc::new(repo);
    let app = create_router(AppState::new(repo));

    let created = create(&app, "erin", "Sun", "PM").await;
    let id = created["id"].as_i64().unwrap();

    let on_call = send(&app, get("/api/availability/Sun/PM")).await;
    assert_eq!(on_call.json(), json!([{"on-call": "erin"}]));

    let deleted = send(&app, delete(&format!("/api/availability/{}", id))).await;
    assert_eq!(deleted.json(), json!({"ok": true, "deleted_id": id}));

    let empty = send(&app, get("/api/availability/Sun/PM")).await;
    assert_eq!(empty.status, StatusCode::NOT_FOUND);
    assert_eq!(empty.json(), json!({"detail": "Shift is unoccupied"}));
}
