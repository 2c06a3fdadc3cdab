//! End-to-end tests of the client against an in-process server.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use api::models::{CollegeInput, LoginRequest};
use api::services::{auth, colleges, posts, users};
use api::{AdminConfig, ApiClient, ApiError, ListParams};
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use store::{MemorySessionStore, SessionStore};

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

async fn me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match bearer(&headers) {
        Some("good") => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": "Profile",
                "data": {"_id": "u1", "name": "Root", "email": "root@campus.edu", "role": "admin"}
            })),
        ),
        Some("student") => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "data": {"_id": "u2", "email": "kid@campus.edu", "role": "student"}
            })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"statusCode": 401, "message": "jwt expired"})),
        ),
    }
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": "Logged in",
                "data": {"accessToken": "good", "user": {"_id": "u1", "email": "root@campus.edu", "role": "admin"}}
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        )
    }
}

async fn list_colleges(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    let name = q.get("search").cloned().unwrap_or_else(|| "MIT".to_string());
    let page: u32 = q.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: u32 = q.get("limit").and_then(|p| p.parse().ok()).unwrap_or(10);
    Json(json!({
        "status": "success",
        "message": "Colleges fetched",
        "data": {
            "colleges": [{"_id": "c1", "name": name}],
            "total": 12,
            "page": page,
            "limit": limit
        }
    }))
}

async fn create_college(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["name"].as_str().unwrap_or("").is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "statusCode": 400,
                "message": ["name should not be empty"],
                "code": "VALIDATION_FAILED",
                "errors": {"name": "required"}
            })),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "statusCode": 201,
            "message": "Created",
            "data": {"_id": "new", "name": body["name"]},
            "timestamp": "2024-03-01T12:00:00Z",
            "path": "/api/v1/colleges/createCollege"
        })),
    )
}

async fn verify(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if bearer(&headers) == Some("good") {
        (StatusCode::OK, Json(json!({"status": "success", "data": {"valid": true}})))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"message": "invalid token"})))
    }
}

async fn get_college(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id != "c1" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"statusCode": 404, "message": "College not found"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "data": {"_id": "c1", "name": "MIT", "description": "desc", "isActive": true}
        })),
    )
}

async fn get_post(Path(id): Path<String>) -> Json<Value> {
    Json(json!({
        "status": "success",
        "data": {
            "_id": id,
            "user": {"_id": "u3", "name": "Ada"},
            "text": "Hello campus",
            "status": "flagged",
            "reportsCount": 2
        }
    }))
}

async fn get_user(Path(id): Path<String>) -> Json<Value> {
    Json(json!({
        "status": "success",
        "data": {"id": id, "email": "ada@campus.edu", "role": "faculty", "status": "suspended"}
    }))
}

async fn delete_college(Path(id): Path<String>) -> Json<Value> {
    Json(json!({"status": "success", "message": format!("Deleted {id}"), "data": null}))
}

async fn spawn_server() -> String {
    let app = Router::new()
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/verify", get(verify))
        .route("/api/v1/colleges/getCollegeById/{id}", get(get_college))
        .route("/api/v1/post/{id}", get(get_post))
        .route("/api/v1/users/{id}", get(get_user))
        .route("/api/v1/colleges/getAllColleges", get(list_colleges))
        .route("/api/v1/colleges/createCollege", post(create_college))
        .route(
            "/api/v1/colleges/deleteCollegeById/{id}",
            delete(delete_college),
        )
        .route(
            "/api/v1/boom",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream down") }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api/v1")
}

fn client_for(base: &str, session: Arc<MemorySessionStore>) -> ApiClient {
    let config = AdminConfig::default().with_base_url_override(Some(base));
    ApiClient::new(&config, session)
}

fn counting_hook() -> (api::UnauthorizedHook, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = count.clone();
    let hook: api::UnauthorizedHook = Arc::new(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    (hook, count)
}

#[tokio::test]
async fn test_me_sends_bearer_token() {
    let base = spawn_server().await;
    let session = Arc::new(MemorySessionStore::with_token("good"));
    let client = client_for(&base, session);

    let user = auth::me(&client).await.unwrap();
    assert_eq!(user.id, "u1");
    assert!(user.is_admin());
}

#[tokio::test]
async fn test_401_clears_token_and_runs_hook() {
    let base = spawn_server().await;
    let session = Arc::new(MemorySessionStore::with_token("expired"));
    let (hook, calls) = counting_hook();
    let client = client_for(&base, session.clone()).with_unauthorized_hook(hook);

    let err = auth::me(&client).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "jwt expired");
    assert!(!session.is_authenticated());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_login_does_not_redirect() {
    let base = spawn_server().await;
    let session = Arc::new(MemorySessionStore::new());
    let (hook, calls) = counting_hook();
    let client = client_for(&base, session.clone()).with_unauthorized_hook(hook);

    let err = auth::login(
        &client,
        &LoginRequest {
            email: "root@campus.edu".into(),
            password: "wrong".into(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_login_stores_token() {
    let base = spawn_server().await;
    let session = Arc::new(MemorySessionStore::new());
    let client = client_for(&base, session.clone());

    let response = auth::login(
        &client,
        &LoginRequest {
            email: "root@campus.edu".into(),
            password: "secret".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(response.token, "good");
    assert_eq!(session.token().as_deref(), Some("good"));

    // The stored token is used by the next request.
    assert!(auth::me(&client).await.unwrap().is_admin());
}

#[tokio::test]
async fn test_login_validates_locally() {
    let session = Arc::new(MemorySessionStore::new());
    // Nothing listens here; validation must fail before any request.
    let client = client_for("http://127.0.0.1:9/api/v1", session);
    let err = auth::login(
        &client,
        &LoginRequest {
            email: "not-an-email".into(),
            password: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.field_error("email"), Some("Enter a valid email address"));
    assert_eq!(err.field_error("password"), Some("Password is required"));
}

#[tokio::test]
async fn test_list_passes_params_and_decodes_page() {
    let base = spawn_server().await;
    let client = client_for(&base, Arc::new(MemorySessionStore::with_token("good")));

    let params = ListParams::default()
        .with_page(2)
        .with_limit(5)
        .with_search("Stanford");
    let page = colleges::list(&client, &params).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Stanford");
    assert_eq!(page.page, 2);
    assert_eq!(page.total, 12);
    assert_eq!(page.total_pages(), 3);
}

#[tokio::test]
async fn test_create_error_is_normalised() {
    let base = spawn_server().await;
    let client = client_for(&base, Arc::new(MemorySessionStore::with_token("good")));

    let err = colleges::create(&client, &CollegeInput::default())
        .await
        .unwrap_err();
    match &err {
        ApiError::Http {
            status,
            message,
            code,
            ..
        } => {
            assert_eq!(*status, 400);
            assert_eq!(message, "name should not be empty");
            assert_eq!(code.as_deref(), Some("VALIDATION_FAILED"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.field_error("name"), Some("required"));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_create_decodes_legacy_envelope() {
    let base = spawn_server().await;
    let client = client_for(&base, Arc::new(MemorySessionStore::with_token("good")));

    let input = CollegeInput {
        name: "MIT".into(),
        description: "desc".into(),
        ..CollegeInput::default()
    };
    let college = colleges::create(&client, &input).await.unwrap();
    assert_eq!(college.id, "new");
    assert_eq!(college.name, "MIT");
}

#[tokio::test]
async fn test_delete_accepts_null_data() {
    let base = spawn_server().await;
    let client = client_for(&base, Arc::new(MemorySessionStore::with_token("good")));
    colleges::delete(&client, "c1").await.unwrap();
}

#[tokio::test]
async fn test_server_error_is_retryable() {
    let base = spawn_server().await;
    let client = client_for(&base, Arc::new(MemorySessionStore::new()));

    let err = client.get::<Value>("/boom").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Internal Server Error");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(
        &format!("http://{addr}/api/v1"),
        Arc::new(MemorySessionStore::new()),
    );
    let err = client.get::<Value>("/auth/me").await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_verify_reports_token_validity() {
    let base = spawn_server().await;
    let good = client_for(&base, Arc::new(MemorySessionStore::with_token("good")));
    assert!(auth::verify(&good).await.unwrap());

    let session = Arc::new(MemorySessionStore::with_token("stale"));
    let stale = client_for(&base, session.clone());
    assert!(!auth::verify(&stale).await.unwrap());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_get_college_and_missing_college() {
    let base = spawn_server().await;
    let client = client_for(&base, Arc::new(MemorySessionStore::with_token("good")));

    let college = colleges::get(&client, "c1").await.unwrap();
    assert_eq!(college.name, "MIT");
    assert!(college.is_active);

    let err = colleges::get(&client, "nope").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "College not found");
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_get_post_accepts_field_aliases() {
    let base = spawn_server().await;
    let client = client_for(&base, Arc::new(MemorySessionStore::with_token("good")));

    let post = posts::get(&client, "p1").await.unwrap();
    assert_eq!(post.id, "p1");
    assert_eq!(post.author.display_name(), "Ada");
    assert_eq!(post.content, "Hello campus");
    assert_eq!(post.status, api::models::PostStatus::Flagged);
    assert_eq!(post.reports_count, 2);
}

#[tokio::test]
async fn test_get_user_accepts_plain_id() {
    let base = spawn_server().await;
    let client = client_for(&base, Arc::new(MemorySessionStore::with_token("good")));

    let user = users::get(&client, "u9").await.unwrap();
    assert_eq!(user.id, "u9");
    assert!(!user.is_admin());
    assert_eq!(user.status, api::models::UserStatus::Suspended);
}
