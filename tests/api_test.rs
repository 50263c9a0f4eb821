//! Integration tests for API endpoints.
//!
//! The full router is driven through `oneshot` with hand-written service
//! fakes, so no database, Redis or vendor API is needed.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{
    EchoChat, FakeAuth, FakeUniversities, FakeUsers, FixedProbe, FixedRateLimit, TestState,
    VALID_TOKEN,
};
use orientation_api::api::create_router;

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, request).await;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn authed_get(uri: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", VALID_TOKEN))
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart(uri: &str, content_type: &str, payload: &[u8]) -> Request<Body> {
    let boundary = "orientation-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"emi.png\"\r\nContent-Type: {ct}\r\n\r\n",
            b = boundary,
            ct = content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::post(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

// =============================================================================
// Root and health
// =============================================================================

#[tokio::test]
async fn test_root_endpoint_returns_welcome_message() {
    let app = create_router(TestState::default().build());

    let (status, body) = send(app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Orientation API");
}

#[tokio::test]
async fn test_health_reports_healthy_dependencies() {
    let app = create_router(TestState::default().build());

    let (status, body) = send_json(app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
    assert_eq!(body["services"]["redis"]["status"], "healthy");
}

#[tokio::test]
async fn test_health_degraded_when_redis_is_down() {
    let state = TestState {
        cache_probe: Arc::new(FixedProbe(Err("connection refused"))),
        ..Default::default()
    };
    let app = create_router(state.build());

    let (status, body) = send_json(app, get("/health")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "healthy");
    assert_eq!(body["services"]["redis"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = create_router(TestState::default().build());

    let (status, body) = send_json(app, get("/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/universities/{id}/image"].is_object());
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_auth_test_endpoint() {
    let app = create_router(TestState::default().build());

    let (status, body) = send_json(app, get("/api/auth/test")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Authentication service is running!");
}

#[tokio::test]
async fn test_auth_routes_are_rate_limited() {
    let state = TestState {
        cache: Arc::new(FixedRateLimit { allowed: false }),
        ..Default::default()
    };
    let app = create_router(state.build());

    let response = app.oneshot(get("/api/auth/test")).await.unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key(header::RETRY_AFTER));
}

#[tokio::test]
async fn test_register_rejects_invalid_fields() {
    let state = TestState {
        auth: Arc::new(FakeAuth::default()),
        ..Default::default()
    };
    let app = create_router(state.build());

    let (status, body) = send_json(
        app,
        post_json(
            "/api/auth/register",
            json!({
                "first_name": "Salma",
                "last_name": "Bennani",
                "email": "not-an-email",
                "password": "abc",
                "current_study_level": "BAC"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["errors"]["email"][0], "Email should be valid");
    assert_eq!(
        body["errors"]["password"][0],
        "Password must be at least 6 characters"
    );
}

#[tokio::test]
async fn test_register_links_back_to_request_host() {
    let auth = Arc::new(FakeAuth::default());
    let state = TestState {
        auth: auth.clone(),
        ..Default::default()
    };
    let app = create_router(state.build());

    let mut request = post_json(
        "/api/auth/register",
        json!({
            "first_name": "Salma",
            "last_name": "Bennani",
            "email": "salma.bennani@example.ma",
            "password": "secret123",
            "current_study_level": "BAC"
        }),
    );
    request
        .headers_mut()
        .insert(header::HOST, "orient.example.ma".parse().unwrap());
    request
        .headers_mut()
        .insert("X-Forwarded-Proto", "https".parse().unwrap());

    let (status, body) = send_json(app, request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "salma.bennani@example.ma");
    assert_eq!(
        auth.base_urls.lock().unwrap().as_slice(),
        ["https://orient.example.ma".to_string()]
    );
}

#[tokio::test]
async fn test_login_unverified_account_is_forbidden() {
    let state = TestState {
        auth: Arc::new(FakeAuth::default()),
        ..Default::default()
    };
    let app = create_router(state.build());

    let (status, body) = send_json(
        app,
        post_json(
            "/api/auth/login",
            json!({"email": "pending@example.ma", "password": "secret123"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "EMAIL_NOT_VERIFIED");
}

#[tokio::test]
async fn test_verify_email_outcomes() {
    let cases = [
        ("good", StatusCode::OK, "Email verified successfully! You can now log in."),
        ("old", StatusCode::BAD_REQUEST, "Invalid or expired verification token."),
        ("used", StatusCode::BAD_REQUEST, "Invalid or expired verification token."),
        ("nope", StatusCode::BAD_REQUEST, "Invalid or expired verification token."),
    ];

    for (token, expected_status, expected_message) in cases {
        let state = TestState {
            auth: Arc::new(FakeAuth::default()),
            ..Default::default()
        };
        let app = create_router(state.build());

        let (status, body) = send_json(
            app,
            get(&format!("/api/auth/verify-email?token={}", token)),
        )
        .await;

        assert_eq!(status, expected_status, "token {}", token);
        assert_eq!(body["message"], expected_message);
    }
}

// =============================================================================
// Users (protected)
// =============================================================================

#[tokio::test]
async fn test_users_require_bearer_token() {
    let state = TestState {
        auth: Arc::new(FakeAuth::default()),
        users: Arc::new(FakeUsers),
        ..Default::default()
    };
    let app = create_router(state.build());

    let (status, body) = send_json(app, get("/api/users/1")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_users_reject_unknown_token() {
    let state = TestState {
        auth: Arc::new(FakeAuth::default()),
        users: Arc::new(FakeUsers),
        ..Default::default()
    };
    let app = create_router(state.build());

    let request = Request::get("/api/users/1")
        .header(header::AUTHORIZATION, "Bearer forged")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send_json(app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_user_with_token() {
    let state = TestState {
        auth: Arc::new(FakeAuth::default()),
        users: Arc::new(FakeUsers),
        ..Default::default()
    };
    let app = create_router(state.build());

    let (status, body) = send_json(app, authed_get("/api/users/1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id_user"], 1);
    assert_eq!(body["current_study_level"], "BAC");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_get_missing_user_is_not_found() {
    let state = TestState {
        auth: Arc::new(FakeAuth::default()),
        users: Arc::new(FakeUsers),
        ..Default::default()
    };
    let app = create_router(state.build());

    let (status, body) = send_json(app, authed_get("/api/users/42")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found with id: 42");
}

#[tokio::test]
async fn test_age_range_must_be_ordered() {
    let state = TestState {
        auth: Arc::new(FakeAuth::default()),
        users: Arc::new(FakeUsers),
        ..Default::default()
    };
    let app = create_router(state.build());

    let (status, body) =
        send_json(app, authed_get("/api/users/age?min_age=25&max_age=18")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_users_by_study_level() {
    let state = TestState {
        auth: Arc::new(FakeAuth::default()),
        users: Arc::new(FakeUsers),
        ..Default::default()
    };
    let app = create_router(state.build());

    let (status, body) = send_json(app, authed_get("/api/users/study-level/BAC")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

// =============================================================================
// Universities
// =============================================================================

#[tokio::test]
async fn test_missing_university_message() {
    let state = TestState {
        universities: Arc::new(FakeUniversities::default()),
        ..Default::default()
    };
    let app = create_router(state.build());

    let (status, body) = send_json(app, get("/api/universities/7")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "University not found with id: 7");
}

#[tokio::test]
async fn test_duplicate_university_is_conflict() {
    let state = TestState {
        universities: Arc::new(FakeUniversities::default()),
        ..Default::default()
    };
    let app = create_router(state.build());

    let (status, body) = send_json(
        app,
        post_json("/api/universities", json!({"name": "EMI", "location": "Rabat"})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "University with name EMI already exists");
}

#[tokio::test]
async fn test_search_universities_by_name() {
    let state = TestState {
        universities: Arc::new(FakeUniversities::default()),
        ..Default::default()
    };
    let app = create_router(state.build());

    let (status, body) = send_json(app, get("/api/universities/search?name=em")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "EMI");
    assert_eq!(body[0]["type"], "Grande École Publique");
}

#[tokio::test]
async fn test_upload_rejects_non_image() {
    let universities = Arc::new(FakeUniversities::default());
    let state = TestState {
        universities: universities.clone(),
        ..Default::default()
    };
    let app = create_router(state.build());

    let (status, body) = send_json(
        app,
        multipart("/api/universities/1/image", "text/plain", b"hello"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Only image files are allowed");
    assert!(universities.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_rejects_empty_file() {
    let state = TestState {
        universities: Arc::new(FakeUniversities::default()),
        ..Default::default()
    };
    let app = create_router(state.build());

    let (status, body) =
        send_json(app, multipart("/api/universities/1/image", "image/png", b"")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Uploaded file is empty");
}

#[tokio::test]
async fn test_upload_image_updates_university() {
    let universities = Arc::new(FakeUniversities::default());
    let state = TestState {
        universities: universities.clone(),
        ..Default::default()
    };
    let app = create_router(state.build());

    let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    let (status, body) =
        send_json(app, multipart("/api/universities/1/image", "image/png", &png)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["image_url"],
        "http://localhost:8080/uploads/universities/1/image.png"
    );
    assert_eq!(
        universities.uploads.lock().unwrap().as_slice(),
        [(1, Some("emi.png".to_string()), png.len())]
    );
}

#[tokio::test]
async fn test_uploaded_files_are_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("universities/1")).unwrap();
    std::fs::write(dir.path().join("universities/1/logo.png"), b"png-bytes").unwrap();

    let state = TestState {
        upload_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let app = create_router(state.build());

    let (status, body) = send(app, get("/uploads/universities/1/logo.png")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"png-bytes");
}

// =============================================================================
// Filières
// =============================================================================

#[tokio::test]
async fn test_deadline_after_rejects_bad_date() {
    let app = create_router(TestState::default().build());

    let (status, _) = send(app, get("/api/filieres/deadline-after?date=next-week")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Chat
// =============================================================================

#[tokio::test]
async fn test_chat_returns_reply() {
    let state = TestState {
        chat: Arc::new(EchoChat),
        ..Default::default()
    };
    let app = create_router(state.build());

    let (status, body) = send_json(
        app,
        post_json(
            "/api/chat",
            json!({"message": "Bonjour", "provider": "gemini"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "[gemini] Bonjour");
}

#[tokio::test]
async fn test_chat_rejects_empty_message() {
    let state = TestState {
        chat: Arc::new(EchoChat),
        ..Default::default()
    };
    let app = create_router(state.build());

    let (status, body) = send_json(app, post_json("/api/chat", json!({"message": ""}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_chat_is_rate_limited() {
    let state = TestState {
        chat: Arc::new(EchoChat),
        cache: Arc::new(FixedRateLimit { allowed: false }),
        ..Default::default()
    };
    let app = create_router(state.build());

    let (status, _) = send(app, post_json("/api/chat", json!({"message": "Bonjour"}))).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}
