//! Integration tests for the request gateway using wiremock
//!
//! These tests verify the client behavior against mocked endpoints:
//! auth header attachment, response classification, and the 401
//! session-invalidation contract.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lms_client::api::{auth, courses, notifications, quizzes};
use lms_client::{ApiClient, Error, SessionState, SessionStore};

/// Build a client pointed at the mock server, with the usual `/api`
/// prefix in the base address
fn client_for(server: &MockServer) -> (ApiClient, SessionStore) {
    let session = SessionStore::new();
    let client = ApiClient::with_base_url(&format!("{}/api", server.uri()), session.clone())
        .expect("client should build");
    (client, session)
}

/// Test successful GET request returns parsed JSON
#[tokio::test]
async fn test_get_success_returns_json() {
    let server = MockServer::start().await;
    let (client, _session) = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/api/progress/dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_courses": 3,
            "average_progress": 42.5
        })))
        .mount(&server)
        .await;

    let data = client.get("/progress/dashboard").await.expect("should succeed");
    assert_eq!(data["total_courses"], 3);
    assert_eq!(data["average_progress"], 42.5);
}

/// Test the Authorization header carries exactly one Bearer prefix
#[tokio::test]
async fn test_bearer_header_is_exact() {
    let server = MockServer::start().await;
    let (client, session) = client_for(&server);

    session.store_login("secret-token", None).await.unwrap();

    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"username": "alice"})))
        .mount(&server)
        .await;

    let data = auth::profile(&client).await.expect("should succeed");
    assert_eq!(data["username"], "alice");
}

/// Test a stored token that already includes the prefix is not doubled
#[tokio::test]
async fn test_stored_bearer_prefix_not_duplicated() {
    let server = MockServer::start().await;
    let (client, session) = client_for(&server);

    session.store_login("Bearer secret-token", None).await.unwrap();

    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"username": "alice"})))
        .mount(&server)
        .await;

    auth::profile(&client).await.expect("should succeed");
}

/// Test anonymous requests carry no Authorization header
#[tokio::test]
async fn test_anonymous_request_has_no_auth_header() {
    let server = MockServer::start().await;
    let (client, _session) = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    client.get("/courses").await.expect("should succeed");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

/// Test 401 clears the session, notifies subscribers, and yields
/// Unauthorized without returning data
#[tokio::test]
async fn test_401_invalidates_session() {
    let server = MockServer::start().await;
    let (client, session) = client_for(&server);

    session.store_login("expired-token", Some(json!({"username": "alice"}))).await.unwrap();
    let mut state_rx = session.subscribe();
    assert_eq!(*state_rx.borrow_and_update(), SessionState::Authenticated);

    Mock::given(method("GET"))
        .and(path("/api/progress/dashboard"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Token has expired"})))
        .mount(&server)
        .await;

    let err = client.get("/progress/dashboard").await.expect_err("must fail");
    assert!(matches!(err, Error::Unauthorized));

    // Token and user record are gone, subscribers saw the transition
    assert!(session.token().await.is_none());
    assert!(session.user().await.is_none());
    assert_eq!(*state_rx.borrow_and_update(), SessionState::Invalidated);
}

/// Test a non-2xx JSON body with an `error` field surfaces that message
#[tokio::test]
async fn test_api_error_uses_error_field() {
    let server = MockServer::start().await;
    let (client, _session) = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Username already exists"
        })))
        .mount(&server)
        .await;

    let request = auth::RegisterRequest {
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        password: "hunter2".to_string(),
        full_name: "Alice".to_string(),
    };

    let err = auth::register(&client, &request).await.expect_err("must fail");
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Username already exists");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

/// Test a non-2xx JSON body without an `error` field falls back to a
/// status-derived message
#[tokio::test]
async fn test_api_error_without_error_field() {
    let server = MockServer::start().await;
    let (client, _session) = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/api/admin/statistics"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .mount(&server)
        .await;

    let err = client.get("/admin/statistics").await.expect_err("must fail");
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("500"), "unexpected message: {message}");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

/// Test a non-JSON response classifies as Protocol, not a parse crash
#[tokio::test]
async fn test_non_json_response_is_protocol_error() {
    let server = MockServer::start().await;
    let (client, _session) = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>It works!</body></html>", "text/html"),
        )
        .mount(&server)
        .await;

    let err = client.get("/courses").await.expect_err("must fail");
    match err {
        Error::Protocol { status, snippet } => {
            assert_eq!(status, 200);
            assert!(snippet.contains("It works!"));
        }
        other => panic!("expected Protocol error, got {other:?}"),
    }
}

/// Test long non-JSON bodies are truncated in the error snippet
#[tokio::test]
async fn test_protocol_error_snippet_is_truncated() {
    let server = MockServer::start().await;
    let (client, _session) = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ResponseTemplate::new(502).set_body_raw("x".repeat(5000), "text/plain"))
        .mount(&server)
        .await;

    let err = client.get("/courses").await.expect_err("must fail");
    match err {
        Error::Protocol { snippet, .. } => {
            assert!(snippet.contains("truncated"));
            assert!(snippet.len() < 300);
        }
        other => panic!("expected Protocol error, got {other:?}"),
    }
}

/// Test network failure yields Connectivity naming the base address
#[tokio::test]
async fn test_unreachable_backend_is_connectivity_error() {
    // Nothing listens on the discard port
    let base_url = "http://127.0.0.1:9/api";
    let client = ApiClient::with_base_url(base_url, SessionStore::new()).unwrap();

    let err = client.get("/courses").await.expect_err("must fail");
    match &err {
        Error::Connectivity { base_url: named, .. } => {
            assert_eq!(named, base_url);
        }
        other => panic!("expected Connectivity error, got {other:?}"),
    }
    assert!(err.to_string().contains(base_url));
}

/// Test empty success responses come back as JSON null
#[tokio::test]
async fn test_empty_response_is_null() {
    let server = MockServer::start().await;
    let (client, _session) = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/api/lessons/7/complete"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let data = client.post("/lessons/7/complete", None).await.expect("should succeed");
    assert!(data.is_null());
}

/// Test repeated identical GETs return identical parsed results
#[tokio::test]
async fn test_get_is_idempotent() {
    let server = MockServer::start().await;
    let (client, _session) = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/api/quizzes"))
        .and(query_param("course_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"quiz_id": 1, "title": "Basics"}
        ])))
        .mount(&server)
        .await;

    let filter = quizzes::QuizFilter {
        course_id: Some(2),
        topic_id: None,
    };
    let first = quizzes::list(&client, filter).await.expect("should succeed");
    let second = quizzes::list(&client, filter).await.expect("should succeed");
    assert_eq!(first, second);
}

/// Test login stores the token and user record, logout clears both
#[tokio::test]
async fn test_login_logout_lifecycle() {
    let server = MockServer::start().await;
    let (client, session) = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "alice", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "access_token": "fresh-token",
            "user": {"user_id": 1, "username": "alice", "role": "student"}
        })))
        .mount(&server)
        .await;

    auth::login(&client, "alice", "hunter2").await.expect("should succeed");
    assert_eq!(session.token().await.as_deref(), Some("fresh-token"));
    assert_eq!(session.user().await.unwrap()["username"], "alice");
    assert_eq!(session.state(), SessionState::Authenticated);

    auth::logout(&client).await.expect("should succeed");
    assert!(session.token().await.is_none());
    assert!(session.user().await.is_none());
    assert_eq!(session.state(), SessionState::Anonymous);
}

/// Test typed course listing with the enrolled_only filter
#[tokio::test]
async fn test_course_listing_enrolled_filter() {
    let server = MockServer::start().await;
    let (client, _session) = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .and(query_param("enrolled_only", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "course_id": 2,
                "course_name": "Rust Fundamentals",
                "description": "Ownership and borrowing",
                "is_enrolled": true,
                "progress_percentage": 61.5
            }
        ])))
        .mount(&server)
        .await;

    let listing = courses::list(&client, true).await.expect("should succeed");
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].course_name, "Rust Fundamentals");
    assert!(listing[0].is_enrolled);
    assert_eq!(listing[0].progress_percentage, 61.5);
}

/// Test typed notification listing and mark-read round trip
#[tokio::test]
async fn test_notifications_list_and_mark_read() {
    let server = MockServer::start().await;
    let (client, _session) = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/api/notifications/"))
        .and(query_param("unread", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "notification_id": 5,
                "title": "Quiz graded",
                "message": "You scored 90%",
                "notification_type": "quiz",
                "is_read": false,
                "created_at": "2025-11-02T09:30:00"
            }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/notifications/5/read"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&server)
        .await;

    let unread = notifications::list(&client, true).await.expect("should succeed");
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].notification_id, 5);
    assert!(unread[0].created_at.is_some());

    notifications::mark_read(&client, 5).await.expect("should succeed");
}

/// Test POST bodies are serialized as sent
#[tokio::test]
async fn test_post_body_passthrough() {
    let server = MockServer::start().await;
    let (client, _session) = client_for(&server);

    let mut answers = serde_json::Map::new();
    answers.insert("11".to_string(), json!("B"));
    answers.insert("12".to_string(), json!("D"));

    Mock::given(method("POST"))
        .and(path("/api/quizzes/3/submit"))
        .and(body_json(json!({
            "answers": {"11": "B", "12": "D"},
            "time_taken_minutes": 7
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "score": 100.0,
            "correct_answers": 2
        })))
        .mount(&server)
        .await;

    let result = quizzes::submit(&client, 3, &answers, 7).await.expect("should succeed");
    assert_eq!(result["correct_answers"], 2);
}
