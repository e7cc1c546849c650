//! Integration tests for the backend client and priority session
//!
//! Tests cover:
//! - Wire format of both ranked lists and the bearer token header
//! - Non-2xx and transport failures leave the assignment untouched
//! - Hydration from stored lists (unordered, weighted, unknown labels)
//! - Incomplete assignments never reach the backend
//!
//! Each test runs its own axum stub backend on an ephemeral local port.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use priorify_client::{ApiError, HttpPriorityApi, PrioritySession, SubmitError};
use priorify_common::{
    AssignmentStep, Category, CategoryUniverse, CompletionRule, Priority, PriorityAction,
};
use serde_json::{json, Value};

/// Request captured by the stub backend
#[derive(Debug, Clone)]
struct Recorded {
    kind: String,
    body: Value,
    authorization: Option<String>,
    content_type: Option<String>,
}

#[derive(Clone)]
struct StubBackend {
    received: Arc<Mutex<Vec<Recorded>>>,
    /// Status returned for POSTs to this list kind
    fail_kind: Option<(String, StatusCode)>,
    stored_high: Value,
    stored_low: Value,
    get_status: StatusCode,
}

impl Default for StubBackend {
    fn default() -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
            fail_kind: None,
            stored_high: json!([]),
            stored_low: json!([]),
            get_status: StatusCode::OK,
        }
    }
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

async fn save_list(
    State(backend): State<StubBackend>,
    Path(kind): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    backend.received.lock().unwrap().push(Recorded {
        kind: kind.clone(),
        body,
        authorization: header_value(&headers, header::AUTHORIZATION),
        content_type: header_value(&headers, header::CONTENT_TYPE),
    });

    match &backend.fail_kind {
        Some((failing, status)) if *failing == kind => *status,
        _ => StatusCode::OK,
    }
}

async fn load_list(
    State(backend): State<StubBackend>,
    Path(kind): Path<String>,
) -> (StatusCode, Json<Value>) {
    let body = if kind == "high" {
        backend.stored_high.clone()
    } else {
        backend.stored_low.clone()
    };
    (backend.get_status, Json(body))
}

/// Test helper: start stub backend, return its base URL
async fn spawn_backend(backend: StubBackend) -> String {
    let app = Router::new()
        .route("/api/priorities/:kind", post(save_list).get(load_list))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn client(base_url: &str, token: Option<&str>) -> HttpPriorityApi {
    HttpPriorityApi::with_settings(base_url, token, Duration::from_secs(5)).unwrap()
}

fn small_universe() -> CategoryUniverse {
    CategoryUniverse::new(["가사", "취미", "건강"]).unwrap()
}

fn assign_scenario<A: priorify_client::PriorityApi>(session: &mut PrioritySession<A>) {
    session.dispatch(PriorityAction::MoveToHigh {
        category: Category::new("가사"),
        index: None,
    });
    session.dispatch(PriorityAction::MoveToHigh {
        category: Category::new("취미"),
        index: Some(0),
    });
    session.dispatch(PriorityAction::MoveToLow {
        category: Category::new("건강"),
        index: None,
    });
}

// =============================================================================
// Submission Tests
// =============================================================================

#[tokio::test]
async fn test_submit_sends_both_lists() {
    let backend = StubBackend::default();
    let received = backend.received.clone();
    let base_url = spawn_backend(backend).await;

    let mut session = PrioritySession::new(
        small_universe(),
        client(&base_url, Some("test-token")),
        CompletionRule::AtLeastOne,
    );
    assign_scenario(&mut session);
    assert!(session.store().is_complete());

    session.submit().await.unwrap();

    let mut received = received.lock().unwrap().clone();
    received.sort_by(|a, b| a.kind.cmp(&b.kind));
    assert_eq!(received.len(), 2);

    let (high, low) = (&received[0], &received[1]);
    assert_eq!(high.kind, "high");
    assert_eq!(
        high.body,
        json!([{"category": "취미", "rank": 1}, {"category": "가사", "rank": 2}])
    );
    assert_eq!(low.kind, "low");
    assert_eq!(low.body, json!([{"category": "건강", "rank": 1}]));

    for request in &received {
        assert_eq!(request.authorization.as_deref(), Some("Bearer test-token"));
        assert!(request
            .content_type
            .as_deref()
            .unwrap_or_default()
            .starts_with("application/json"));
    }

    // Successful submit ends the screen
    assert!(session.store().high().is_empty());
    assert!(session.store().low().is_empty());
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let backend = StubBackend::default();
    let received = backend.received.clone();
    let base_url = spawn_backend(backend).await;

    let mut session =
        PrioritySession::new(small_universe(), client(&base_url, None), CompletionRule::AtLeastOne);
    assign_scenario(&mut session);
    session.submit().await.unwrap();

    assert!(received
        .lock()
        .unwrap()
        .iter()
        .all(|r| r.authorization.is_none()));
}

#[tokio::test]
async fn test_server_error_keeps_assignment() {
    let backend = StubBackend {
        fail_kind: Some(("low".to_string(), StatusCode::INTERNAL_SERVER_ERROR)),
        ..StubBackend::default()
    };
    let base_url = spawn_backend(backend).await;

    let mut session =
        PrioritySession::new(small_universe(), client(&base_url, None), CompletionRule::AtLeastOne);
    assign_scenario(&mut session);
    let before = session.store().state().clone();

    let result = session.submit().await;

    assert!(matches!(
        result,
        Err(SubmitError::Api(ApiError::Status(500, _)))
    ));
    assert_eq!(session.store().state(), &before);
    assert!(!session.is_submitting());
}

#[tokio::test]
async fn test_unreachable_backend_reports_network_error() {
    // Reserve a port, then close it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let mut session =
        PrioritySession::new(small_universe(), client(&base_url, None), CompletionRule::AtLeastOne);
    assign_scenario(&mut session);
    let before = session.store().state().clone();

    let result = session.submit().await;

    assert!(matches!(result, Err(SubmitError::Api(ApiError::Network(_)))));
    assert_eq!(session.store().state(), &before);
}

#[tokio::test]
async fn test_incomplete_assignment_not_sent() {
    let backend = StubBackend::default();
    let received = backend.received.clone();
    let base_url = spawn_backend(backend).await;

    let mut session =
        PrioritySession::new(small_universe(), client(&base_url, None), CompletionRule::AtLeastOne);
    session.dispatch(PriorityAction::MoveToHigh {
        category: Category::new("가사"),
        index: None,
    });

    let result = session.submit().await;

    assert_eq!(result, Err(SubmitError::Incomplete(AssignmentStep::Low)));
    assert!(received.lock().unwrap().is_empty());
    assert_eq!(session.store().high().len(), 1);
}

// =============================================================================
// Hydration Tests
// =============================================================================

#[tokio::test]
async fn test_hydrate_normalizes_stored_lists() {
    let backend = StubBackend {
        stored_high: json!([
            {"category": "취미", "rank": 3, "weight": 1.2},
            {"category": "자기개발", "rank": 1, "weight": 1.5},
            {"category": "가사", "rank": 2, "weight": 1.4}
        ]),
        stored_low: json!([
            {"category": "건강", "rank": 1, "weight": 0.5}
        ]),
        ..StubBackend::default()
    };
    let base_url = spawn_backend(backend).await;

    let mut session =
        PrioritySession::new(small_universe(), client(&base_url, None), CompletionRule::AtLeastOne);
    session.hydrate().await.unwrap();

    assert_eq!(
        session.store().high(),
        &[Priority::new("가사", 1), Priority::new("취미", 2)]
    );
    assert_eq!(session.store().low(), &[Priority::new("건강", 1)]);
    assert!(session.store().normal().is_empty());
}

#[tokio::test]
async fn test_hydrate_failure_keeps_assignment() {
    let backend = StubBackend {
        get_status: StatusCode::UNAUTHORIZED,
        ..StubBackend::default()
    };
    let base_url = spawn_backend(backend).await;

    let mut session =
        PrioritySession::new(small_universe(), client(&base_url, None), CompletionRule::AtLeastOne);
    assign_scenario(&mut session);
    let before = session.store().state().clone();

    let result = session.hydrate().await;

    assert!(matches!(result, Err(ApiError::Status(401, _))));
    assert_eq!(session.store().state(), &before);
}
