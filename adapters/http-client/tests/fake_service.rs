//! Exercises the reqwest transport against an in-process fake shortening service.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use domain::adapters::memory::MemoryDisplay;
use domain::service::ShortenClient;
use domain::status::{StatusChecker, StatusDisplay};
use domain::{ClientConfig, CoreError, DisplayState, Transport};
use http_client::ReqwestTransport;

#[derive(Clone, Default)]
struct Seen {
    requests: Arc<Mutex<Vec<(Option<String>, String)>>>,
}

async fn shorten(State(seen): State<Seen>, headers: HeaderMap, body: String) -> (StatusCode, String) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    seen.requests.lock().unwrap().push((content_type, body));
    (StatusCode::OK, r#"{"short":"abc123"}"#.to_string())
}

async fn status() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

async fn spawn_service() -> (SocketAddr, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route("/api/", post(shorten))
        .route("/api/status", get(status))
        .with_state(seen.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, seen)
}

// A port nothing listens on: bind, read the port, release it.
async fn closed_origin() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn post_sends_json_body_with_content_type() {
    let (addr, seen) = spawn_service().await;
    let transport = ReqwestTransport::new(format!("http://{addr}")).unwrap();

    let reply = transport
        .post_json("/api/", r#"{"url":"https://example.com"}"#.to_string())
        .await
        .unwrap();

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, r#"{"short":"abc123"}"#);

    let requests = seen.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0.as_deref(), Some("application/json"));
    let sent: serde_json::Value = serde_json::from_str(&requests[0].1).unwrap();
    assert_eq!(sent, serde_json::json!({"url": "https://example.com"}));
}

#[tokio::test]
async fn get_passes_status_through() {
    let (addr, _) = spawn_service().await;
    let transport = ReqwestTransport::new(format!("http://{addr}/")).unwrap();

    let reply = transport.get("/api/status").await.unwrap();

    assert_eq!(reply.status, 503);
    assert_eq!(reply.status_text, "Service Unavailable");
}

#[tokio::test]
async fn unreachable_service_is_a_request_error() {
    let transport = ReqwestTransport::new(closed_origin().await).unwrap();

    let err = transport.get("/api/status").await.unwrap_err();

    assert!(matches!(err, CoreError::Request(_)));
}

#[tokio::test]
async fn shorten_client_end_to_end() {
    let (addr, seen) = spawn_service().await;
    let transport = ReqwestTransport::new(format!("http://{addr}")).unwrap();
    let display = MemoryDisplay::new();
    let client = ShortenClient::new(&transport, &display, ClientConfig::new("https://short.example"));

    let state = client.submit("https://example.com").await;
    assert_eq!(state, DisplayState::ComposedLink("https://short.example/s/abc123".into()));
    assert_eq!(display.last().as_deref(), Some("https://short.example/s/abc123"));

    let state = client.submit("not a url").await;
    assert_eq!(state, DisplayState::ValidationError);
    assert_eq!(seen.requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn shorten_client_reports_failure_when_unreachable() {
    let transport = ReqwestTransport::new(closed_origin().await).unwrap();
    let display = MemoryDisplay::new();
    let client = ShortenClient::new(&transport, &display, ClientConfig::new("https://short.example"));

    let state = client.submit("https://example.com").await;

    assert_eq!(state, DisplayState::RequestError);
    assert_eq!(display.last().as_deref(), Some("Failed!"));
}

#[tokio::test]
async fn status_checker_end_to_end() {
    let (addr, _) = spawn_service().await;
    let transport = ReqwestTransport::new(format!("http://{addr}")).unwrap();
    let display = MemoryDisplay::new();

    let state = StatusChecker::new(&transport, &display).check().await;

    assert_eq!(
        state,
        StatusDisplay::Reported {
            status: 503,
            status_text: "Service Unavailable".into()
        }
    );
    assert_eq!(display.history()[0], "Checking...");
}
