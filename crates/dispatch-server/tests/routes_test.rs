//! Route tests for the relay API, driven through the router without a socket.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use axum::Router;
use dispatch_server::{router, router_with_body_limit};

async fn send(method: Method, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    send_to(router(), method, uri, body).await
}

async fn send_to(
    app: Router,
    method: Method,
    uri: &str,
    body: impl Into<Body>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

fn report(words: usize) -> String {
    (0..words)
        .map(|i| format!("observation{}", i))
        .collect::<Vec<_>>()
        .join(" ")
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(Method::GET, "/health", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_linear_update_pass() {
    let payload = json!({"issueId": "CIA-718", "output": report(150)}).to_string();
    let (status, body) = send(Method::POST, "/linear-update", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["issueId"], "CIA-718");
    assert_eq!(body["pass"], true);
    assert_eq!(body["reason"], "OK");
    assert!(body["comment"]
        .as_str()
        .unwrap()
        .starts_with("## Dispatch Results — CIA-718"));
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_linear_update_fail() {
    let output = json!({"response": "429 Too Many Requests", "requests": 3, "errors": 3}).to_string();
    let payload = json!({"issueId": "CIA-9", "output": output}).to_string();
    let (status, body) = send(Method::POST, "/linear-update", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pass"], false);
    let comment = body["comment"].as_str().unwrap();
    assert!(comment.starts_with("## ⚠️ Dispatch Failed — CIA-9"));
    assert!(comment.contains("**Errors:** 3 of 3 requests failed"));
}

#[tokio::test]
async fn test_linear_update_empty_output_is_verified() {
    let payload = json!({"issueId": "CIA-9", "output": ""}).to_string();
    let (status, body) = send(Method::POST, "/linear-update", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pass"], false);
    assert!(body["comment"].as_str().unwrap().contains("(empty)"));
}

#[tokio::test]
async fn test_linear_update_non_string_output_shown_in_log() {
    let payload = json!({"issueId": "CIA-9", "output": {"response": "nested"}}).to_string();
    let (status, body) = send(Method::POST, "/linear-update", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pass"], false);
    let comment = body["comment"].as_str().unwrap();
    assert!(comment.contains("```\n{\"response\":\"nested\"}\n```"));
    assert!(!comment.contains("(empty)"));

    let payload = json!({"issueId": "CIA-9", "output": 42}).to_string();
    let (_, body) = send(Method::POST, "/linear-update", payload).await;
    assert!(body["comment"].as_str().unwrap().contains("```\n42\n```"));

    let payload = json!({"issueId": "CIA-9", "output": false}).to_string();
    let (_, body) = send(Method::POST, "/linear-update", payload).await;
    assert_eq!(body["pass"], false);
    assert!(body["comment"].as_str().unwrap().contains("(empty)"));
}

#[tokio::test]
async fn test_linear_update_accepts_large_log() {
    // Above axum's built-in 2 MB default.
    let payload = json!({"issueId": "CIA-9", "output": "x".repeat(3 * 1024 * 1024)}).to_string();
    let (status, body) = send(Method::POST, "/linear-update", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pass"], false);
}

#[tokio::test]
async fn test_linear_update_oversized_body_is_json_413() {
    let payload = json!({"issueId": "CIA-9", "output": report(500)}).to_string();
    let (status, body) = send_to(
        router_with_body_limit(1024),
        Method::POST,
        "/linear-update",
        payload,
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "Request body rejected");
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_linear_update_missing_fields() {
    for payload in [
        json!({"output": "text"}),
        json!({"issueId": "", "output": "text"}),
        json!({"issueId": 7, "output": "text"}),
        json!({"issueId": "CIA-1"}),
        json!({"issueId": "CIA-1", "output": null}),
        json!([]),
    ] {
        let (status, body) = send(Method::POST, "/linear-update", payload.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert_eq!(body, json!({"error": "Missing issueId or output"}));
    }
}

#[tokio::test]
async fn test_linear_update_invalid_json() {
    let (status, body) = send(Method::POST, "/linear-update", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON body");
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_dispatch_placeholder() {
    let (status, body) = send(Method::POST, "/dispatch", "{}").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "received", "note": "dispatch routing not yet implemented"})
    );
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, body) = send(Method::GET, "/nope", Body::empty()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found"}));
}

#[tokio::test]
async fn test_wrong_method_is_404() {
    for (method, uri) in [
        (Method::GET, "/linear-update"),
        (Method::POST, "/health"),
        (Method::GET, "/dispatch"),
    ] {
        let (status, body) = send(method.clone(), uri, Body::empty()).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_eq!(body, json!({"error": "Not found"}));
    }
}
