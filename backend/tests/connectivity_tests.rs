mod common;

use common::*;
use http::StatusCode;

#[tokio::test]
async fn test_connectivity_relays_discovery_document() {
    let context = TestSetup::default().await;

    let response = context
        .send_get_request("/api/test")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_bytes(response).await;
    assert_eq!(body.as_ref(), DISCOVERY_REPLY.as_bytes());
}

#[tokio::test]
async fn test_connectivity_offline_upstream() {
    let context = TestSetup::new(WordPress::Offline, Some(STRIPE_TEST_KEY)).await;

    let response = context
        .send_get_request("/api/test")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = parse_response_body(response).await;
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn test_connectivity_malformed_upstream() {
    let context = TestSetup::new(WordPress::Broken, Some(STRIPE_TEST_KEY)).await;

    let response = context
        .send_get_request("/api/test")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health() {
    let context = TestSetup::default().await;

    let response = context
        .send_get_request("/health")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["semver"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_openapi_document_lists_documented_routes() {
    let context = TestSetup::default().await;

    let response = context
        .send_get_request("/openapi.json")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert!(body["paths"]["/api/create-payment-intent"].is_object());
    assert!(body["paths"]["/api/posts/{slug}/metadata"].is_object());
}
