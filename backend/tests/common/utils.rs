use axum::{body::Bytes, response::Response};
use http_body_util::BodyExt;

/// Raw response body
pub async fn body_bytes(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = body_bytes(response).await;
    serde_json::from_slice(&body).unwrap()
}
