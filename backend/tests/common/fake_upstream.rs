use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderMap, HeaderName, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Stripe key the fake provider accepts
pub const STRIPE_TEST_KEY: &str = "sk_test_123";

/// Contact reply with deliberately unusual formatting and key order
pub const CONTACT_REPLY: &str =
    "{\"success\":true,  \"message\":\"Thanks for reaching out!\",\"zeta\":1,\"alpha\":[2, 3]}";

/// Discovery document served at `/wp-json/`
pub const DISCOVERY_REPLY: &str =
    "{\"name\":\"Modern Blog\",\"namespaces\":[\"wp/v2\",\"contact/v1\"]}";

/// A request the fake upstream received
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub body: Bytes,
}

#[derive(Clone, Default)]
struct FakeState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    payment_forms: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl FakeState {
    fn record(&self, path: &str, headers: &HeaderMap, body: Bytes) {
        let header = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(ToString::to_string)
        };

        self.calls.lock().unwrap().push(RecordedCall {
            path: path.to_string(),
            content_type: header(CONTENT_TYPE),
            authorization: header(AUTHORIZATION),
            body,
        });
    }
}

/// `WordPress` + Stripe stand-in bound to an ephemeral local port.
///
/// Routes under `/broken` answer every request with HTML, which lets a test
/// point the client at `{base_url}/broken` to get a malformed upstream.
pub struct FakeUpstream {
    pub base_url: String,
    state: FakeState,
}

impl FakeUpstream {
    pub async fn start() -> Self {
        let state = FakeState::default();

        let app = Router::new()
            .route("/wp-json/", get(discovery))
            .route("/wp-json/contact/v1/submit", post(contact_submit))
            .route("/wp-json/wp/v2/posts", get(posts))
            .route("/v1/payment_intents", post(payment_intents))
            .route("/broken/{*rest}", any(broken))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake upstream");
        let addr = listener.local_addr().expect("Failed to read local address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake upstream crashed");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn payment_forms(&self) -> Vec<HashMap<String, String>> {
        self.state.payment_forms.lock().unwrap().clone()
    }
}

/// URL of a port nothing listens on
pub async fn offline_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);
    format!("http://{addr}")
}

async fn broken() -> &'static str {
    "<html><body>Fatal error</body></html>"
}

async fn discovery() -> Response {
    ([(CONTENT_TYPE, "application/json")], DISCOVERY_REPLY).into_response()
}

async fn contact_submit(State(state): State<FakeState>, headers: HeaderMap, body: Bytes) -> Response {
    state.record("/wp-json/contact/v1/submit", &headers, body);
    ([(CONTENT_TYPE, "application/json")], CONTACT_REPLY).into_response()
}

fn hello_world_post() -> Value {
    json!({
        "id": 1,
        "slug": "hello-world",
        "title": { "rendered": "Hello World" }
    })
}

fn rich_post() -> Value {
    json!({
        "id": 2,
        "slug": "rich-post",
        "title": { "rendered": "Learning Rust" },
        "excerpt": { "rendered": "<p>Learn&nbsp;<em>Rust</em> today.</p>\n" },
        "_embedded": {
            "wp:featuredmedia": [
                { "source_url": "https://cdn.example.com/rust.png" }
            ]
        }
    })
}

async fn posts(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let posts = match params.get("slug").map(String::as_str) {
        Some("hello-world") => json!([hello_world_post()]),
        Some("rich-post") => json!([rich_post()]),
        Some(_) => json!([]),
        None => json!([rich_post(), hello_world_post()]),
    };
    Json(posts)
}

async fn payment_intents(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.record("/v1/payment_intents", &headers, Bytes::new());
    state.payment_forms.lock().unwrap().push(form.clone());

    let expected = format!("Bearer {STRIPE_TEST_KEY}");
    if headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) != Some(expected.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "message": "Invalid API Key provided", "type": "invalid_request_error" } })),
        )
            .into_response();
    }

    let amount = form
        .get("amount")
        .and_then(|amount| amount.parse::<i64>().ok())
        .unwrap_or_default();
    if amount < 50 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "message": "Amount must be at least $0.50 usd", "param": "amount" } })),
        )
            .into_response();
    }

    Json(json!({
        "id": "pi_test_1",
        "object": "payment_intent",
        "amount": amount,
        "currency": form.get("currency"),
        "client_secret": "pi_test_1_secret_abc"
    }))
    .into_response()
}
