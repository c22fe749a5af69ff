use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::Deserialize;

use super::{PaymentError, PaymentIntent, PaymentProvider};

const CURRENCY: &str = "usd";

#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    id: String,
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Stripe REST client for `/v1/payment_intents`
pub struct StripeClient {
    api_url: String,
    secret_key: Option<String>,
    http_client: ClientWithMiddleware,
}

impl StripeClient {
    /// Creates a new Stripe client. A missing `secret_key` only fails at call time.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    pub fn new(
        api_url: impl Into<String>,
        secret_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = ClientBuilder::new(builder.build()?)
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.filter(|key| !key.is_empty()),
            http_client,
        })
    }
}

#[async_trait::async_trait]
impl PaymentProvider for StripeClient {
    async fn create_payment_intent(&self, amount: i64) -> Result<PaymentIntent, PaymentError> {
        let secret_key = self
            .secret_key
            .as_deref()
            .ok_or(PaymentError::MissingSecretKey)?;

        let url = format!("{}/v1/payment_intents", self.api_url);
        let form = [
            ("amount", amount.to_string()),
            ("currency", CURRENCY.to_string()),
            ("automatic_payment_methods[enabled]", "true".to_string()),
        ];

        let response = self
            .http_client
            .post(url)
            .bearer_auth(secret_key)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<StripeErrorBody>(&body)
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| format!("Payment provider returned {status}"));

            tracing::warn!(%status, "Payment intent rejected: {message}");
            return Err(PaymentError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let intent: StripePaymentIntent = serde_json::from_slice(&body)?;
        tracing::info!(intent_id = %intent.id, amount, "Created payment intent");

        Ok(PaymentIntent {
            id: intent.id,
            client_secret: intent.client_secret,
        })
    }
}
