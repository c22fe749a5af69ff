//! Payment intent creation against Stripe.
//!
//! Currency is fixed to USD and payment methods are detected automatically.
//! No idempotency key is sent, so a retried request creates a new intent.

mod error;
mod stripe;

pub use error::PaymentError;
pub use stripe::StripeClient;

/// The part of a created payment intent the site needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

/// Trait for the payment provider
#[async_trait::async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Creates a payment intent for `amount` in cents. Bounds are left to the provider.
    async fn create_payment_intent(&self, amount: i64) -> Result<PaymentIntent, PaymentError>;
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use std::sync::Mutex;

    use super::{PaymentError, PaymentIntent, PaymentProvider};

    /// Smallest USD charge Stripe accepts
    const MIN_AMOUNT_CENTS: i64 = 50;

    /// Provider double that mimics Stripe's minimum-amount rule
    #[derive(Default)]
    pub struct MockPaymentProvider {
        unreachable: bool,
        amounts: Mutex<Vec<i64>>,
    }

    impl MockPaymentProvider {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        #[must_use]
        pub fn unreachable() -> Self {
            Self {
                unreachable: true,
                ..Self::default()
            }
        }

        /// Amounts requested so far
        ///
        /// # Panics
        ///
        /// Panics if the mutex is poisoned
        #[must_use]
        pub fn amounts(&self) -> Vec<i64> {
            self.amounts.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl PaymentProvider for MockPaymentProvider {
        async fn create_payment_intent(
            &self,
            amount: i64,
        ) -> Result<PaymentIntent, PaymentError> {
            let mut amounts = self.amounts.lock().unwrap();
            amounts.push(amount);

            if self.unreachable {
                return Err(PaymentError::Unreachable(
                    reqwest_middleware::Error::Middleware(anyhow::anyhow!("connection refused")),
                ));
            }

            if amount < MIN_AMOUNT_CENTS {
                return Err(PaymentError::Rejected {
                    status: 400,
                    message: "Amount must be at least $0.50 usd".to_string(),
                });
            }

            let id = format!("pi_mock_{}", amounts.len());
            Ok(PaymentIntent {
                client_secret: format!("{id}_secret_mock"),
                id,
            })
        }
    }
}
