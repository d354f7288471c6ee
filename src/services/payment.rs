//! Simulated payment gateway.
//!
//! There is no real payment provider behind this: the gateway sleeps for a
//! configured latency and reports success. Failure and retry paths are out
//! of scope for this version.

use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

use crate::{
    error::AppResult,
    models::payment::{PaymentDetails, PaymentRequest, PaymentStatus},
};

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Process a payment and return the settled details
    async fn process(&self, request: PaymentRequest) -> AppResult<PaymentDetails>;

    /// Verify a previously processed payment by its reference
    async fn verify(&self, payment_id: &str) -> AppResult<bool>;
}

pub struct SimulatedGateway {
    delay: Duration,
    default_currency: String,
}

impl SimulatedGateway {
    pub fn new(delay_ms: u64, default_currency: String) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            default_currency,
        }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn process(&self, request: PaymentRequest) -> AppResult<PaymentDetails> {
        tokio::time::sleep(self.delay).await;

        let details = PaymentDetails {
            id: format!("pmt_{}", Utc::now().timestamp_millis()),
            amount: request.amount,
            currency: request
                .currency
                .unwrap_or_else(|| self.default_currency.clone()),
            description: request.description,
            payment_method: request.payment_method.unwrap_or_else(|| "card".to_string()),
            status: PaymentStatus::Completed,
            timestamp: Utc::now(),
        };

        tracing::info!(
            payment_id = %details.id,
            amount = details.amount,
            currency = %details.currency,
            "Simulated payment completed"
        );

        Ok(details)
    }

    async fn verify(&self, payment_id: &str) -> AppResult<bool> {
        tracing::debug!(payment_id, "Simulated payment verification");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simulated_payment_always_completes() {
        let gateway = SimulatedGateway::new(0, "INR".to_string());
        let details = gateway
            .process(PaymentRequest {
                amount: 8_400,
                currency: None,
                description: "Rental: John Deere 5050D Tractor".to_string(),
                payment_method: None,
            })
            .await
            .unwrap();

        assert_eq!(details.status, PaymentStatus::Completed);
        assert_eq!(details.amount, 8_400);
        assert_eq!(details.currency, "INR");
        assert_eq!(details.payment_method, "card");
        assert!(details.id.starts_with("pmt_"));
        assert!(gateway.verify(&details.id).await.unwrap());
    }
}
