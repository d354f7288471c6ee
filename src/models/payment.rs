//! Payment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

/// Outcome of a (simulated) payment gateway call
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentDetails {
    /// Gateway reference, e.g. "pmt_1717171717171"
    pub id: String,
    /// Whole rupees
    pub amount: i64,
    pub currency: String,
    pub description: String,
    pub payment_method: String,
    pub status: PaymentStatus,
    pub timestamp: DateTime<Utc>,
}

/// Payment request passed to the gateway
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub amount: i64,
    pub currency: Option<String>,
    pub description: String,
    pub payment_method: Option<String>,
}
