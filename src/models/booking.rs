//! Booking model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Rent or buy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingMode {
    Rent,
    Buy,
}

impl BookingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingMode::Rent => "rent",
            BookingMode::Buy => "buy",
        }
    }
}

impl std::str::FromStr for BookingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rent" => Ok(BookingMode::Rent),
            "buy" => Ok(BookingMode::Buy),
            _ => Err(format!("Invalid booking mode: {}", s)),
        }
    }
}

/// Booking lifecycle. The browse/select steps happen in the client; a
/// booking enters the server as `Pending`, runs the payment as
/// `Processing`, and ends `Settled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Processing,
    Settled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Processing => "processing",
            BookingStatus::Settled => "settled",
        }
    }

    /// Whether `next` is a legal transition from this state
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Processing)
                | (BookingStatus::Processing, BookingStatus::Settled)
        )
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "processing" => Ok(BookingStatus::Processing),
            "settled" => Ok(BookingStatus::Settled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

/// A rent/buy transaction
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: i32,
    pub equipment_id: i32,
    pub equipment_name: String,
    pub mode: BookingMode,
    /// Rental days or purchase units, always >= 1
    pub quantity: i64,
    /// Computed server-side: unit price x quantity, whole rupees
    pub total: i64,
    pub status: BookingStatus,
    pub payment_reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Booking row as persisted; mode and status are stored as text
#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    pub id: Uuid,
    pub user_id: i32,
    pub equipment_id: i32,
    pub equipment_name: String,
    pub mode: String,
    pub quantity: i64,
    pub total: i64,
    pub status: String,
    pub payment_reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = String;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            user_id: row.user_id,
            equipment_id: row.equipment_id,
            equipment_name: row.equipment_name,
            mode: row.mode.parse()?,
            quantity: row.quantity,
            total: row.total,
            status: row.status.parse()?,
            payment_reference: row.payment_reference,
            created_at: row.created_at,
        })
    }
}

/// Booking request. The client never sends a total; it is recomputed here
/// from the current catalog price on every request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBooking {
    pub equipment_id: i32,
    pub mode: BookingMode,
    /// Rental days or purchase units; values below 1 are clamped to 1
    pub quantity: i64,
}
