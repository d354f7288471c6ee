//! Booking store

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, BookingRow},
};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: Booking) -> AppResult<()>;
    /// A user's bookings, newest first (dashboard view)
    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Booking>>;
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<Vec<Booking>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: Booking) -> AppResult<()> {
        self.bookings.write().await.push(booking);
        Ok(())
    }

    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        let mut mine: Vec<Booking> = bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine)
    }
}

// ---------------------------------------------------------------------------
// Postgres implementation
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgBookingRepository {
    pool: Pool<Postgres>,
}

impl PgBookingRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn insert(&self, booking: Booking) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings
                (id, user_id, equipment_id, equipment_name, mode, quantity,
                 total, status, payment_reference, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(booking.id)
        .bind(booking.user_id)
        .bind(booking.equipment_id)
        .bind(&booking.equipment_name)
        .bind(booking.mode.as_str())
        .bind(booking.quantity)
        .bind(booking.total)
        .bind(booking.status.as_str())
        .bind(&booking.payment_reference)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            "SELECT * FROM bookings WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|row| Booking::try_from(row).map_err(AppError::Internal))
            .collect()
    }
}
