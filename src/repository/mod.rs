//! Repository layer: storage-facing traits and their implementations.
//!
//! Each store comes in two interchangeable flavours selected at startup:
//! an in-memory fixture (no external services) and Postgres via sqlx.

pub mod bookings;
pub mod equipment;
pub mod users;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub use bookings::BookingRepository;
pub use equipment::EquipmentRepository;
pub use users::UserRepository;

/// Main repository struct bundling the per-domain stores
#[derive(Clone)]
pub struct Repository {
    pub equipment: Arc<dyn EquipmentRepository>,
    pub users: Arc<dyn UserRepository>,
    pub bookings: Arc<dyn BookingRepository>,
}

impl Repository {
    /// In-memory repositories backed by the built-in equipment dataset
    pub fn fixture() -> Self {
        Self {
            equipment: Arc::new(equipment::FixtureEquipmentRepository::new()),
            users: Arc::new(users::InMemoryUserRepository::new()),
            bookings: Arc::new(bookings::InMemoryBookingRepository::new()),
        }
    }

    /// Postgres-backed repositories sharing the given pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: Arc::new(equipment::PgEquipmentRepository::new(pool.clone())),
            users: Arc::new(users::PgUserRepository::new(pool.clone())),
            bookings: Arc::new(bookings::PgBookingRepository::new(pool)),
        }
    }
}
