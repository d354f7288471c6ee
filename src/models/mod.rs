//! Data models for Krishi server

pub mod booking;
pub mod chat;
pub mod equipment;
pub mod payment;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, BookingMode, BookingStatus, CreateBooking};
pub use chat::{ChatMessage, Sender};
pub use equipment::{Category, Equipment};
pub use payment::{PaymentDetails, PaymentStatus};
pub use user::{User, UserClaims};
