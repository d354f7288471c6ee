//! Krishi Sadhan Equipment Platform
//!
//! A Rust implementation of the Krishi Sadhan farm-equipment marketplace
//! backend, providing a REST JSON API for the equipment catalog, rent/buy
//! bookings, user accounts, and the farming assistant chat.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
