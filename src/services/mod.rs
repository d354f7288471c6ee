//! Business logic services

pub mod bookings;
pub mod catalog;
pub mod chat;
pub mod payment;
pub mod pricing;
pub mod users;

use std::sync::Arc;

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub users: users::UsersService,
    pub bookings: bookings::BookingsService,
    pub chat: chat::ChatService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        let catalog = catalog::CatalogService::new(
            repository.equipment.clone(),
            config.catalog.fallback_to_fixture,
        );
        let gateway = Arc::new(payment::SimulatedGateway::new(
            config.payment.delay_ms,
            config.payment.currency.clone(),
        ));
        Self {
            bookings: bookings::BookingsService::new(
                catalog.clone(),
                repository.bookings.clone(),
                gateway,
            ),
            users: users::UsersService::new(repository.users.clone(), config.auth.clone()),
            chat: chat::ChatService::new(config.chat.reply_delay_ms),
            catalog,
        }
    }
}
