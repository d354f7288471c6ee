//! Booking service: selection, pricing, simulated payment, settlement.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingMode, BookingStatus, CreateBooking},
        payment::PaymentRequest,
    },
    repository::BookingRepository,
    services::{catalog::CatalogService, payment::PaymentGateway, pricing},
};

#[derive(Clone)]
pub struct BookingsService {
    catalog: CatalogService,
    bookings: Arc<dyn BookingRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl BookingsService {
    pub fn new(
        catalog: CatalogService,
        bookings: Arc<dyn BookingRepository>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            catalog,
            bookings,
            gateway,
        }
    }

    /// Run a booking end to end: resolve the equipment, recompute the total
    /// from the current catalog price, process the simulated payment, and
    /// record the settled booking. The caller's identity has already been
    /// established by the API layer.
    pub async fn create_booking(&self, user_id: i32, request: CreateBooking) -> AppResult<Booking> {
        let equipment = self.catalog.get_by_id(request.equipment_id).await?;
        if !equipment.in_stock {
            return Err(AppError::BusinessRule(format!(
                "{} is currently not available",
                equipment.name
            )));
        }

        let quantity = pricing::clamp_quantity(request.quantity);
        let total = match request.mode {
            BookingMode::Rent => pricing::rental_total(equipment.rental_price, quantity),
            BookingMode::Buy => pricing::purchase_total(equipment.price, quantity),
        }
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Quantity {} is too large for {}",
                quantity, equipment.name
            ))
        })?;

        let mut booking = Booking {
            id: Uuid::new_v4(),
            user_id,
            equipment_id: equipment.id,
            equipment_name: equipment.name.clone(),
            mode: request.mode,
            quantity,
            total,
            status: BookingStatus::Pending,
            payment_reference: None,
            created_at: Utc::now(),
        };

        self.advance(&mut booking, BookingStatus::Processing)?;

        let description = match booking.mode {
            BookingMode::Rent => format!("Rental: {} ({} days)", equipment.name, quantity),
            BookingMode::Buy => format!("Purchase: {} (x{})", equipment.name, quantity),
        };
        let payment = self
            .gateway
            .process(PaymentRequest {
                amount: total,
                currency: None,
                description,
                payment_method: None,
            })
            .await?;

        booking.payment_reference = Some(payment.id);
        self.advance(&mut booking, BookingStatus::Settled)?;

        self.bookings.insert(booking.clone()).await?;

        tracing::info!(
            booking_id = %booking.id,
            user_id,
            equipment_id = booking.equipment_id,
            mode = booking.mode.as_str(),
            total = booking.total,
            "Booking settled"
        );

        Ok(booking)
    }

    /// A user's booking history, newest first
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Booking>> {
        self.bookings.list_for_user(user_id).await
    }

    fn advance(&self, booking: &mut Booking, next: BookingStatus) -> AppResult<()> {
        if !booking.status.can_transition_to(next) {
            return Err(AppError::Internal(format!(
                "Invalid booking transition {} -> {}",
                booking.status.as_str(),
                next.as_str()
            )));
        }
        booking.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        bookings::InMemoryBookingRepository, equipment::FixtureEquipmentRepository,
    };
    use crate::services::payment::SimulatedGateway;

    fn service() -> BookingsService {
        let catalog =
            CatalogService::new(Arc::new(FixtureEquipmentRepository::new()), true);
        BookingsService::new(
            catalog,
            Arc::new(InMemoryBookingRepository::new()),
            Arc::new(SimulatedGateway::new(0, "INR".to_string())),
        )
    }

    #[tokio::test]
    async fn rental_booking_settles_with_computed_total() {
        let svc = service();
        let booking = svc
            .create_booking(
                1,
                CreateBooking {
                    equipment_id: 1, // John Deere, 1200/day
                    mode: BookingMode::Rent,
                    quantity: 7,
                },
            )
            .await
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Settled);
        assert_eq!(booking.total, 8_400);
        assert!(booking.payment_reference.is_some());
    }

    #[tokio::test]
    async fn purchase_booking_uses_unit_price() {
        let svc = service();
        let booking = svc
            .create_booking(
                1,
                CreateBooking {
                    equipment_id: 8, // Honda Brush Cutter, 18000
                    mode: BookingMode::Buy,
                    quantity: 3,
                },
            )
            .await
            .unwrap();

        assert_eq!(booking.total, 54_000);
    }

    #[tokio::test]
    async fn quantity_below_one_is_clamped() {
        let svc = service();
        let booking = svc
            .create_booking(
                1,
                CreateBooking {
                    equipment_id: 1,
                    mode: BookingMode::Rent,
                    quantity: 0,
                },
            )
            .await
            .unwrap();

        assert_eq!(booking.quantity, 1);
        assert_eq!(booking.total, 1_200);
    }

    #[tokio::test]
    async fn overflowing_total_is_rejected_and_nothing_is_recorded() {
        let svc = service();
        let err = svc
            .create_booking(
                1,
                CreateBooking {
                    equipment_id: 1, // 1200/day: any total past i64::MAX / 1200 days
                    mode: BookingMode::Rent,
                    quantity: i64::MAX,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(svc.list_for_user(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_equipment_is_rejected() {
        let svc = service();
        let err = svc
            .create_booking(
                1,
                CreateBooking {
                    equipment_id: 9999,
                    mode: BookingMode::Buy,
                    quantity: 1,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn bookings_are_listed_per_user_newest_first() {
        let svc = service();
        for _ in 0..2 {
            svc.create_booking(
                7,
                CreateBooking {
                    equipment_id: 3,
                    mode: BookingMode::Rent,
                    quantity: 2,
                },
            )
            .await
            .unwrap();
        }
        svc.create_booking(
            8,
            CreateBooking {
                equipment_id: 3,
                mode: BookingMode::Buy,
                quantity: 1,
            },
        )
        .await
        .unwrap();

        let mine = svc.list_for_user(7).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|b| b.user_id == 7));
        assert!(mine[0].created_at >= mine[1].created_at);
    }

    #[test]
    fn status_transitions_are_linear() {
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Processing));
        assert!(BookingStatus::Processing.can_transition_to(BookingStatus::Settled));
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Settled));
        assert!(!BookingStatus::Settled.can_transition_to(BookingStatus::Pending));
    }
}
