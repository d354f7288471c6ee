//! Booking endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::booking::{Booking, CreateBooking},
};

use super::AuthenticatedUser;

/// Book equipment for rent or purchase.
///
/// The total is recomputed server-side from the current catalog price; a
/// quantity below 1 is clamped to 1. The simulated payment runs inline and
/// the booking is returned already settled.
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking settled", body = Booking),
        (status = 401, description = "Sign-in required; the originating path is in the error body"),
        (status = 404, description = "Equipment not found"),
        (status = 422, description = "Equipment not available")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let booking = state
        .services
        .bookings
        .create_booking(claims.user_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// The caller's bookings, newest first (dashboard)
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Booking history", body = Vec<Booking>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state.services.bookings.list_for_user(claims.user_id).await?;
    Ok(Json(bookings))
}
