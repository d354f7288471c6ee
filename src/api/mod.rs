//! API handlers for Krishi REST endpoints

pub mod auth;
pub mod bookings;
pub mod chat;
pub mod equipment;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeader,
};

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Extractor for the authenticated user behind a bearer token.
///
/// A missing or invalid token rejects with the originating path in the
/// error body, so the client can send the user to sign-in and bring them
/// back afterwards.
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let from = parts.uri.path().to_string();

        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::SignInRequired { from: from.clone() })?;

        let claims = UserClaims::from_token(bearer.token(), &state.config.auth.jwt_secret)
            .map_err(|_| AppError::SignInRequired { from })?;

        Ok(AuthenticatedUser(claims))
    }
}
