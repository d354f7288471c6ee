//! OpenAPI documentation

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, bookings, chat, equipment, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Krishi Sadhan API",
        version = "0.1.0",
        description = "Farm Equipment Rental Platform REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Krishi Sadhan Team")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::signup,
        auth::login,
        auth::me,
        auth::update_profile,
        auth::logout,
        // Equipment
        equipment::list_equipment,
        equipment::list_featured,
        equipment::get_equipment,
        // Bookings
        bookings::create_booking,
        bookings::list_bookings,
        // Chat
        chat::send_message,
        chat::get_transcript,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::user::CreateUser,
            crate::models::user::UpdateProfile,
            crate::models::user::UserInfo,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::Category,
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::BookingMode,
            crate::models::booking::BookingStatus,
            crate::models::booking::CreateBooking,
            // Chat
            chat::ChatRequest,
            chat::ChatResponse,
            crate::models::chat::ChatMessage,
            crate::models::chat::Sender,
            // Errors
            crate::error::ErrorResponse,
            // Health
            health::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Accounts and sessions"),
        (name = "equipment", description = "Equipment catalog"),
        (name = "bookings", description = "Rent/buy bookings"),
        (name = "chat", description = "Farming assistant")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Swagger UI router serving the generated document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
