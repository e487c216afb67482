use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Auth Service API",
        version = "1.0.0",
        description = "User registration, login, and profile lookup backed by MongoDB.\n\n**Authentication:** the profile endpoint requires a JWT Bearer token obtained from `/auth/login`."
    ),
    paths(
        crate::api::index::welcome,
        crate::api::health::health_check,
        crate::api::auth::register,
        crate::api::auth::login,
        crate::api::users::get_user,
    ),
    components(
        schemas(
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::LoginRequest,
            crate::services::auth_service::MessageResponse,
            crate::services::auth_service::LoginResponse,
            crate::models::user::UserInfo,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Registration and login endpoints."),
        (name = "Users", description = "Profile lookup endpoints. Require JWT Bearer token authentication."),
        (name = "Health", description = "Welcome and health check endpoints for monitoring service status."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            );
        }
    }
}
