use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::services::user_service;
use crate::utils::error::ApiError;

#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User identifier (ObjectId hex)")
    ),
    responses(
        (status = 200, description = "User found", body = crate::models::UserInfo),
        (status = 400, description = "Invalid token"),
        (status = 401, description = "Missing token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    log::info!("👤 GET /user/{}", id);

    match user_service::get_user(&db, &id).await {
        Ok(user) => Ok(HttpResponse::Ok().json(serde_json::json!({ "user": user }))),
        Err(e) => {
            log::warn!("❌ Profile lookup failed: {} - {}", id, e);
            Err(e)
        }
    }
}
