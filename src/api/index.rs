use actix_web::{HttpResponse, Responder};

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Welcome message")
    )
)]
pub async fn welcome() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "msg": "welcome to the API!" }))
}
