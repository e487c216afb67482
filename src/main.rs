mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::services::token_service::TokenService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Configuration is loaded once; a missing secret or database credential is
    // a fatal startup condition.
    let config = Config::from_env().expect("Invalid environment configuration");

    log::info!("🚀 Starting Auth Service...");

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&config)
        .await
        .expect("Failed to connect to MongoDB");

    log::info!("✅ MongoDB connected successfully");

    let tokens = TokenService::new(&config.jwt_secret);

    let db_data = web::Data::new(db);
    let token_data = web::Data::new(tokens.clone());

    let host = config.host.clone();
    let port = config.port;

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .app_data(token_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi),
            )
            // Welcome & health
            .route("/", web::get().to(api::index::welcome))
            .route("/health", web::get().to(api::health::health_check))
            // Auth endpoints
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(api::auth::register))
                    .route("/login", web::post().to(api::auth::login)),
            )
            // Profile endpoint - requires JWT
            .service(
                web::scope("/user")
                    .wrap(middleware::auth::AuthMiddleware::new(tokens.clone()))
                    .route("/{id}", web::get().to(api::users::get_user)),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
