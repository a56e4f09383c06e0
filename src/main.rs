use crate::config::{
    security_config::{auth_middleware, JWTSecret},
    swagger_config::ApiDoc,
};
use crate::handlers::{
    all_payments::all_payments, create_course::create_course, create_order::create_order,
    current_user::current_user, delete_course::delete_course, get_course::get_course,
    health::health_check, list_courses::list_courses, login::login, my_payments::my_payments,
    register::register, update_course::update_course, verify_payment::verify_payment,
};
use crate::logging::setup_logging;
use crate::models::models::AppState;
use axum::{handler::Handler, middleware, Router};
use diesel::{
    r2d2::{ConnectionManager, Pool},
    PgConnection,
};
use dotenvy::dotenv;
use http::HeaderValue;
use std::{env, net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod handlers;
mod logging;
mod models;
mod schema;
mod services;
mod utility;

#[tokio::main]
async fn main() -> Result<(), eyre::Error> {
    setup_logging();

    info!("Starting Vidhyarthi Seva backend");

    dotenv().ok();
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    let cors_origins = env::var("CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
        .split(',')
        .map(|s| s.trim().to_string())
        .collect::<Vec<String>>();

    info!("cors origins: {:?}", cors_origins);

    let manager = ConnectionManager::<PgConnection>::new(db_url);
    let pool = Pool::builder().max_size(10).build(manager).map_err(|e| {
        error!("Failed to create database pool: {}", e);
        eyre::eyre!("Failed to create database pool: {}", e)
    })?;

    let state = Arc::new(AppState {
        db: pool,
        jwt_secret: JWTSecret::new().jwt_secret,
        razorpay_key_id: env::var("RAZORPAY_KEY_ID").map_err(|e| {
            error!("RAZORPAY_KEY_ID environment variable not set: {}", e);
            eyre::eyre!("RAZORPAY_KEY_ID environment variable must be set")
        })?,
        razorpay_key_secret: env::var("RAZORPAY_KEY_SECRET").map_err(|e| {
            error!("RAZORPAY_KEY_SECRET environment variable not set: {}", e);
            eyre::eyre!("RAZORPAY_KEY_SECRET environment variable must be set")
        })?,
        razorpay_api_url: env::var("RAZORPAY_API_URL")
            .unwrap_or_else(|_| "https://api.razorpay.com".to_string()),
        app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:8080".to_string()),
    });

    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(
            cors_origins
                .iter()
                .map(|s| s.parse::<HeaderValue>())
                .collect::<Result<Vec<_>, _>>()?,
        );

    let auth = middleware::from_fn_with_state(state.clone(), auth_middleware);

    // Public routes (no authentication)
    let public_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", axum::routing::get(health_check))
        .route("/api/auth/register", axum::routing::post(register))
        .route("/api/auth/login", axum::routing::post(login));

    // Catalog reads are public; mutations carry the auth layer per handler
    // so the same path can serve both
    let course_router = Router::new()
        .route(
            "/api/courses",
            axum::routing::get(list_courses).post(create_course.layer(auth.clone())),
        )
        .route(
            "/api/courses/{course_id}",
            axum::routing::get(get_course)
                .put(update_course.layer(auth.clone()))
                .delete(delete_course.layer(auth.clone())),
        );

    // Protected routes (require JWT authentication; admin-only routes check
    // the role claim in the handler)
    let protected_router = Router::new()
        .route("/api/auth/me", axum::routing::get(current_user))
        .route(
            "/api/payments/create-order",
            axum::routing::post(create_order),
        )
        .route("/api/payments/verify", axum::routing::post(verify_payment))
        .route("/api/payments", axum::routing::get(all_payments))
        .route("/api/payments/my", axum::routing::get(my_payments))
        .layer(auth);

    let app = Router::new()
        .merge(public_router)
        .merge(course_router)
        .merge(protected_router)
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port).parse::<SocketAddr>()?;
    let listener = TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);
    info!(
        "Swagger UI available at http://{}/swagger-ui/index.html#/",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

// handle Ctrl+C / SIGTERM for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
