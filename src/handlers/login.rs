use crate::config::security_config::create_token;
use crate::error::ApiError;
use crate::models::models::{AppState, AuthResponse, LoginRequest, User};
use axum::{extract::State, Json};
use bcrypt::verify;
use diesel::prelude::*;
use std::sync::Arc;
use tracing::{error, info, warn};
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Invalid email or password"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.validate().map_err(|e| {
        error!("Validation error for email {}: {}", payload.email, e);
        ApiError::Validation(e)
    })?;

    let conn = &mut state.db.get().map_err(|e| {
        error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    let user: Option<User> = crate::schema::users::table
        .filter(crate::schema::users::email.eq(&payload.email))
        .select(User::as_select())
        .first(conn)
        .optional()?;

    let user = match user {
        Some(user) => user,
        None => {
            // Dummy verification to keep response timing uniform
            let _ = verify(
                &payload.password,
                "$2b$12$dummyhashdummyhashdummyhashdummyhashdummyhashdummyha",
            );
            warn!("No user found for email: {}", payload.email);
            return Err(ApiError::Auth("Invalid email or password".to_string()));
        }
    };

    if !verify(&payload.password, &user.password_hash).map_err(ApiError::Bcrypt)? {
        warn!("Invalid password for user: {}", user.id);
        return Err(ApiError::Auth("Invalid email or password".to_string()));
    }

    let token = create_token(&state, &user.id.to_string(), &user.role)?;

    info!("User {} logged in", user.id);

    Ok(Json(AuthResponse {
        success: true,
        token,
        user: user.into(),
    }))
}
