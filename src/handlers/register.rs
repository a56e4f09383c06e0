use crate::config::security_config::{create_token, ROLE_STUDENT};
use crate::error::ApiError;
use crate::models::models::{AppState, AuthResponse, NewUser, RegisterRequest, User};
use axum::{extract::State, http::StatusCode, Json};
use bcrypt::hash;
use diesel::prelude::*;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Invalid input or email already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let conn = &mut state.db.get().map_err(|e| {
        error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    let exists: i64 = crate::schema::users::table
        .filter(crate::schema::users::email.eq(&payload.email))
        .count()
        .get_result(conn)?;

    if exists > 0 {
        return Err(ApiError::BadRequest("Email already exists".to_string()));
    }

    let password_hash = hash(&payload.password, 12).map_err(ApiError::Bcrypt)?;

    let user: User = diesel::insert_into(crate::schema::users::table)
        .values(NewUser {
            id: Uuid::new_v4(),
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            password_hash,
            role: ROLE_STUDENT.to_string(),
        })
        .returning(User::as_returning())
        .get_result(conn)?;

    let token = create_token(&state, &user.id.to_string(), &user.role)?;

    info!("User registered: email={}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            token,
            user: user.into(),
        }),
    ))
}
