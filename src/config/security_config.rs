use crate::error::ApiError;
use crate::models::models::AppState;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::extract::State;
use chrono::{Duration, Utc};
use http::HeaderMap;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;
use tracing::{error, warn};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STUDENT: &str = "student";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // user id
    pub role: String, // "student" | "admin"
    pub exp: usize,
    pub iat: usize,
}

pub struct JWTSecret {
    pub jwt_secret: String,
}

impl JWTSecret {
    pub fn new() -> Self {
        let jwt_secret =
            env::var("JWT_SECRET").expect("JWT_SECRET must be set in environment variables");

        if jwt_secret.len() < 32 {
            panic!("JWT_SECRET must be at least 32 characters long");
        }

        Self { jwt_secret }
    }
}

pub fn create_token(state: &AppState, user_id: &str, role: &str) -> Result<String, ApiError> {
    let secret = state.jwt_secret.as_bytes();

    let now = Utc::now();
    let expiration_hours: i64 = env::var("JWT_EXPIRATION_HOURS")
        .unwrap_or_else(|_| "24".to_string())
        .parse()
        .map_err(|e| {
            error!("JWT expiration config error: {}", e);
            ApiError::Token(format!("Invalid JWT expiration configuration: {}", e))
        })?;

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: (now + Duration::hours(expiration_hours)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| {
        error!("JWT encoding error: {}", e);
        ApiError::Token(format!("Token creation failed: {}", e))
    })
}

pub fn verify_token(state: &AppState, token: &str) -> Result<Claims, String> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT verification error: {}", e))
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("Authorization")
        .ok_or_else(|| ApiError::Auth("Authorization header required".to_string()))?
        .to_str()
        .map_err(|_| ApiError::Auth("Invalid Authorization format".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Auth("Invalid Authorization format".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(ApiError::Auth("Invalid Authorization format".to_string()));
    }

    Ok(token.to_string())
}

/// Authorization is enforced here, server-side, regardless of any gating
/// the client UI does with its stored token.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = match extract_bearer_token(req.headers()) {
        Ok(token) => token,
        Err(e) => return Err(e.into_response()),
    };

    let claims = match verify_token(&state, &token) {
        Ok(claims) => claims,
        Err(e) => {
            warn!("JWT verification failed: {}", e);
            return Err(
                ApiError::Auth("Not authorized to access this route".to_string()).into_response(),
            );
        }
    };

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Role check for admin-only routes. Runs after `auth_middleware`, so the
/// claims have already been signature-verified.
pub fn require_admin(claims: &Claims) -> Result<(), ApiError> {
    if claims.role == ROLE_ADMIN {
        Ok(())
    } else {
        warn!("User {} denied admin access (role: {})", claims.sub, claims.role);
        Err(ApiError::Forbidden("Admin access required".to_string()))
    }
}
