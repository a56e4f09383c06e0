use axum::response::{IntoResponse, Response};
use axum::Json;
use diesel::r2d2;
use http::StatusCode;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    Database(diesel::result::Error),
    DatabaseConnection(String),
    Bcrypt(bcrypt::BcryptError),
    Validation(validator::ValidationErrors),
    Token(String),
    Auth(String),
    Forbidden(String),
    NotFound(String),
    BadRequest(String),
    /// Signature check failed; the verification attempt is rejected outright.
    InvalidSignature,
    /// The gateway call itself failed (unreachable, non-2xx, bad payload).
    Gateway(String),
    /// The signature was valid but the record could not be written. The
    /// money has already moved at the gateway, so the detail is kept for
    /// reconciliation.
    PaymentPersistence(String),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Database(e) => write!(f, "Database error: {}", e),
            ApiError::DatabaseConnection(e) => write!(f, "Database connection error: {}", e),
            ApiError::Bcrypt(e) => write!(f, "Bcrypt error: {}", e),
            ApiError::Validation(e) => write!(f, "Validation error: {}", e),
            ApiError::Token(e) => write!(f, "Token error: {}", e),
            ApiError::Auth(e) => write!(f, "Authentication error: {}", e),
            ApiError::Forbidden(e) => write!(f, "Forbidden: {}", e),
            ApiError::NotFound(e) => write!(f, "Not found: {}", e),
            ApiError::BadRequest(e) => write!(f, "Bad request: {}", e),
            ApiError::InvalidSignature => write!(f, "Invalid signature"),
            ApiError::Gateway(e) => write!(f, "Gateway error: {}", e),
            ApiError::PaymentPersistence(e) => write!(f, "Payment persistence error: {}", e),
            ApiError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Database(e) => Some(e),
            ApiError::Bcrypt(e) => Some(e),
            ApiError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<r2d2::PoolError> for ApiError {
    fn from(err: r2d2::PoolError) -> Self {
        ApiError::DatabaseConnection(err.to_string())
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        ApiError::Database(err)
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        ApiError::Bcrypt(err)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Gateway(err.to_string())
    }
}

impl ApiError {
    /// Status, user-facing message and optional upstream detail. Every
    /// failure is surfaced to the HTTP caller as `{success: false, ...}`;
    /// nothing is swallowed, nothing is retried server-side.
    fn parts(&self) -> (StatusCode, String, Option<String>) {
        match self {
            ApiError::Database(e) => match e {
                diesel::result::Error::NotFound => {
                    (StatusCode::NOT_FOUND, "Resource not found".to_string(), None)
                }
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _,
                ) => (
                    StatusCode::BAD_REQUEST,
                    "Record already exists".to_string(),
                    Some(e.to_string()),
                ),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                    Some(e.to_string()),
                ),
            },
            ApiError::DatabaseConnection(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database connection error".to_string(),
                Some(e.clone()),
            ),
            ApiError::Bcrypt(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Password verification error".to_string(),
                None,
            ),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                format!("Validation error: {}", errors),
                None,
            ),
            ApiError::Token(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Token error: {}", e),
                None,
            ),
            ApiError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone(), None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            ApiError::InvalidSignature => {
                (StatusCode::BAD_REQUEST, "Invalid signature".to_string(), None)
            }
            ApiError::Gateway(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Razorpay order creation failed".to_string(),
                Some(e.clone()),
            ),
            ApiError::PaymentPersistence(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Payment saved but DB error".to_string(),
                Some(e.clone()),
            ),
            ApiError::Internal(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Some(e.clone()),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, detail) = self.parts();
        let body = match detail {
            Some(detail) => json!({ "success": false, "message": message, "error": detail }),
            None => json!({ "success": false, "message": message }),
        };
        (status, Json(body)).into_response()
    }
}
