use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{AppState, MyPaymentsResponse};
use crate::services::payment_service::PaymentService;
use axum::{extract::State, Extension, Json};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/payments/my",
    responses(
        (status = 200, description = "The calling user's payments, newest first", body = MyPaymentsResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearerAuth" = [])),
    tag = "Payments"
)]
pub async fn my_payments(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<MyPaymentsResponse>, ApiError> {
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ApiError::Auth("Invalid user id in token".to_string()))?;

    let payments = PaymentService::list_for_user(&state, user_id)?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(MyPaymentsResponse {
        success: true,
        payments,
    }))
}
