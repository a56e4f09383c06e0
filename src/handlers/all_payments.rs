use crate::config::security_config::{require_admin, Claims};
use crate::error::ApiError;
use crate::models::models::{AppState, PaymentListResponse};
use crate::services::payment_service::PaymentService;
use axum::{extract::State, Extension, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/payments",
    responses(
        (status = 200, description = "All payments, newest first", body = PaymentListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearerAuth" = [])),
    tag = "Payments"
)]
pub async fn all_payments(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<PaymentListResponse>, ApiError> {
    require_admin(&claims)?;

    let payments = PaymentService::list_all(&state)?;

    Ok(Json(PaymentListResponse {
        success: true,
        payments,
    }))
}
