use crate::error::ApiError;
use crate::models::models::{AppState, CreateOrderRequest, CreateOrderResponse};
use crate::services::payment_service::PaymentService;
use axum::{extract::State, Extension, Json};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

use crate::config::security_config::Claims;

#[utoipa::path(
    post,
    path = "/api/payments/create-order",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Gateway order created", body = CreateOrderResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Razorpay order creation failed")
    ),
    security(("bearerAuth" = [])),
    tag = "Payments"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Extension(_claims): Extension<Claims>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
    payload.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let order = PaymentService::create_order(
        state,
        payload.amount,
        &payload.course_id,
        &payload.user_id,
    )
    .await?;

    Ok(Json(CreateOrderResponse {
        success: true,
        order,
    }))
}
