use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{AppState, VerifyPaymentRequest, VerifyPaymentResponse};
use crate::services::payment_service::PaymentService;
use axum::{extract::State, Extension, Json};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/payments/verify",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Payment verified and recorded", body = VerifyPaymentResponse),
        (status = 400, description = "Invalid signature"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Payment saved but DB error")
    ),
    security(("bearerAuth" = [])),
    tag = "Payments"
)]
pub async fn verify_payment(
    State(state): State<Arc<AppState>>,
    Extension(_claims): Extension<Claims>,
    Json(payload): Json<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>, ApiError> {
    payload.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let payment = PaymentService::verify_payment(
        &state,
        &payload.razorpay_order_id,
        &payload.razorpay_payment_id,
        &payload.razorpay_signature,
        &payload.course_id,
        &payload.user_id,
        payload.amount,
    )?;

    Ok(Json(VerifyPaymentResponse {
        success: true,
        message: "Payment verified".to_string(),
        payment: payment.into(),
    }))
}
