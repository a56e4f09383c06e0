use axum::response::IntoResponse;
use http::StatusCode;
use vidhyarthi_seva::error::ApiError;

#[test]
fn signature_mismatch_is_a_client_error() {
    let response = ApiError::InvalidSignature.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn gateway_failure_is_a_server_error() {
    let response = ApiError::Gateway("connection refused".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn persistence_failure_after_verification_is_a_server_error() {
    let response = ApiError::PaymentPersistence("deadlock".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn auth_and_role_failures_map_to_401_and_403() {
    assert_eq!(
        ApiError::Auth("nope".to_string()).into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        ApiError::Forbidden("nope".to_string()).into_response().status(),
        StatusCode::FORBIDDEN
    );
}

#[test]
fn not_found_maps_to_404() {
    assert_eq!(
        ApiError::NotFound("Course not found".to_string())
            .into_response()
            .status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn error_body_carries_the_success_false_envelope() {
    let response = ApiError::InvalidSignature.into_response();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid signature");
}

#[tokio::test]
async fn persistence_error_body_keeps_reconciliation_detail() {
    let response =
        ApiError::PaymentPersistence("insert failed for order_abc".to_string()).into_response();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Payment saved but DB error");
    assert_eq!(body["error"], "insert failed for order_abc");
}
