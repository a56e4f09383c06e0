use crate::models::models::AppState;
use axum::{extract::State, http::StatusCode, Json};
use diesel::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "System is healthy"),
        (status = 503, description = "System is unhealthy")
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let db_ok = match state.db.get() {
        Ok(mut conn) => diesel::sql_query("SELECT 1").execute(&mut conn).is_ok(),
        Err(_) => false,
    };

    if db_ok {
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Vidhyarthi Seva backend is running",
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "message": "Database unavailable",
            })),
        )
    }
}
