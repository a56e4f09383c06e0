use crate::config::security_config::{require_admin, Claims};
use crate::error::ApiError;
use crate::models::models::{AppState, MessageResponse};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use diesel::prelude::*;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}",
    params(("course_id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Course not found")
    ),
    security(("bearerAuth" = [])),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(course_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    require_admin(&claims)?;

    let course_uuid = Uuid::parse_str(&course_id)
        .map_err(|_| ApiError::NotFound("Course not found".to_string()))?;

    let conn = &mut state.db.get().map_err(|e| {
        error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    let deleted =
        diesel::delete(crate::schema::courses::table.find(course_uuid)).execute(conn)?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    info!("Course deleted: {}", course_uuid);

    Ok(Json(MessageResponse {
        success: true,
        message: "Course deleted successfully".to_string(),
    }))
}
