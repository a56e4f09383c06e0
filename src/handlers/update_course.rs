use crate::config::security_config::{require_admin, Claims};
use crate::error::ApiError;
use crate::models::models::{
    AppState, Course, CourseChangeset, CourseDataResponse, CourseUpdateRequest,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

#[utoipa::path(
    put,
    path = "/api/courses/{course_id}",
    params(("course_id" = String, Path, description = "Course id")),
    request_body = CourseUpdateRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseDataResponse),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Course not found")
    ),
    security(("bearerAuth" = [])),
    tag = "Courses"
)]
pub async fn update_course(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(course_id): Path<String>,
    Json(payload): Json<CourseUpdateRequest>,
) -> Result<Json<CourseDataResponse>, ApiError> {
    require_admin(&claims)?;

    payload.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let course_uuid = Uuid::parse_str(&course_id)
        .map_err(|_| ApiError::NotFound("Course not found".to_string()))?;

    // Fields the caller left out stay None and the changeset skips them,
    // so a partial update cannot wipe the stored values.
    let access_options = payload
        .access_options
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let conn = &mut state.db.get().map_err(|e| {
        error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    let course: Course = diesel::update(crate::schema::courses::table.find(course_uuid))
        .set(CourseChangeset {
            title: payload.title,
            description: payload.description,
            lectures: payload.lectures,
            hours: payload.hours,
            timings: payload.timings,
            batch_start_date: payload.batch_start_date,
            video_language: payload.video_language,
            syllabus_type: payload.syllabus_type,
            thumbnail: payload.thumbnail,
            access_options,
            updated_at: Utc::now(),
        })
        .returning(Course::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    info!("Course updated: {} ({})", course.title, course.id);

    Ok(Json(CourseDataResponse {
        success: true,
        data: course.into(),
    }))
}
