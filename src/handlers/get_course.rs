use crate::error::ApiError;
use crate::models::models::{AppState, Course, CourseDataResponse};
use axum::{
    extract::{Path, State},
    Json,
};
use diesel::prelude::*;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/courses/{course_id}",
    params(("course_id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course details", body = CourseDataResponse),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> Result<Json<CourseDataResponse>, ApiError> {
    let course_uuid = Uuid::parse_str(&course_id)
        .map_err(|_| ApiError::NotFound("Course not found".to_string()))?;

    let conn = &mut state.db.get().map_err(|e| {
        error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    let course: Course = crate::schema::courses::table
        .find(course_uuid)
        .select(Course::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    Ok(Json(CourseDataResponse {
        success: true,
        data: course.into(),
    }))
}
