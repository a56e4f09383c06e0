use crate::error::ApiError;
use crate::models::models::{AppState, Course, CourseListResponse};
use axum::{extract::State, Json};
use diesel::prelude::*;
use std::sync::Arc;
use tracing::error;

#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "All courses, newest first", body = CourseListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn list_courses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CourseListResponse>, ApiError> {
    let conn = &mut state.db.get().map_err(|e| {
        error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    let courses: Vec<Course> = crate::schema::courses::table
        .order(crate::schema::courses::created_at.desc())
        .select(Course::as_select())
        .load(conn)
        .map_err(|e| {
            error!("Failed to fetch courses: {}", e);
            ApiError::Database(e)
        })?;

    let data: Vec<_> = courses.into_iter().map(Into::into).collect();

    Ok(Json(CourseListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}
