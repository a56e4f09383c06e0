use crate::config::security_config::{require_admin, Claims};
use crate::error::ApiError;
use crate::models::models::{AppState, Course, CourseDataResponse, CourseRequest, NewCourse};
use axum::{extract::State, http::StatusCode, Extension, Json};
use diesel::prelude::*;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseDataResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearerAuth" = [])),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CourseRequest>,
) -> Result<(StatusCode, Json<CourseDataResponse>), ApiError> {
    require_admin(&claims)?;

    payload.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let access_options = serde_json::to_value(&payload.access_options)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let conn = &mut state.db.get().map_err(|e| {
        error!("Database connection error: {}", e);
        ApiError::DatabaseConnection(e.to_string())
    })?;

    let course: Course = diesel::insert_into(crate::schema::courses::table)
        .values(NewCourse {
            id: Uuid::new_v4(),
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
        })
        .returning(Course::as_returning())
        .get_result(conn)?;

    info!("Course created: {} ({})", course.title, course.id);

    Ok((
        StatusCode::CREATED,
        Json(CourseDataResponse {
            success: true,
            data: course.into(),
        }),
    ))
}
