use super::common::{UpdateCourseRequest, check_dates};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{db_error, error_response, owned_course};
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::course;
use validator::Validate;

/// PUT /api/teacher/course/{course_id}
///
/// Partial update; omitted fields keep their values. The date rule is
/// checked against the resulting start and end dates.
///
/// ### Request Body
/// ```json
/// { "description": "Updated syllabus", "end_date": "2025-07-04" }
/// ```
///
/// - `200 OK` the updated course
/// - `400 Bad Request` validation failure or end date before start date
/// - `404 Not Found` missing or foreign course
pub async fn update_course(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(course_id): Path<i64>,
    Json(req): Json<UpdateCourseRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let db = app_state.db();
    let existing = match owned_course(db, course_id, claims.sub).await {
        Ok(course) => course,
        Err(response) => return response,
    };

    let start = req.start_date.or(existing.start_date);
    let end = req.end_date.or(existing.end_date);
    if let Err(msg) = check_dates(start, end) {
        return error_response(StatusCode::BAD_REQUEST, msg);
    }

    let changes = course::CourseChanges {
        name: req.name,
        description: req.description,
        semester: req.semester,
        credit: req.credit,
        start_date: req.start_date,
        end_date: req.end_date,
    };

    match course::Model::apply_changes(db, existing.id, changes).await {
        Ok(course) => {
            tracing::info!(target: "course_management", course_id, "course updated");
            (
                StatusCode::OK,
                Json(ApiResponse::success(course, "Course updated successfully")),
            )
                .into_response()
        }
        Err(e) => db_error(e),
    }
}
