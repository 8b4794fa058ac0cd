use super::common::{CourseDetail, RosterEntry};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{db_error, owned_course};
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::course;

/// GET /api/teacher/course/list
///
/// Courses owned by the signed-in teacher, newest first.
///
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "id": 1,
///       "name": "Data Structures",
///       "description": "Lists, trees and graphs",
///       "teacher_id": 4,
///       "semester": "2025-Spring",
///       "credit": 3.0,
///       "start_date": "2025-02-24",
///       "end_date": "2025-06-30",
///       "created_at": "2025-02-01T08:00:00Z",
///       "updated_at": "2025-02-01T08:00:00Z"
///     }
///   ],
///   "message": "Courses retrieved successfully"
/// }
/// ```
pub async fn list_courses(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    match course::Model::list_for_teacher(app_state.db(), claims.sub).await {
        Ok(courses) => (
            StatusCode::OK,
            Json(ApiResponse::success(courses, "Courses retrieved successfully")),
        )
            .into_response(),
        Err(e) => db_error(e),
    }
}

/// GET /api/teacher/course/{course_id}
///
/// The course plus its roster:
///
/// ```json
/// {
///   "id": 1,
///   "name": "Data Structures",
///   "...": "...",
///   "students": [
///     { "name": "Wang Fang", "student_id": "S2024001", "college": "Engineering", "grade": "Year 1" }
///   ]
/// }
/// ```
///
/// - `404 Not Found` missing course, or a course of another teacher
pub async fn get_course(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();
    let course = match owned_course(db, course_id, claims.sub).await {
        Ok(course) => course,
        Err(response) => return response,
    };

    let students = match course.students(db).await {
        Ok(students) => students.into_iter().map(RosterEntry::from).collect(),
        Err(e) => return db_error(e),
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            CourseDetail { course, students },
            "Course retrieved successfully",
        )),
    )
        .into_response()
}
