use super::common::{RemoveResult, StudentIdsRequest};
use crate::auth::AuthUser;
use crate::auth::guards::Empty;
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
use db::models::{course, course_student, student};
use validator::Validate;

/// DELETE /api/teacher/course/{course_id}
///
/// Deletes the course. The roster, materials, notifications and exercise
/// assignments go with it through cascading foreign keys, and the course's
/// material directory is removed from disk.
///
/// - `200 OK` `{ "success": true, "data": null, "message": "Course deleted successfully" }`
/// - `404 Not Found` missing or foreign course
pub async fn delete_course(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();
    let course = match owned_course(db, course_id, claims.sub).await {
        Ok(course) => course,
        Err(response) => return response,
    };

    if let Err(e) = course::Model::delete(db, course.id).await {
        return db_error(e);
    }

    let dir = app_state.storage().course_material_dir(course.id);
    if let Err(e) = tokio::fs::remove_dir_all(&dir).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(
                target: "course_management",
                course_id,
                path = %dir.display(),
                error = %e,
                "could not remove material directory"
            );
        }
    }

    tracing::info!(target: "course_management", course_id, teacher = %claims.account_id, "course deleted");
    (
        StatusCode::OK,
        Json(ApiResponse::success(Empty, "Course deleted successfully")),
    )
        .into_response()
}

/// DELETE /api/teacher/course/{course_id}/students
///
/// ### Request Body
/// ```json
/// { "student_ids": ["S2024001"] }
/// ```
///
/// ### Response
/// ```json
/// { "success": true, "data": { "removed": 1 }, "message": "Removed 1 student(s)" }
/// ```
pub async fn remove_students(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(course_id): Path<i64>,
    Json(req): Json<StudentIdsRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let db = app_state.db();
    let course = match owned_course(db, course_id, claims.sub).await {
        Ok(course) => course,
        Err(response) => return response,
    };

    let student_pks: Vec<i64> = match student::Model::find_by_student_ids(db, &req.student_ids).await {
        Ok(students) => students.into_iter().map(|s| s.id).collect(),
        Err(e) => return db_error(e),
    };

    let removed = match course_student::Model::remove(db, course.id, &student_pks).await {
        Ok(n) => n,
        Err(e) => return db_error(e),
    };

    tracing::info!(target: "course_management", course_id, removed, "students removed");
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            RemoveResult { removed },
            format!("Removed {removed} student(s)"),
        )),
    )
        .into_response()
}
