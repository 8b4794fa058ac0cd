use super::common::{CreateCourseRequest, CreatedCourse, EnrollResult, StudentIdsRequest, check_dates};
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
use db::models::{course, course_student, student};
use validator::Validate;

/// POST /api/teacher/course/create
///
/// Creates a course owned by the signed-in teacher.
///
/// ### Request Body
/// ```json
/// {
///   "name": "Data Structures",
///   "description": "Lists, trees and graphs",
///   "semester": "2025-Spring",
///   "credit": 3.0,
///   "start_date": "2025-02-24",
///   "end_date": "2025-06-30"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` `{ "id": 1, "name": "Data Structures", "description": "..." }`
/// - `400 Bad Request` validation failure or `end_date` before `start_date`
pub async fn create_course(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<CreateCourseRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }
    if let Err(msg) = check_dates(req.start_date, req.end_date) {
        return error_response(StatusCode::BAD_REQUEST, msg);
    }

    let new = course::NewCourse {
        name: req.name,
        description: req.description,
        semester: req.semester,
        credit: req.credit,
        start_date: req.start_date,
        end_date: req.end_date,
    };

    match course::Model::create(app_state.db(), claims.sub, new).await {
        Ok(course) => {
            tracing::info!(
                target: "course_management",
                teacher = %claims.account_id,
                course_id = course.id,
                "course created"
            );
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    CreatedCourse {
                        id: course.id,
                        name: course.name,
                        description: course.description,
                    },
                    "Course created successfully",
                )),
            )
                .into_response()
        }
        Err(e) => db_error(e),
    }
}

/// POST /api/teacher/course/{course_id}/students
///
/// Enrols students by student number.
///
/// ### Request Body
/// ```json
/// { "student_ids": ["S2024001", "S2024002", "S9999999"] }
/// ```
///
/// ### Response
/// ```json
/// {
///   "success": true,
///   "data": { "added": 1, "already_enrolled": ["S2024002"], "not_found": ["S9999999"] },
///   "message": "Added 1 student(s)"
/// }
/// ```
///
/// - `404 Not Found` the course does not exist or belongs to another teacher
pub async fn add_students(
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

    let students = match student::Model::find_by_student_ids(db, &req.student_ids).await {
        Ok(students) => students,
        Err(e) => return db_error(e),
    };

    let mut result = EnrollResult::default();
    for wanted in &req.student_ids {
        let Some(student) = students.iter().find(|s| &s.student_id == wanted) else {
            result.not_found.push(wanted.clone());
            continue;
        };
        match course_student::Model::enroll(db, course.id, student.id).await {
            Ok(true) => result.added += 1,
            Ok(false) => result.already_enrolled.push(wanted.clone()),
            Err(e) => return db_error(e),
        }
    }

    tracing::info!(
        target: "course_management",
        course_id,
        added = result.added,
        not_found = result.not_found.len(),
        "students enrolled"
    );

    let message = format!("Added {} student(s)", result.added);
    (StatusCode::OK, Json(ApiResponse::success(result, message))).into_response()
}
