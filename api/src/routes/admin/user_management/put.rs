use super::common::UserActionResponse;
use crate::response::ApiResponse;
use crate::routes::common::{db_error, error_response};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::{student, teacher};
use serde::Deserialize;
use util::files::is_valid_owner_id;
use validator::{Validate, ValidationError};

pub(super) const STAFF_ID_CHARSET: &str = "Staff id may only contain letters and digits";

fn validate_staff_id(staff_id: &str) -> Result<(), ValidationError> {
    if is_valid_owner_id(staff_id) {
        Ok(())
    } else {
        Err(ValidationError::new("staff_id").with_message(STAFF_ID_CHARSET.into()))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStudentRequest {
    #[validate(length(min = 1, max = 20, message = "Student id must be 1-20 characters"))]
    pub student_id: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    pub username: Option<String>,
    pub college: Option<String>,
    pub major: Option<String>,
    pub grade: Option<String>,
    pub enrollment_year: Option<i32>,
    pub intro: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub contact_email: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTeacherRequest {
    #[validate(
        length(min = 1, max = 20, message = "Staff id must be 1-20 characters"),
        custom(function = "validate_staff_id")
    )]
    pub staff_id: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    pub username: Option<String>,
    pub department: Option<String>,
    pub expertise: Option<String>,
    pub intro: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub contact_email: Option<String>,
    pub office_location: Option<String>,
}

/// PUT /api/admin/user_management/update_student/{student_id}
///
/// Partial update of a student. Moving the student to a number that is
/// already taken is rejected.
///
/// ### Request Body
/// ```json
/// { "student_id": "S2024099", "grade": "Year 2" }
/// ```
///
/// - `200 OK` `{ "status": "success", "message": "...", "user_id": "S2024099" }`
/// - `400 Bad Request` validation failure or student id already in use
/// - `404 Not Found` unknown student
pub async fn update_student(
    State(app_state): State<AppState>,
    Path(student_id): Path<String>,
    Json(req): Json<UpdateStudentRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let db = app_state.db();
    let existing = match student::Model::find_by_student_id(db, &student_id).await {
        Ok(Some(s)) => s,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "Student not found"),
        Err(e) => return db_error(e),
    };

    if let Some(new_id) = req.student_id.as_deref().filter(|id| *id != student_id) {
        match student::Model::find_by_student_id(db, new_id).await {
            Ok(Some(_)) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Student id '{new_id}' is already in use"),
                );
            }
            Ok(None) => {}
            Err(e) => return db_error(e),
        }
    }

    let changes = student::StudentChanges {
        student_id: req.student_id,
        username: req.username,
        college: req.college,
        major: req.major,
        grade: req.grade,
        enrollment_year: req.enrollment_year,
        intro: req.intro,
        contact_email: req.contact_email,
    };

    match student::Model::apply_changes(db, existing.id, changes).await {
        Ok(updated) => {
            tracing::info!(target: "user_management", from = %student_id, to = %updated.student_id, "student updated");
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    UserActionResponse::success("Student updated successfully", updated.student_id),
                    "Student updated successfully",
                )),
            )
                .into_response()
        }
        Err(e) => db_error(e),
    }
}

/// PUT /api/admin/user_management/update_teacher/{staff_id}
///
/// Partial update of a teacher; same rules as `update_student`.
pub async fn update_teacher(
    State(app_state): State<AppState>,
    Path(staff_id): Path<String>,
    Json(req): Json<UpdateTeacherRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let db = app_state.db();
    let existing = match teacher::Model::find_by_staff_id(db, &staff_id).await {
        Ok(Some(t)) => t,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "Teacher not found"),
        Err(e) => return db_error(e),
    };

    if let Some(new_id) = req.staff_id.as_deref().filter(|id| *id != staff_id) {
        match teacher::Model::find_by_staff_id(db, new_id).await {
            Ok(Some(_)) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Staff id '{new_id}' is already in use"),
                );
            }
            Ok(None) => {}
            Err(e) => return db_error(e),
        }
    }

    let changes = teacher::TeacherChanges {
        staff_id: req.staff_id,
        username: req.username,
        department: req.department,
        expertise: req.expertise,
        intro: req.intro,
        contact_email: req.contact_email,
        office_location: req.office_location,
    };

    match teacher::Model::apply_changes(db, existing.id, changes).await {
        Ok(updated) => {
            tracing::info!(target: "user_management", from = %staff_id, to = %updated.staff_id, "teacher updated");
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    UserActionResponse::success("Teacher updated successfully", updated.staff_id),
                    "Teacher updated successfully",
                )),
            )
                .into_response()
        }
        Err(e) => db_error(e),
    }
}
