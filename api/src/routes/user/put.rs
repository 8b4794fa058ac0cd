use crate::auth::AuthUser;
use crate::routes::auth::get::profile_response;
use crate::routes::common::{db_error, error_response};
use crate::state::AppState;
use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::{student, teacher};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct TeacherProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Department must be 1-100 characters"))]
    pub department: Option<String>,
    pub expertise: Option<String>,
    pub intro: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub contact_email: Option<String>,
    pub office_location: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct StudentProfileRequest {
    pub major: Option<String>,
    pub grade: Option<String>,
    pub intro: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub contact_email: Option<String>,
}

/// PUT /api/user/profile/teacher
///
/// Updates the signed-in teacher's own profile. Only the provided fields
/// change.
///
/// ### Request Body
/// ```json
/// { "expertise": "Databases", "office_location": "B-402" }
/// ```
///
/// Responds with the updated profile, like `GET /api/user/profile`.
pub async fn update_teacher_profile(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<TeacherProfileRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let changes = teacher::TeacherChanges {
        department: req.department,
        expertise: req.expertise,
        intro: req.intro,
        contact_email: req.contact_email,
        office_location: req.office_location,
        ..Default::default()
    };

    if let Err(e) = teacher::Model::apply_changes(app_state.db(), claims.sub, changes).await {
        return db_error(e);
    }

    tracing::info!(target: "user_management", account = %claims.account_id, "teacher profile updated");
    profile_response(app_state.db(), &claims).await
}

/// PUT /api/user/profile/student
///
/// Updates the signed-in student's `major`, `grade`, `intro` and
/// `contact_email`.
pub async fn update_student_profile(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<StudentProfileRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let changes = student::StudentChanges {
        major: req.major,
        grade: req.grade,
        intro: req.intro,
        contact_email: req.contact_email,
        ..Default::default()
    };

    if let Err(e) = student::Model::apply_changes(app_state.db(), claims.sub, changes).await {
        return db_error(e);
    }

    tracing::info!(target: "user_management", account = %claims.account_id, "student profile updated");
    profile_response(app_state.db(), &claims).await
}
