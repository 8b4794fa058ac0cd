use super::common::{
    ImportResult, STUDENT_COLUMNS, TEACHER_COLUMNS, UserActionResponse, cell, map_columns,
    parse_csv,
};
use super::put::STAFF_ID_CHARSET;
use crate::response::ApiResponse;
use crate::routes::common::{db_error, error_response};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::format_validation_errors;
use db::models::{student, teacher};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use util::files::is_valid_owner_id;
use validator::Validate;

const DUPLICATE: &str = "username or id already exists";

/// Reads the `file` part of an import upload as CSV records, header first.
async fn read_csv_upload(mut multipart: Multipart) -> Result<Vec<Vec<String>>, Response> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid upload: {e}"),
                ));
            }
        };
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("").to_string();
        let bytes = field.bytes().await.map_err(|e| {
            error_response(StatusCode::BAD_REQUEST, format!("Failed to read upload: {e}"))
        })?;
        upload = Some((file_name, bytes.to_vec()));
    }

    let Some((file_name, bytes)) = upload else {
        return Err(error_response(StatusCode::BAD_REQUEST, "No file uploaded"));
    };

    if !file_name.to_ascii_lowercase().ends_with(".csv") {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Only .csv files are supported",
        ));
    }

    let text = String::from_utf8(bytes)
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "File must be UTF-8 encoded"))?;

    let records = parse_csv(&text);
    if records.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "File is empty"));
    }
    Ok(records)
}

fn import_response(result: ImportResult, kind: &str) -> Response {
    let message = format!(
        "Imported {} of {} {kind}",
        result.success_count, result.total
    );
    (StatusCode::OK, Json(ApiResponse::success(result, message))).into_response()
}

async fn import_student(
    db: &DatabaseConnection,
    record: &[String],
    columns: &std::collections::HashMap<&'static str, usize>,
) -> Result<(), String> {
    let field = |name: &str| cell(record, columns, name).to_string();
    for required in ["username", "password", "student_id", "college"] {
        if field(required).is_empty() {
            return Err(format!("{required} is empty"));
        }
    }

    let enrollment_year = match field("enrollment_year") {
        y if y.is_empty() => None,
        y => Some(
            y.parse::<i32>()
                .map_err(|_| format!("invalid enrollment_year '{y}'"))?,
        ),
    };

    let student_id = field("student_id");
    match student::Model::find_by_student_id(db, &student_id).await {
        Ok(Some(_)) => return Err(DUPLICATE.into()),
        Ok(None) => {}
        Err(e) => return Err(e.to_string()),
    }

    let optional = |v: String| if v.is_empty() { None } else { Some(v) };
    student::Model::create(
        db,
        student::NewStudent {
            student_id,
            username: field("username"),
            password: field("password"),
            college: field("college"),
            major: optional(field("major")),
            grade: optional(field("grade")),
            enrollment_year,
        },
    )
    .await
    .map(|_| ())
    .map_err(|e| {
        if e.to_string().contains("UNIQUE") {
            DUPLICATE.to_string()
        } else {
            e.to_string()
        }
    })
}

async fn import_teacher(
    db: &DatabaseConnection,
    record: &[String],
    columns: &std::collections::HashMap<&'static str, usize>,
) -> Result<(), String> {
    let field = |name: &str| cell(record, columns, name);
    for required in ["username", "password", "staff_id", "department"] {
        if field(required).is_empty() {
            return Err(format!("{required} is empty"));
        }
    }

    if !is_valid_owner_id(field("staff_id")) {
        return Err(STAFF_ID_CHARSET.into());
    }

    match teacher::Model::find_by_staff_id(db, field("staff_id")).await {
        Ok(Some(_)) => return Err(DUPLICATE.into()),
        Ok(None) => {}
        Err(e) => return Err(e.to_string()),
    }

    teacher::Model::create(
        db,
        field("staff_id"),
        field("username"),
        field("password"),
        field("department"),
    )
    .await
    .map(|_| ())
    .map_err(|e| {
        if e.to_string().contains("UNIQUE") {
            DUPLICATE.to_string()
        } else {
            e.to_string()
        }
    })
}

/// POST /api/admin/user_management/create_students
///
/// Bulk-creates students from a multipart `file` holding a UTF-8 CSV.
///
/// Required columns (English or Chinese header):
/// `username|姓名, password|密码, student_id|学号, college|学院, major|专业,
/// grade|年级, enrollment_year|入学年份`.
///
/// Each row is inserted on its own; failures do not stop the import.
///
/// ### Response
/// ```json
/// {
///   "success": true,
///   "data": {
///     "total": 3,
///     "success_count": 2,
///     "failed_count": 1,
///     "failed_records": [
///       { "username": "Wang Fang", "success": false, "error": "username or id already exists" }
///     ]
///   },
///   "message": "Imported 2 of 3 students"
/// }
/// ```
///
/// - `400 Bad Request` no file, not `.csv`, not UTF-8, or a required column is missing
pub async fn create_students(
    State(app_state): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let records = match read_csv_upload(multipart).await {
        Ok(records) => records,
        Err(response) => return response,
    };
    let columns = match map_columns(&records[0], STUDENT_COLUMNS) {
        Ok(columns) => columns,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, msg),
    };

    let mut result = ImportResult::default();
    for record in &records[1..] {
        let username = cell(record, &columns, "username");
        match import_student(app_state.db(), record, &columns).await {
            Ok(()) => result.succeeded(),
            Err(e) => result.failed(username, e),
        }
    }

    tracing::info!(
        target: "user_management",
        total = result.total,
        created = result.success_count,
        failed = result.failed_count,
        "student import finished"
    );
    import_response(result, "students")
}

/// POST /api/admin/user_management/create_teachers
///
/// Same as `create_students` with the columns
/// `username|姓名, password|密码, staff_id|教工号, department|所属院系`.
pub async fn create_teachers(
    State(app_state): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let records = match read_csv_upload(multipart).await {
        Ok(records) => records,
        Err(response) => return response,
    };
    let columns = match map_columns(&records[0], TEACHER_COLUMNS) {
        Ok(columns) => columns,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, msg),
    };

    let mut result = ImportResult::default();
    for record in &records[1..] {
        let username = cell(record, &columns, "username");
        match import_teacher(app_state.db(), record, &columns).await {
            Ok(()) => result.succeeded(),
            Err(e) => result.failed(username, e),
        }
    }

    tracing::info!(
        target: "user_management",
        total = result.total,
        created = result.success_count,
        failed = result.failed_count,
        "teacher import finished"
    );
    import_response(result, "teachers")
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 6, message = "New password must be at least 6 characters"))]
    pub new_password: String,
}

/// POST /api/admin/user_management/reset_student_password/{student_id}
///
/// ### Request Body
/// ```json
/// { "new_password": "changeme" }
/// ```
///
/// - `200 OK` `{ "status": "success", "message": "...", "user_id": "S2024001" }`
/// - `400 Bad Request` password shorter than 6 characters
/// - `404 Not Found` unknown student
pub async fn reset_student_password(
    State(app_state): State<AppState>,
    Path(student_id): Path<String>,
    Json(req): Json<ResetPasswordRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let db = app_state.db();
    let student = match student::Model::find_by_student_id(db, &student_id).await {
        Ok(Some(s)) => s,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "Student not found"),
        Err(e) => return db_error(e),
    };

    if let Err(e) = student::Model::set_password(db, student.id, &req.new_password).await {
        return db_error(e);
    }

    tracing::info!(target: "user_management", %student_id, "student password reset");
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            UserActionResponse::success("Password reset successfully", student_id),
            "Password reset successfully",
        )),
    )
        .into_response()
}

/// POST /api/admin/user_management/reset_teacher_password/{staff_id}
pub async fn reset_teacher_password(
    State(app_state): State<AppState>,
    Path(staff_id): Path<String>,
    Json(req): Json<ResetPasswordRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let db = app_state.db();
    let teacher = match teacher::Model::find_by_staff_id(db, &staff_id).await {
        Ok(Some(t)) => t,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "Teacher not found"),
        Err(e) => return db_error(e),
    };

    if let Err(e) = teacher::Model::set_password(db, teacher.id, &req.new_password).await {
        return db_error(e);
    }

    tracing::info!(target: "user_management", %staff_id, "teacher password reset");
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            UserActionResponse::success("Password reset successfully", staff_id),
            "Password reset successfully",
        )),
    )
        .into_response()
}
