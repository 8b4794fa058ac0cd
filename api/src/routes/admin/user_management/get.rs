use super::common::{ListQuery, STUDENT_COLUMNS, TEACHER_COLUMNS, template};
use crate::response::ApiResponse;
use crate::routes::common::{content_disposition, db_error, error_response};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use db::models::{student, teacher};
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct StudentListResponse {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub students: Vec<student::Model>,
}

#[derive(Debug, Serialize, Default)]
pub struct TeacherListResponse {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub teachers: Vec<teacher::Model>,
}

fn csv_attachment(file_name: &str, body: String) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&content_disposition(file_name))
            .unwrap_or(HeaderValue::from_static("attachment")),
    );
    (StatusCode::OK, (headers, body)).into_response()
}

/// GET /api/admin/user_management/student_template
///
/// CSV file holding only the header row expected by `create_students`.
pub async fn student_template() -> impl IntoResponse {
    csv_attachment("student_template.csv", template(STUDENT_COLUMNS))
}

/// GET /api/admin/user_management/teacher_template
pub async fn teacher_template() -> impl IntoResponse {
    csv_attachment("teacher_template.csv", template(TEACHER_COLUMNS))
}

/// GET /api/admin/user_management/list_students?page=1&page_size=10&search=wang
///
/// `search` matches name, student id, college and major. Ordered by
/// student id.
///
/// ### Response
/// ```json
/// {
///   "success": true,
///   "data": {
///     "total": 42,
///     "page": 1,
///     "page_size": 10,
///     "students": [
///       { "id": 1, "student_id": "S2024001", "username": "Wang Fang", "college": "Engineering", ... }
///     ]
///   },
///   "message": "Students retrieved successfully"
/// }
/// ```
pub async fn list_students(
    State(app_state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> impl IntoResponse {
    let paging = params.paging();
    match student::Model::search(
        app_state.db(),
        params.search.as_deref(),
        paging.offset(),
        paging.page_size(),
    )
    .await
    {
        Ok((students, total)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                StudentListResponse {
                    total,
                    page: paging.page(),
                    page_size: paging.page_size(),
                    students,
                },
                "Students retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => db_error(e),
    }
}

/// GET /api/admin/user_management/list_teachers?page=1&page_size=10&search=li
///
/// `search` matches name, staff id and department.
pub async fn list_teachers(
    State(app_state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> impl IntoResponse {
    let paging = params.paging();
    match teacher::Model::search(
        app_state.db(),
        params.search.as_deref(),
        paging.offset(),
        paging.page_size(),
    )
    .await
    {
        Ok((teachers, total)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                TeacherListResponse {
                    total,
                    page: paging.page(),
                    page_size: paging.page_size(),
                    teachers,
                },
                "Teachers retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => db_error(e),
    }
}

/// GET /api/admin/user_management/student_detail/{student_id}
///
/// - `404 Not Found` no student with that number
pub async fn student_detail(
    State(app_state): State<AppState>,
    Path(student_id): Path<String>,
) -> impl IntoResponse {
    match student::Model::find_by_student_id(app_state.db(), &student_id).await {
        Ok(Some(student)) => (
            StatusCode::OK,
            Json(ApiResponse::success(student, "Student retrieved successfully")),
        )
            .into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Student not found"),
        Err(e) => db_error(e),
    }
}

/// GET /api/admin/user_management/teacher_detail/{staff_id}
pub async fn teacher_detail(
    State(app_state): State<AppState>,
    Path(staff_id): Path<String>,
) -> impl IntoResponse {
    match teacher::Model::find_by_staff_id(app_state.db(), &staff_id).await {
        Ok(Some(teacher)) => (
            StatusCode::OK,
            Json(ApiResponse::success(teacher, "Teacher retrieved successfully")),
        )
            .into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Teacher not found"),
        Err(e) => db_error(e),
    }
}
