//! Small helpers shared by the route handlers.

use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use db::models::course;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sea_orm::{DatabaseConnection, DbErr};
use std::path::Path;

/// Everything but letters, digits and `-_.~` is encoded in `filename*`.
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Error envelope with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<Empty>::error(message))).into_response()
}

pub fn db_error(err: DbErr) -> Response {
    tracing::error!(error = %err, "database error");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Database error: {err}"),
    )
}

/// Loads a course owned by `teacher_pk`, or the response to return instead.
///
/// Someone else's course is reported exactly like a missing one.
pub async fn owned_course(
    db: &DatabaseConnection,
    course_id: i64,
    teacher_pk: i64,
) -> Result<course::Model, Response> {
    match course::Model::find_owned(db, course_id, teacher_pk).await {
        Ok(Some(course)) => Ok(course),
        Ok(None) => Err(error_response(
            StatusCode::NOT_FOUND,
            "Course not found or access denied",
        )),
        Err(e) => Err(db_error(e)),
    }
}

/// Reads a file from disk and returns it as a download.
pub async fn file_download(path: &Path, file_name: &str, content_type: &str) -> Response {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return error_response(StatusCode::NOT_FOUND, "File not found");
        }
        Err(e) => {
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to read file: {e}"),
            );
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&content_disposition(file_name))
            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
    );
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );

    (StatusCode::OK, headers, bytes).into_response()
}

/// `attachment` header value with an ASCII fallback name and the UTF-8
/// name percent-encoded (RFC 5987), so non-Latin titles survive.
pub fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    let encoded = utf8_percent_encode(file_name, FILENAME_ENCODE_SET);
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

/// Local timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn local_time(t: chrono::DateTime<chrono::Local>) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}
