use crate::response::ApiResponse;
use crate::routes::common::error_response;
use axum::{
    Json,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use util::{config, logs};

#[derive(Debug, Deserialize)]
pub struct FilesQuery {
    pub service_name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    pub service_name: String,
    pub file_name: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LogContent {
    pub service_name: String,
    pub file_name: String,
    pub lines: Vec<String>,
}

fn log_dir() -> PathBuf {
    PathBuf::from(config::log_dir())
}

fn io_error(err: io::Error) -> Response {
    match err.kind() {
        io::ErrorKind::NotFound => error_response(StatusCode::NOT_FOUND, err.to_string()),
        io::ErrorKind::InvalidInput => error_response(StatusCode::BAD_REQUEST, err.to_string()),
        _ => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to read logs: {err}"),
        ),
    }
}

fn parse_date(value: Option<&str>, name: &str) -> Result<Option<NaiveDate>, Response> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d").map(Some).map_err(|_| {
            error_response(
                StatusCode::BAD_REQUEST,
                format!("{name} must be formatted as YYYY-MM-DD"),
            )
        }),
    }
}

/// GET /api/admin/log_management/services
///
/// Every service directory under the log directory, sorted by name.
///
/// ```json
/// {
///   "success": true,
///   "data": [
///     { "name": "app", "description": "Application log" },
///     { "name": "request", "description": "HTTP request log" }
///   ],
///   "message": "Log services retrieved successfully"
/// }
/// ```
pub async fn list_services() -> impl IntoResponse {
    match logs::list_services(&log_dir()) {
        Ok(services) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                services,
                "Log services retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => io_error(e),
    }
}

/// GET /api/admin/log_management/files?service_name=app&start_date=2025-01-01&end_date=2025-01-31
///
/// Log files of a service, newest first. Files without a date suffix are
/// listed last and are not affected by the date range.
///
/// ```json
/// {
///   "success": true,
///   "data": [
///     { "name": "app.log.2025-01-31", "date": "2025-01-31", "size": "12.40 KB" }
///   ],
///   "message": "Log files retrieved successfully"
/// }
/// ```
///
/// - `400 Bad Request` malformed date
/// - `404 Not Found` unknown service
pub async fn list_files(Query(params): Query<FilesQuery>) -> impl IntoResponse {
    let start = match parse_date(params.start_date.as_deref(), "start_date") {
        Ok(d) => d,
        Err(response) => return response,
    };
    let end = match parse_date(params.end_date.as_deref(), "end_date") {
        Ok(d) => d,
        Err(response) => return response,
    };

    match logs::list_files(&log_dir(), &params.service_name, start, end) {
        Ok(files) => (
            StatusCode::OK,
            Json(ApiResponse::success(files, "Log files retrieved successfully")),
        )
            .into_response(),
        Err(e) => io_error(e),
    }
}

/// GET /api/admin/log_management/content?service_name=app&file_name=app.log.2025-01-31
///
/// The file's lines without trailing newlines.
///
/// - `400 Bad Request` file name with path separators or `..`
/// - `404 Not Found` unknown service or file
pub async fn file_content(Query(params): Query<ContentQuery>) -> impl IntoResponse {
    match logs::read_lines(&log_dir(), &params.service_name, &params.file_name) {
        Ok(lines) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                LogContent {
                    service_name: params.service_name,
                    file_name: params.file_name,
                    lines,
                },
                "Log content retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => io_error(e),
    }
}
