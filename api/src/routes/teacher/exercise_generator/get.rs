use super::common::{ExerciseDetail, FileItem, ListQuery, MdContent, SetFile, check_file_name, stem};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{error_response, file_download};
use crate::state::AppState;
use ai::exercises::load_json;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use util::files::{is_owned_by, list_files};

/// GET /api/teacher/exercise_generator/file_md_content/{file_name}
///
/// Raw Markdown of one of the caller's generated sets.
///
/// - `200 OK` `{ "content": "# Calculus week 3\n..." }`
/// - `400 Bad Request` not a `.md` file
/// - `403 Forbidden` the file belongs to another teacher
/// - `404 Not Found` no such file
pub async fn file_md_content(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(file_name): Path<String>,
) -> impl IntoResponse {
    if let Err(response) = check_file_name(&file_name, &claims.account_id, &[SetFile::Markdown]) {
        return response;
    }

    let path = app_state.storage().exercises_md_dir().join(&file_name);
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                MdContent { content },
                "File content retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            error_response(StatusCode::NOT_FOUND, "File not found")
        }
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to read file: {e}"),
        ),
    }
}

/// GET /api/teacher/exercise_generator/detail/{file_name}
///
/// The structured exercises behind a set. Either the `.md` or the `.json`
/// name may be given.
pub async fn detail(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(file_name): Path<String>,
) -> impl IntoResponse {
    if let Err(response) = check_file_name(
        &file_name,
        &claims.account_id,
        &[SetFile::Markdown, SetFile::Json],
    ) {
        return response;
    }

    let json_name = format!("{}.json", stem(&file_name));
    let path = app_state.storage().exercises_json_dir().join(&json_name);
    if !path.is_file() {
        return error_response(StatusCode::NOT_FOUND, "Exercise data not found");
    }

    match load_json(&path).await {
        Ok(exercises) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ExerciseDetail {
                    filename: json_name,
                    exercise_count: exercises.len(),
                    exercises,
                },
                "Exercise detail retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(target: "exercise_generator", file = %json_name, error = %e, "unreadable exercise file");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to read exercise data: {e}"),
            )
        }
    }
}

/// GET /api/teacher/exercise_generator/download/{file_name}
///
/// `.md` or `.json` only, as an attachment.
pub async fn download(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(file_name): Path<String>,
) -> impl IntoResponse {
    let kind = match check_file_name(
        &file_name,
        &claims.account_id,
        &[SetFile::Markdown, SetFile::Json],
    ) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    let storage = app_state.storage();
    let (dir, content_type) = match kind {
        SetFile::Markdown => (storage.exercises_md_dir(), "text/markdown; charset=utf-8"),
        SetFile::Json => (storage.exercises_json_dir(), "application/json"),
    };

    file_download(&dir.join(&file_name), &file_name, content_type).await
}

/// GET /api/teacher/exercise_generator/list?limit=50&title_filter=calculus
///
/// The caller's Markdown sets, newest first.
///
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "filename": "teacher_T001_20250301_101500_Calculus_week_3.md",
///       "created_at": "2025-03-01 10:15:00",
///       "size_kb": 2.41
///     }
///   ],
///   "message": "Exercise files retrieved successfully"
/// }
/// ```
pub async fn list(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let filter = query
        .title_filter
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_lowercase);

    let dir = app_state.storage().exercises_md_dir();
    let files = list_files(&dir, |name| {
        is_owned_by(name, &claims.account_id)
            && name.to_ascii_lowercase().ends_with(".md")
            && filter
                .as_deref()
                .is_none_or(|f| name.to_lowercase().contains(f))
    });

    match files {
        Ok(files) => {
            let items: Vec<FileItem> = files
                .into_iter()
                .take(query.limit)
                .map(FileItem::from)
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    items,
                    "Exercise files retrieved successfully",
                )),
            )
                .into_response()
        }
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to list files: {e}"),
        ),
    }
}
