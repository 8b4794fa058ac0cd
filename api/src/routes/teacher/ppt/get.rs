use super::common::{
    Options, OutlineSummary, PptFile, local_stamp, parse_outline_name, ppt_prefix, preview,
};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{error_response, file_download, local_time};
use crate::state::AppState;
use ai::slides::{GRADES, SUBJECTS, pptx::PPTX_MIME};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use util::files::{format_file_size, is_owned_by, is_safe_file_name, list_files};

/// GET /api/teacher/ppt/outlines
///
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "request_id": "a1b2c3d4",
///       "title": "Newton's laws",
///       "created_at": "2025-03-01 10:15:00",
///       "preview": "## Slide 1: Newton's laws\n- Content: Everyday mot...",
///       "has_generated_ppt": true
///     }
///   ],
///   "message": "Outlines retrieved successfully"
/// }
/// ```
pub async fn list_outlines(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let storage = app_state.storage();
    let staff_id = claims.account_id.as_str();
    let listed = list_files(&storage.ppt_outlines_dir(), |name| {
        parse_outline_name(name, staff_id).is_some()
    })
    .and_then(|outlines| {
        let decks = list_files(&storage.ppt_files_dir(), |name| {
            is_owned_by(name, staff_id) && name.ends_with(".pptx")
        })?;
        Ok((outlines, decks))
    });

    let (outlines, decks) = match listed {
        Ok(found) => found,
        Err(e) => {
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to list outlines: {e}"),
            );
        }
    };

    let mut items = Vec::with_capacity(outlines.len());
    for file in outlines {
        let Some(name) = parse_outline_name(&file.name, staff_id) else {
            continue;
        };
        let text = tokio::fs::read_to_string(&file.path).await.unwrap_or_default();
        let deck_prefix = ppt_prefix(staff_id, &name.request_id);
        items.push(OutlineSummary {
            has_generated_ppt: decks.iter().any(|d| d.name.starts_with(&deck_prefix)),
            created_at: name
                .created_at
                .map(local_stamp)
                .unwrap_or_else(|| local_time(file.modified)),
            preview: preview(&text),
            request_id: name.request_id,
            title: name.title,
        });
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(items, "Outlines retrieved successfully")),
    )
        .into_response()
}

/// GET /api/teacher/ppt/list_ppt
///
/// The caller's generated decks, newest first.
pub async fn list_ppt(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let files = list_files(&app_state.storage().ppt_files_dir(), |name| {
        is_owned_by(name, &claims.account_id) && name.ends_with(".pptx")
    });

    match files {
        Ok(files) => {
            let items: Vec<PptFile> = files
                .into_iter()
                .map(|f| PptFile {
                    size: format_file_size(f.size),
                    created_at: local_time(f.modified),
                    file_name: f.name,
                })
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(items, "Presentations retrieved successfully")),
            )
                .into_response()
        }
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to list presentations: {e}"),
        ),
    }
}

/// GET /api/teacher/ppt/download/{file_name}
///
/// - `403 Forbidden` the deck belongs to another teacher
/// - `404 Not Found` no such deck
pub async fn download(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(file_name): Path<String>,
) -> impl IntoResponse {
    if !is_safe_file_name(&file_name) {
        return error_response(StatusCode::BAD_REQUEST, "Invalid file name");
    }
    if !is_owned_by(&file_name, &claims.account_id) {
        return error_response(
            StatusCode::FORBIDDEN,
            "You do not have access to this file",
        );
    }
    if !file_name.ends_with(".pptx") {
        return error_response(StatusCode::BAD_REQUEST, "Only .pptx files are supported");
    }

    let path = app_state.storage().ppt_files_dir().join(&file_name);
    file_download(&path, &file_name, PPTX_MIME).await
}

/// GET /api/teacher/ppt/subjects
pub async fn subjects() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            Options {
                options: SUBJECTS.to_vec(),
            },
            "Subjects retrieved successfully",
        )),
    )
}

/// GET /api/teacher/ppt/grades
pub async fn grades() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            Options {
                options: GRADES.to_vec(),
            },
            "Grades retrieved successfully",
        )),
    )
}
