use super::common::{SetFile, check_file_name, stem};
use crate::auth::AuthUser;
use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::routes::common::error_response;
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

/// DELETE /api/teacher/exercise_generator/delete/{file_name}
///
/// Deletes a generated set. Naming either the `.md` or the `.json` file
/// removes both.
pub async fn delete_file(
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
    let base = stem(&file_name);
    let md = storage.exercises_md_dir().join(format!("{base}.md"));
    let json = storage.exercises_json_dir().join(format!("{base}.json"));
    let (named, sibling) = match kind {
        SetFile::Markdown => (md, json),
        SetFile::Json => (json, md),
    };

    match tokio::fs::remove_file(&named).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return error_response(StatusCode::NOT_FOUND, "File not found");
        }
        Err(e) => {
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to delete file: {e}"),
            );
        }
    }
    if let Err(e) = tokio::fs::remove_file(&sibling).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(target: "exercise_generator", file = %sibling.display(), error = %e, "could not delete sibling file");
        }
    }

    tracing::info!(target: "exercise_generator", teacher = %claims.account_id, file = %file_name, "exercise set deleted");
    (
        StatusCode::OK,
        Json(ApiResponse::success(Empty, "File deleted successfully")),
    )
        .into_response()
}
