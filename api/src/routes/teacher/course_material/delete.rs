use crate::auth::AuthUser;
use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::routes::common::{db_error, error_response, owned_course};
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::course_material;

/// DELETE /api/teacher/course_material/{course_id}/materials/{filename}
///
/// Removes the row and the stored file. A file already missing from disk
/// is not an error.
pub async fn delete_material(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path((course_id, filename)): Path<(i64, String)>,
) -> impl IntoResponse {
    let db = app_state.db();
    let course = match owned_course(db, course_id, claims.sub).await {
        Ok(course) => course,
        Err(response) => return response,
    };

    let material = match course_material::Model::find_by_name(db, course.id, &filename).await {
        Ok(Some(m)) => m,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "Material not found"),
        Err(e) => return db_error(e),
    };

    if let Err(e) = course_material::Model::delete(db, material.id).await {
        return db_error(e);
    }

    if let Err(e) = tokio::fs::remove_file(&material.file_path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(
                target: "course_management",
                path = %material.file_path,
                error = %e,
                "could not remove material file"
            );
        }
    }

    tracing::info!(target: "course_management", course_id, file = %filename, "material deleted");
    (
        StatusCode::OK,
        Json(ApiResponse::success(Empty, "Material deleted successfully")),
    )
        .into_response()
}
