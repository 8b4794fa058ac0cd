use super::common::MaterialItem;
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{db_error, error_response, owned_course};
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::course_material;
use util::files::is_safe_file_name;
use util::paths::ensure_dir;

/// POST /api/teacher/course_material/{course_id}/materials
///
/// Multipart form:
/// - `file` (required): the material; its name is kept as the stored name
/// - `description` (optional)
///
/// ### Responses
/// - `201 Created` the stored material
/// - `400 Bad Request` no file, or a name with path separators or `..`
/// - `404 Not Found` missing or foreign course
/// - `409 Conflict` the course already has a material with that name
pub async fn upload_material(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(course_id): Path<i64>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let db = app_state.db();
    let course = match owned_course(db, course_id, claims.sub).await {
        Ok(course) => course,
        Err(response) => return response,
    };

    let mut file: Option<(String, Vec<u8>)> = None;
    let mut description: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return error_response(StatusCode::BAD_REQUEST, format!("Invalid upload: {e}"));
            }
        };

        match field.name() {
            Some("file") => {
                let name = field.file_name().unwrap_or("").trim().to_string();
                match field.bytes().await {
                    Ok(bytes) => file = Some((name, bytes.to_vec())),
                    Err(e) => {
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            format!("Failed to read upload: {e}"),
                        );
                    }
                }
            }
            Some("description") => {
                if let Ok(text) = field.text().await {
                    let text = text.trim();
                    if !text.is_empty() {
                        description = Some(text.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    let Some((file_name, bytes)) = file else {
        return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
    };
    if !is_safe_file_name(&file_name) {
        return error_response(StatusCode::BAD_REQUEST, "Invalid file name");
    }

    match course_material::Model::find_by_name(db, course.id, &file_name).await {
        Ok(Some(_)) => {
            return error_response(
                StatusCode::CONFLICT,
                format!("A material named {file_name} already exists"),
            );
        }
        Ok(None) => {}
        Err(e) => return db_error(e),
    }

    let dir = match ensure_dir(app_state.storage().course_material_dir(course.id)) {
        Ok(dir) => dir,
        Err(e) => {
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to prepare storage: {e}"),
            );
        }
    };
    let path = dir.join(&file_name);
    if let Err(e) = tokio::fs::write(&path, &bytes).await {
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to save file: {e}"),
        );
    }

    let stored = course_material::Model::create(
        db,
        course.id,
        claims.sub,
        &file_name,
        &path.to_string_lossy(),
        bytes.len() as i64,
        description,
    )
    .await;

    match stored {
        Ok(material) => {
            tracing::info!(
                target: "course_management",
                course_id,
                file = %file_name,
                size = bytes.len(),
                "material uploaded"
            );
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    MaterialItem::from(material),
                    "Material uploaded successfully",
                )),
            )
                .into_response()
        }
        Err(e) => {
            let _ = tokio::fs::remove_file(&path).await;
            db_error(e)
        }
    }
}
