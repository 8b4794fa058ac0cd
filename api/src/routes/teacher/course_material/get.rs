use super::common::{MaterialItem, MaterialList};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{db_error, error_response, file_download, owned_course};
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::course_material;

/// GET /api/teacher/course_material/{course_id}/materials
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "course_id": 1,
///     "course_name": "Data Structures",
///     "materials": [
///       {
///         "filename": "week1.pdf",
///         "file_size": "1.25 MB",
///         "upload_time": "2025-03-01 10:15:00",
///         "file_extension": ".pdf",
///         "description": "Lecture slides"
///       }
///     ],
///     "total_count": 1
///   },
///   "message": "Materials retrieved successfully"
/// }
/// ```
pub async fn list_materials(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();
    let course = match owned_course(db, course_id, claims.sub).await {
        Ok(course) => course,
        Err(response) => return response,
    };

    let materials: Vec<MaterialItem> = match course_material::Model::list_for_course(db, course.id).await {
        Ok(rows) => rows.into_iter().map(MaterialItem::from).collect(),
        Err(e) => return db_error(e),
    };

    let list = MaterialList {
        course_id: course.id,
        course_name: course.name,
        total_count: materials.len(),
        materials,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(list, "Materials retrieved successfully")),
    )
        .into_response()
}

/// GET /api/teacher/course_material/{course_id}/materials/{filename}/download
///
/// Streams the stored file as `application/octet-stream`.
pub async fn download_material(
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

    file_download(
        std::path::Path::new(&material.file_path),
        &material.file_name,
        "application/octet-stream",
    )
    .await
}
