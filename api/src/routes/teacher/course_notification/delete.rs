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
use db::models::course_notification;

/// DELETE /api/teacher/course_notification/{course_id}/notifications/{notification_id}
///
/// Read receipts are removed with the notification.
pub async fn delete_notification(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path((course_id, notification_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    let db = app_state.db();
    if let Err(response) = owned_course(db, course_id, claims.sub).await {
        return response;
    }

    match course_notification::Model::find_in_course(db, notification_id, course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "Notification not found"),
        Err(e) => return db_error(e),
    }

    if let Err(e) = course_notification::Model::delete(db, notification_id).await {
        return db_error(e);
    }

    tracing::info!(target: "course_management", course_id, notification_id, "notification deleted");
    (
        StatusCode::OK,
        Json(ApiResponse::success(Empty, "Notification deleted successfully")),
    )
        .into_response()
}
