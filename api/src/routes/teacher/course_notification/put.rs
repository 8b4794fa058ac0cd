use super::common::UpdateNotificationRequest;
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{db_error, error_response, owned_course};
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::course_notification::{self, NotificationChanges};
use validator::Validate;

/// PUT /api/teacher/course_notification/{course_id}/notifications/{notification_id}
///
/// Partial update of title, content, type or pin state.
///
/// - `200 OK` the updated notification
/// - `404 Not Found` the course is not the caller's, or the notification is
///   not in that course
pub async fn update_notification(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path((course_id, notification_id)): Path<(i64, i64)>,
    Json(req): Json<UpdateNotificationRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let db = app_state.db();
    if let Err(response) = owned_course(db, course_id, claims.sub).await {
        return response;
    }

    match course_notification::Model::find_in_course(db, notification_id, course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "Notification not found"),
        Err(e) => return db_error(e),
    }

    let changes = NotificationChanges {
        title: req.title,
        content: req.content,
        notification_type: req.notification_type,
        is_pinned: req.is_pinned,
    };

    match course_notification::Model::apply_changes(db, notification_id, changes).await {
        Ok(notification) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                notification,
                "Notification updated successfully",
            )),
        )
            .into_response(),
        Err(e) => db_error(e),
    }
}
