use super::common::ReadReceipt;
use super::get::require_enrolled;
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{db_error, error_response};
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::{course_notification, course_notification_read};

/// POST /api/student/course_notification/{course_id}/notifications/{notification_id}/read
///
/// Marks the notification read. Repeating the call keeps the original
/// `read_at`.
///
/// ```json
/// {
///   "success": true,
///   "data": { "notification_id": 3, "read_at": "2025-04-01T09:30:00Z" },
///   "message": "Notification marked as read"
/// }
/// ```
pub async fn mark_read(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path((course_id, notification_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    let db = app_state.db();
    if let Err(response) = require_enrolled(db, course_id, claims.sub).await {
        return response;
    }

    match course_notification::Model::find_in_course(db, notification_id, course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "Notification not found"),
        Err(e) => return db_error(e),
    }

    match course_notification_read::Model::mark_read(db, notification_id, claims.sub).await {
        Ok(receipt) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ReadReceipt {
                    notification_id,
                    read_at: receipt.read_at,
                },
                "Notification marked as read",
            )),
        )
            .into_response(),
        Err(e) => db_error(e),
    }
}
