use super::common::CreateNotificationRequest;
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
use db::models::course_notification::{self, NotificationType};
use validator::Validate;

/// POST /api/teacher/course_notification/{course_id}/notifications
///
/// Publishes a notification to everyone enrolled in the course.
///
/// ### Request Body
/// ```json
/// {
///   "title": "Midterm moved",
///   "content": "The midterm is now on Friday.",
///   "notification_type": 3,
///   "is_pinned": true
/// }
/// ```
///
/// `notification_type`: 0 general (default), 1 important, 2 assignment,
/// 3 exam, 4 material.
///
/// - `201 Created` the stored notification
/// - `400 Bad Request` validation failure
/// - `404 Not Found` missing or foreign course
pub async fn create_notification(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(course_id): Path<i64>,
    Json(req): Json<CreateNotificationRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let db = app_state.db();
    let course = match owned_course(db, course_id, claims.sub).await {
        Ok(course) => course,
        Err(response) => return response,
    };

    match course_notification::Model::create(
        db,
        course.id,
        claims.sub,
        &req.title,
        &req.content,
        req.notification_type.unwrap_or(NotificationType::General),
        req.is_pinned,
    )
    .await
    {
        Ok(notification) => {
            tracing::info!(
                target: "course_management",
                course_id,
                notification_id = notification.id,
                "notification published"
            );
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    notification,
                    "Notification created successfully",
                )),
            )
                .into_response()
        }
        Err(e) => db_error(e),
    }
}
