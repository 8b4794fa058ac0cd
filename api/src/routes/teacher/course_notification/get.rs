use super::common::{NotificationPage, NotificationWithStats};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{db_error, owned_course};
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::{PageQuery, total_pages};
use db::models::{course_notification, course_notification_read, course_student};

/// GET /api/teacher/course_notification/{course_id}/notifications?page=1&page_size=10
///
/// Pinned notifications first, then newest. Each item carries how many
/// students have read it out of the course's current roster size.
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "notifications": [
///       {
///         "id": 3,
///         "course_id": 1,
///         "publisher_id": 4,
///         "title": "Midterm moved",
///         "content": "The midterm is now on Friday.",
///         "notification_type": 3,
///         "is_pinned": true,
///         "publish_time": "2025-04-01T09:00:00Z",
///         "created_at": "2025-04-01T09:00:00Z",
///         "updated_at": "2025-04-01T09:00:00Z",
///         "read_count": 12,
///         "total_students": 40
///       }
///     ],
///     "total_count": 1,
///     "page": 1,
///     "page_size": 10,
///     "total_pages": 1
///   },
///   "message": "Notifications retrieved successfully"
/// }
/// ```
pub async fn list_notifications(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(course_id): Path<i64>,
    Query(paging): Query<PageQuery>,
) -> impl IntoResponse {
    let db = app_state.db();
    let course = match owned_course(db, course_id, claims.sub).await {
        Ok(course) => course,
        Err(response) => return response,
    };

    let total_students = match course_student::Model::count_for_course(db, course.id).await {
        Ok(n) => n,
        Err(e) => return db_error(e),
    };

    let (items, total_count) = match course_notification::Model::page_for_course(
        db,
        course.id,
        paging.offset(),
        paging.page_size(),
    )
    .await
    {
        Ok(page) => page,
        Err(e) => return db_error(e),
    };

    let mut notifications = Vec::with_capacity(items.len());
    for notification in items {
        let read_count = match course_notification_read::Model::read_count(db, notification.id).await {
            Ok(n) => n,
            Err(e) => return db_error(e),
        };
        notifications.push(NotificationWithStats {
            notification,
            read_count,
            total_students,
        });
    }

    let page = NotificationPage {
        notifications,
        total_count,
        page: paging.page(),
        page_size: paging.page_size(),
        total_pages: total_pages(total_count, paging.page_size()),
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(page, "Notifications retrieved successfully")),
    )
        .into_response()
}
