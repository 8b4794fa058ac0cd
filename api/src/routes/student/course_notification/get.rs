use super::common::{EnrolledCourse, StudentNotification, UnreadCount};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{db_error, error_response};
use crate::routes::teacher::course_notification::common::NotificationPage;
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::{PageQuery, total_pages};
use db::models::{course, course_notification, course_notification_read, course_student};
use sea_orm::DatabaseConnection;

/// 403 unless the student is on the course's roster.
pub(super) async fn require_enrolled(
    db: &DatabaseConnection,
    course_id: i64,
    student_pk: i64,
) -> Result<(), Response> {
    match course_student::Model::is_enrolled(db, course_id, student_pk).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(error_response(
            StatusCode::FORBIDDEN,
            "You are not enrolled in this course",
        )),
        Err(e) => Err(db_error(e)),
    }
}

/// GET /api/student/course_notification/courses
pub async fn my_courses(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    match course::Model::list_for_student(app_state.db(), claims.sub).await {
        Ok(courses) => {
            let courses: Vec<EnrolledCourse> = courses.into_iter().map(EnrolledCourse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(courses, "Courses retrieved successfully")),
            )
                .into_response()
        }
        Err(e) => db_error(e),
    }
}

/// GET /api/student/course_notification/{course_id}/notifications?page=1&page_size=10
///
/// Same ordering and paging as the teacher view; each item carries
/// `is_read` for the caller instead of read statistics.
///
/// - `403 Forbidden` the caller is not enrolled in the course
pub async fn list_notifications(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(course_id): Path<i64>,
    Query(paging): Query<PageQuery>,
) -> impl IntoResponse {
    let db = app_state.db();
    if let Err(response) = require_enrolled(db, course_id, claims.sub).await {
        return response;
    }

    let (items, total_count) = match course_notification::Model::page_for_course(
        db,
        course_id,
        paging.offset(),
        paging.page_size(),
    )
    .await
    {
        Ok(page) => page,
        Err(e) => return db_error(e),
    };

    let ids: Vec<i64> = items.iter().map(|n| n.id).collect();
    let read = match course_notification_read::Model::read_ids(db, claims.sub, &ids).await {
        Ok(read) => read,
        Err(e) => return db_error(e),
    };

    let notifications = items
        .into_iter()
        .map(|notification| StudentNotification {
            is_read: read.contains(&notification.id),
            notification,
        })
        .collect();

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

/// GET /api/student/course_notification/unread_count
///
/// ```json
/// { "success": true, "data": { "unread_count": 3 }, "message": "Unread count retrieved successfully" }
/// ```
pub async fn unread_count(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    match course_notification_read::Model::unread_count(app_state.db(), claims.sub).await {
        Ok(unread_count) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UnreadCount { unread_count },
                "Unread count retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => db_error(e),
    }
}
