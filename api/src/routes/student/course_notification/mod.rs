//! # course_notification Routes Module (student)
//!
//! Read side of course notifications for enrolled students.

pub mod common;
pub mod get;
pub mod post;

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn course_notification_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(get::my_courses))
        .route("/unread_count", get(get::unread_count))
        .route("/{course_id}/notifications", get(get::list_notifications))
        .route(
            "/{course_id}/notifications/{notification_id}/read",
            post(post::mark_read),
        )
}
