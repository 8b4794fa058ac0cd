//! # student Routes Module
//!
//! Mounted at `/api/student` behind `allow_student`.

pub mod course_notification;

use crate::state::AppState;
use axum::Router;
use course_notification::course_notification_routes;

pub fn student_routes() -> Router<AppState> {
    Router::new().nest("/course_notification", course_notification_routes())
}
