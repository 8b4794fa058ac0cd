//! # course_notification Routes Module
//!
//! Teacher side of course notifications.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, put},
};

pub fn course_notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{course_id}/notifications",
            get(get::list_notifications).post(post::create_notification),
        )
        .route(
            "/{course_id}/notifications/{notification_id}",
            put(put::update_notification).delete(delete::delete_notification),
        )
}
