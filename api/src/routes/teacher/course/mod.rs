//! # course Routes Module
//!
//! Course CRUD and roster management for the signed-in teacher. Every
//! handler scopes its lookups to courses the caller owns.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Builds the `/teacher/course` route group.
pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(post::create_course))
        .route("/list", get(get::list_courses))
        .route(
            "/{course_id}",
            get(get::get_course)
                .put(put::update_course)
                .delete(delete::delete_course),
        )
        .route(
            "/{course_id}/students",
            post(post::add_students).delete(delete::remove_students),
        )
}
