//! # user Routes Module
//!
//! Self-service endpoints for the signed-in account, mounted at `/api/user`
//! behind `allow_authenticated`.

pub mod get;
pub mod post;
pub mod put;

use crate::auth::guards::{allow_student, allow_teacher};
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};

/// - `GET /user/profile`
/// - `PUT /user/profile/teacher` (teacher only)
/// - `PUT /user/profile/student` (student only)
/// - `POST /user/change_password`
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get::get_profile))
        .route(
            "/profile/teacher",
            put(put::update_teacher_profile).route_layer(from_fn(allow_teacher)),
        )
        .route(
            "/profile/student",
            put(put::update_student_profile).route_layer(from_fn(allow_student)),
        )
        .route("/change_password", post(post::change_password))
}
