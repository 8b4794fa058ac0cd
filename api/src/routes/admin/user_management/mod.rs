//! # user_management Routes Module
//!
//! Bulk CSV import, listing, detail, update and password reset for
//! students and teachers.

pub mod common;
pub mod get;
pub mod post;
pub mod put;

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Builds the `/admin/user_management` route group.
pub fn user_management_routes() -> Router<AppState> {
    Router::new()
        .route("/create_students", post(post::create_students))
        .route("/create_teachers", post(post::create_teachers))
        .route("/student_template", get(get::student_template))
        .route("/teacher_template", get(get::teacher_template))
        .route("/list_students", get(get::list_students))
        .route("/list_teachers", get(get::list_teachers))
        .route("/student_detail/{student_id}", get(get::student_detail))
        .route("/teacher_detail/{staff_id}", get(get::teacher_detail))
        .route("/update_student/{student_id}", put(put::update_student))
        .route("/update_teacher/{staff_id}", put(put::update_teacher))
        .route(
            "/reset_student_password/{student_id}",
            post(post::reset_student_password),
        )
        .route(
            "/reset_teacher_password/{staff_id}",
            post(post::reset_teacher_password),
        )
}
