//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → health check (public)
//! - `/auth` → login and current user (login public, `/auth/user` authenticated)
//! - `/user` → self-service profile and password (authenticated)
//! - `/admin` → user and log management (admin only)
//! - `/teacher` → courses, notifications, materials, exercise and slide generation (teacher only)
//! - `/student` → course notifications (student only)

use crate::auth::guards::{
    allow_admin, allow_authenticated, allow_student, allow_teacher_account,
};
use crate::routes::{
    admin::admin_routes, auth::auth_routes, health::health_routes, student::student_routes,
    teacher::teacher_routes, user::user_routes,
};
use crate::state::AppState;
use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
};

pub mod admin;
pub mod auth;
pub mod common;
pub mod health;
pub mod student;
pub mod teacher;
pub mod user;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router already carries `app_state`; `main` nests it under
/// `/api` and adds the request logging and CORS layers.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/user", user_routes().route_layer(from_fn(allow_authenticated)))
        .nest("/admin", admin_routes().route_layer(from_fn(allow_admin)))
        .nest(
            "/teacher",
            teacher_routes().route_layer(from_fn_with_state(app_state.clone(), allow_teacher_account)),
        )
        .nest("/student", student_routes().route_layer(from_fn(allow_student)))
        .with_state(app_state)
}
