//! # admin Routes Module
//!
//! Mounted at `/api/admin` behind `allow_admin`.
//!
//! - `/user_management` → student and teacher accounts
//! - `/log_management` → read-only access to the service logs

pub mod log_management;
pub mod user_management;

use crate::state::AppState;
use axum::Router;
use log_management::log_management_routes;
use user_management::user_management_routes;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .nest("/user_management", user_management_routes())
        .nest("/log_management", log_management_routes())
}
