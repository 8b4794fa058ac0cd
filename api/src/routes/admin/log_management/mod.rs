//! # log_management Routes Module
//!
//! Browses `{LOG_DIR}/{service}/` directories written by the logging setup.

pub mod get;

use crate::state::AppState;
use axum::{Router, routing::get};

/// - `GET /admin/log_management/services`
/// - `GET /admin/log_management/files`
/// - `GET /admin/log_management/content`
pub fn log_management_routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(get::list_services))
        .route("/files", get(get::list_files))
        .route("/content", get(get::file_content))
}
