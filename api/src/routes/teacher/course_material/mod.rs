//! # course_material Routes Module
//!
//! Files attached to a course, stored under
//! `{MEDIA_ROOT}/course_materials/course_{id}/`.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get},
};
use common::MAX_MATERIAL_BYTES;

pub fn course_material_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{course_id}/materials",
            get(get::list_materials)
                .post(post::upload_material)
                .layer(DefaultBodyLimit::max(MAX_MATERIAL_BYTES)),
        )
        .route(
            "/{course_id}/materials/{filename}",
            delete(delete::delete_material),
        )
        .route(
            "/{course_id}/materials/{filename}/download",
            get(get::download_material),
        )
}
