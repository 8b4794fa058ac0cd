//! # exercise_generator Routes Module
//!
//! LLM-generated exercise sets. Each set is a pair of files under
//! `{MEDIA_ROOT}/exercises/{md,json}/` named
//! `teacher_{staff_id}_{YYYYmmdd_HHMMSS}_{title}`; the prefix is what ties
//! a file to its teacher.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn exercise_generator_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(post::generate))
        .route("/save_assignment", post(post::save_assignment))
        .route("/file_md_content/{file_name}", get(get::file_md_content))
        .route("/detail/{file_name}", get(get::detail))
        .route("/download/{file_name}", get(get::download))
        .route("/list", get(get::list))
        .route("/delete/{file_name}", delete(delete::delete_file))
}
