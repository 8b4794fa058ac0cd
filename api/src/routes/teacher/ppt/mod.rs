//! # ppt Routes Module
//!
//! Two-step slide generation: the model writes a Markdown outline, the
//! teacher edits it, and the edited outline is rendered to `.pptx`.

pub mod common;
pub mod get;
pub mod post;

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn ppt_routes() -> Router<AppState> {
    Router::new()
        .route("/generate_outline", post(post::generate_outline))
        .route("/outlines", get(get::list_outlines))
        .route("/generate_from_outline", post(post::generate_from_outline))
        .route("/list_ppt", get(get::list_ppt))
        .route("/download/{file_name}", get(get::download))
        .route("/subjects", get(get::subjects))
        .route("/grades", get(get::grades))
}
