//! # teacher Routes Module
//!
//! Mounted at `/api/teacher` behind `allow_teacher_account`.
//!
//! - `/course` → course CRUD and roster
//! - `/course_notification` → course notifications
//! - `/course_material` → course files
//! - `/exercise_generator` → LLM exercise sets
//! - `/ppt` → LLM slide outlines and decks

pub mod course;
pub mod course_material;
pub mod course_notification;
pub mod exercise_generator;
pub mod ppt;

use crate::state::AppState;
use axum::Router;
use course::course_routes;
use course_material::course_material_routes;
use course_notification::course_notification_routes;
use exercise_generator::exercise_generator_routes;
use ppt::ppt_routes;

pub fn teacher_routes() -> Router<AppState> {
    Router::new()
        .nest("/course", course_routes())
        .nest("/course_notification", course_notification_routes())
        .nest("/course_material", course_material_routes())
        .nest("/exercise_generator", exercise_generator_routes())
        .nest("/ppt", ppt_routes())
}
