//! # auth Routes Module
//!
//! - `post.rs` → login (JSON and form)
//! - `get.rs` → current user profile

pub mod get;
pub mod post;

use crate::auth::guards::allow_authenticated;
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use get::get_user;
use post::{login, token};

/// Builds the `/auth` route group.
///
/// - `POST /auth/login` → `login`
/// - `POST /auth/token` → `token`
/// - `GET /auth/user` → `get_user` (authenticated)
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/token", post(token))
        .route(
            "/user",
            get(get_user).route_layer(from_fn(allow_authenticated)),
        )
}
