use crate::auth::AuthUser;
use crate::routes::auth::get::profile_response;
use crate::state::AppState;
use axum::{Extension, extract::State, response::IntoResponse};

/// GET /api/user/profile
///
/// Same payload as `GET /api/auth/user`.
pub async fn get_profile(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    profile_response(app_state.db(), &claims).await
}
