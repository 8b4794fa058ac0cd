use crate::auth::{AuthUser, Claims};
use crate::response::ApiResponse;
use crate::routes::common::db_error;
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::Account;
use sea_orm::DatabaseConnection;
use serde_json::Value;

/// Profile of the account behind `claims`, or 401 if it no longer exists.
pub async fn profile_response(db: &DatabaseConnection, claims: &Claims) -> Response {
    match Account::find_by_id(db, claims.role, claims.sub).await {
        Ok(Some(account)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                account.profile(),
                "User retrieved successfully",
            )),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<Value>::error("User no longer exists")),
        )
            .into_response(),
        Err(e) => db_error(e),
    }
}

/// GET /api/auth/user
///
/// Returns the authenticated user's profile.
///
/// ### Response (teacher)
/// ```json
/// {
///   "success": true,
///   "data": {
///     "username": "Li Hua",
///     "role": "teacher",
///     "staff_id": "T2024001",
///     "department": "Computer Science",
///     "expertise": null,
///     "intro": null,
///     "contact_email": null,
///     "office_location": null
///   },
///   "message": "User retrieved successfully"
/// }
/// ```
///
/// Students carry `student_id, college, major, grade, enrollment_year,
/// intro, contact_email`; admins carry `admin_id, permissions`.
///
/// - `401 Unauthorized` missing/invalid token, or the account was deleted
pub async fn get_user(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    profile_response(app_state.db(), &claims).await
}
