use crate::auth::AuthUser;
use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::routes::common::{db_error, error_response};
use crate::state::AppState;
use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::Account;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,

    #[validate(length(min = 6, message = "New password must be at least 6 characters"))]
    pub new_password: String,
}

/// POST /api/user/change_password
///
/// ### Request Body
/// ```json
/// { "old_password": "secret", "new_password": "better-secret" }
/// ```
///
/// ### Responses
/// - `200 OK` password changed
/// - `400 Bad Request` validation failure or wrong old password
/// - `401 Unauthorized` the account no longer exists
pub async fn change_password(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let db = app_state.db();
    let account = match Account::find_by_id(db, claims.role, claims.sub).await {
        Ok(Some(account)) => account,
        Ok(None) => return error_response(StatusCode::UNAUTHORIZED, "User no longer exists"),
        Err(e) => return db_error(e),
    };

    if !account.verify_password(&req.old_password) {
        return error_response(StatusCode::BAD_REQUEST, "Old password is incorrect");
    }

    if let Err(e) = account.set_password(db, &req.new_password).await {
        return db_error(e);
    }

    tracing::info!(target: "user_management", account = %claims.account_id, "password changed");
    (
        StatusCode::OK,
        Json(ApiResponse::success(Empty, "Password changed successfully")),
    )
        .into_response()
}
