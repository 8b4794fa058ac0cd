use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::format_validation_errors;
use db::models::{Account, Role};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,

    /// `student`, `teacher` or `admin`. Inferred from the id prefix when absent.
    pub role: Option<String>,
}

/// OAuth2-style password form used by API tooling.
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user_id: String,
    pub role: String,
    pub username: String,
    pub expires_at: String,
}

fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<LoginResponse>::error(message))).into_response()
}

async fn authenticate(
    app_state: &AppState,
    user_id: &str,
    password: &str,
    role: Option<&str>,
) -> Response {
    let user_id = user_id.trim();

    let role = match role.map(str::trim).filter(|r| !r.is_empty()) {
        Some(r) => match r.parse::<Role>() {
            Ok(role) => role,
            Err(_) => return failure(StatusCode::BAD_REQUEST, format!("Invalid role '{r}'")),
        },
        None => match Role::from_account_id(user_id) {
            Some(role) => role,
            None => {
                return failure(
                    StatusCode::BAD_REQUEST,
                    "Cannot infer role from user id; expected an S, T or A prefix",
                );
            }
        },
    };

    let account = match Account::find(app_state.db(), role, user_id).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            tracing::info!(target: "user_management", user_id, %role, "login for unknown account");
            return failure(StatusCode::UNAUTHORIZED, "Invalid user id or password");
        }
        Err(e) => {
            return failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {e}"),
            );
        }
    };

    if !account.verify_password(password) {
        tracing::info!(target: "user_management", user_id, %role, "login with wrong password");
        return failure(StatusCode::UNAUTHORIZED, "Invalid user id or password");
    }

    let (access_token, expires_at) = match generate_jwt(&account) {
        Ok(pair) => pair,
        Err(e) => {
            return failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Token encoding failed: {e}"),
            );
        }
    };

    tracing::info!(target: "user_management", user_id, %role, "login succeeded");

    let response = LoginResponse {
        access_token,
        token_type: "bearer".into(),
        user_id: account.account_id().to_string(),
        role: role.to_string(),
        username: account.username().to_string(),
        expires_at,
    };
    (
        StatusCode::OK,
        Json(ApiResponse::success(response, "Login successful")),
    )
        .into_response()
}

/// POST /api/auth/login
///
/// Authenticates a student, teacher or admin and issues a JWT.
///
/// ### Request Body
/// ```json
/// { "user_id": "T2024001", "password": "secret", "role": "teacher" }
/// ```
/// `role` is optional; without it the role comes from the id prefix
/// (`S` student, `T` teacher, `A` admin, case-insensitive).
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "access_token": "jwt_token_here",
///     "token_type": "bearer",
///     "user_id": "T2024001",
///     "role": "teacher",
///     "username": "Li Hua",
///     "expires_at": "2025-05-23T12:00:00+00:00"
///   },
///   "message": "Login successful"
/// }
/// ```
///
/// - `400 Bad Request` missing fields, unknown role, or an id without a role prefix
/// - `401 Unauthorized` unknown id or wrong password
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return failure(
            StatusCode::BAD_REQUEST,
            format_validation_errors(&validation_errors),
        );
    }

    authenticate(&app_state, &req.user_id, &req.password, req.role.as_deref()).await
}

/// POST /api/auth/token
///
/// Same as `/auth/login` but takes an `application/x-www-form-urlencoded`
/// body with `username` (the login id) and `password`.
pub async fn token(
    State(app_state): State<AppState>,
    Form(form): Form<TokenForm>,
) -> impl IntoResponse {
    if form.username.trim().is_empty() || form.password.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "username and password are required");
    }

    authenticate(&app_state, &form.username, &form.password, None).await
}
