use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::{Account, Role};

#[derive(serde::Serialize, Default)]
pub struct Empty;

type GuardResult = Result<Response, (StatusCode, Json<ApiResponse<Empty>>)>;

/// Helper to extract and validate the user from the request, then insert it
/// into the request extensions for handlers to pick up.
async fn extract_and_insert_authuser(
    mut req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(req: Request<Body>, next: Next) -> GuardResult {
    let (req, _user) = extract_and_insert_authuser(req).await?;
    Ok(next.run(req).await)
}

/// Base guard: authenticated and holding exactly `role`.
async fn allow_role(req: Request<Body>, next: Next, role: Role, failure_msg: &str) -> GuardResult {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if user.0.role != role {
        return Err((StatusCode::FORBIDDEN, Json(ApiResponse::error(failure_msg))));
    }

    Ok(next.run(req).await)
}

pub async fn allow_student(req: Request<Body>, next: Next) -> GuardResult {
    allow_role(req, next, Role::Student, "Student access required").await
}

pub async fn allow_teacher(req: Request<Body>, next: Next) -> GuardResult {
    allow_role(req, next, Role::Teacher, "Teacher access required").await
}

/// Teacher guard that also reloads the account behind the token.
///
/// The staff id in the claims is replaced by the current one, so file
/// ownership follows admin renames instead of the id the token was issued
/// for. A deleted account is rejected.
pub async fn allow_teacher_account(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> GuardResult {
    let (mut req, AuthUser(mut claims)) = extract_and_insert_authuser(req).await?;

    if claims.role != Role::Teacher {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Teacher access required")),
        ));
    }

    match Account::find_by_id(app_state.db(), Role::Teacher, claims.sub).await {
        Ok(Some(account)) => claims.account_id = account.account_id().to_string(),
        Ok(None) => {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Account no longer exists")),
            ));
        }
        Err(e) => {
            tracing::error!(error = %e, "teacher lookup failed");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to load account")),
            ));
        }
    }

    req.extensions_mut().insert(AuthUser(claims));
    Ok(next.run(req).await)
}

/// Admin-only guard.
pub async fn allow_admin(req: Request<Body>, next: Next) -> GuardResult {
    allow_role(req, next, Role::Admin, "Admin access required").await
}
