use db::models::Role;
use serde::{Deserialize, Serialize};

/// Payload of an access token.
///
/// `sub` is the row id in the table that belongs to `role`, `account_id`
/// the login id (`S…`, `T…` or `A…`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub account_id: String,
    pub username: String,
    pub role: Role,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
