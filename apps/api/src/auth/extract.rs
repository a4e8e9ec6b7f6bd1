use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::queries;
use super::token::{Claims, Purpose, Role, INVALID_TOKEN};
use crate::errors::AppError;
use crate::models::account::{AdminRow, HrRow};
use crate::state::AppState;

pub const TOKEN_COOKIE: &str = "token";

/// An authenticated admin session.
pub struct AuthAdmin {
    pub admin: AdminRow,
}

/// An authenticated HR session.
pub struct AuthHr {
    pub hr: HrRow,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let claims = session_claims(&parts.headers, state, Role::Admin).await?;
        let admin = queries::find_admin_by_id(&state.db, claims.sub)
            .await?
            .ok_or_else(user_not_found)?;
        Ok(AuthAdmin { admin })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthHr {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let claims = session_claims(&parts.headers, state, Role::Hr).await?;
        let hr = queries::find_hr_by_id(&state.db, claims.sub)
            .await?
            .ok_or_else(user_not_found)?;
        Ok(AuthHr { hr })
    }
}

async fn session_claims(headers: &HeaderMap, state: &AppState, role: Role) -> Result<Claims, AppError> {
    let token = presented_token(headers)
        .ok_or_else(|| AppError::Unauthorized("No token, authorization denied".to_string()))?;
    let claims = state.tokens.verify(&token, role, Purpose::Session)?;
    if state.sessions.is_revoked(claims.jti).await? {
        return Err(AppError::Unauthorized(INVALID_TOKEN.to_string()));
    }
    Ok(claims)
}

fn user_not_found() -> AppError {
    AppError::Unauthorized("Invalid token, user not found".to_string())
}

/// The `token` cookie, falling back to an `Authorization: Bearer` header.
pub fn presented_token(headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = CookieJar::from_headers(headers).get(TOKEN_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

pub fn cleared_cookie() -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, "")).path("/").build()
}
