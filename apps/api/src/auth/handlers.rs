//! Sign-up, sign-in, password, and logout endpoints for admins and HR staff.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::extract::{cleared_cookie, presented_token, session_cookie, AuthAdmin, AuthHr};
use super::password::{hash_password, verify_password};
use super::queries;
use super::token::{Purpose, Role, INVALID_TOKEN};
use crate::db::unique_conflict;
use crate::errors::AppError;
use crate::mail::templates;
use crate::models::account::Profile;
use crate::routes::JsonBody;
use crate::state::AppState;
use crate::validation::Validator;

const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long.";
const CONFIRMATION_TOO_SHORT: &str = "Confirmation password must be at least 8 characters long.";
const PASSWORDS_DIFFER: &str = "Passwords do not match";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub c_password: String,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Validator::new();
        v.check("username", !self.username.trim().is_empty(), "Username is required.")
            .email("email", self.email.trim(), "Invalid email address.")
            .check("password", self.password.chars().count() >= 8, PASSWORD_TOO_SHORT)
            .check("cPassword", self.c_password.chars().count() >= 8, CONFIRMATION_TOO_SHORT);
        v.finish()?;
        if self.password != self.c_password {
            return Err(AppError::Validation(PASSWORDS_DIFFER.to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

impl SigninRequest {
    fn validate(&self) -> Result<(), AppError> {
        let mut v = Validator::new();
        v.email("email", self.email.trim(), "Invalid email address.")
            .check("password", self.password.chars().count() >= 8, PASSWORD_TOO_SHORT);
        v.finish()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub password: String,
    pub c_password: String,
}

impl ResetPasswordRequest {
    fn validate(&self) -> Result<(), AppError> {
        let mut v = Validator::new();
        v.check("password", self.password.chars().count() >= 8, PASSWORD_TOO_SHORT)
            .check("cPassword", self.c_password.chars().count() >= 8, CONFIRMATION_TOO_SHORT);
        v.finish()?;
        if self.password != self.c_password {
            return Err(AppError::Validation(PASSWORDS_DIFFER.to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub password: String,
    pub c_password: String,
}

// ── Admin ───────────────────────────────────────────────────────────────────

/// POST /api/v1/auth/admin/signup
pub async fn admin_signup(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(req): JsonBody<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<Value>), AppError> {
    req.validate()?;
    let email = req.email.trim();

    if queries::find_admin_by_email(&state.db, email).await?.is_some() {
        return Err(AppError::Conflict(
            "An Admin with this email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(req.password.clone()).await?;
    let admin = queries::insert_admin(&state.db, req.username.trim(), email, &password_hash)
        .await
        .map_err(|e| unique_conflict(e, "An Admin with this email already exists"))?;
    info!("Admin account {} created for {}", admin.id, admin.email);

    let (token, _) = state.tokens.issue_session(admin.id, Role::Admin)?;
    let jar = jar.add(session_cookie(token.clone(), state.config.cookie_secure));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(json!({ "msg": "Account created Successfully", "token": token })),
    ))
}

/// POST /api/v1/auth/admin/signin
pub async fn admin_signin(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(req): JsonBody<SigninRequest>,
) -> Result<(CookieJar, Json<Value>), AppError> {
    req.validate()?;

    let admin = queries::find_admin_by_email(&state.db, req.email.trim())
        .await?
        .ok_or_else(|| AppError::NotFound("Email doesn't exist".to_string()))?;

    if !verify_password(req.password, admin.password_hash.clone()).await? {
        return Err(AppError::Unauthorized("Invalid Credentials".to_string()));
    }

    let (token, _) = state.tokens.issue_session(admin.id, Role::Admin)?;
    let jar = jar.add(session_cookie(token.clone(), state.config.cookie_secure));
    Ok((jar, Json(json!({ "msg": "Signin successful", "token": token }))))
}

/// POST /api/v1/auth/admin/forgot-password
pub async fn admin_forgot_password(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ForgotPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    let mut v = Validator::new();
    v.email("email", req.email.trim(), "Invalid email address.");
    v.finish()?;

    let admin = queries::find_admin_by_email(&state.db, req.email.trim())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let (token, _) = state.tokens.issue_password_reset(admin.id, Role::Admin)?;
    let link = format!(
        "{}/resetPassword/{token}",
        state.config.client_url.trim_end_matches('/')
    );

    state
        .mailer
        .send(templates::password_reset(&admin.email, &link))
        .await
        .map_err(|e| AppError::Mail(e.to_string()))?;

    info!("Password reset link sent to admin {}", admin.id);
    Ok(Json(json!({ "msg": "Email sent successfully" })))
}

/// POST /api/v1/auth/admin/reset-password/:token
pub async fn admin_reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    JsonBody(req): JsonBody<ResetPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    let claims = state
        .tokens
        .verify(&token, Role::Admin, Purpose::PasswordReset)?;
    if state.sessions.is_revoked(claims.jti).await? {
        return Err(AppError::Unauthorized(INVALID_TOKEN.to_string()));
    }

    req.validate()?;

    if queries::find_admin_by_id(&state.db, claims.sub).await?.is_none() {
        return Err(AppError::Unauthorized(
            "Invalid token, user not found".to_string(),
        ));
    }

    let password_hash = hash_password(req.password).await?;
    let admin = queries::update_admin_password(&state.db, claims.sub, &password_hash).await?;
    state.sessions.revoke(&claims).await?;
    info!("Admin {} reset their password", admin.id);

    Ok(Json(json!({
        "msg": "Password updated successfully",
        "admin": admin,
    })))
}

/// GET /api/v1/auth/admin/profile
pub async fn admin_profile(AuthAdmin { admin }: AuthAdmin) -> Json<Profile> {
    Json(Profile {
        username: admin.username,
        email: admin.email,
    })
}

/// POST /api/v1/auth/admin/logout
pub async fn admin_logout(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: axum::http::HeaderMap,
) -> Result<(CookieJar, Json<Value>), AppError> {
    end_session(&state, &headers, Role::Admin).await?;
    Ok((
        jar.remove(cleared_cookie()),
        Json(json!({ "msg": "Logged out successfully" })),
    ))
}

// ── HR ──────────────────────────────────────────────────────────────────────

/// POST /api/v1/auth/hr/signin
pub async fn hr_signin(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(req): JsonBody<SigninRequest>,
) -> Result<(CookieJar, Json<Value>), AppError> {
    req.validate()?;

    let hr = queries::find_hr_by_email(&state.db, req.email.trim())
        .await?
        .ok_or_else(|| AppError::NotFound("Email doesn't exist".to_string()))?;

    if !verify_password(req.password, hr.password_hash.clone()).await? {
        return Err(AppError::Unauthorized("Invalid Credentials".to_string()));
    }

    let (token, _) = state.tokens.issue_session(hr.id, Role::Hr)?;
    let jar = jar.add(session_cookie(token.clone(), state.config.cookie_secure));
    Ok((jar, Json(json!({ "msg": "Signin successful", "token": token }))))
}

/// GET /api/v1/auth/hr/profile
pub async fn hr_profile(AuthHr { hr }: AuthHr) -> Json<Profile> {
    Json(Profile {
        username: hr.username,
        email: hr.email,
    })
}

/// POST /api/v1/auth/hr/change-password
pub async fn hr_change_password(
    State(state): State<AppState>,
    AuthHr { hr }: AuthHr,
    JsonBody(req): JsonBody<ChangePasswordRequest>,
) -> Result<Json<Value>, AppError> {
    ResetPasswordRequest {
        password: req.password.clone(),
        c_password: req.c_password.clone(),
    }
    .validate()?;

    if !verify_password(req.current_password, hr.password_hash.clone()).await? {
        return Err(AppError::Unauthorized("Invalid Credentials".to_string()));
    }

    let password_hash = hash_password(req.password).await?;
    queries::update_hr_password(&state.db, hr.id, &password_hash).await?;
    info!("HR {} changed their password", hr.id);

    Ok(Json(json!({ "msg": "Password updated successfully" })))
}

/// GET|POST /api/v1/auth/hr/logout
pub async fn hr_logout(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: axum::http::HeaderMap,
) -> Result<(CookieJar, Json<Value>), AppError> {
    end_session(&state, &headers, Role::Hr).await?;
    Ok((
        jar.remove(cleared_cookie()),
        Json(json!({ "msg": "Logged out successfully" })),
    ))
}

/// Revokes the presented session token, if it is one. Logging out never fails
/// because the token was missing or already invalid.
async fn end_session(
    state: &AppState,
    headers: &axum::http::HeaderMap,
    role: Role,
) -> Result<(), AppError> {
    let Some(token) = presented_token(headers) else {
        return Ok(());
    };
    match state.tokens.verify(&token, role, Purpose::Session) {
        Ok(claims) => state.sessions.revoke(&claims).await,
        Err(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(password: &str, confirm: &str) -> SignupRequest {
        SignupRequest {
            username: "meera".into(),
            email: "meera@acme.io".into(),
            password: password.into(),
            c_password: confirm.into(),
        }
    }

    #[test]
    fn test_signup_accepts_matching_passwords() {
        assert!(signup("longenough", "longenough").validate().is_ok());
    }

    #[test]
    fn test_signup_rejects_mismatch() {
        match signup("longenough", "different1").validate() {
            Err(AppError::Validation(msg)) => assert_eq!(msg, PASSWORDS_DIFFER),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_signup_collects_all_field_errors() {
        let mut req = signup("short", "short");
        req.username = String::new();
        match req.validate() {
            Err(AppError::InvalidInput { message, errors }) => {
                assert_eq!(message, "Username is required.");
                assert_eq!(errors.len(), 3);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_signin_requires_valid_email() {
        let req = SigninRequest {
            email: "nope".into(),
            password: "longenough".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_missing_fields_deserialize_to_empty() {
        let req: SignupRequest = serde_json::from_str(r#"{"email":"a@b.io"}"#).unwrap();
        assert_eq!(req.username, "");
        assert!(req.validate().is_err());
    }
}
