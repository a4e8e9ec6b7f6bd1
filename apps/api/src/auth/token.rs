use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

pub const INVALID_TOKEN: &str = "Token is not valid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Hr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    Session,
    PasswordReset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id within the table named by `role`.
    pub sub: i32,
    pub role: Role,
    pub purpose: Purpose,
    pub jti: Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Seconds until expiry, floored at one so revocation keys always get a TTL.
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> u64 {
        (self.exp - now.timestamp()).max(1) as u64
    }
}

/// Signs and verifies HS256 tokens with the shared secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    session_ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, session_ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            session_ttl: Duration::hours(session_ttl_hours),
        }
    }

    pub fn issue_session(&self, sub: i32, role: Role) -> Result<(String, Claims), AppError> {
        self.issue_at(Utc::now(), sub, role, Purpose::Session, self.session_ttl)
    }

    pub fn issue_password_reset(&self, sub: i32, role: Role) -> Result<(String, Claims), AppError> {
        self.issue_at(Utc::now(), sub, role, Purpose::PasswordReset, Duration::days(1))
    }

    pub fn issue_at(
        &self,
        now: DateTime<Utc>,
        sub: i32,
        role: Role,
        purpose: Purpose,
        ttl: Duration,
    ) -> Result<(String, Claims), AppError> {
        let claims = Claims {
            sub,
            role,
            purpose,
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to sign token: {e}")))?;
        Ok((token, claims))
    }

    /// Decodes `token` and checks it was issued for `role` and `purpose`.
    pub fn verify(&self, token: &str, role: Role, purpose: Purpose) -> Result<Claims, AppError> {
        let claims = self.decode(token)?;
        if claims.role != role || claims.purpose != purpose {
            return Err(AppError::Unauthorized(INVALID_TOKEN.to_string()));
        }
        Ok(claims)
    }

    /// Signature and expiry check only.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected token: {e}");
                AppError::Unauthorized(INVALID_TOKEN.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> TokenKeys {
        TokenKeys::new("unit-test-secret", 24)
    }

    #[test]
    fn test_session_token_round_trip() {
        let keys = keys();
        let (token, issued) = keys.issue_session(7, Role::Admin).unwrap();
        let claims = keys.verify(&token, Role::Admin, Purpose::Session).unwrap();
        assert_eq!(claims, issued);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_role_mismatch_is_rejected() {
        let keys = keys();
        let (token, _) = keys.issue_session(7, Role::Hr).unwrap();
        let err = keys.verify(&token, Role::Admin, Purpose::Session).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_reset_token_cannot_open_a_session() {
        let keys = keys();
        let (token, _) = keys.issue_password_reset(7, Role::Admin).unwrap();
        assert!(keys.verify(&token, Role::Admin, Purpose::Session).is_err());
        assert!(keys.verify(&token, Role::Admin, Purpose::PasswordReset).is_ok());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = keys();
        let issued_at = Utc::now() - Duration::hours(3);
        let (token, _) = keys
            .issue_at(issued_at, 1, Role::Hr, Purpose::Session, Duration::hours(1))
            .unwrap();
        assert!(keys.decode(&token).is_err());
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let (token, _) = TokenKeys::new("other-secret", 24)
            .issue_session(1, Role::Hr)
            .unwrap();
        assert!(keys().decode(&token).is_err());
        assert!(keys().decode("garbage").is_err());
    }

    #[test]
    fn test_remaining_secs_never_zero() {
        let keys = keys();
        let now = Utc::now();
        let (_, claims) = keys
            .issue_at(now, 1, Role::Hr, Purpose::Session, Duration::seconds(90))
            .unwrap();
        assert_eq!(claims.remaining_secs(now), 90);
        assert_eq!(claims.remaining_secs(now + Duration::hours(1)), 1);
    }
}
