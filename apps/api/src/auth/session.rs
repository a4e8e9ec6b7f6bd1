use chrono::Utc;
use redis::Client as RedisClient;
use tracing::info;
use uuid::Uuid;

use super::token::Claims;
use crate::errors::AppError;

/// Redis-backed deny-list of token ids. Entries expire with the token itself.
#[derive(Clone)]
pub struct SessionStore {
    client: RedisClient,
}

impl SessionStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub async fn revoke(&self, claims: &Claims) -> Result<(), AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("SET")
            .arg(revocation_key(claims.jti))
            .arg(1)
            .arg("EX")
            .arg(claims.remaining_secs(Utc::now()))
            .query_async::<_, ()>(&mut conn)
            .await?;
        info!("Revoked {:?} token {} for {:?} {}", claims.purpose, claims.jti, claims.role, claims.sub);
        Ok(())
    }

    pub async fn is_revoked(&self, jti: Uuid) -> Result<bool, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let exists: bool = redis::cmd("EXISTS")
            .arg(revocation_key(jti))
            .query_async(&mut conn)
            .await?;
        Ok(exists)
    }
}

fn revocation_key(jti: Uuid) -> String {
    format!("auth:revoked:{jti}")
}
