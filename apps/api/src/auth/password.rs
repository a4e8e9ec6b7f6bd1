use anyhow::anyhow;

use crate::errors::AppError;

const BCRYPT_COST: u32 = 10;

/// Hashes off the async runtime; bcrypt is deliberately slow.
pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| anyhow!("Password hashing task failed: {e}"))?
        .map_err(|e| AppError::Internal(anyhow!("Password hashing failed: {e}")))
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| anyhow!("Password verification task failed: {e}"))?
        .map_err(|e| AppError::Internal(anyhow!("Stored password hash is unreadable: {e}")))
}
