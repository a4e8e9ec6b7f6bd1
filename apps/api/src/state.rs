use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::auth::session::SessionStore;
use crate::auth::token::TokenKeys;
use crate::config::Config;
use crate::mail::Mailer;
use crate::screening::ScreeningClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Revoked token ids (logout, used reset links).
    pub sessions: SessionStore,
    pub tokens: TokenKeys,
    pub s3: S3Client,
    pub mailer: Arc<dyn Mailer>,
    /// `None` when `SCREENING_URL` is unset; applications are then left `Applied`.
    pub screening: Option<ScreeningClient>,
    pub config: Config,
}
