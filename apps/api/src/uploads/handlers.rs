use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{is_allowed_content_type, object_key, sanitize_folder};
use crate::errors::AppError;
use crate::routes::JsonBody;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignUploadRequest {
    pub file_type: String,
    pub folder: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUpload {
    pub url: String,
    pub key: String,
    pub public_url: String,
}

/// POST /api/v1/uploads/sign
pub async fn sign_upload(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SignUploadRequest>,
) -> Result<Json<SignedUpload>, AppError> {
    let file_type = req.file_type.trim();
    if file_type.is_empty() {
        return Err(AppError::Validation("Invalid file type provided".to_string()));
    }
    if !is_allowed_content_type(file_type) {
        return Err(AppError::Validation("File type not allowed".to_string()));
    }

    let now = Utc::now();
    let key = object_key(&sanitize_folder(req.folder.as_deref()), now);
    let expires = PresigningConfig::expires_in(Duration::from_secs(state.config.upload_url_ttl_secs))
        .map_err(|e| AppError::S3(e.to_string()))?;

    let presigned = state
        .s3
        .put_object()
        .bucket(&state.config.s3_bucket)
        .key(&key)
        .content_type(file_type)
        .presigned(expires)
        .await
        .map_err(|e| AppError::S3(e.to_string()))?;
    debug!("Signed upload for {key} ({file_type})");

    Ok(Json(SignedUpload {
        url: presigned.uri().to_string(),
        public_url: state.config.public_object_url(&key),
        key,
    }))
}
