//! Presigned S3 PUT URLs so browsers upload resumes and attachments directly.

pub mod handlers;

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const DEFAULT_FOLDER: &str = "uploads";

pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
    "text/plain",
    "text/csv",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

pub fn is_allowed_content_type(content_type: &str) -> bool {
    ALLOWED_CONTENT_TYPES.contains(&content_type)
}

/// Keeps `[A-Za-z0-9_-]`; anything that ends up empty becomes [`DEFAULT_FOLDER`].
pub fn sanitize_folder(folder: Option<&str>) -> String {
    let cleaned: String = folder
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        DEFAULT_FOLDER.to_string()
    } else {
        cleaned
    }
}

/// `{folder}/{unix_millis}-{16 hex chars}`
pub fn object_key(folder: &str, now: DateTime<Utc>) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{folder}/{}-{}", now.timestamp_millis(), &random[..16])
}
