use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use subtle::ConstantTimeEq;
use tracing::info;

use super::client::SCREENING_KEY_HEADER;
use super::queries;
use crate::decisions;
use crate::errors::AppError;
use crate::models::candidate::{AiMailResponse, CandidateStatus};
use crate::routes::{parse_uuid, JsonBody};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScreeningResult {
    pub status: String,
    pub ai_analysis: Option<Value>,
    pub ai_mail_response: Option<AiMailResponse>,
}

/// POST /api/v1/screening/results/:id
pub async fn record_result(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    JsonBody(result): JsonBody<ScreeningResult>,
) -> Result<Json<Value>, AppError> {
    authorize(&headers, state.config.screening_api_key.as_deref())?;

    let id = parse_uuid(&id, "Invalid candidate ID format")?;
    let decided = result.status.parse::<CandidateStatus>().map_err(|_| {
        AppError::Validation("Screening status must be shortlisted or rejected".to_string())
    })?;

    let candidate = queries::find_candidate(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;
    let current = candidate
        .current_status()
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
    let transition = decisions::screening_result(current, decided)?;

    let updated = decisions::screening_stored(
        queries::store_result(
            &state.db,
            id,
            transition,
            result.ai_analysis.as_ref(),
            result.ai_mail_response.as_ref(),
        )
        .await?,
    )?;
    info!("Screening marked candidate {} as {}", updated.id, updated.status);

    Ok(Json(json!({
        "success": true,
        "data": { "id": updated.id, "status": updated.status },
    })))
}

fn authorize(headers: &HeaderMap, expected: Option<&str>) -> Result<(), AppError> {
    let expected = expected.ok_or_else(|| {
        AppError::Forbidden("Screening callback is not configured".to_string())
    })?;
    let presented = headers
        .get(SCREENING_KEY_HEADER)
        .map(|v| v.as_bytes())
        .unwrap_or_default();
    if !bool::from(presented.ct_eq(expected.as_bytes())) {
        return Err(AppError::Unauthorized("Invalid screening key".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_callback_key_checks() {
        let mut headers = HeaderMap::new();
        assert!(matches!(authorize(&headers, None), Err(AppError::Forbidden(_))));
        assert!(matches!(
            authorize(&headers, Some("k")),
            Err(AppError::Unauthorized(_))
        ));
        headers.insert(SCREENING_KEY_HEADER, HeaderValue::from_static("wrong"));
        assert!(authorize(&headers, Some("k")).is_err());
        headers.insert(SCREENING_KEY_HEADER, HeaderValue::from_static("k"));
        assert!(authorize(&headers, Some("k")).is_ok());
    }

    #[test]
    fn test_callback_key_must_match_in_full() {
        let mut headers = HeaderMap::new();
        for presented in ["secret", "secret-key-2", "", "SECRET-KEY"] {
            headers.insert(SCREENING_KEY_HEADER, HeaderValue::from_str(presented).unwrap());
            assert!(
                matches!(authorize(&headers, Some("secret-key")), Err(AppError::Unauthorized(_))),
                "key {presented:?}"
            );
        }
        headers.insert(SCREENING_KEY_HEADER, HeaderValue::from_static("secret-key"));
        assert!(authorize(&headers, Some("secret-key")).is_ok());
    }

    #[test]
    fn test_result_body_shape() {
        let result: ScreeningResult = serde_json::from_value(json!({
            "status": "shortlisted",
            "aiAnalysis": { "matching_score": 82, "ai_selection_email": "strong Rust background" },
            "aiMailResponse": {
                "to": "asha@example.com",
                "subject": "Interview invitation",
                "body": "We'd like to talk.",
                "companyName": "Acme Robotics"
            }
        }))
        .unwrap();
        assert_eq!(result.status.parse::<CandidateStatus>(), Ok(CandidateStatus::Shortlisted));
        assert_eq!(
            result.ai_mail_response.unwrap().company_name.as_deref(),
            Some("Acme Robotics")
        );
    }
}
