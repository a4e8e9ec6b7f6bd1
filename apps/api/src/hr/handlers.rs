//! The HR review desk: postings, candidate decisions, and dashboard numbers.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use super::queries::{self, CandidateInCompany};
use crate::auth::AuthHr;
use crate::decisions::{self, Confirmation, Override};
use crate::errors::AppError;
use crate::jobs::queries::{hydrate_jobs, list_jobs_for_hrs};
use crate::mail::templates::{self, CandidateContext};
use crate::mail::{send_best_effort, OutgoingMail};
use crate::models::account::HrRow;
use crate::models::candidate::{CandidateRow, CandidateStatus};
use crate::routes::{parse_uuid, JsonBody};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverrideRequest {
    pub hr_reason: Option<String>,
}

/// GET /api/v1/hr/all-jobs
pub async fn all_jobs(
    State(state): State<AppState>,
    AuthHr { hr }: AuthHr,
) -> Result<Json<Value>, AppError> {
    let jobs = list_jobs_for_hrs(&state.db, &[hr.id]).await?;
    let views = hydrate_jobs(&state.db, jobs, true).await?;
    Ok(Json(json!({
        "success": true,
        "count": views.len(),
        "data": views,
    })))
}

/// POST /api/v1/hr/confirm/:id
pub async fn confirm_decision(
    State(state): State<AppState>,
    AuthHr { hr }: AuthHr,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let found = load_candidate(&state, &hr, &id).await?;
    let candidate = &found.candidate;
    let kind = decisions::confirmation_for(current_status(candidate)?)?;
    let ai_mail = candidate.ai_mail().ok_or_else(|| {
        AppError::Conflict("Candidate has no AI mail response to confirm".to_string())
    })?;

    let to = non_blank(&ai_mail.to).unwrap_or(candidate.email.as_str());
    let company = ai_mail
        .company_name
        .as_deref()
        .and_then(non_blank)
        .unwrap_or(found.company_name.as_str());
    let full_name = candidate.full_name();
    let mail = match kind {
        Confirmation::Selection => templates::selection_confirmation(
            to,
            non_blank(&ai_mail.subject).unwrap_or("You've Been Selected for the Next Round"),
            &full_name,
            company,
            &ai_mail.body,
        ),
        Confirmation::Rejection => templates::rejection_confirmation(
            to,
            non_blank(&ai_mail.subject).unwrap_or("Update on Your Application Status"),
            &full_name,
            company,
            &ai_mail.body,
        ),
    };

    send_required(&state, mail).await?;
    info!("HR {} confirmed {:?} for candidate {}", hr.id, kind, candidate.id);
    Ok(Json(json!({ "message": "Confirmation email sent successfully." })))
}

/// POST /api/v1/hr/override/reject/:id
pub async fn override_to_reject(
    state: State<AppState>,
    auth: AuthHr,
    id: Path<String>,
    body: JsonBody<OverrideRequest>,
) -> Result<Json<Value>, AppError> {
    apply_override(state, auth, id, body, Override::ToReject).await
}

/// POST /api/v1/hr/override/shortlist/:id
pub async fn override_to_shortlist(
    state: State<AppState>,
    auth: AuthHr,
    id: Path<String>,
    body: JsonBody<OverrideRequest>,
) -> Result<Json<Value>, AppError> {
    apply_override(state, auth, id, body, Override::ToShortlist).await
}

async fn apply_override(
    State(state): State<AppState>,
    AuthHr { hr }: AuthHr,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<OverrideRequest>,
    kind: Override,
) -> Result<Json<Value>, AppError> {
    let reason = decisions::require_reason(req.hr_reason.as_deref())?;
    let found = load_candidate(&state, &hr, &id).await?;
    let candidate = &found.candidate;

    let transition = kind.check(current_status(candidate)?)?;
    kind.applied(queries::apply_transition(&state.db, candidate.id, transition).await?)?;
    info!(
        "HR {} moved candidate {} from {} to {}",
        hr.id, candidate.id, transition.from, transition.to
    );

    let ctx = context(&found);
    let mail = match kind {
        Override::ToReject => {
            let ai_body = candidate.ai_mail().map(|m| m.body);
            templates::override_to_reject(&ctx, ai_body.as_deref(), reason)
        }
        Override::ToShortlist => templates::override_to_shortlist(&ctx, reason),
    };
    let email_sent = send_best_effort(state.mailer.as_ref(), mail).await;
    if !email_sent {
        warn!("Status of candidate {} changed but the email was not delivered", candidate.id);
    }

    Ok(Json(json!({
        "message": format!("Candidate status updated to {}.", transition.to),
        "emailSent": email_sent,
    })))
}

/// GET /api/v1/hr/stats
pub async fn stats(
    State(state): State<AppState>,
    AuthHr { hr }: AuthHr,
) -> Result<Json<Value>, AppError> {
    let stats = queries::stats_for_hr(&state.db, hr.id).await?;
    Ok(Json(json!({ "success": true, "data": stats })))
}

/// GET /api/v1/hr/jobs/status-distribution
pub async fn job_status_distribution(
    State(state): State<AppState>,
    AuthHr { hr }: AuthHr,
) -> Result<Json<Value>, AppError> {
    let data = queries::job_status_distribution(&state.db, hr.id).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

/// GET /api/v1/hr/candidates/status-distribution
pub async fn candidate_status_distribution(
    State(state): State<AppState>,
    AuthHr { hr }: AuthHr,
) -> Result<Json<Value>, AppError> {
    let data = queries::candidate_status_distribution(&state.db, hr.id).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

/// POST /api/v1/hr/send-email/acceptance/:id
pub async fn send_ai_acceptance(
    State(state): State<AppState>,
    AuthHr { hr }: AuthHr,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let found = load_candidate(&state, &hr, &id).await?;
    let reason = found
        .candidate
        .ai_analysis_field("ai_selection_email")
        .ok_or_else(|| AppError::Conflict("No AI selection reason for this candidate".to_string()))?;

    send_required(&state, templates::ai_acceptance(&context(&found), &reason)).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Shortlisting email sent to the candidate.",
    })))
}

/// POST /api/v1/hr/send-email/reject/:id
pub async fn send_ai_rejection(
    State(state): State<AppState>,
    AuthHr { hr }: AuthHr,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let found = load_candidate(&state, &hr, &id).await?;
    let reason = found
        .candidate
        .ai_analysis_field("ai_rejection_email")
        .ok_or_else(|| AppError::Conflict("No AI rejection reason for this candidate".to_string()))?;

    send_required(&state, templates::ai_rejection(&context(&found), &reason)).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Rejection email sent to the candidate.",
    })))
}

async fn load_candidate(
    state: &AppState,
    hr: &HrRow,
    raw_id: &str,
) -> Result<CandidateInCompany, AppError> {
    let id: Uuid = parse_uuid(raw_id, "Invalid candidate ID format")?;
    queries::find_candidate_in_company(&state.db, id, hr.company_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))
}

fn current_status(candidate: &CandidateRow) -> Result<CandidateStatus, AppError> {
    candidate
        .current_status()
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))
}

fn context(found: &CandidateInCompany) -> CandidateContext<'_> {
    CandidateContext {
        email: &found.candidate.email,
        full_name: found.candidate.full_name(),
        job_title: &found.job_title,
        company: &found.company_name,
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Sends a message the endpoint exists to deliver; failure is the caller's error.
async fn send_required(state: &AppState, mail: OutgoingMail) -> Result<(), AppError> {
    state
        .mailer
        .send(mail)
        .await
        .map_err(|e| AppError::Mail(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  hi "), Some("hi"));
        assert_eq!(non_blank("   "), None);
    }

    #[test]
    fn test_override_body_accepts_missing_reason() {
        let req: OverrideRequest = serde_json::from_str("{}").unwrap();
        assert!(decisions::require_reason(req.hr_reason.as_deref()).is_err());
        let req: OverrideRequest = serde_json::from_str(r#"{"hrReason":"great demo"}"#).unwrap();
        assert_eq!(req.hr_reason.as_deref(), Some("great demo"));
    }
}
