use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::queries;
use super::schema::ApplicationRequest;
use crate::admin::queries::find_company;
use crate::db::unique_conflict;
use crate::errors::AppError;
use crate::jobs::queries::find_job;
use crate::mail::send_best_effort;
use crate::mail::templates::{self, CandidateContext};
use crate::models::job::JobRow;
use crate::routes::{parse_uuid, JsonBody};
use crate::state::AppState;

/// POST /api/v1/candidate/apply/:jobId
pub async fn apply(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    JsonBody(req): JsonBody<ApplicationRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let job_id = parse_uuid(&job_id, "Invalid job ID format")?;
    let job = find_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    let company = find_company(&state.db, job.company_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

    ensure_accepting(&job, Utc::now())?;

    let application = req.validate()?;
    let already_applied = queries::has_applied(&state.db, job.id, &application.email).await?;
    ensure_first_application(already_applied)?;

    // The (job_id, email) key catches a duplicate racing past the check above.
    let receipt = queries::insert_application(&state.db, &application, job.id, job.hr_id)
        .await
        .map_err(|e| unique_conflict(e, "Duplicate application detected"))?;
    info!("Candidate {} applied to job {}", receipt.id, job.id);

    let ctx = CandidateContext {
        email: &receipt.email,
        full_name: format!("{} {}", receipt.first_name, receipt.last_name),
        job_title: &job.title,
        company: &company.name,
    };
    if !send_best_effort(state.mailer.as_ref(), templates::application_received(&ctx)).await {
        warn!("Application {} stored but confirmation email failed", receipt.id);
    }

    if let Some(screening) = state.screening.clone() {
        let email = receipt.email.clone();
        let candidate_id = receipt.id;
        tokio::spawn(async move {
            if let Err(e) = screening.request_screening(&email, candidate_id).await {
                warn!("Screening request for candidate {candidate_id} failed: {e}");
            }
        });
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Application submitted successfully",
            "application": receipt,
        })),
    ))
}

fn ensure_accepting(job: &JobRow, now: DateTime<Utc>) -> Result<(), AppError> {
    if job.accepts_applications(now) {
        Ok(())
    } else {
        Err(AppError::Conflict(
            "This job is no longer accepting applications".to_string(),
        ))
    }
}

fn ensure_first_application(already_applied: bool) -> Result<(), AppError> {
    if already_applied {
        Err(AppError::Conflict(
            "You have already applied for this job".to_string(),
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::db::fake::db_error;
    use crate::models::job::sample_job;

    fn conflict_message(result: Result<(), AppError>) -> String {
        match result {
            Err(AppError::Conflict(message)) => message,
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_closed_job_is_a_conflict() {
        let now = Utc::now();
        assert_eq!(
            conflict_message(ensure_accepting(&sample_job("Closed", None), now)),
            "This job is no longer accepting applications"
        );
    }

    #[test]
    fn test_expired_job_is_a_conflict() {
        let now = Utc::now();
        let expired = sample_job("Open", Some(now - Duration::minutes(1)));
        assert!(matches!(
            ensure_accepting(&expired, now),
            Err(AppError::Conflict(_))
        ));
        let open = sample_job("Open", Some(now + Duration::days(1)));
        assert!(ensure_accepting(&open, now).is_ok());
    }

    #[test]
    fn test_second_application_is_rejected() {
        assert!(ensure_first_application(false).is_ok());
        assert_eq!(
            conflict_message(ensure_first_application(true)),
            "You have already applied for this job"
        );
    }

    #[test]
    fn test_racing_duplicate_insert_is_a_conflict() {
        let err = db_error("23505", Some("candidates_job_id_email_key"));
        match unique_conflict(err, "Duplicate application detected") {
            AppError::Conflict(message) => assert_eq!(message, "Duplicate application detected"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
