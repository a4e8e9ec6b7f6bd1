use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use super::queries::{self, hydrate_jobs};
use super::schema::{CreateJobRequest, StatusUpdateRequest};
use crate::auth::AuthHr;
use crate::errors::AppError;
use crate::models::job::JobStatus;
use crate::routes::{parse_uuid, JsonBody};
use crate::state::AppState;

/// POST /api/v1/job
pub async fn create_job(
    State(state): State<AppState>,
    AuthHr { hr }: AuthHr,
    JsonBody(req): JsonBody<CreateJobRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let new_job = req.validate()?;
    let job = queries::insert_job(&state.db, &new_job, hr.company_id, hr.id).await?;
    info!("HR {} posted job {} ({})", hr.id, job.id, job.title);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Job created successfully", "job": job })),
    ))
}

/// GET /api/v1/job
pub async fn list_jobs(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let jobs = queries::list_jobs(&state.db).await?;
    let views = hydrate_jobs(&state.db, jobs, false).await?;
    Ok(Json(json!({
        "success": true,
        "count": views.len(),
        "data": views,
    })))
}

/// GET /api/v1/job/:id
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_uuid(&id, "Invalid job ID format")?;
    let job = queries::find_job(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    let view = hydrate_jobs(&state.db, vec![job], false)
        .await?
        .pop()
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    Ok(Json(json!({ "success": true, "data": view })))
}

/// PATCH /api/v1/job/:id/status
pub async fn update_job_status(
    State(state): State<AppState>,
    AuthHr { hr }: AuthHr,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<StatusUpdateRequest>,
) -> Result<Json<Value>, AppError> {
    let id = parse_uuid(&id, "Invalid job ID format")?;
    let status = req
        .status
        .parse::<JobStatus>()
        .map_err(|_| AppError::Validation("Status must be either Open or Closed".to_string()))?;

    let job = queries::set_job_status(&state.db, id, hr.id, status)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    info!("HR {} set job {} to {}", hr.id, job.id, status);

    Ok(Json(json!({ "success": true, "data": job })))
}
