//! Company onboarding and HR management for a signed-in admin.

use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::queries;
use super::schema::CreateCompanyRequest;
use crate::auth::handlers::SignupRequest;
use crate::auth::password::hash_password;
use crate::auth::{queries as auth_queries, AuthAdmin};
use crate::db::{unique_conflict, violates_constraint};
use crate::errors::AppError;
use crate::jobs::queries::{hydrate_jobs, list_jobs_for_hrs, JobView};
use crate::mail::{send_best_effort, templates};
use crate::models::account::HrSummary;
use crate::models::company::{CompanyRow, CompanySummary};
use crate::routes::JsonBody;
use crate::state::AppState;

const NO_COMPANY: &str = "Admin must be associated with a company";
const COMPANY_ADMIN_KEY: &str = "companies_admin_id_key";

#[derive(Debug, Serialize)]
struct CompanyDetails {
    #[serde(flatten)]
    company: CompanyRow,
    hrs: Vec<HrSummary>,
}

#[derive(Debug, Serialize)]
struct HrJobs {
    #[serde(flatten)]
    hr: HrSummary,
    jobs: Vec<JobView>,
}

/// POST /api/v1/admin/company
pub async fn add_company(
    State(state): State<AppState>,
    AuthAdmin { admin }: AuthAdmin,
    JsonBody(req): JsonBody<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if admin.company_id.is_some() {
        return Err(AppError::Conflict(
            "Admin already has a company associated".to_string(),
        ));
    }

    let company = req.validate()?;
    if queries::company_name_taken(&state.db, &company.name).await? {
        return Err(AppError::Conflict(
            "Company with this name already exists".to_string(),
        ));
    }

    let row = queries::insert_company_for_admin(&state.db, admin.id, &company)
        .await
        .map_err(company_conflict)?;
    info!("Admin {} created company {} ({})", admin.id, row.id, row.name);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "msg": "Company created successfully",
            "company": CompanySummary::from(&row),
        })),
    ))
}

/// A concurrent insert can trip either unique key on `companies`.
fn company_conflict(err: sqlx::Error) -> AppError {
    if violates_constraint(&err, COMPANY_ADMIN_KEY) {
        AppError::Conflict("Admin already has a company associated".to_string())
    } else {
        unique_conflict(err, "Company with this name already exists")
    }
}

/// GET /api/v1/admin/company
pub async fn get_company(
    State(state): State<AppState>,
    AuthAdmin { admin }: AuthAdmin,
) -> Result<Json<Value>, AppError> {
    let company_id = admin
        .company_id
        .ok_or_else(|| AppError::Validation(NO_COMPANY.to_string()))?;
    let company = queries::find_company(&state.db, company_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No company found for this admin".to_string()))?;
    let hrs = queries::list_hrs_for_company(&state.db, company_id).await?;

    Ok(Json(json!({
        "msg": "Company details retrieved successfully",
        "company": CompanyDetails {
            company,
            hrs: hrs.iter().map(HrSummary::from).collect(),
        },
    })))
}

/// POST /api/v1/admin/hr
pub async fn add_hr(
    State(state): State<AppState>,
    AuthAdmin { admin }: AuthAdmin,
    JsonBody(req): JsonBody<SignupRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let company_id = admin
        .company_id
        .ok_or_else(|| AppError::Validation(format!("{NO_COMPANY} to add HR")))?;
    req.validate()?;
    let email = req.email.trim();

    if auth_queries::find_hr_by_email(&state.db, email).await?.is_some() {
        return Err(AppError::Conflict("HR with this email already exists".to_string()));
    }

    let password_hash = hash_password(req.password.clone()).await?;
    let hr = queries::insert_hr(
        &state.db,
        req.username.trim(),
        email,
        &password_hash,
        admin.id,
        company_id,
    )
    .await
    .map_err(|e| unique_conflict(e, "HR with this email already exists"))?;
    info!("Admin {} added HR {} to company {}", admin.id, hr.id, company_id);

    let welcome = templates::hr_welcome(&hr.username, &hr.email, &req.password);
    if !send_best_effort(state.mailer.as_ref(), welcome).await {
        warn!("HR {} was created but the welcome email was not delivered", hr.id);
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "msg": "HR added successfully",
            "hr": HrSummary::from(&hr),
        })),
    ))
}

/// GET /api/v1/admin/hr
pub async fn list_hrs(
    State(state): State<AppState>,
    AuthAdmin { admin }: AuthAdmin,
) -> Result<Json<Value>, AppError> {
    let company_id = admin
        .company_id
        .ok_or_else(|| AppError::Validation(NO_COMPANY.to_string()))?;
    let hrs = queries::list_hrs_for_company(&state.db, company_id).await?;
    let hrs: Vec<HrSummary> = hrs.iter().map(HrSummary::from).collect();

    Ok(Json(json!({
        "msg": "HRs retrieved successfully",
        "count": hrs.len(),
        "hrs": hrs,
    })))
}

/// GET /api/v1/admin/job-postings
///
/// Every HR the admin created, each with their postings and applicants.
pub async fn job_postings(
    State(state): State<AppState>,
    AuthAdmin { admin }: AuthAdmin,
) -> Result<Json<Value>, AppError> {
    let hrs = queries::list_hrs_for_admin(&state.db, admin.id).await?;
    let hr_ids: Vec<i32> = hrs.iter().map(|h| h.id).collect();

    let jobs = list_jobs_for_hrs(&state.db, &hr_ids).await?;
    let mut by_hr: HashMap<i32, Vec<JobView>> = HashMap::new();
    for view in hydrate_jobs(&state.db, jobs, true).await? {
        by_hr.entry(view.job.hr_id).or_default().push(view);
    }

    let hr_jobs: Vec<HrJobs> = hrs
        .iter()
        .map(|hr| HrJobs {
            hr: HrSummary::from(hr),
            jobs: by_hr.remove(&hr.id).unwrap_or_default(),
        })
        .collect();

    Ok(Json(json!({
        "msg": "Job postings retrieved successfully",
        "hrJobs": hr_jobs,
    })))
}
